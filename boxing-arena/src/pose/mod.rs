//! Pose module - keypoint data handed over by the pose estimator
//!
//! Re-exports only. All logic in submodules.

mod keypoint;

pub use keypoint::{BodyPart, Keypoint, PoseSample, KEYPOINT_COUNT, VALUES_PER_KEYPOINT};
