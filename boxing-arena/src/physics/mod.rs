//! Physics module - arm geometry and keypoint gating
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod confidence_gate;

pub use angles::{joint_angle, elbow_angle};
pub use confidence_gate::{ConfidenceGate, ArmKeypoints, REQUIRED_PARTS};
