//! Confidence Gate - first check of the classifier
//!
//! When any required keypoint is missing or below the confidence threshold,
//! the pose is not trusted and the classifier falls back to idle.

use crate::pose::{BodyPart, Keypoint, PoseSample};

/// Keypoints every arm rule reads
pub const REQUIRED_PARTS: [BodyPart; 6] = [
    BodyPart::LeftWrist,
    BodyPart::RightWrist,
    BodyPart::LeftElbow,
    BodyPart::RightElbow,
    BodyPart::LeftShoulder,
    BodyPart::RightShoulder,
];

/// The six arm keypoints, once they passed the gate
#[derive(Clone, Copy, Debug)]
pub struct ArmKeypoints {
    pub left_wrist: Keypoint,
    pub right_wrist: Keypoint,
    pub left_elbow: Keypoint,
    pub right_elbow: Keypoint,
    pub left_shoulder: Keypoint,
    pub right_shoulder: Keypoint,
}

/// Confidence gate over the required arm keypoints
#[derive(Clone, Debug)]
pub struct ConfidenceGate {
    /// Minimum confidence to accept a keypoint
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Set confidence threshold
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    fn accept(&self, pose: &PoseSample, part: BodyPart) -> Option<Keypoint> {
        pose.get(part)
            .filter(|kp| kp.confidence >= self.threshold)
            .copied()
    }

    /// Apply confidence gating
    ///
    /// Returns the arm keypoints only if every one of them is present and
    /// confident enough. NaN confidences never pass.
    pub fn apply(&self, pose: &PoseSample) -> Option<ArmKeypoints> {
        Some(ArmKeypoints {
            left_wrist: self.accept(pose, BodyPart::LeftWrist)?,
            right_wrist: self.accept(pose, BodyPart::RightWrist)?,
            left_elbow: self.accept(pose, BodyPart::LeftElbow)?,
            right_elbow: self.accept(pose, BodyPart::RightElbow)?,
            left_shoulder: self.accept(pose, BodyPart::LeftShoulder)?,
            right_shoulder: self.accept(pose, BodyPart::RightShoulder)?,
        })
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(0.3)
    }
}
