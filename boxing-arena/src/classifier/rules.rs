//! Geometric pose classification
//!
//! Heuristic rules over the arm keypoints, no trained model. Stateless:
//! all history lives in the debouncer.

use crate::config::ClassifierConfig;
use crate::physics::{elbow_angle, ArmKeypoints, ConfidenceGate};
use crate::pose::{Keypoint, PoseSample};

use super::ActionLabel;

/// Pose classifier with priority-ordered rules
#[derive(Clone, Debug)]
pub struct PoseClassifier {
    gate: ConfidenceGate,
    /// Elbow angle above which an arm counts as extended
    punch_angle_deg: f32,
    /// Shoulder spread below which the torso counts as turned away
    dodge_shoulder_px: f32,
}

impl PoseClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            gate: ConfidenceGate::new(config.min_confidence),
            punch_angle_deg: config.punch_angle_deg,
            dodge_shoulder_px: config.dodge_shoulder_px,
        }
    }

    /// Classify one pose sample
    ///
    /// Rules, first match wins:
    /// 1. right punch: right wrist above right elbow, arm extended
    /// 2. left punch: same test on the left arm
    /// 3. block: both wrists above their elbows
    /// 4. dodge: shoulders closer than the dodge threshold
    /// 5. idle
    ///
    /// Missing or low-confidence keypoints classify as idle.
    pub fn classify(&self, pose: &PoseSample) -> ActionLabel {
        let Some(arms) = self.gate.apply(pose) else {
            return ActionLabel::Idle;
        };

        if self.is_punching(&arms.right_shoulder, &arms.right_elbow, &arms.right_wrist) {
            return ActionLabel::RightPunch;
        }

        if self.is_punching(&arms.left_shoulder, &arms.left_elbow, &arms.left_wrist) {
            return ActionLabel::LeftPunch;
        }

        if Self::is_blocking(&arms) {
            return ActionLabel::Block;
        }

        if self.is_dodging(&arms) {
            return ActionLabel::Dodge;
        }

        ActionLabel::Idle
    }

    /// Wrist above elbow and the elbow opened past the punch angle.
    /// An undefined angle (collapsed bone) does not count.
    fn is_punching(&self, shoulder: &Keypoint, elbow: &Keypoint, wrist: &Keypoint) -> bool {
        if !is_above(wrist, elbow) {
            return false;
        }
        elbow_angle(shoulder.position(), elbow.position(), wrist.position())
            .is_some_and(|angle| angle > self.punch_angle_deg)
    }

    fn is_blocking(arms: &ArmKeypoints) -> bool {
        is_above(&arms.left_wrist, &arms.left_elbow) && is_above(&arms.right_wrist, &arms.right_elbow)
    }

    fn is_dodging(&self, arms: &ArmKeypoints) -> bool {
        (arms.right_shoulder.x - arms.left_shoulder.x).abs() < self.dodge_shoulder_px
    }
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// Screen coordinates: smaller y is higher
fn is_above(a: &Keypoint, b: &Keypoint) -> bool {
    a.y < b.y
}
