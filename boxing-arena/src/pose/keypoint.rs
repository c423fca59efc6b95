//! Keypoint storage for one pose sample
//!
//! A pose sample is whatever the external estimator produced for one camera
//! frame: named 2D points in pixel space, each with a confidence score.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PoseError;

// ============================================================================
// BODY PARTS (MoveNet - 17 total)
// ============================================================================

/// Number of keypoints in a full MoveNet pose
pub const KEYPOINT_COUNT: usize = 17;

/// Floats per keypoint in a flat buffer (x, y, score)
pub const VALUES_PER_KEYPOINT: usize = 3;

/// Named body landmark, in MoveNet output order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    /// All parts in MoveNet order
    pub const ALL: [BodyPart; KEYPOINT_COUNT] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    /// Index in a MoveNet keypoint array
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Estimator-side name (`left_wrist`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEye => "left_eye",
            BodyPart::RightEye => "right_eye",
            BodyPart::LeftEar => "left_ear",
            BodyPart::RightEar => "right_ear",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftElbow => "left_elbow",
            BodyPart::RightElbow => "right_elbow",
            BodyPart::LeftWrist => "left_wrist",
            BodyPart::RightWrist => "right_wrist",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
            BodyPart::LeftKnee => "left_knee",
            BodyPart::RightKnee => "right_knee",
            BodyPart::LeftAnkle => "left_ankle",
            BodyPart::RightAnkle => "right_ankle",
        }
    }
}

impl FromStr for BodyPart {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|part| part.as_str() == s).ok_or(())
    }
}

// ============================================================================
// KEYPOINT DATA STRUCTURES
// ============================================================================

/// A single named 2D landmark (pixel coordinates, smaller y = higher)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: BodyPart,
    pub x: f32,
    pub y: f32,
    /// Estimator confidence in [0, 1]
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(name: BodyPart, x: f32, y: f32, confidence: f32) -> Self {
        Self { name, x, y, confidence }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// All keypoints for one instant. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseSample {
    keypoints: Vec<Keypoint>,
}

impl PoseSample {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Decode a flat `[x, y, score] × 17` buffer in MoveNet order
    pub fn from_flat(data: &[f32]) -> Result<Self, PoseError> {
        let expected = KEYPOINT_COUNT * VALUES_PER_KEYPOINT;
        if data.len() != expected {
            return Err(PoseError::WrongLength { got: data.len(), expected });
        }

        let keypoints = data
            .chunks_exact(VALUES_PER_KEYPOINT)
            .zip(BodyPart::ALL)
            .map(|(values, part)| Keypoint::new(part, values[0], values[1], values[2]))
            .collect();

        Ok(Self { keypoints })
    }

    /// First keypoint with the given name, if the estimator reported one
    pub fn get(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == part)
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

impl FromIterator<Keypoint> for PoseSample {
    fn from_iter<I: IntoIterator<Item = Keypoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
