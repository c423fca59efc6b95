//! Pose intake from JavaScript
//!
//! Accepts either a flat Float32Array (17 × x, y, score in MoveNet order) or
//! the estimator's own `[{name, x, y, score}, ...]` list.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::PoseError;
use crate::pose::{BodyPart, Keypoint, PoseSample};

/// One keypoint as the estimator hands it over
#[derive(Clone, Debug, Deserialize)]
pub struct KeypointRecord {
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Missing scores count as no confidence at all
    #[serde(default)]
    pub score: f32,
}

/// Flat Float32Array → pose
pub fn decode_flat(data: &[f32]) -> Result<PoseSample, PoseError> {
    PoseSample::from_flat(data)
}

/// JS keypoint object list → pose
pub fn decode_keypoints(value: JsValue) -> Result<PoseSample, PoseError> {
    let records: Vec<KeypointRecord> =
        serde_wasm_bindgen::from_value(value).map_err(|e| PoseError::Decode(e.to_string()))?;
    Ok(from_records(records))
}

/// Build a pose from named records. Unknown names are skipped.
pub fn from_records(records: Vec<KeypointRecord>) -> PoseSample {
    records
        .into_iter()
        .filter_map(|record| match record.name.parse::<BodyPart>() {
            Ok(part) => Some(Keypoint::new(part, record.x, record.y, record.score)),
            Err(()) => {
                log::trace!("skipping unknown keypoint {:?}", record.name);
                None
            }
        })
        .collect()
}
