//! JS-facing round driver
//!
//! The page owns one `WasmRound` per match. It calls `frame` from its
//! requestAnimationFrame loop and `submitPose` / `submitKeypoints` whenever
//! pose inference resolves, then reads `snapshot()` and `drainEvents()` to
//! draw and play sounds.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::combat::{GameEvent, Round};
use crate::config::GameConfig;
use crate::error::PoseError;
use crate::pose::PoseSample;

use super::landmarks::{decode_flat, decode_keypoints};

/// Event plus the sound the page should play for it
#[derive(Serialize)]
struct EventRecord {
    event: GameEvent,
    sound: Option<&'static str>,
}

#[wasm_bindgen]
pub struct WasmRound {
    round: Round<SmallRng>,
    /// Timestamp of the previous animation frame
    last_frame: Option<f64>,
}

#[wasm_bindgen]
impl WasmRound {
    /// Round with the shipped configuration
    #[wasm_bindgen(constructor)]
    pub fn new(character: &str) -> WasmRound {
        Self::build(&GameConfig::default(), character)
    }

    /// Round with a (partial) JSON configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(character: &str, json: &str) -> Result<WasmRound, JsValue> {
        let config = GameConfig::from_json(json)?;
        Ok(Self::build(&config, character))
    }

    /// Advance from a requestAnimationFrame timestamp. The first frame only
    /// sets the reference point.
    pub fn frame(&mut self, timestamp: f64) {
        let delta = self.last_frame.map_or(0.0, |last| timestamp - last);
        self.last_frame = Some(timestamp);
        self.round.tick(delta);
    }

    /// Advance by an explicit delta (ms)
    pub fn tick(&mut self, delta_ms: f64) {
        self.round.tick(delta_ms);
    }

    /// Flat Float32Array of 17 × (x, y, score). Returns the classified label,
    /// or undefined if the payload was malformed.
    #[wasm_bindgen(js_name = submitPose)]
    pub fn submit_pose(&mut self, data: &[f32]) -> Option<String> {
        self.submit(decode_flat(data))
    }

    /// Estimator keypoint list `[{name, x, y, score}, ...]`
    #[wasm_bindgen(js_name = submitKeypoints)]
    pub fn submit_keypoints(&mut self, keypoints: JsValue) -> Option<String> {
        self.submit(decode_keypoints(keypoints))
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.round.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, each with its sound key
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        let records: Vec<EventRecord> = self
            .round
            .drain_events()
            .into_iter()
            .map(|event| EventRecord { event, sound: event.sound_key() })
            .collect();
        serde_wasm_bindgen::to_value(&records).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.round.running()
    }

    /// "player" or "opponent" once the round is over
    #[wasm_bindgen(getter)]
    pub fn winner(&self) -> Option<String> {
        self.round.winner().map(|side| side.as_str().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn difficulty(&self) -> String {
        self.round.difficulty().as_str().to_string()
    }

    #[wasm_bindgen(js_name = moveOpponent)]
    pub fn move_opponent(&mut self, distance: f32) {
        self.round.move_opponent(distance);
    }

    /// Stop the round without a winner
    pub fn abort(&mut self) {
        self.round.abort();
    }
}

impl WasmRound {
    fn build(config: &GameConfig, character: &str) -> WasmRound {
        WasmRound {
            round: Round::new(config, character, SmallRng::from_os_rng()),
            last_frame: None,
        }
    }

    fn submit(&mut self, pose: Result<PoseSample, PoseError>) -> Option<String> {
        match pose {
            Ok(pose) => Some(self.round.submit_pose(&pose).as_str().to_string()),
            Err(err) => {
                log::warn!("dropping pose payload: {}", err);
                None
            }
        }
    }
}
