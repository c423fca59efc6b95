//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod round_handle;

pub use landmarks::{decode_flat, decode_keypoints, from_records, KeypointRecord};
pub use round_handle::WasmRound;
