//! Boxing Arena - pose-driven two-fighter boxing core
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod bridge;
pub mod classifier;
pub mod combat;
pub mod config;
pub mod error;
pub mod physics;
pub mod pose;

use wasm_bindgen::prelude::*;

pub use bridge::WasmRound;

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console.
/// Accepts trace, debug, info, warn or error; anything else means info.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    wasm_logger::init(wasm_logger::Config::new(parse_level(level)));
    log::info!("boxing-arena {} logging at {}", env!("CARGO_PKG_VERSION"), level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_level(level: &str) -> log::Level {
    level.parse().unwrap_or(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), log::Level::Debug);
        assert_eq!(parse_level("WARN"), log::Level::Warn);
        assert_eq!(parse_level("loud"), log::Level::Info);
    }
}
