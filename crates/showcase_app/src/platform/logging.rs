//! Platform logging initialization for showcase_app.
//!
//! Routes log records to the browser console at the matching severity.

use log::{Level, LevelFilter};
use wasm_bindgen::JsValue;
use web_sys::console;

pub fn initialize() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    showcase_logging::initialize_with_sink(level, write_console);
}

fn write_console(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&line),
        Level::Warn => console::warn_1(&line),
        Level::Info => console::info_1(&line),
        Level::Debug | Level::Trace => console::debug_1(&line),
    }
}
