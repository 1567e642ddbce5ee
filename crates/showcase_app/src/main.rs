#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(err) = platform::run_app() {
        showcase_logging::showcase_error!("showcase_app failed to start: {:#}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    showcase_logging::initialize(showcase_logging::LogDestination::Terminal);
    showcase_logging::showcase_warn!("showcase_app runs in the browser; build it for wasm32.");
}
