mod app;
mod dom;
mod logging;

pub use app::run_app;
