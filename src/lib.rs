use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub use color::{colorize, MetricKind, MetricSample, Rgb};
pub mod color;
pub mod compare;
pub mod tui;
