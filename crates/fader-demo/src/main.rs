//! Scroll-driven cross-fade between three 3-D scenes.
//!
//! Wheel to move between scenes, drag the slider (top right) to scrub the
//! blend, `H` toggles the panel, `Escape` quits.

mod assets;
mod config;
mod fade;
mod fling;
mod panel;
mod scenes;
mod sketch;

use anyhow::Result;
use winit::dpi::LogicalSize;

use fader_engine::device::GpuInit;
use fader_engine::logging::{init_logging, LoggingConfig};
use fader_engine::window::{Runtime, RuntimeConfig};

use crate::config::DemoConfig;
use crate::sketch::Sketch;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::from_env();
    log::info!(
        "assets from {}, fling filter {}",
        config.asset_dir.display(),
        if config.fling_filter { "on" } else { "off" }
    );

    let runtime = RuntimeConfig {
        title: "fader".to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
    };

    log_failure(Runtime::run(runtime, GpuInit::default(), Sketch::new(config)))
}

/// Logs a run failure before it is returned from `main`.
fn log_failure(result: Result<()>) -> Result<()> {
    result.inspect_err(|e| log::error!("fader exited with error: {e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_passed_through() {
        let err = log_failure(Err(anyhow::anyhow!("no adapter").context("failed to create GPU")))
            .unwrap_err();
        assert_eq!(format!("{err:#}"), "failed to create GPU: no adapter");
    }

    #[test]
    fn success_is_passed_through() {
        assert!(log_failure(Ok(())).is_ok());
    }
}
