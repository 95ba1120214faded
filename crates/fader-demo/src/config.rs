use std::path::PathBuf;

use fader_engine::paint::Color;

use crate::fade::DEFAULT_SCROLL_SCALE;

/// Demo tunables. Defaults reproduce the reference look; a few can be
/// overridden from the environment.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Directory holding the background and matcap images.
    pub asset_dir: PathBuf,

    /// Wheel pixels per unit of scroll scalar.
    pub scroll_scale: f32,

    pub instances_per_scene: usize,

    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_z: f32,

    /// Animation time units per second.
    pub time_rate: f32,

    /// Radians of Y rotation per unit of animation time.
    pub rotation_speed: f32,

    /// Drop inertial wheel events before they reach the fade state.
    pub fling_filter: bool,

    /// Fixed RNG seed for instance scattering; random when `None`.
    pub seed: Option<u64>,

    pub clear_color: Color,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            scroll_scale: DEFAULT_SCROLL_SCALE,
            instances_per_scene: 300,
            fov_y_degrees: 70.0,
            near: 0.001,
            far: 1000.0,
            camera_z: 2.0,
            time_rate: 3.0,
            rotation_speed: 0.1,
            fling_filter: false,
            seed: None,
            clear_color: Color::from_srgb_hex(0xeeeeee),
        }
    }
}

impl DemoConfig {
    pub const ENV_ASSETS: &'static str = "FADER_ASSETS";
    pub const ENV_SEED: &'static str = "FADER_SEED";
    pub const ENV_FLING: &'static str = "FADER_FLING";

    /// Defaults overridden by `FADER_ASSETS`, `FADER_SEED` and `FADER_FLING`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// Malformed values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(Self::ENV_ASSETS).filter(|s| !s.trim().is_empty()) {
            config.asset_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(Self::ENV_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(e) => log::warn!("ignoring {}={raw:?}: {e}", Self::ENV_SEED),
            }
        }

        if let Some(raw) = lookup(Self::ENV_FLING) {
            match parse_flag(&raw) {
                Some(on) => config.fling_filter = on,
                None => log::warn!("ignoring {}={raw:?}: expected a boolean", Self::ENV_FLING),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
