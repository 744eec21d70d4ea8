//! Config file loading and mtime-based hot reload.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tumble_core::{parse_config, CubeConfig};
use tumble_platform::PlatformConfig;

pub const DEFAULT_CONFIG_PATH: &str = "assets/tumble.json";
pub const MAX_CUBES: u32 = 64;

pub fn load_config_from_path(path: &Path) -> Result<CubeConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    parse_config(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

/// Start-up load. A missing file means defaults; a broken one is reported and
/// also falls back to defaults so the window still opens.
pub fn load_or_default(path: &Path) -> CubeConfig {
    match fs::metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("No config at {}; using defaults", path.display());
            return CubeConfig::default();
        }
        _ => {}
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::error!("{e}; using defaults");
            CubeConfig::default()
        }
    }
}

pub fn platform_config(config: &CubeConfig) -> PlatformConfig {
    let base = PlatformConfig::default();
    match &config.style {
        Some(style) => base.with_overrides(style.title.as_deref(), style.width, style.height),
        None => base,
    }
}

/// `numberOfCubes` after a keyboard step, kept within `0..=MAX_CUBES`.
pub fn step_cube_count(current: u32, delta: i32) -> u32 {
    (i64::from(current) + i64::from(delta)).clamp(0, i64::from(MAX_CUBES)) as u32
}

pub struct ConfigWatcher {
    path: PathBuf,
    last_seen_modified: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> Self {
        let last_seen_modified = modified_time(&path);
        Self {
            path,
            last_seen_modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once per observed modification, including the file first appearing.
    pub fn should_reload(&mut self) -> bool {
        let current = modified_time(&self.path);
        match (self.last_seen_modified, current) {
            (Some(old), Some(now)) if now > old => {
                self.last_seen_modified = Some(now);
                true
            }
            (None, Some(now)) => {
                self.last_seen_modified = Some(now);
                true
            }
            _ => false,
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}
