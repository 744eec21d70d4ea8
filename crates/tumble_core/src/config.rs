//! Animation configuration: sampling ranges, population size, ramp window, colors.
//!
//! Every option is optional. A JSON document uses the option names verbatim
//! (`numberOfCubes`, `maxEdgeLength`, ...) and anything missing falls back to
//! the defaults below. Ranges are never rejected for being inverted; sampling
//! collapses them to their minimum instead (see [`crate::spawner::sample_range`]).

use serde::{Deserialize, Deserializer};

pub const DEFAULT_BACKGROUND_COLOR: Rgb = Rgb::new(0x26, 0x26, 0x26);
pub const DEFAULT_EDGE_COLOR: Rgb = Rgb::new(0x59, 0xc0, 0xbb);

/// An opaque sRGB color parsed from `#rrggbb` / `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(raw: &str) -> Result<Self, String> {
        let digits = raw.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color '{raw}': expected hex digits"));
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|e| format!("{raw}: {e}"));
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            n => Err(format!(
                "Invalid color '{raw}': expected 3 or 6 hex digits, found {n}"
            )),
        }
    }

    /// Channels scaled to `[0, 1]`, still sRGB-encoded.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Host-container styling. The core never reads it; the app maps it onto the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowStyle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CubeConfig {
    pub background_color: Rgb,
    pub edge_color: Rgb,
    /// Ramp-up window in milliseconds.
    pub initial_duration: u64,
    pub max_edge_length: f32,
    pub min_edge_length: f32,
    pub max_falling_speed: f32,
    pub min_falling_speed: f32,
    pub max_rotation_speed: f32,
    pub min_rotation_speed: f32,
    pub number_of_cubes: u32,
    pub style: Option<WindowStyle>,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR,
            edge_color: DEFAULT_EDGE_COLOR,
            initial_duration: 3000,
            max_edge_length: 500.0,
            min_edge_length: 100.0,
            max_falling_speed: 10.0,
            min_falling_speed: 5.0,
            max_rotation_speed: 0.03,
            min_rotation_speed: 0.01,
            number_of_cubes: 5,
            style: None,
        }
    }
}

impl CubeConfig {
    /// Options whose change invalidates the render context itself.
    pub fn requires_remount(&self, previous: &CubeConfig) -> bool {
        self.background_color != previous.background_color
            || self.initial_duration != previous.initial_duration
    }
}

pub fn parse_config(raw: &str) -> Result<CubeConfig, String> {
    let config: CubeConfig =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &CubeConfig) -> Result<(), String> {
    let values = [
        ("maxEdgeLength", config.max_edge_length),
        ("minEdgeLength", config.min_edge_length),
        ("maxFallingSpeed", config.max_falling_speed),
        ("minFallingSpeed", config.min_falling_speed),
        ("maxRotationSpeed", config.max_rotation_speed),
        ("minRotationSpeed", config.min_rotation_speed),
    ];
    for (name, value) in values {
        if !value.is_finite() {
            return Err(format!("Config validation failed: {name} must be finite"));
        }
    }
    let ranges = [
        ("EdgeLength", config.min_edge_length, config.max_edge_length),
        ("FallingSpeed", config.min_falling_speed, config.max_falling_speed),
        ("RotationSpeed", config.min_rotation_speed, config.max_rotation_speed),
    ];
    for (name, min, max) in ranges {
        if !(max - min).is_finite() {
            return Err(format!(
                "Config validation failed: max{name} - min{name} overflows ({max} - {min})"
            ));
        }
    }
    if config.min_edge_length < 0.0 || config.min_falling_speed < 0.0 {
        return Err(
            "Config validation failed: edge lengths and falling speeds must not be negative"
                .to_string(),
        );
    }
    if config.max_edge_length < config.min_edge_length {
        log::warn!(
            "maxEdgeLength {} is below minEdgeLength {}; every cube will use the minimum",
            config.max_edge_length,
            config.min_edge_length
        );
    }
    Ok(())
}
