use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::timecode;

/// Application configuration module
/// This module holds the tunables of the conversion pipeline: output canvas,
/// registered style sizes, the stylesheet lookup tables and the bumper offset.
/// Every field has a serde default, so a partial JSON file is enough.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Conversion settings
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings consumed by the conversion pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConversionConfig {
    // @field: Output canvas width
    #[serde(default = "default_play_res_x")]
    pub play_res_x: u32,

    // @field: Output canvas height
    #[serde(default = "default_play_res_y")]
    pub play_res_y: u32,

    /// Cues with a `line:` hint below this percentage use the Top style
    #[serde(default = "default_top_line_threshold")]
    pub top_line_threshold: u32,

    // @field: Font size of the Default style
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    // @field: Font size of the Top style
    #[serde(default = "default_top_font_size")]
    pub top_font_size: f64,

    // @field: Font size of the Song style
    #[serde(default = "default_song_font_size")]
    pub song_font_size: f64,

    // @field: Shadow depth of the Caption style
    #[serde(default = "default_caption_shadow")]
    pub caption_shadow: f64,

    /// Typeface the renderer falls back to; `font-family` rules naming it are ignored
    #[serde(default = "default_font_name")]
    pub default_font_name: String,

    /// Length of the intro bumper, as a cue timestamp
    #[serde(default = "default_bumper_offset")]
    pub bumper_offset: String,

    /// Stylesheet colour values mapped to ASS colour codes
    #[serde(default = "default_colors")]
    pub colors: HashMap<String, String>,

    /// Stylesheet colour values treated as "no colour override"
    #[serde(default = "default_placeholder_colors")]
    pub default_colors: Vec<String>,

    /// Player DOM selector fragments removed from stylesheet selectors
    #[serde(default = "default_strip_prefixes")]
    pub strip_prefixes: Vec<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
            top_line_threshold: default_top_line_threshold(),
            default_font_size: default_font_size(),
            top_font_size: default_top_font_size(),
            song_font_size: default_song_font_size(),
            caption_shadow: default_caption_shadow(),
            default_font_name: default_font_name(),
            bumper_offset: default_bumper_offset(),
            colors: default_colors(),
            default_colors: default_placeholder_colors(),
            strip_prefixes: default_strip_prefixes(),
        }
    }
}

impl ConversionConfig {
    /// Bumper offset in milliseconds
    pub fn bumper_offset_ms(&self) -> Result<i64> {
        timecode::parse_timestamp(&self.bumper_offset)
            .map_err(|e| anyhow!("Invalid bumper offset: {}", e))
    }

    // @returns: ASS colour code for a stylesheet colour value
    pub fn map_color<'a>(&'a self, color: &'a str) -> &'a str {
        self.colors.get(color).map(String::as_str).unwrap_or(color)
    }

    // @checks: Colour is one of the placeholder defaults
    pub fn is_default_color(&self, color: &str) -> bool {
        self.default_colors.iter().any(|c| c.eq_ignore_ascii_case(color))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_play_res_x() -> u32 {
    640
}

fn default_play_res_y() -> u32 {
    360
}

fn default_top_line_threshold() -> u32 {
    71
}

fn default_font_size() -> f64 {
    22.0
}

fn default_top_font_size() -> f64 {
    20.0
}

fn default_song_font_size() -> f64 {
    20.0
}

fn default_caption_shadow() -> f64 {
    0.5
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_bumper_offset() -> String {
    "00:00:04.963".to_string()
}

fn default_colors() -> HashMap<String, String> {
    // ASS colours are BGR, so the stylesheet's yellow becomes 00FFFF
    [
        ("white", "FFFF"),
        ("yellow", "FFFFFF"),
        ("FFFFFF", "FFFF"),
        ("FFFF00", "FFFF"),
        ("HFFFF00", "FFFF"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_placeholder_colors() -> Vec<String> {
    vec!["white".to_string(), "yellow".to_string(), "FFFFFF".to_string()]
}

fn default_strip_prefixes() -> Vec<String> {
    [
        ".rmp-container>",
        "rmp-container>",
        ".rmp-content>.",
        "rmp-cc-area>",
        ".rmp-cc-container>",
        ".rmp-cc-display>",
        ".rmp-cc-cue",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Config {
    /// Load the configuration from a JSON file, falling back to defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let conversion = &self.conversion;

        if conversion.play_res_x == 0 || conversion.play_res_y == 0 {
            return Err(anyhow!(
                "Output resolution must be non-zero, got {}x{}",
                conversion.play_res_x,
                conversion.play_res_y
            ));
        }

        for (name, size) in [
            ("default_font_size", conversion.default_font_size),
            ("top_font_size", conversion.top_font_size),
            ("song_font_size", conversion.song_font_size),
        ] {
            if size.is_nan() || size <= 0.0 {
                return Err(anyhow!("{} must be positive, got {}", name, size));
            }
        }

        conversion.bumper_offset_ms()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            conversion: ConversionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
