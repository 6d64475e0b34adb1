// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional; missing values fall back to [`defaults`] and
//! out-of-range values are clamped by the domain newtypes when the config
//! is turned into engine settings.
//!
//! # Examples
//!
//! ```no_run
//! use sticker_sheet::config::{self, Config};
//!
//! let mut config = config::load(None).unwrap_or_default();
//! config.navigation.cooldown_frames = Some(6);
//! config::save(&config, None).expect("Failed to save config");
//!
//! let navigation = config.navigation_settings();
//! assert_eq!(navigation.cooldown.value(), 6);
//! ```

pub mod defaults;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::grid::GridSettings;
use crate::application::navigation::NavigationSettings;
use crate::domain::grid::{crop_scale_bounds, LayoutMode, PaperSize};
use crate::domain::tuning::{
    BoostMultiplier, Deadzone, EventCapacity, FrameCount, MoveSpeed, PerpendicularWeight,
};
use crate::error::Result;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StickerSheet";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "STICKER_SHEET_CONFIG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub mode: Option<LayoutMode>,
    pub paper: Option<PaperSize>,
    pub settle_frames: Option<u32>,
    pub max_crop_scale: Option<f32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            mode: Some(LayoutMode::default()),
            paper: Some(PaperSize::default()),
            settle_frames: Some(defaults::DEFAULT_SETTLE_FRAMES),
            max_crop_scale: Some(defaults::DEFAULT_MAX_CROP_SCALE),
        }
    }
}

/// `[navigation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub perpendicular_weight: Option<f32>,
    pub menu_deadzone: Option<f32>,
    pub grab_deadzone: Option<f32>,
    pub cooldown_frames: Option<u32>,
    pub move_speed: Option<f32>,
    pub boost: Option<f32>,
    pub viewer_throttle_frames: Option<u32>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            perpendicular_weight: Some(defaults::DEFAULT_PERPENDICULAR_WEIGHT),
            menu_deadzone: Some(defaults::DEFAULT_MENU_DEADZONE),
            grab_deadzone: Some(defaults::DEFAULT_GRAB_DEADZONE),
            cooldown_frames: Some(defaults::DEFAULT_COOLDOWN_FRAMES),
            move_speed: Some(defaults::DEFAULT_MOVE_SPEED),
            boost: Some(defaults::DEFAULT_BOOST),
            viewer_throttle_frames: Some(defaults::DEFAULT_VIEWER_THROTTLE_FRAMES),
        }
    }
}

/// `[diagnostics]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub event_capacity: Option<usize>,
    /// `tracing` filter directive, e.g. `"sticker_sheet=debug"`.
    pub log_filter: Option<String>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            event_capacity: Some(defaults::DEFAULT_EVENT_CAPACITY),
            log_filter: None,
        }
    }
}

impl Config {
    /// Grid engine settings, clamped to their valid ranges.
    #[must_use]
    pub fn grid_settings(&self) -> GridSettings {
        let grid = &self.grid;
        GridSettings {
            initial_mode: grid.mode.unwrap_or_default(),
            paper: grid.paper.unwrap_or_default(),
            settle_frames: FrameCount::new(
                grid.settle_frames.unwrap_or(defaults::DEFAULT_SETTLE_FRAMES),
            ),
            max_crop_scale: clamp_finite(
                grid.max_crop_scale,
                defaults::DEFAULT_MAX_CROP_SCALE,
                crop_scale_bounds::MIN,
                crop_scale_bounds::MAX,
            ),
        }
    }

    /// Navigation engine settings, clamped to their valid ranges.
    #[must_use]
    pub fn navigation_settings(&self) -> NavigationSettings {
        let nav = &self.navigation;
        NavigationSettings {
            perpendicular_weight: PerpendicularWeight::new(
                nav.perpendicular_weight
                    .unwrap_or(defaults::DEFAULT_PERPENDICULAR_WEIGHT),
            ),
            menu_deadzone: Deadzone::new(
                nav.menu_deadzone.unwrap_or(defaults::DEFAULT_MENU_DEADZONE),
            ),
            grab_deadzone: Deadzone::new(
                nav.grab_deadzone.unwrap_or(defaults::DEFAULT_GRAB_DEADZONE),
            ),
            cooldown: FrameCount::new(
                nav.cooldown_frames
                    .unwrap_or(defaults::DEFAULT_COOLDOWN_FRAMES),
            ),
            move_speed: MoveSpeed::new(nav.move_speed.unwrap_or(defaults::DEFAULT_MOVE_SPEED)),
            boost: BoostMultiplier::new(nav.boost.unwrap_or(defaults::DEFAULT_BOOST)),
            viewer_throttle: FrameCount::new(
                nav.viewer_throttle_frames
                    .unwrap_or(defaults::DEFAULT_VIEWER_THROTTLE_FRAMES),
            ),
        }
    }

    #[must_use]
    pub fn event_capacity(&self) -> EventCapacity {
        EventCapacity::new(
            self.diagnostics
                .event_capacity
                .unwrap_or(defaults::DEFAULT_EVENT_CAPACITY),
        )
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.diagnostics
            .log_filter
            .as_deref()
            .unwrap_or(defaults::DEFAULT_LOG_FILTER)
    }
}

fn clamp_finite(value: Option<f32>, default: f32, min: f32, max: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

/// Directory holding `settings.toml`.
///
/// Resolution order: `override_dir`, then `$STICKER_SHEET_CONFIG_DIR`, then
/// the platform config directory.
#[must_use]
pub fn config_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    config_dir(override_dir).map(|dir| dir.join(CONFIG_FILE))
}

pub fn load(override_dir: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_path(override_dir) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config, override_dir: Option<&Path>) -> Result<()> {
    if let Some(path) = config_path(override_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. A file that does not parse yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
