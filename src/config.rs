use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::document::PageBox;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub interaction: InteractionConfig,
    pub pacer: PacerConfig,
    pub reading_bar: ReadingBarConfig,
    pub history: HistoryConfig,
    pub view: ViewConfig,
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Width/height (or line length) at or below which a new annotation is discarded.
    pub degenerate_tolerance: f64,
    /// Text selections may extend onto following or preceding pages.
    pub continuous_selection: bool,
    pub clamp_box: PageBox,
    /// Half the side of a resize handle square, in points.
    pub handle_size: f64,
    /// Half the thickness of the grab band on reading bar edges.
    pub reading_bar_edge: f64,
    pub free_text_width: f64,
    pub free_text_height: f64,
    pub anchored_note_size: f64,
    pub text_padding: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            degenerate_tolerance: 0.0,
            continuous_selection: true,
            clamp_box: PageBox::Crop,
            handle_size: 4.0,
            reading_bar_edge: 3.0,
            free_text_width: 128.0,
            free_text_height: 32.0,
            anchored_note_size: 16.0,
            text_padding: 4.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacerConfig {
    /// Points per second.
    pub speed: f64,
    pub min_speed: f64,
    /// Scroll distance covered by one tick, in points.
    pub step: f64,
    pub wait_time_ms: u64,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            speed: 12.0,
            min_speed: 0.5,
            step: 1.0,
            wait_time_ms: 1_000,
        }
    }
}

impl PacerConfig {
    pub fn wait_time(&self) -> Duration {
        Duration::from_millis(self.wait_time_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReadingBarConfig {
    pub lines: usize,
}

impl Default for ReadingBarConfig {
    fn default() -> Self {
        Self { lines: 1 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub page_gap: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 1_000.0,
            page_gap: 8.0,
            min_scale: 0.1,
            max_scale: 16.0,
            zoom_step: 1.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|err| {
            AppError::invalid_argument(format!("failed to parse config {}: {err}", path.display()))
        })
    }

    pub fn from_toml_str(raw: &str) -> AppResult<Self> {
        let parsed = toml::from_str::<Self>(raw)
            .map_err(|source| AppError::invalid_argument(source.to_string()))?;
        Ok(parsed.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let interaction = &mut self.interaction;
        interaction.degenerate_tolerance = finite_at_least(interaction.degenerate_tolerance, 0.0, 0.0);
        interaction.handle_size = finite_at_least(
            interaction.handle_size,
            0.5,
            defaults.interaction.handle_size,
        );
        interaction.reading_bar_edge = finite_at_least(
            interaction.reading_bar_edge,
            0.5,
            defaults.interaction.reading_bar_edge,
        );
        interaction.free_text_width = finite_at_least(
            interaction.free_text_width,
            1.0,
            defaults.interaction.free_text_width,
        );
        interaction.free_text_height = finite_at_least(
            interaction.free_text_height,
            1.0,
            defaults.interaction.free_text_height,
        );
        interaction.anchored_note_size = finite_at_least(
            interaction.anchored_note_size,
            1.0,
            defaults.interaction.anchored_note_size,
        );
        interaction.text_padding = finite_at_least(interaction.text_padding, 0.0, 0.0);

        let pacer = &mut self.pacer;
        pacer.min_speed = finite_at_least(pacer.min_speed, f64::EPSILON, defaults.pacer.min_speed);
        pacer.speed = finite_at_least(pacer.speed, pacer.min_speed, pacer.min_speed);
        pacer.step = positive_or(pacer.step, defaults.pacer.step);

        self.reading_bar.lines = self.reading_bar.lines.max(1);
        self.history.capacity = self.history.capacity.max(1);

        let view = &mut self.view;
        view.viewport_width = finite_at_least(view.viewport_width, 1.0, defaults.view.viewport_width);
        view.viewport_height =
            finite_at_least(view.viewport_height, 1.0, defaults.view.viewport_height);
        view.page_gap = finite_at_least(view.page_gap, 0.0, 0.0);
        view.min_scale = finite_at_least(view.min_scale, 0.01, defaults.view.min_scale);
        if !view.max_scale.is_finite() || view.max_scale < view.min_scale {
            view.max_scale = defaults.view.max_scale.max(view.min_scale);
        }
        if !view.zoom_step.is_finite() || view.zoom_step <= 1.0 {
            view.zoom_step = defaults.view.zoom_step;
        }
        self
    }
}

/// Non-finite values fall back to `fallback`; finite ones are raised to `min`.
fn finite_at_least(value: f64, min: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.max(min)
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("PVA_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("pva").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("pva")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("pva").join("config.toml"));
    }
    None
}
