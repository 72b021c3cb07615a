use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::host::Axis;

/// Prefix of attribute-style override keys, e.g. `data-slidereel-replay-strategy`
const ATTRIBUTE_PREFIX: &str = "data-slidereel-";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default)]
    pub autoplay: AutoplayConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for the log file written while the TUI runs
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

/// What happens when navigation runs past the first or last slide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayStrategy {
    /// Stop at the edges
    #[default]
    None,
    /// Keep going; slides repeat endlessly
    Loop,
    /// Jump back to the other end
    Rewind,
}

impl ReplayStrategy {
    /// Next strategy in a fixed cycle
    pub fn next(self) -> Self {
        match self {
            ReplayStrategy::None => ReplayStrategy::Loop,
            ReplayStrategy::Loop => ReplayStrategy::Rewind,
            ReplayStrategy::Rewind => ReplayStrategy::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReplayStrategy::None => "none",
            ReplayStrategy::Loop => "loop",
            ReplayStrategy::Rewind => "rewind",
        }
    }
}

impl fmt::Display for ReplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplayStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ReplayStrategy::None),
            "loop" => Ok(ReplayStrategy::Loop),
            "rewind" => Ok(ReplayStrategy::Rewind),
            other => Err(crate::Error::Config(format!(
                "Unknown replay strategy '{}' (expected none, loop or rewind)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Replay strategy: "none", "loop" or "rewind"
    #[serde(default)]
    pub replay_strategy: ReplayStrategy,
    /// Slide shown first
    #[serde(default)]
    pub initial_slide_index: i64,
    /// Layout axis
    #[serde(default = "default_orientation")]
    pub orientation: Axis,
    /// Right-to-left text direction; unset means "ask the host"
    #[serde(default)]
    pub rtl: Option<bool>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            replay_strategy: ReplayStrategy::default(),
            initial_slide_index: 0,
            orientation: default_orientation(),
            rtl: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Translate drag gestures into slide movement
    #[serde(default)]
    pub enabled: bool,
    /// Drag distance that completes a swipe (0 = never)
    #[serde(default)]
    pub transition_threshold: f64,
    /// Factor applied to drag movement before projecting it
    #[serde(default = "default_distance_multiplier")]
    pub distance_multiplier: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            transition_threshold: 0.0,
            distance_multiplier: default_distance_multiplier(),
        }
    }
}

/// Behaviour of automatic advance while the pointer hovers the slider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverStrategy {
    #[default]
    None,
    Pause,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoplayConfig {
    /// Seconds between automatic advances (0 or less = disabled)
    #[serde(default)]
    pub interval_secs: f64,
    #[serde(default)]
    pub hover_strategy: HoverStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the status bar below the carousel
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
    /// Show a row of slide indicators below the carousel
    #[serde(default = "default_true")]
    pub show_indicators: bool,
    /// Strip animation
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_status_bar: default_true(),
            show_indicators: default_true(),
            animation: AnimationConfig::default(),
        }
    }
}

/// Easing curve used by the strip animator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Animate the strip between offsets
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Length of one transition
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Redraw rate while a transition runs
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-n>" (Ctrl+n), "<S-Tab>" (Shift+Tab), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Switch to the next slide
    #[serde(default = "default_key_next_slide")]
    pub next_slide: String,
    /// Switch to the previous slide
    #[serde(default = "default_key_prev_slide")]
    pub prev_slide: String,
    /// Switch to the first slide
    #[serde(default = "default_key_first_slide")]
    pub first_slide: String,
    /// Switch to the last slide
    #[serde(default = "default_key_last_slide")]
    pub last_slide: String,
    /// Flip the text direction
    #[serde(default = "default_key_toggle_rtl")]
    pub toggle_rtl: String,
    /// Cycle none -> loop -> rewind
    #[serde(default = "default_key_cycle_replay")]
    pub cycle_replay: String,
    /// Hide the current slide
    #[serde(default = "default_key_hide_slide")]
    pub hide_slide: String,
    /// Make every slide visible again
    #[serde(default = "default_key_show_all")]
    pub show_all: String,
    /// Start or stop automatic advance
    #[serde(default = "default_key_toggle_autoplay")]
    pub toggle_autoplay: String,
    /// Re-read the deck from disk
    #[serde(default = "default_key_reload")]
    pub reload: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_slide: default_key_next_slide(),
            prev_slide: default_key_prev_slide(),
            first_slide: default_key_first_slide(),
            last_slide: default_key_last_slide(),
            toggle_rtl: default_key_toggle_rtl(),
            cycle_replay: default_key_cycle_replay(),
            hide_slide: default_key_hide_slide(),
            show_all: default_key_show_all(),
            toggle_autoplay: default_key_toggle_autoplay(),
            reload: default_key_reload(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_slide() -> String { "l".to_string() }
fn default_key_prev_slide() -> String { "h".to_string() }
fn default_key_first_slide() -> String { "gg".to_string() }
fn default_key_last_slide() -> String { "G".to_string() }
fn default_key_toggle_rtl() -> String { "d".to_string() }
fn default_key_cycle_replay() -> String { "m".to_string() }
fn default_key_hide_slide() -> String { "x".to_string() }
fn default_key_show_all() -> String { "u".to_string() }
fn default_key_toggle_autoplay() -> String { "<Space>".to_string() }
fn default_key_reload() -> String { "r".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidereel")
}

fn default_orientation() -> Axis {
    Axis::Horizontal
}

fn default_distance_multiplier() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_duration() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// `data-slidereel-swipe-transition-threshold` -> `swipeTransitionThreshold`
fn normalize_key(key: &str) -> String {
    let key = key.trim();
    let Some(stripped) = key.strip_prefix(ATTRIBUTE_PREFIX) else {
        return key.to_string();
    };

    let mut normalized = String::with_capacity(stripped.len());
    let mut upper_next = false;
    for c in stripped.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            normalized.extend(c.to_uppercase());
            upper_next = false;
        } else {
            normalized.push(c);
        }
    }
    normalized
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> crate::Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| crate::Error::Config(format!("Invalid value '{}' for '{}'", value, key)))
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slidereel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slidereel")
            .join("config.toml")
    }

    /// Get the log directory (with tilde expansion)
    pub fn log_dir(&self) -> PathBuf {
        expand_tilde(&self.general.log_dir)
    }

    /// Apply a single `key=value` style override
    ///
    /// Keys are the slider option names (`replayStrategy`, `swipe`,
    /// `timedTransitionInterval`, ...) or their attribute spelling
    /// (`data-slidereel-replay-strategy`).
    pub fn apply_override(&mut self, key: &str, value: &str) -> crate::Result<()> {
        let name = normalize_key(key);
        let trimmed = value.trim();

        match name.as_str() {
            "replayStrategy" => self.slider.replay_strategy = trimmed.parse()?,
            "initialSlideIndex" => self.slider.initial_slide_index = parse_value(key, value)?,
            "orientation" => {
                self.slider.orientation = match trimmed {
                    "horizontal" => Axis::Horizontal,
                    "vertical" => Axis::Vertical,
                    _ => {
                        return Err(crate::Error::Config(format!(
                            "Invalid value '{}' for '{}'",
                            value, key
                        )))
                    }
                }
            }
            "rtl" => self.slider.rtl = Some(parse_value(key, value)?),
            // Anything but "true" leaves swiping off
            "swipe" => self.swipe.enabled = trimmed == "true",
            "swipeTransitionThreshold" => {
                self.swipe.transition_threshold = parse_value(key, value)?
            }
            "swipeDistanceMultiplier" => self.swipe.distance_multiplier = parse_value(key, value)?,
            "timedTransitionInterval" => self.autoplay.interval_secs = parse_value(key, value)?,
            "timedTransitionHoverStrategy" => {
                self.autoplay.hover_strategy = if trimmed == "pause" {
                    HoverStrategy::Pause
                } else {
                    HoverStrategy::None
                }
            }
            "logLevel" => self.general.log_level = trimmed.to_string(),
            _ => {
                return Err(crate::Error::Config(format!(
                    "Unknown configuration key '{}'",
                    key
                )))
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.slider.replay_strategy, ReplayStrategy::None);
        assert_eq!(config.slider.orientation, Axis::Horizontal);
        assert_eq!(config.slider.rtl, None);
        assert!(!config.swipe.enabled);
        assert_eq!(config.swipe.distance_multiplier, 1.0);
        assert_eq!(config.autoplay.interval_secs, 0.0);
        assert!(config.ui.animation.smooth_enabled);
        assert_eq!(config.ui.animation.easing, EasingType::Cubic);
        assert_eq!(config.keymap.next_slide, "l");
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [slider]
            replay_strategy = "loop"
            orientation = "vertical"

            [ui.animation]
            easing = "ease_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.slider.replay_strategy, ReplayStrategy::Loop);
        assert_eq!(config.slider.orientation, Axis::Vertical);
        assert_eq!(config.ui.animation.easing, EasingType::EaseOut);
        assert_eq!(config.ui.animation.animation_fps, 60);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.ui.show_indicators);
    }

    #[test]
    fn test_invalid_toml() {
        let result = AppConfig::from_toml("[slider]\nreplay_strategy = \"bounce\"");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = AppConfig::default();
        config.slider.replay_strategy = ReplayStrategy::Rewind;
        config.autoplay.hover_strategy = HoverStrategy::Pause;

        let parsed = AppConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.slider.replay_strategy, ReplayStrategy::Rewind);
        assert_eq!(parsed.autoplay.hover_strategy, HoverStrategy::Pause);
    }

    #[test]
    fn test_override_option_names() {
        let mut config = AppConfig::default();
        config.apply_override("replayStrategy", "rewind").unwrap();
        config.apply_override("initialSlideIndex", "2").unwrap();
        config.apply_override("swipe", "true").unwrap();
        config.apply_override("timedTransitionInterval", "1.5").unwrap();
        config.apply_override("timedTransitionHoverStrategy", "pause").unwrap();

        assert_eq!(config.slider.replay_strategy, ReplayStrategy::Rewind);
        assert_eq!(config.slider.initial_slide_index, 2);
        assert!(config.swipe.enabled);
        assert_eq!(config.autoplay.interval_secs, 1.5);
        assert_eq!(config.autoplay.hover_strategy, HoverStrategy::Pause);
    }

    #[test]
    fn test_override_attribute_names() {
        let mut config = AppConfig::default();
        config
            .apply_override("data-slidereel-swipe-transition-threshold", "40")
            .unwrap();
        config
            .apply_override("data-slidereel-swipe-distance-multiplier", "0.5")
            .unwrap();

        assert_eq!(config.swipe.transition_threshold, 40.0);
        assert_eq!(config.swipe.distance_multiplier, 0.5);
    }

    #[test]
    fn test_swipe_needs_literal_true() {
        let mut config = AppConfig::default();
        config.apply_override("swipe", "yes").unwrap();
        assert!(!config.swipe.enabled);
    }

    #[test]
    fn test_override_errors() {
        let mut config = AppConfig::default();
        assert!(config.apply_override("bogus", "1").is_err());
        assert!(config.apply_override("replayStrategy", "bounce").is_err());
        assert!(config.apply_override("initialSlideIndex", "two").is_err());
        assert!(config.apply_override("orientation", "diagonal").is_err());
    }

    #[test]
    fn test_replay_cycle() {
        let start = ReplayStrategy::None;
        assert_eq!(start.next(), ReplayStrategy::Loop);
        assert_eq!(start.next().next(), ReplayStrategy::Rewind);
        assert_eq!(start.next().next().next(), start);
    }
}
