//! Layer configuration
//!
//! Raw inputs arrive from the host page (data attributes, form fields) as
//! untyped strings and are validated field by field; anything invalid falls
//! back to a documented default with a warning. Persisted separately from
//! motion state in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// A configuration value that failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("value is not numeric: {0:?}")]
    NotNumeric(String),
    #[error("dimension must be a positive finite number, got {0}")]
    BadDimension(f32),
    #[error("opacity must be within 0.0..=1.0, got {0}")]
    BadOpacity(f32),
    #[error("speed must be a positive finite number, got {0}")]
    BadSpeed(f32),
    #[error("coordinate must be finite, got {0}")]
    BadCoordinate(f32),
}

/// Untyped configuration exactly as supplied by the host, before validation
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub color: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub label: Option<String>,
    pub opacity: Option<String>,
    pub speed: Option<String>,
    pub start_x: Option<String>,
    pub start_y: Option<String>,
}

impl RawConfig {
    /// True when the host supplied nothing at all
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.label.is_none()
            && self.opacity.is_none()
            && self.speed.is_none()
            && self.start_x.is_none()
            && self.start_y.is_none()
    }
}

/// Validated layer configuration, read once when a run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Background color token, passed through to the presenter unvalidated
    pub color: String,
    pub width: f32,
    pub height: f32,
    /// Text shown inside the layer
    pub label: String,
    pub opacity: f32,
    /// Horizontal speed magnitude in pixels per frame
    pub speed: f32,
    /// Starting top-left corner
    pub start_x: f32,
    pub start_y: f32,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            label: DEFAULT_LABEL.to_string(),
            opacity: DEFAULT_OPACITY,
            speed: DEFAULT_SPEED,
            start_x: 0.0,
            start_y: 0.0,
        }
    }
}

fn parse_number(s: &str) -> Result<f32, InvalidConfig> {
    s.trim()
        .parse()
        .map_err(|_| InvalidConfig::NotNumeric(s.to_string()))
}

fn parse_dimension(s: &str) -> Result<f32, InvalidConfig> {
    let value = parse_number(s)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidConfig::BadDimension(value))
    }
}

fn parse_opacity(s: &str) -> Result<f32, InvalidConfig> {
    let value = parse_number(s)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidConfig::BadOpacity(value))
    }
}

fn parse_speed(s: &str) -> Result<f32, InvalidConfig> {
    let value = parse_number(s)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidConfig::BadSpeed(value))
    }
}

fn parse_coordinate(s: &str) -> Result<f32, InvalidConfig> {
    let value = parse_number(s)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidConfig::BadCoordinate(value))
    }
}

/// Take a parsed field or its default; absent fields default silently,
/// invalid ones are logged.
fn field_or(parsed: Option<Result<f32, InvalidConfig>>, name: &str, default: f32) -> f32 {
    match parsed {
        None => default,
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            log::warn!("invalid {name} ({err}), falling back to {default}");
            default
        }
    }
}

impl LayerConfig {
    /// Build a config from raw host inputs. Recovery from bad values is
    /// local substitution of the documented defaults; never fatal.
    pub fn from_raw(raw: &RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            color: raw.color.clone().unwrap_or(defaults.color),
            width: field_or(
                raw.width.as_deref().map(parse_dimension),
                "width",
                defaults.width,
            ),
            height: field_or(
                raw.height.as_deref().map(parse_dimension),
                "height",
                defaults.height,
            ),
            label: raw.label.clone().unwrap_or(defaults.label),
            opacity: field_or(
                raw.opacity.as_deref().map(parse_opacity),
                "opacity",
                defaults.opacity,
            ),
            speed: field_or(
                raw.speed.as_deref().map(parse_speed),
                "speed",
                defaults.speed,
            ),
            start_x: field_or(
                raw.start_x.as_deref().map(parse_coordinate),
                "start-x",
                defaults.start_x,
            ),
            start_y: field_or(
                raw.start_y.as_deref().map(parse_coordinate),
                "start-y",
                defaults.start_y,
            ),
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "bounce_layer_config";

    /// Load the last-used config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded layer config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default layer config");
        Self::default()
    }

    /// Save the config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Layer config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_raw_yields_defaults() {
        let raw = RawConfig::default();
        assert!(raw.is_empty());
        assert_eq!(LayerConfig::from_raw(&raw), LayerConfig::default());
    }

    #[test]
    fn test_valid_fields_parse() {
        let raw = RawConfig {
            color: Some("tomato".into()),
            width: Some("200".into()),
            height: Some(" 80.5 ".into()),
            label: Some("Hello".into()),
            opacity: Some("0.4".into()),
            speed: Some("5".into()),
            start_x: Some("12".into()),
            start_y: Some("-30".into()),
        };
        let config = LayerConfig::from_raw(&raw);
        assert_eq!(config.color, "tomato");
        assert_eq!(config.width, 200.0);
        assert_eq!(config.height, 80.5);
        assert_eq!(config.label, "Hello");
        assert_eq!(config.opacity, 0.4);
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.start_x, 12.0);
        assert_eq!(config.start_y, -30.0);
    }

    #[test]
    fn test_invalid_fields_fall_back() {
        let raw = RawConfig {
            width: Some("wide".into()),
            height: Some("-5".into()),
            opacity: Some("1.5".into()),
            speed: Some("0".into()),
            start_x: Some("inf".into()),
            ..Default::default()
        };
        let config = LayerConfig::from_raw(&raw);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.opacity, DEFAULT_OPACITY);
        assert_eq!(config.speed, DEFAULT_SPEED);
        assert_eq!(config.start_x, 0.0);
    }

    #[test]
    fn test_parse_errors_are_specific() {
        assert_eq!(
            parse_dimension("abc"),
            Err(InvalidConfig::NotNumeric("abc".to_string()))
        );
        assert_eq!(parse_dimension("0"), Err(InvalidConfig::BadDimension(0.0)));
        assert_eq!(parse_opacity("2"), Err(InvalidConfig::BadOpacity(2.0)));
        assert_eq!(parse_speed("-1"), Err(InvalidConfig::BadSpeed(-1.0)));
        assert!(parse_coordinate("nan").is_err());
    }
}
