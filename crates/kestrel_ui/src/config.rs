//! Runtime UI configuration.
//!
//! Loaded once when the interface is built. Every field has a default, so a
//! partial TOML document only overrides what it names:
//!
//! ```toml
//! caret_blink_interval = 0.5
//!
//! [select_color]
//! r = 1.0
//! g = 0.8
//! b = 0.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};
use crate::style::Color;

/// Tunables for highlight colours, caret blink and text scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Background of the selected widget.
    pub select_color: Color,
    /// Background of the hovered widget.
    pub hovered_color: Color,
    /// Background of the widget being edited.
    pub editing_color: Color,
    /// Seconds between caret visibility toggles.
    pub caret_blink_interval: f32,
    /// Text size multiplier, applied to viewport height times text size.
    pub text_scale: f32,
    /// Slider handle width as a fraction of the slider width.
    pub slider_handle_width: f32,
    /// Slider handle height as a fraction of the slider height.
    pub slider_handle_height: f32,
    /// Vertical nudge applied when centring single-line text, in pixels.
    pub text_center_adjustment: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            select_color: Color::rgba(1.0, 1.0, 1.0, 1.0),
            hovered_color: Color::rgba(0.7, 0.7, 0.7, 1.0),
            editing_color: Color::rgba(0.9, 0.9, 0.6, 1.0),
            caret_blink_interval: 0.75,
            text_scale: 0.15,
            slider_handle_width: 0.04,
            slider_handle_height: 0.35,
            text_center_adjustment: 2.6,
        }
    }
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the text is not valid TOML for
    /// this structure or a value is out of range.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| UiError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> UiResult<String> {
        toml::to_string(self).map_err(|err| UiError::InvalidConfig(err.to_string()))
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> UiResult<()> {
        if !(self.caret_blink_interval > 0.0) {
            return Err(UiError::InvalidConfig(format!(
                "caret_blink_interval must be positive, got {}",
                self.caret_blink_interval
            )));
        }
        if !(self.text_scale > 0.0) {
            return Err(UiError::InvalidConfig(format!(
                "text_scale must be positive, got {}",
                self.text_scale
            )));
        }
        for (name, value) in [
            ("slider_handle_width", self.slider_handle_width),
            ("slider_handle_height", self.slider_handle_height),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(UiError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(UiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document() {
        let config = UiConfig::from_toml_str(
            "caret_blink_interval = 0.5\n[select_color]\nr = 1.0\ng = 0.5\nb = 0.0\n",
        )
        .unwrap();
        assert!((config.caret_blink_interval - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.select_color, Color::rgba(1.0, 0.5, 0.0, 1.0));
        assert!((config.text_scale - 0.15).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = UiConfig::from_toml_str("text_scale = -1.0").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));
        assert!(UiConfig::from_toml_str("slider_handle_width = 1.5").is_err());
        assert!(UiConfig::from_toml_str("caret_blink_interval = \"fast\"").is_err());
    }
}
