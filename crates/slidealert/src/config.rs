#![forbid(unsafe_code)]

//! Per-mount configuration for a [`SlideAlert`](crate::SlideAlert).
//!
//! [`AlertConfig`] is immutable once the alert is mounted. With the
//! `config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! cancellable = false
//! slide_animation_duration_ms = 300
//! easing = "ease-in-out"
//! platform = "ios"
//!
//! [overlay_style]
//! background = [0, 0, 0, 128]
//! ```
//!
//! ```rust,ignore
//! let config = AlertConfig::from_toml_file("alert.toml")?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use slidealert_core::animation::Easing;
use slidealert_core::position::Platform;

/// Default slide duration, in milliseconds.
pub const DEFAULT_SLIDE_DURATION_MS: u64 = 250;

/// Upper bound accepted by [`AlertConfig::validate`].
pub const MAX_SLIDE_DURATION_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// OverlayStyle
// ---------------------------------------------------------------------------

/// Visual style for the scrim.
///
/// Not interpreted by the alert; handed to the renderer as-is.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct OverlayStyle {
    /// RGBA background fill.
    pub background: Option<[u8; 4]>,
    /// Extra opacity multiplier in `[0.0, 1.0]`.
    pub opacity: Option<f32>,
}

// ---------------------------------------------------------------------------
// AlertConfig
// ---------------------------------------------------------------------------

/// Configuration fixed at mount time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AlertConfig {
    /// Whether scrim taps and back actions may request closing.
    pub cancellable: bool,
    /// Duration of each slide, in and out.
    #[cfg_attr(
        feature = "config",
        serde(rename = "slide_animation_duration_ms", with = "duration_ms")
    )]
    pub slide_animation_duration: Duration,
    /// Scrim style, passed through.
    pub overlay_style: OverlayStyle,
    /// Slide easing curve.
    #[cfg_attr(feature = "config", serde(with = "easing_name"))]
    pub easing: Easing,
    /// Host platform (fixes the base top offset).
    #[cfg_attr(feature = "config", serde(with = "platform_name"))]
    pub platform: Platform,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cancellable: true,
            slide_animation_duration: Duration::from_millis(DEFAULT_SLIDE_DURATION_MS),
            overlay_style: OverlayStyle::default(),
            easing: Easing::default(),
            platform: Platform::current(),
        }
    }
}

impl AlertConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether outside taps may close the alert.
    pub fn cancellable(mut self, cancellable: bool) -> Self {
        self.cancellable = cancellable;
        self
    }

    /// Set the slide duration.
    pub fn slide_animation_duration(mut self, duration: Duration) -> Self {
        self.slide_animation_duration = duration;
        self
    }

    /// Set the scrim style.
    pub fn overlay_style(mut self, style: OverlayStyle) -> Self {
        self.overlay_style = style;
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Override the platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Base top offset for the configured platform.
    pub fn base_top_offset(&self) -> f64 {
        self.platform.base_top_offset()
    }

    /// Check every field is within range. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let ms = self.slide_animation_duration.as_millis();
        if ms > u128::from(MAX_SLIDE_DURATION_MS) {
            errors.push(format!(
                "slide_animation_duration must be <= {MAX_SLIDE_DURATION_MS}ms, got {ms}ms"
            ));
        }

        if let Some(opacity) = self.overlay_style.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                errors.push(format!(
                    "overlay_style.opacity must be in [0, 1], got {opacity}"
                ));
            }
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Return `self` if [`validate`](Self::validate) reports nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors raised while building alert configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[cfg(feature = "config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Out-of-range fields.
    Validation(Vec<String>),
    /// Props were built without the required close-request callback.
    MissingOnRequestClose,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "config")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
            Self::MissingOnRequestClose => write!(f, "on_request_close callback is required"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) | Self::MissingOnRequestClose => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

#[cfg(feature = "config")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(feature = "config")]
mod easing_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use slidealert_core::animation::Easing;

    pub fn serialize<S: Serializer>(e: &Easing, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match e {
            Easing::Linear => "linear",
            Easing::EaseOut => "ease-out",
            Easing::EaseIn => "ease-in",
            Easing::EaseInOut => "ease-in-out",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Easing, D::Error> {
        let name = String::deserialize(d)?;
        match name.as_str() {
            "linear" => Ok(Easing::Linear),
            "ease-out" => Ok(Easing::EaseOut),
            "ease-in" => Ok(Easing::EaseIn),
            "ease-in-out" => Ok(Easing::EaseInOut),
            other => Err(D::Error::unknown_variant(
                other,
                &["linear", "ease-out", "ease-in", "ease-in-out"],
            )),
        }
    }
}

#[cfg(feature = "config")]
mod platform_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use slidealert_core::position::Platform;

    pub fn serialize<S: Serializer>(p: &Platform, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match p {
            Platform::Ios => "ios",
            Platform::Android => "android",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Platform, D::Error> {
        let name = String::deserialize(d)?;
        match name.as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(D::Error::unknown_variant(other, &["ios", "android"])),
        }
    }
}
