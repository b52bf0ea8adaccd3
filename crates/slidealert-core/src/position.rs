#![forbid(unsafe_code)]

//! Vertical placement of the alert content relative to the keyboard.

/// Top offset used when no keyboard is present. Keeps the content close to
/// the bottom edge.
pub const REST_TOP_OFFSET: f64 = -30.0;

/// Host platform, which fixes the base top offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// iOS keyboards report heights relative to a shorter base.
    Ios,
    /// Android and every other host.
    #[default]
    Android,
}

impl Platform {
    /// Platform of the compile target.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Android
        }
    }

    /// Base top offset the content is positioned from while a keyboard is up.
    pub fn base_top_offset(self) -> f64 {
        match self {
            Self::Ios => 170.0,
            Self::Android => 350.0,
        }
    }
}

/// Computes the content container's top offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionResolver;

impl PositionResolver {
    /// Top offset for the given keyboard height and base offset.
    ///
    /// With no keyboard the result is [`REST_TOP_OFFSET`] whatever the base.
    /// Otherwise the content rises by the keyboard height:
    /// `base_top_offset - keyboard_space`.
    #[inline]
    pub fn resolve(keyboard_space: f64, base_top_offset: f64) -> f64 {
        if keyboard_space > 0.0 {
            base_top_offset - keyboard_space
        } else {
            REST_TOP_OFFSET
        }
    }
}
