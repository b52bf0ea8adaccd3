#![forbid(unsafe_code)]

//! Stateless description of the overlay for one frame.
//!
//! The presenter maps visibility state, slide progress and configuration to
//! an [`OverlayFrame`]: whether the modal shell is mounted, whether the scrim
//! accepts taps, and where the content container sits. Hosts draw the scrim
//! and the alert body from it.

use slidealert_core::position::PositionResolver;

use crate::config::{AlertConfig, OverlayStyle};
use crate::controller::VisibilityState;

/// The content rests `viewport_height / REST_LIFT_DIVISOR` above its slot.
const REST_LIFT_DIVISOR: f64 = 5.0;

/// Scrim (backdrop) properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrim<'a> {
    /// Whether a tap on the scrim requests closing.
    pub tap_active: bool,
    /// Opaque style, passed through from configuration.
    pub style: &'a OverlayStyle,
}

/// Placement of the content container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentPlacement {
    /// Top offset from the keyboard-aware position resolver.
    pub top: f64,
    /// Vertical slide translation.
    pub translate_y: f64,
}

/// Everything a host needs to draw the overlay this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame<'a> {
    /// Whether the modal shell is mounted at all.
    pub visible: bool,
    /// Backdrop beneath the content.
    pub scrim: Scrim<'a>,
    /// Where the content container sits.
    pub content: ContentPlacement,
}

/// A close request raised by a scrim tap or a platform back action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    /// Tap outside the content.
    ScrimTap,
    /// Platform back button or gesture.
    Back,
}

/// Pure presenter for the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPresenter {
    viewport_height: f64,
}

impl OverlayPresenter {
    /// Presenter for a viewport of the given height.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
        }
    }

    /// Viewport height used for the slide range.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Slide translation for `progress`: the full viewport height (off-screen
    /// below) at 0, a fifth of it above the slot at 1.
    pub fn translate_y(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        let from = self.viewport_height;
        let to = -self.viewport_height / REST_LIFT_DIVISOR;
        from + (to - from) * p
    }

    /// Describe the overlay.
    pub fn present<'a>(
        &self,
        state: &VisibilityState,
        progress: f64,
        config: &'a AlertConfig,
    ) -> OverlayFrame<'a> {
        OverlayFrame {
            visible: state.shown,
            scrim: Scrim {
                tap_active: state.shown && config.cancellable,
                style: &config.overlay_style,
            },
            content: ContentPlacement {
                top: PositionResolver::resolve(state.keyboard_space, state.base_top_offset),
                translate_y: self.translate_y(progress),
            },
        }
    }

    /// Gate a close request on `cancellable`. `None` means the input was
    /// absorbed.
    pub fn request_close(config: &AlertConfig, request: CloseRequest) -> Option<CloseRequest> {
        config.cancellable.then_some(request)
    }
}
