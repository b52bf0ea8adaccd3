#![forbid(unsafe_code)]

//! Owner-facing alert component.
//!
//! [`SlideAlert`] ties the props, the [`VisibilityController`] and the
//! [`OverlayPresenter`] into a mount / update / tick / unmount lifecycle.
//! Dropping it unmounts, which releases the keyboard listeners and
//! suppresses any pending slide completion.
//!
//! # Example
//!
//! ```
//! use slidealert::{AlertProps, SlideAlert};
//! use slidealert_core::keyboard::KeyboardEvents;
//! use std::time::Duration;
//!
//! let keyboard = KeyboardEvents::new();
//! let props = AlertProps::builder()
//!     .on_request_close(|| {})
//!     .build()
//!     .expect("props");
//! let mut alert = SlideAlert::mount(props, &keyboard, 800.0);
//!
//! alert.set_show(true);
//! assert!(alert.frame().visible);
//! alert.tick(Duration::from_millis(250));
//! assert_eq!(alert.frame().content.translate_y, -160.0);
//! ```

use std::time::Duration;

use slidealert_core::animation::FrameClock;
use slidealert_core::keyboard::KeyboardEvents;
use tracing::debug;
use web_time::Instant;

use crate::config::{AlertConfig, ConfigError, OverlayStyle};
use crate::controller::{
    VisibilityController, VisibilityPhase, VisibilityState, VisibilityTransition,
};
use crate::presenter::{CloseRequest, OverlayFrame, OverlayPresenter};

type Callback = Box<dyn FnMut()>;

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Validated props for mounting a [`SlideAlert`].
pub struct AlertProps {
    /// Initial show intent.
    pub show: bool,
    /// Per-mount configuration.
    pub config: AlertConfig,
    on_hide: Option<Callback>,
    on_request_close: Callback,
}

impl std::fmt::Debug for AlertProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertProps")
            .field("show", &self.show)
            .field("config", &self.config)
            .field("on_hide", &self.on_hide.is_some())
            .finish_non_exhaustive()
    }
}

impl AlertProps {
    /// Start building props.
    pub fn builder() -> AlertPropsBuilder {
        AlertPropsBuilder::default()
    }
}

/// Builder for [`AlertProps`].
#[derive(Default)]
pub struct AlertPropsBuilder {
    show: bool,
    config: AlertConfig,
    on_hide: Option<Callback>,
    on_request_close: Option<Callback>,
}

impl std::fmt::Debug for AlertPropsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertPropsBuilder")
            .field("show", &self.show)
            .field("config", &self.config)
            .field("on_hide", &self.on_hide.is_some())
            .field("on_request_close", &self.on_request_close.is_some())
            .finish()
    }
}

impl AlertPropsBuilder {
    /// Initial show intent (default false).
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AlertConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether outside taps may close (default true).
    pub fn cancellable(mut self, cancellable: bool) -> Self {
        self.config.cancellable = cancellable;
        self
    }

    /// Slide duration (default 250ms).
    pub fn slide_animation_duration(mut self, duration: Duration) -> Self {
        self.config.slide_animation_duration = duration;
        self
    }

    /// Scrim style.
    pub fn overlay_style(mut self, style: OverlayStyle) -> Self {
        self.config.overlay_style = style;
        self
    }

    /// Called once each time the alert finishes hiding.
    pub fn on_hide(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hide = Some(Box::new(f));
        self
    }

    /// Called when a scrim tap or back action asks to close. Required.
    pub fn on_request_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_request_close = Some(Box::new(f));
        self
    }

    /// Validate and finish.
    pub fn build(self) -> Result<AlertProps, ConfigError> {
        let on_request_close = self
            .on_request_close
            .ok_or(ConfigError::MissingOnRequestClose)?;
        Ok(AlertProps {
            show: self.show,
            config: self.config.validated()?,
            on_hide: self.on_hide,
            on_request_close,
        })
    }
}

// ---------------------------------------------------------------------------
// SlideAlert
// ---------------------------------------------------------------------------

/// A mounted alert overlay.
pub struct SlideAlert {
    config: AlertConfig,
    controller: VisibilityController,
    presenter: OverlayPresenter,
    clock: FrameClock,
    on_hide: Option<Callback>,
    on_request_close: Callback,
}

impl std::fmt::Debug for SlideAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideAlert")
            .field("config", &self.config)
            .field("controller", &self.controller)
            .field("presenter", &self.presenter)
            .finish_non_exhaustive()
    }
}

impl SlideAlert {
    /// Mount the alert, subscribing to `keyboard`.
    ///
    /// If `props.show` is set the show slide starts right away.
    pub fn mount(props: AlertProps, keyboard: &KeyboardEvents, viewport_height: f64) -> Self {
        let AlertProps {
            show,
            config,
            on_hide,
            on_request_close,
        } = props;
        let controller = VisibilityController::new(&config, keyboard);
        debug!(show, cancellable = config.cancellable, "alert mounted");

        let mut alert = Self {
            config,
            controller,
            presenter: OverlayPresenter::new(viewport_height),
            clock: FrameClock::new(),
            on_hide,
            on_request_close,
        };
        if show {
            alert.set_show(true);
        }
        alert
    }

    /// Update the show intent.
    pub fn set_show(&mut self, show: bool) {
        let transition = self.controller.set_intent(show);
        self.dispatch(transition);
    }

    /// Advance the slide by `delta`.
    pub fn tick(&mut self, delta: Duration) {
        let transition = self.controller.tick(delta);
        self.dispatch(transition);
    }

    /// Advance the slide to the frame timestamp `now`.
    pub fn tick_at(&mut self, now: Instant) {
        let delta = self.clock.advance(now);
        self.tick(delta);
    }

    /// Handle a tap on the scrim. Returns whether a close was requested.
    pub fn scrim_tapped(&mut self) -> bool {
        if !self.controller.is_mounted() || !self.frame().scrim.tap_active {
            return false;
        }
        self.request_close(CloseRequest::ScrimTap)
    }

    /// Handle the platform back action. Returns whether a close was
    /// requested.
    pub fn back_requested(&mut self) -> bool {
        if !self.controller.is_mounted() || !self.controller.shown() {
            return false;
        }
        self.request_close(CloseRequest::Back)
    }

    /// Describe the overlay for the current frame.
    pub fn frame(&self) -> OverlayFrame<'_> {
        self.presenter
            .present(&self.controller.state(), self.controller.progress(), &self.config)
    }

    /// Visibility snapshot.
    pub fn state(&self) -> VisibilityState {
        self.controller.state()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> VisibilityPhase {
        self.controller.phase()
    }

    /// Slide progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        self.controller.progress()
    }

    /// Mount-time configuration.
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Whether the alert is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.controller.is_mounted()
    }

    /// Tear down now instead of at drop.
    pub fn unmount(&mut self) {
        self.controller.unmount();
    }

    fn request_close(&mut self, request: CloseRequest) -> bool {
        match OverlayPresenter::request_close(&self.config, request) {
            Some(request) => {
                debug!(?request, "close requested");
                (self.on_request_close)();
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, transition: Option<VisibilityTransition>) {
        match transition {
            Some(VisibilityTransition::Hidden) => {
                if let Some(on_hide) = self.on_hide.as_mut() {
                    on_hide();
                }
            }
            Some(VisibilityTransition::Opened) | None => {}
        }
    }
}
