#![forbid(unsafe_code)]

//! Visibility state machine.
//!
//! Reconciles the owner's show intent with the settled `shown` flag while
//! sequencing slide runs on the [`AnimationDriver`].
//!
//! State machine: Hidden → Showing → Shown → Hiding → Hidden
//!
//! Toggling intent mid-run reverses direction (Showing ↔ Hiding) and the
//! new run supersedes the old one.
//!
//! # Invariants
//!
//! - `shown` becomes true when a show starts, not when it ends, so the
//!   overlay is present for the whole slide-in.
//! - `shown` becomes false only when a hide run completes.
//! - [`VisibilityTransition::Hidden`] is produced exactly once per
//!   true → false edge of `shown`.
//! - Only the completion of the current ticket is applied; stale ones are
//!   dropped.
//! - After [`unmount`](VisibilityController::unmount) nothing mutates.

use std::time::Duration;

use slidealert_core::animation::{
    AnimationCompletion, AnimationDriver, AnimationTarget, AnimationTicket,
};
use slidealert_core::keyboard::{KeyboardEvents, KeyboardObserver};
use tracing::{debug, debug_span};

use crate::config::AlertConfig;

/// Phase of the visibility lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityPhase {
    /// Nothing on screen.
    #[default]
    Hidden,
    /// Sliding in.
    Showing,
    /// At rest on screen.
    Shown,
    /// Sliding out; still on screen.
    Hiding,
}

impl VisibilityPhase {
    /// Whether a slide run is in flight.
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Showing | Self::Hiding)
    }
}

/// Snapshot of the controller's observable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityState {
    /// Settled visibility. May lag intent while animating.
    pub shown: bool,
    /// Occupied keyboard height, 0 without a keyboard.
    pub keyboard_space: f64,
    /// Platform base offset, fixed at mount.
    pub base_top_offset: f64,
}

/// Notable edges reported back to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityTransition {
    /// A show run finished; content is at rest.
    Opened,
    /// `shown` went from true to false.
    Hidden,
}

/// Owns the settled `shown` flag and drives slide runs toward the intent.
#[derive(Debug)]
pub struct VisibilityController {
    phase: VisibilityPhase,
    shown: bool,
    intent: bool,
    base_top_offset: f64,
    duration: Duration,
    driver: AnimationDriver,
    ticket: Option<AnimationTicket>,
    keyboard: KeyboardObserver,
    mounted: bool,
}

impl VisibilityController {
    /// Mount a hidden controller and start observing the keyboard.
    pub fn new(config: &AlertConfig, keyboard: &KeyboardEvents) -> Self {
        Self {
            phase: VisibilityPhase::Hidden,
            shown: false,
            intent: false,
            base_top_offset: config.base_top_offset(),
            duration: config.slide_animation_duration,
            driver: AnimationDriver::new(config.easing),
            ticket: None,
            keyboard: KeyboardObserver::attach(keyboard),
            mounted: true,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> VisibilityPhase {
        self.phase
    }

    /// Settled visibility.
    #[inline]
    pub fn shown(&self) -> bool {
        self.shown
    }

    /// Last intent received.
    #[inline]
    pub fn intent(&self) -> bool {
        self.intent
    }

    /// Slide progress in `[0.0, 1.0]`.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.driver.progress()
    }

    /// Whether the controller is still mounted.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The keyboard observer feeding `keyboard_space`.
    pub fn keyboard(&self) -> &KeyboardObserver {
        &self.keyboard
    }

    /// Snapshot of the visibility state.
    pub fn state(&self) -> VisibilityState {
        VisibilityState {
            shown: self.shown,
            keyboard_space: self.keyboard.keyboard_space(),
            base_top_offset: self.base_top_offset,
        }
    }

    /// Apply a new intent.
    ///
    /// Returns a transition when a zero-duration run settles immediately.
    pub fn set_intent(&mut self, show: bool) -> Option<VisibilityTransition> {
        if !self.mounted {
            debug!(show, "intent after unmount ignored");
            return None;
        }
        self.intent = show;
        self.reconcile()
    }

    /// Advance the slide run by `delta`.
    pub fn tick(&mut self, delta: Duration) -> Option<VisibilityTransition> {
        if !self.mounted {
            return None;
        }
        let done = self.driver.tick(delta)?;
        self.complete(done)
    }

    /// Tear down: cancel the in-flight run and release keyboard listeners.
    ///
    /// Idempotent. Every later call is a no-op.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(ticket) = self.driver.cancel() {
            debug!(
                ticket = ticket.get(),
                phase = ?self.phase,
                "pending slide completion suppressed by unmount"
            );
        }
        self.ticket = None;
        self.keyboard.detach();
        debug!(phase = ?self.phase, shown = self.shown, "visibility controller unmounted");
    }

    fn reconcile(&mut self) -> Option<VisibilityTransition> {
        let target = match (self.intent, self.phase) {
            (true, VisibilityPhase::Hidden | VisibilityPhase::Hiding) => AnimationTarget::Shown,
            (false, VisibilityPhase::Shown | VisibilityPhase::Showing) => AnimationTarget::Hidden,
            _ => return None,
        };
        let _span = debug_span!("reconcile", intent = self.intent, from = ?self.phase).entered();

        self.phase = match target {
            AnimationTarget::Shown => {
                self.shown = true;
                VisibilityPhase::Showing
            }
            AnimationTarget::Hidden => VisibilityPhase::Hiding,
        };
        let ticket = self.driver.animate_to(target, self.duration);
        self.ticket = Some(ticket);
        debug!(ticket = ticket.get(), phase = ?self.phase, "slide started");

        let done = self.driver.take_completion()?;
        self.complete(done)
    }

    fn complete(&mut self, done: AnimationCompletion) -> Option<VisibilityTransition> {
        if self.ticket != Some(done.ticket) {
            debug!(ticket = done.ticket.get(), "stale slide completion dropped");
            return None;
        }
        self.ticket = None;

        match (self.phase, done.target) {
            (VisibilityPhase::Showing, AnimationTarget::Shown) => {
                self.phase = VisibilityPhase::Shown;
                debug!("alert shown");
                Some(VisibilityTransition::Opened)
            }
            (VisibilityPhase::Hiding, AnimationTarget::Hidden) => {
                self.phase = VisibilityPhase::Hidden;
                let was_shown = std::mem::replace(&mut self.shown, false);
                debug!("alert hidden");
                was_shown.then_some(VisibilityTransition::Hidden)
            }
            (phase, target) => {
                debug!(?phase, ?target, "completion does not match phase");
                None
            }
        }
    }
}

impl Drop for VisibilityController {
    fn drop(&mut self) {
        self.unmount();
    }
}
