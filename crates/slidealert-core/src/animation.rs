#![forbid(unsafe_code)]

//! Slide animation driver with explicit completion tickets.
//!
//! The driver owns a single progress scalar in `[0.0, 1.0]` (0 = hidden,
//! 1 = shown) and moves it toward a target over a fixed duration. Every
//! call to [`AnimationDriver::animate_to`] returns an [`AnimationTicket`];
//! the matching [`AnimationCompletion`] is produced at most once.
//!
//! # Example
//!
//! ```
//! use slidealert_core::animation::{AnimationDriver, AnimationTarget, Easing};
//! use std::time::Duration;
//!
//! let mut driver = AnimationDriver::new(Easing::EaseOut);
//! let ticket = driver.animate_to(AnimationTarget::Shown, Duration::from_millis(250));
//!
//! assert!(driver.tick(Duration::from_millis(100)).is_none());
//! let done = driver.tick(Duration::from_millis(150)).unwrap();
//! assert_eq!(done.ticket, ticket);
//! assert_eq!(driver.progress(), 1.0);
//! ```
//!
//! # Invariants
//!
//! - Progress is always in `[0.0, 1.0]`.
//! - A superseded run never completes.
//! - Zero-duration runs complete without any tick.

use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

// ============================================================================
// Target
// ============================================================================

/// End value of a slide run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTarget {
    /// Progress 0: content parked off-screen.
    Hidden,
    /// Progress 1: content at rest.
    Shown,
}

impl AnimationTarget {
    /// Numeric progress value for this target.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Hidden => 0.0,
            Self::Shown => 1.0,
        }
    }
}

// ============================================================================
// Easing
// ============================================================================

/// Easing curve applied to the time fraction of a run.
///
/// Only curves that stay inside `[0.0, 1.0]` are offered, so eased progress
/// never leaves the progress range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-out (decelerating).
    EaseOut,
    /// Cubic ease-in (accelerating).
    EaseIn,
    /// Cubic S-curve.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to `[0.0, 1.0]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// ============================================================================
// Tickets and completions
// ============================================================================

/// Identity of one `animate_to` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationTicket(u64);

impl AnimationTicket {
    /// Raw sequence number (monotonic per driver).
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Completion signal for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCompletion {
    /// Ticket of the run that finished.
    pub ticket: AnimationTicket,
    /// Where the run ended.
    pub target: AnimationTarget,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    ticket: AnimationTicket,
    from: f64,
    target: AnimationTarget,
    duration: Duration,
    elapsed: Duration,
}

// ============================================================================
// Driver
// ============================================================================

/// Drives the slide progress scalar.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    easing: Easing,
    progress: f64,
    run: Option<Run>,
    ready: Option<AnimationCompletion>,
    next_ticket: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl AnimationDriver {
    /// Create a driver parked at progress 0.
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            progress: 0.0,
            run: None,
            ready: None,
            next_ticket: 0,
        }
    }

    /// Current progress in `[0.0, 1.0]`.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Easing curve used for every run.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Whether a run is in flight.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// Ticket of the in-flight run, if any.
    pub fn active_ticket(&self) -> Option<AnimationTicket> {
        self.run.map(|run| run.ticket)
    }

    /// Start moving toward `target` from the current progress.
    ///
    /// Any in-flight run, and any completion not yet delivered, is
    /// superseded and will never be reported. A zero duration snaps to the
    /// target; its completion is available from [`take_completion`] right
    /// away.
    ///
    /// [`take_completion`]: Self::take_completion
    pub fn animate_to(&mut self, target: AnimationTarget, duration: Duration) -> AnimationTicket {
        let ticket = AnimationTicket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(prev) = self.run.take() {
            debug!(
                superseded = prev.ticket.get(),
                by = ticket.get(),
                progress = self.progress,
                "slide run superseded"
            );
        }
        self.ready = None;

        if duration.is_zero() {
            self.progress = target.value();
            self.ready = Some(AnimationCompletion { ticket, target });
        } else {
            self.run = Some(Run {
                ticket,
                from: self.progress,
                target,
                duration,
                elapsed: Duration::ZERO,
            });
        }
        ticket
    }

    /// Advance the in-flight run by `delta`.
    ///
    /// Returns the completion when the run reaches its target during this
    /// tick (or an undelivered zero-duration completion).
    pub fn tick(&mut self, delta: Duration) -> Option<AnimationCompletion> {
        if let Some(done) = self.ready.take() {
            return Some(done);
        }
        let run = self.run.as_mut()?;
        run.elapsed = run.elapsed.saturating_add(delta);

        let t = run.elapsed.as_secs_f64() / run.duration.as_secs_f64();
        let to = run.target.value();
        if t >= 1.0 {
            let done = AnimationCompletion {
                ticket: run.ticket,
                target: run.target,
            };
            self.progress = to;
            self.run = None;
            return Some(done);
        }

        let eased = self.easing.apply(t);
        self.progress = (run.from + (to - run.from) * eased).clamp(0.0, 1.0);
        trace!(ticket = run.ticket.get(), progress = self.progress, "slide tick");
        None
    }

    /// Take a completion produced without ticking (zero-duration runs).
    pub fn take_completion(&mut self) -> Option<AnimationCompletion> {
        self.ready.take()
    }

    /// Drop the in-flight run and any pending completion.
    ///
    /// Progress stays where it is. Returns the ticket that was cancelled.
    pub fn cancel(&mut self) -> Option<AnimationTicket> {
        let pending = self.ready.take().map(|c| c.ticket);
        self.run.take().map(|run| run.ticket).or(pending)
    }
}

// ============================================================================
// Frame clock
// ============================================================================

/// Converts frame timestamps into tick deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Create a clock with no reference frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame. The first frame yields zero, as does
    /// a timestamp earlier than the previous one.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let delta = match self.last {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        delta
    }

    /// Forget the reference frame.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
