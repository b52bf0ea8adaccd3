#![forbid(unsafe_code)]

//! On-screen keyboard observation.
//!
//! The platform reports keyboard changes through a [`KeyboardEvents`]
//! source. A [`KeyboardObserver`] listens for them and keeps the occupied
//! height in an [`Observable`]. Listener registration is tied to the
//! observer's lifetime: dropping it (or calling [`KeyboardObserver::detach`])
//! unregisters both callbacks.

use tracing::debug;

use crate::reactive::{EventSource, Observable, Subscription};

/// Keyboard notification delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    /// Keyboard finished appearing. `end_height` is the occupied height
    /// from the end frame, absent when the platform omitted coordinates.
    DidShow { end_height: Option<f64> },
    /// Keyboard finished disappearing.
    DidHide,
}

/// Platform keyboard event source.
pub type KeyboardEvents = EventSource<KeyboardEvent>;

/// Tracks the occupied keyboard height for as long as it is alive.
#[derive(Debug)]
pub struct KeyboardObserver {
    space: Observable<f64>,
    did_show: Option<Subscription>,
    did_hide: Option<Subscription>,
}

impl KeyboardObserver {
    /// Register the show and hide listeners on `events`.
    ///
    /// The observed height starts at 0.
    pub fn attach(events: &KeyboardEvents) -> Self {
        let space = Observable::new(0.0);

        let shown = space.clone();
        let did_show = events.add_listener(move |event| {
            if let KeyboardEvent::DidShow { end_height } = *event {
                let Some(height) = end_height else {
                    debug!("keyboard shown without end coordinates, ignored");
                    return;
                };
                let height = height.max(0.0);
                debug!(height, "keyboard shown");
                shown.set(height);
            }
        });

        let hidden = space.clone();
        let did_hide = events.add_listener(move |event| {
            if matches!(event, KeyboardEvent::DidHide) {
                debug!("keyboard hidden");
                hidden.set(0.0);
            }
        });

        Self {
            space,
            did_show: Some(did_show),
            did_hide: Some(did_hide),
        }
    }

    /// Currently occupied keyboard height (0 when no keyboard).
    #[must_use]
    pub fn keyboard_space(&self) -> f64 {
        self.space.get()
    }

    /// Shared handle to the observed height, for hosts that relayout on
    /// change.
    pub fn space(&self) -> &Observable<f64> {
        &self.space
    }

    /// Whether the listeners are still registered.
    pub fn is_attached(&self) -> bool {
        self.did_show.is_some() || self.did_hide.is_some()
    }

    /// Unregister both listeners now. Idempotent.
    pub fn detach(&mut self) {
        if self.is_attached() {
            debug!("keyboard observer detached");
        }
        self.did_show = None;
        self.did_hide = None;
    }
}
