#![forbid(unsafe_code)]

//! Observable values and fire-and-forget event sources.
//!
//! # Design
//!
//! Both [`Observable<T>`] and [`EventSource<E>`] keep their listeners as
//! `Weak` callbacks. The strong side lives in the [`Subscription`] guard
//! handed back to the caller, so dropping the guard is the only way to
//! unregister and no listener can outlive its owner.
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: callbacks may call `set()`/`emit()` again; the
//!   listener list is snapshotted before dispatch so no borrow is held.
//! - **Subscriber leak**: guards stored forever keep callbacks alive. Dead
//!   weak references are pruned lazily on the next dispatch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

fn live_callbacks<T>(listeners: &mut Vec<CallbackWeak<T>>) -> Vec<CallbackRc<T>> {
    listeners.retain(|w| w.strong_count() > 0);
    listeners.iter().filter_map(Weak::upgrade).collect()
}

fn register<T: 'static>(
    listeners: &mut Vec<CallbackWeak<T>>,
    callback: impl Fn(&T) + 'static,
) -> Subscription {
    let strong: CallbackRc<T> = Rc::new(callback);
    listeners.push(Rc::downgrade(&strong));
    Subscription {
        _guard: Box::new(strong),
    }
}

// ---------------------------------------------------------------------------
// Observable
// ---------------------------------------------------------------------------

struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the same value.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Subscribers are notified in registration order.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Set a new value, notifying subscribers if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Subscribe to value changes.
    ///
    /// The callback stops firing as soon as the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        register(&mut self.inner.borrow_mut().subscribers, callback)
    }

    /// Current version number.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    fn notify(&self) {
        let (callbacks, value) = {
            let mut inner = self.inner.borrow_mut();
            let callbacks = live_callbacks(&mut inner.subscribers);
            (callbacks, inner.value.clone())
        };
        for cb in &callbacks {
            cb(&value);
        }
    }
}

// ---------------------------------------------------------------------------
// EventSource
// ---------------------------------------------------------------------------

/// A broadcast point for discrete events.
///
/// Unlike [`Observable`], nothing is stored: every `emit` reaches every
/// live listener, even when the same event repeats.
pub struct EventSource<E> {
    listeners: Rc<RefCell<Vec<CallbackWeak<E>>>>,
}

impl<E> Clone for EventSource<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<E> std::fmt::Debug for EventSource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSource")
            .field("listener_slots", &self.listeners.borrow().len())
            .finish()
    }
}

impl<E: 'static> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventSource<E> {
    /// Create a source with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a listener. Dropping the guard removes it.
    pub fn add_listener(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        register(&mut self.listeners.borrow_mut(), callback)
    }

    /// Deliver `event` to every live listener, in registration order.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &E) -> usize {
        let callbacks = live_callbacks(&mut self.listeners.borrow_mut());
        for cb in &callbacks {
            cb(event);
        }
        callbacks.len()
    }

    /// Number of listeners whose guard is still alive.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// RAII guard for a registered callback.
///
/// Dropping it drops the only strong reference to the callback, so the weak
/// entry held by the source can no longer be upgraded.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
