#![forbid(unsafe_code)]

//! Core building blocks for SlideAlert.
//!
//! Everything here is single-threaded and cooperative: shared state lives
//! behind `Rc` and is mutated from one event loop.

pub mod animation;
pub mod keyboard;
pub mod position;
pub mod reactive;

pub use animation::{
    AnimationCompletion, AnimationDriver, AnimationTarget, AnimationTicket, Easing, FrameClock,
};
pub use keyboard::{KeyboardEvent, KeyboardEvents, KeyboardObserver};
pub use position::{Platform, PositionResolver, REST_TOP_OFFSET};
pub use reactive::{EventSource, Observable, Subscription};
