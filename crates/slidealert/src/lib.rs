#![forbid(unsafe_code)]

//! Keyboard-aware sliding alert overlay.
//!
//! - [`config`]: per-mount [`AlertConfig`] and its loaders
//! - [`controller`]: the visibility state machine
//! - [`presenter`]: stateless [`OverlayFrame`] description
//! - [`alert`]: the owner-facing [`SlideAlert`] component
//!
//! The alert's inner content (header, title, subtitle, body) is drawn by
//! the host inside [`OverlayFrame::content`].

pub mod alert;
pub mod config;
pub mod controller;
pub mod presenter;

pub use alert::{AlertProps, AlertPropsBuilder, SlideAlert};
pub use config::{AlertConfig, ConfigError, OverlayStyle};
pub use controller::{
    VisibilityController, VisibilityPhase, VisibilityState, VisibilityTransition,
};
pub use presenter::{CloseRequest, ContentPlacement, OverlayFrame, OverlayPresenter, Scrim};
