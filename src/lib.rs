//! Core of the Trimmr image trimmer: everything except the window.
//!
//! The UI feeds user input into a [`Controller`] as [`Event`]s and carries out
//! the [`Effect`]s it returns. Layout and crop math live in [`geometry`], zoom
//! and frame rules in [`viewport`].

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod geometry;
pub mod imaging;
pub mod session;
pub mod viewport;

pub use config::{Settings, SettingsError};
pub use controller::{Controller, DONE_MESSAGE, Effect, Event};
pub use error::TrimError;
pub use geometry::{DisplayGeometry, SourceRect};
pub use session::Session;
pub use viewport::{FrameShape, ScrollDirection, ViewEvent, ViewState};
