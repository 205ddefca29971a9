#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Session controller for Remix
//!
//! User intents arrive as [`Command`]s. [`update`] applies them to the
//! [`SessionState`] and returns the [`Effect`] to run, if any. The
//! [`StudioRuntime`] owns the state, runs effects against a
//! [`StudioBackend`] and publishes snapshots for the [`views`].

mod backend;
mod effect;
mod error;
mod message;
mod runtime;
mod state;
mod update;
pub mod views;

pub use backend::{ClientBackend, StudioBackend};
pub use effect::Effect;
pub use error::{Result, StudioError};
pub use message::{Command, Message};
pub use runtime::{StudioHandle, StudioRuntime};
pub use state::{OriginalImage, Preview, RequestToken, SessionState};
pub use update::update;
