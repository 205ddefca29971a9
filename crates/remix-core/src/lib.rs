#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Shared data model for Remix
//!
//! Holds the image resource type passed between the fetcher, the encoder and
//! the generation client, plus the JSON wire types of `POST /api/generate`

mod encode;
mod error;
mod format;
mod resource;
pub mod wire;

pub use encode::{encode, encode_file};
pub use error::{FormatError, Result};
pub use format::ImageFormat;
pub use resource::{ImageResource, data_uri};
pub use wire::{ErrorBody, GenerationRequest, GenerationResponse};
