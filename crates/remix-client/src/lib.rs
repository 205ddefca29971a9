#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Client side of Remix
//!
//! [`RemoteFetcher`] turns an image URL into an [`ImageResource`] and
//! [`GenerationClient`] sends a resource plus prompt to the proxy

mod client;
pub mod error;
mod fetch;

pub use client::GenerationClient;
pub use error::{ClientError, Result};
pub use fetch::RemoteFetcher;
pub use remix_core::ImageResource;
