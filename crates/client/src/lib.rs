//! The remote export path's collaborator.
//!
//! [`RemotePayload`] flattens an expanded document into four labeled text blocks;
//! a [`BackendRenderClient`] turns that payload into finished document bytes.

mod client;
mod error;
mod payload;

pub use client::{BackendRenderClient, GENERATE_PATH, HttpRenderClient};
pub use error::{MAX_ERROR_BODY_BYTES, TransportError};
pub use payload::RemotePayload;
