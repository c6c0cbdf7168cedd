//! Libris HTTP client
//!
//! Typed access to the library API. Every request goes through the session:
//! expired tokens are dropped before they reach the wire, valid ones are sent
//! as bearer credentials, and authentication failures from the server end
//! the session.

pub mod client;
pub mod types;

pub use client::{LibraryClient, LibraryClientBuilder, error::ClientError};
