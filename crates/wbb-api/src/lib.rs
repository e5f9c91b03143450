//! Client for the WBB public content API.
//!
//! This crate owns everything that touches the wire:
//!
//! - [`ApiClient`]: GET requests with a lazily fetched CSRF token
//! - [`Transport`]: the HTTP seam ([`UreqTransport`] in production)
//! - [`Envelope`] and [`Collection`]: strict decoding of `{success, <key>: [...]}`
//! - [`types`]: typed, fully defaulted records for every collection
//! - [`MockTransport`] for testing (behind `mock` feature flag)
//!
//! Transport failures and non-2xx responses never escape
//! [`ApiClient::fetch_public`]; they are turned into a failure object of the
//! same shape the server uses. Malformed payloads are reported as
//! [`DecodeError`] by the decoding layer.

mod client;
mod envelope;
mod error;
mod slug;
mod transport;
pub mod types;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use client::{ApiClient, DetailResult, failure_envelope};
pub use envelope::{Collection, Envelope};
pub use error::{ApiError, DecodeError, TemplateError};
pub use slug::normalize_slug;
pub use transport::{RawResponse, Request, Transport, UreqTransport};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockTransport, RecordedRequest};
