//! Generation tagging for detail requests.
//!
//! Detail fetches are not cancellable. Instead each one takes a
//! [`RequestTicket`] before it starts, and its result is only delivered if no
//! newer ticket was issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use wbb_api::DetailResult;

/// Outcome of a tagged detail request.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<T> {
    /// The record was found.
    Found(T),
    /// The record does not exist.
    NotFound(String),
    /// The request failed or returned a malformed payload.
    Failed(String),
    /// A newer request was issued before this one finished.
    Superseded,
}

impl<T> Detail<T> {
    /// The found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) | Self::Failed(_) | Self::Superseded => None,
        }
    }
}

impl<T> From<DetailResult<T>> for Detail<T> {
    fn from(result: DetailResult<T>) -> Self {
        match result {
            DetailResult::Found(value) => Self::Found(value),
            DetailResult::NotFound(message) => Self::NotFound(message),
            DetailResult::Failed(message) => Self::Failed(message),
        }
    }
}

/// Issues monotonically increasing request tickets.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

/// Tag of a single in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Generation number of the ticket.
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl RequestTracker {
    /// Create a tracker with no tickets issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every previous one.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Deliver `result` if `ticket` is still current.
    pub fn resolve<T>(&self, ticket: RequestTicket, result: impl Into<Detail<T>>) -> Detail<T> {
        if self.is_current(ticket) {
            result.into()
        } else {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest.load(Ordering::Acquire),
                "Dropping superseded detail response"
            );
            Detail::Superseded
        }
    }
}
