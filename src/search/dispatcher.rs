//! Search dispatch with cancel-on-supersede ordering.
//!
//! The dispatcher does not perform I/O. [`QueryDispatcher::dispatch`] hands
//! back a [`PendingSearch`] describing the request to send, and the answer is
//! fed in later through [`QueryDispatcher::resolve`] together with the ticket
//! it was sent under.
//!
//! # Ordering
//!
//! At most one search is in flight. Dispatching again supersedes the pending
//! search: its ticket stops being current and any response that later arrives
//! for it resolves as [`Resolution::Stale`] without touching any state. A
//! slow first response can therefore never overwrite a faster second one.
//!
//! # Failures
//!
//! Transport errors, undecodable bodies, and timeouts are
//! [`DispatchFailure`] values, never errors. Each one is kept in the
//! [`QueryDispatcher::last_error`] side channel until the next delivered
//! response, and the configured [`FailurePolicy`] decides whether a
//! synthetic fallback response is substituted.

use super::fallback::fallback_response;
use crate::domain::{Query, SearchResponse};
use crate::service::SearchRequest;
use std::fmt;

/// Identifies one dispatch. Strictly increasing per dispatcher.
pub type Ticket = u64;

/// Default `limit` sent with every search.
pub const DEFAULT_RESULT_LIMIT: u32 = 50;

/// Default dispatch timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// What to do when a search fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Substitute a locally built response and move on to the results screen.
    #[default]
    Fallback,
    /// Leave the view where it is and only report the failure.
    Surface,
}

impl FailurePolicy {
    /// Parses a configuration value (`fallback` or `surface`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fallback" => Some(Self::Fallback),
            "surface" => Some(Self::Surface),
            _ => None,
        }
    }
}

/// Why a dispatched search produced no service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchFailure {
    /// The service answered with a non-success status.
    Transport { status: u16, message: String },
    /// The service answered 2xx but the body was not a search response.
    Decode(String),
    /// No answer arrived within the configured timeout.
    Timeout { after_secs: u64 },
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { status, message } if message.is_empty() => {
                write!(f, "search service returned HTTP {status}")
            }
            Self::Transport { status, message } => {
                write!(f, "search service returned HTTP {status}: {message}")
            }
            Self::Decode(message) => write!(f, "unreadable search response: {message}"),
            Self::Timeout { after_secs } => write!(f, "search timed out after {after_secs}s"),
        }
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    pub limit: u32,
    pub timeout_secs: u64,
    pub policy: FailurePolicy,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            policy: FailurePolicy::default(),
        }
    }
}

/// A search that has been dispatched and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub ticket: Ticket,
    pub query: Query,
    pub request: SearchRequest,
}

/// Outcome of feeding a response (or a timeout) back into the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The ticket is not the one in flight; nothing changed.
    Stale { ticket: Ticket },
    /// The service answered.
    Delivered { query: Query, response: SearchResponse },
    /// The search failed and a synthetic response was substituted.
    Fallback {
        query: Query,
        response: SearchResponse,
        failure: DispatchFailure,
    },
    /// The search failed and the failure is surfaced as-is.
    Failed { query: Query, failure: DispatchFailure },
}

impl Resolution {
    /// The response to install, if any.
    #[must_use]
    pub fn response(&self) -> Option<&SearchResponse> {
        match self {
            Self::Delivered { response, .. } | Self::Fallback { response, .. } => Some(response),
            Self::Stale { .. } | Self::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    ticket: Ticket,
    query: Query,
    issued_at_ms: u64,
}

/// Issues searches and matches their responses back up.
#[derive(Debug, Clone, Default)]
pub struct QueryDispatcher {
    settings: DispatchSettings,
    last_ticket: Ticket,
    in_flight: Option<InFlight>,
    last_error: Option<DispatchFailure>,
}

impl QueryDispatcher {
    #[must_use]
    pub fn new(settings: DispatchSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Starts a search for `query` at host time `now_ms`.
    ///
    /// Any search already in flight is superseded. Raises the searching flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::domain::Query;
    /// use omnisearch::search::QueryDispatcher;
    ///
    /// let mut dispatcher = QueryDispatcher::default();
    /// let first = dispatcher.dispatch(Query::parse("rust").unwrap(), 0);
    /// let second = dispatcher.dispatch(Query::parse("tokio").unwrap(), 10);
    /// assert!(second.ticket > first.ticket);
    /// assert_eq!(dispatcher.in_flight_ticket(), Some(second.ticket));
    /// ```
    pub fn dispatch(&mut self, query: Query, now_ms: u64) -> PendingSearch {
        self.last_ticket += 1;
        let ticket = self.last_ticket;

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(
                superseded_ticket = previous.ticket,
                superseded_query = %previous.query,
                ticket = ticket,
                "superseding in-flight search"
            );
        }

        tracing::debug!(ticket = ticket, query = %query, "dispatching search");

        let request = SearchRequest::for_query(&query, self.settings.limit);
        self.in_flight = Some(InFlight {
            ticket,
            query: query.clone(),
            issued_at_ms: now_ms,
        });

        PendingSearch { ticket, query, request }
    }

    /// Whether a search is in flight. This is the loading flag.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn in_flight_ticket(&self) -> Option<Ticket> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    /// Query text of the search in flight.
    #[must_use]
    pub fn in_flight_query(&self) -> Option<&Query> {
        self.in_flight.as_ref().map(|f| &f.query)
    }

    /// Host time at which the in-flight search times out.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<u64> {
        self.in_flight
            .as_ref()
            .map(|f| f.issued_at_ms.saturating_add(self.settings.timeout_secs.saturating_mul(1000)))
    }

    /// The most recent failure, cleared by the next delivered response.
    #[must_use]
    pub const fn last_error(&self) -> Option<&DispatchFailure> {
        self.last_error.as_ref()
    }

    /// Feeds the outcome of the request sent under `ticket` back in.
    ///
    /// Clears the searching flag unless the ticket is stale.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<SearchResponse, DispatchFailure>,
    ) -> Resolution {
        let Some(in_flight) = self.take_in_flight(ticket) else {
            tracing::debug!(ticket = ticket, current = ?self.in_flight_ticket(), "dropping stale search response");
            return Resolution::Stale { ticket };
        };

        match outcome {
            Ok(response) => {
                tracing::debug!(
                    ticket = ticket,
                    total_results = response.total_results,
                    returned = response.results.len(),
                    "search delivered"
                );
                self.last_error = None;
                Resolution::Delivered {
                    query: in_flight.query,
                    response,
                }
            }
            Err(failure) => self.fail(in_flight, failure),
        }
    }

    /// Times out the in-flight search if it is older than the configured
    /// timeout at host time `now_ms`.
    pub fn expire(&mut self, now_ms: u64) -> Option<Resolution> {
        let timeout_ms = self.settings.timeout_secs.saturating_mul(1000);
        let in_flight = self.in_flight.as_ref()?;

        if now_ms.saturating_sub(in_flight.issued_at_ms) < timeout_ms {
            return None;
        }

        let ticket = in_flight.ticket;
        let in_flight = self.take_in_flight(ticket)?;
        tracing::debug!(ticket = ticket, "search timed out");
        Some(self.fail(
            in_flight,
            DispatchFailure::Timeout {
                after_secs: self.settings.timeout_secs,
            },
        ))
    }

    /// Abandons the in-flight search; its response will be stale.
    pub fn cancel(&mut self) -> Option<Ticket> {
        let cancelled = self.in_flight.take()?;
        tracing::debug!(ticket = cancelled.ticket, "search cancelled");
        Some(cancelled.ticket)
    }

    fn take_in_flight(&mut self, ticket: Ticket) -> Option<InFlight> {
        if self.in_flight_ticket() == Some(ticket) {
            self.in_flight.take()
        } else {
            None
        }
    }

    fn fail(&mut self, in_flight: InFlight, failure: DispatchFailure) -> Resolution {
        tracing::warn!(ticket = in_flight.ticket, query = %in_flight.query, error = %failure, "search failed");
        self.last_error = Some(failure.clone());

        match self.settings.policy {
            FailurePolicy::Fallback => Resolution::Fallback {
                response: fallback_response(&in_flight.query),
                query: in_flight.query,
                failure,
            },
            FailurePolicy::Surface => Resolution::Failed {
                query: in_flight.query,
                failure,
            },
        }
    }
}
