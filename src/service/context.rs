//! Correlation data attached to outgoing web requests.
//!
//! The host hands the request context map back unchanged with the response,
//! which is how a response is matched to the dispatch ticket that produced it.

use crate::search::Ticket;
use std::collections::BTreeMap;

const KIND_KEY: &str = "omnisearch_request";
const TICKET_KEY: &str = "ticket";

/// What an in-flight web request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestContext {
    /// A search dispatched under `ticket`.
    Search { ticket: Ticket },
    /// The trending-topics request sent at start-up.
    Trending,
}

impl RequestContext {
    /// Encodes the context as the string map the host carries.
    #[must_use]
    pub fn to_map(self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        match self {
            Self::Search { ticket } => {
                map.insert(KIND_KEY.to_string(), "search".to_string());
                map.insert(TICKET_KEY.to_string(), ticket.to_string());
            }
            Self::Trending => {
                map.insert(KIND_KEY.to_string(), "trending".to_string());
            }
        }
        map
    }

    /// Decodes a context map; `None` for requests this plugin did not make.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::service::RequestContext;
    ///
    /// let map = RequestContext::Search { ticket: 7 }.to_map();
    /// assert_eq!(RequestContext::from_map(&map), Some(RequestContext::Search { ticket: 7 }));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        match map.get(KIND_KEY)?.as_str() {
            "search" => map
                .get(TICKET_KEY)
                .and_then(|ticket| ticket.parse().ok())
                .map(|ticket| Self::Search { ticket }),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_or_broken_maps_are_ignored() {
        assert_eq!(RequestContext::from_map(&BTreeMap::new()), None);

        let mut map = RequestContext::Search { ticket: 1 }.to_map();
        map.insert(TICKET_KEY.to_string(), "not-a-number".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
    }

    #[test]
    fn trending_round_trips() {
        let map = RequestContext::Trending.to_map();
        assert_eq!(RequestContext::from_map(&map), Some(RequestContext::Trending));
    }
}
