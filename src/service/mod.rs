//! Contract with the external aggregation service.
//!
//! The plugin never performs I/O itself. It describes each request as a
//! [`ServiceRequest`] and the host shim turns that into a `web_request` call;
//! the answer comes back as an event carrying the same [`RequestContext`].
//!
//! - [`wire`]: request and response bodies
//! - [`context`]: correlation between requests and responses

pub mod context;
pub mod wire;

pub use context::RequestContext;
pub use wire::{decode_search_response, decode_trending, SearchRequest};

use crate::domain::Result;
use std::collections::BTreeMap;

/// Default base URL of the aggregation service.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8001";

/// HTTP method of a [`ServiceRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully described HTTP request for the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

/// Where the aggregation service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base_url: String,
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

impl ServiceEndpoint {
    /// Creates an endpoint; trailing slashes are trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use omnisearch::service::ServiceEndpoint;
    ///
    /// let endpoint = ServiceEndpoint::new("http://search.local:8001/");
    /// assert_eq!(endpoint.search_url(), "http://search.local:8001/api/search/universal");
    /// ```
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/api/search/universal", self.base_url)
    }

    #[must_use]
    pub fn trending_url(&self) -> String {
        format!("{}/api/trending", self.base_url)
    }

    /// Builds the web request for a dispatched search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request body cannot be encoded.
    pub fn search_request(&self, request: &SearchRequest, context: RequestContext) -> Result<ServiceRequest> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Ok(ServiceRequest {
            url: self.search_url(),
            method: Method::Post,
            headers,
            body: request.to_body()?,
            context,
        })
    }

    #[must_use]
    pub fn trending_request(&self) -> ServiceRequest {
        ServiceRequest {
            url: self.trending_url(),
            method: Method::Get,
            headers: BTreeMap::new(),
            body: Vec::new(),
            context: RequestContext::Trending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Query;

    #[test]
    fn search_request_posts_json() {
        let endpoint = ServiceEndpoint::default();
        let body = SearchRequest::for_query(&Query::parse("x").unwrap(), 10);
        let request = endpoint
            .search_request(&body, RequestContext::Search { ticket: 3 })
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://localhost:8001/api/search/universal");
        assert_eq!(request.headers["Content-Type"], "application/json");
        let decoded: SearchRequest = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn trending_request_is_a_bare_get() {
        let request = ServiceEndpoint::new("https://api.example.com//").trending_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "https://api.example.com/api/trending");
        assert!(request.body.is_empty());
        assert_eq!(request.context, RequestContext::Trending);
    }
}
