//! The request view consumed by route matching.
//!
//! Routing never touches the wire: the embedding server hands over the
//! method, path, decoded query parameters, subdomain and raw `Accept` header
//! as plain fields.

use http::Method;
use std::collections::HashMap;
use std::net::IpAddr;

/// Request data needed to match a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without query string, always starting with `/`
    pub path: String,
    /// Decoded query string parameters
    pub query_params: HashMap<String, String>,
    /// Subdomain of the requested host, empty when there is none
    pub subdomain: String,
    /// Raw `Accept` header value
    pub accept: Option<String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_params: HashMap::new(),
            subdomain: String::new(),
            accept: None,
        }
    }

    /// Build a request from a request target such as `/users?limit=10`.
    ///
    /// The path is split at the first `?` and the query string is decoded.
    ///
    /// ```rust
    /// use http::Method;
    /// use segrouter::Request;
    ///
    /// let request = Request::from_target(Method::GET, "/users?limit=10");
    /// assert_eq!(request.path, "/users");
    /// assert_eq!(request.query_params["limit"], "10");
    /// ```
    pub fn from_target(method: Method, target: &str) -> Self {
        let path = target.split_once('?').map_or(target, |(path, _)| path);
        let mut request = Self::new(method, path);
        request.query_params = parse_query_params(target);
        request
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = subdomain.into();
        self
    }

    /// Set the subdomain from a `Host` header value.
    pub fn with_host(mut self, host: &str) -> Self {
        self.subdomain = subdomain_from_host(host);
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }
}

/// Parse query string parameters from a request target
///
/// Extracts everything after the `?` character and URL-decodes parameter names and values.
/// Repeated keys keep the last value.
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    match target.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => HashMap::new(),
    }
}

/// Derive the subdomain from a host name.
///
/// Everything before the last two labels is the subdomain, so
/// `clients2.test.com:8080` yields `clients2`. IP addresses and bare domains
/// have no subdomain.
pub fn subdomain_from_host(host: &str) -> String {
    if host.parse::<IpAddr>().is_ok() {
        return String::new();
    }
    let name = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    if name.parse::<IpAddr>().is_ok() {
        return String::new();
    }
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() <= 2 {
        return String::new();
    }
    labels[..labels.len() - 2].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_target_splits_query() {
        let request = Request::from_target(Method::GET, "/search?q=rust%20lang&page=2");
        assert_eq!(request.path, "/search");
        assert_eq!(request.query_params.get("q").map(String::as_str), Some("rust lang"));
        assert_eq!(request.query_params.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_from_target_without_query() {
        let request = Request::from_target(Method::POST, "/items");
        assert_eq!(request.path, "/items");
        assert!(request.query_params.is_empty());
    }

    #[test]
    fn test_subdomain_from_host() {
        assert_eq!(subdomain_from_host("clients2.test.com"), "clients2");
        assert_eq!(subdomain_from_host("a.b.test.com:8080"), "a.b");
        assert_eq!(subdomain_from_host("test.com"), "");
        assert_eq!(subdomain_from_host("localhost:80"), "");
        assert_eq!(subdomain_from_host("127.0.0.1"), "");
        assert_eq!(subdomain_from_host("127.0.0.1:8000"), "");
    }
}
