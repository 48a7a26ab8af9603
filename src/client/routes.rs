//! Route table of the ClamAV scanning service.

use std::fmt;

/// An endpoint exposed by the scanning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Service and signature database information.
    Info,
    /// Scan submission.
    Scan,
}

impl Route {
    /// Path of the route relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Scan => "scan",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Base URL of a scanning service plus its fixed routes.
///
/// The base URL is kept verbatim; it is not validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClamAvRoutes {
    base_url: String,
}

impl ClamAvRoutes {
    /// Creates a route table rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the info route.
    pub fn info(&self) -> String {
        self.url(Route::Info)
    }

    /// URL of the scan route.
    pub fn scan(&self) -> String {
        self.url(Route::Scan)
    }

    /// URL of the given route.
    pub fn url(&self, route: Route) -> String {
        join_url(&[&self.base_url, route.path()])
    }
}

/// Joins URL segments with single slashes.
///
/// Trailing slashes of the first segment, surrounding slashes of middle
/// segments and leading slashes of the last segment are dropped.
pub fn join_url(parts: &[&str]) -> String {
    match parts {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, middle @ .., last] => {
            let mut segments = Vec::with_capacity(parts.len());
            segments.push(first.trim_end_matches('/'));
            segments.extend(middle.iter().map(|s| s.trim_matches('/')));
            segments.push(last.trim_start_matches('/'));
            segments.join("/")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_urls() {
        let routes = ClamAvRoutes::new("http://clamav.svc:8080");
        assert_eq!(routes.info(), "http://clamav.svc:8080/info");
        assert_eq!(routes.scan(), "http://clamav.svc:8080/scan");
    }

    #[test]
    fn test_trailing_slash_not_doubled() {
        let routes = ClamAvRoutes::new("http://clamav.svc/api/");
        assert_eq!(routes.url(Route::Scan), "http://clamav.svc/api/scan");
        assert_eq!(routes.base_url(), "http://clamav.svc/api/");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url(&[]), "");
        assert_eq!(join_url(&["http://a/"]), "http://a/");
        assert_eq!(join_url(&["http://a/", "/b/", "/c"]), "http://a/b/c");
        assert_eq!(join_url(&["http://a", "b", "c/"]), "http://a/b/c/");
    }
}
