//! The scanning service client handed out by the factory.

use crate::client::retry::RetryPolicy;
use crate::client::routes::{ClamAvRoutes, Route};
use crate::core::ClientError;

/// Client for a remote ClamAV scanning service.
///
/// Bundles the service routes, the retry policy the transport must apply,
/// and a pooled HTTP client. Construction performs no network I/O; clones
/// share the connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use clamav_client::client::{ClamAvRoutes, RetryPolicy, Route, ServiceClient};
///
/// let client = ServiceClient::new(
///     ClamAvRoutes::new("http://clamav.svc:8080"),
///     RetryPolicy::default(),
/// )?;
/// let request = client.get(Route::Info);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceClient {
    routes: ClamAvRoutes,
    retry_policy: RetryPolicy,
    http: reqwest::Client,
}

impl ServiceClient {
    /// Creates a client for the given routes and retry policy.
    pub fn new(routes: ClamAvRoutes, retry_policy: RetryPolicy) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            routes,
            retry_policy,
            http,
        })
    }

    /// Returns the service routes.
    pub fn routes(&self) -> &ClamAvRoutes {
        &self.routes
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &str {
        self.routes.base_url()
    }

    /// Returns the retry policy the transport applies to this client's requests.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Prepares a GET request to `route`.
    pub fn get(&self, route: Route) -> reqwest::RequestBuilder {
        self.http.get(self.routes.url(route))
    }

    /// Prepares a POST request to `route`.
    pub fn post(&self, route: Route) -> reqwest::RequestBuilder {
        self.http.post(self.routes.url(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ServiceClient {
        ServiceClient::new(
            ClamAvRoutes::new("http://clamav.svc:8080/"),
            RetryPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let client = test_client();
        assert_eq!(client.base_url(), "http://clamav.svc:8080/");
        assert_eq!(client.routes().info(), "http://clamav.svc:8080/info");
        assert_eq!(client.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn test_requests_target_routes() {
        let client = test_client();

        let info = client.get(Route::Info).build().unwrap();
        assert_eq!(info.method(), reqwest::Method::GET);
        assert_eq!(info.url().as_str(), "http://clamav.svc:8080/info");

        let scan = client.post(Route::Scan).build().unwrap();
        assert_eq!(scan.method(), reqwest::Method::POST);
        assert_eq!(scan.url().path(), "/scan");
    }

    #[test]
    fn test_malformed_base_url_fails_at_request_time() {
        let client = ServiceClient::new(ClamAvRoutes::new("not a url"), RetryPolicy::default())
            .unwrap();
        assert!(client.get(Route::Info).build().is_err());
    }
}
