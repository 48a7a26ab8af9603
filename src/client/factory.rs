//! Construction of [`ServiceClient`]s from a configuration reference.

use crate::client::retry::RetryPolicy;
use crate::client::routes::ClamAvRoutes;
use crate::client::service::ServiceClient;
use crate::config::{ClamAvConfig, ConfigLookup};
use crate::core::ClientError;

/// Where the service endpoint comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSource {
    /// A configuration name, resolved through a [`ConfigLookup`].
    Named(String),
    /// An already-resolved configuration.
    Config(ClamAvConfig),
    /// A service URL, used verbatim.
    Url(String),
}

impl EndpointSource {
    /// Creates a source referring to a named configuration.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a source from an explicit URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Builds a source from two optional inputs, exactly one of which must be set.
    ///
    /// Empty strings count as unset.
    pub fn from_parts(cfg: Option<&str>, url: Option<&str>) -> Result<Self, ClientError> {
        let cfg = cfg.filter(|s| !s.is_empty());
        let url = url.filter(|s| !s.is_empty());

        match (cfg, url) {
            (Some(name), None) => Ok(Self::named(name)),
            (None, Some(url)) => Ok(Self::url(url)),
            _ => Err(ClientError::invalid_argument(
                "exactly one of cfg, url must be passed",
            )),
        }
    }
}

impl From<ClamAvConfig> for EndpointSource {
    fn from(config: ClamAvConfig) -> Self {
        Self::Config(config)
    }
}

/// Builds scanning service clients.
///
/// Every client gets the fixed default [`RetryPolicy`]. Callers that need a
/// different policy can wire a [`ServiceClient`] by hand with
/// [`ServiceClient::new`].
#[derive(Clone, Default)]
pub struct ClientFactory<'a> {
    lookup: Option<&'a dyn ConfigLookup>,
}

impl std::fmt::Debug for ClientFactory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("has_lookup", &self.lookup.is_some())
            .finish()
    }
}

impl<'a> ClientFactory<'a> {
    /// Creates a factory without a configuration lookup. Only URL and
    /// configuration-value sources can be built.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookup used to resolve named configurations.
    pub fn with_lookup(mut self, lookup: &'a dyn ConfigLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Resolves `source` and builds a client for it.
    ///
    /// Named sources call the lookup exactly once. Lookup errors are
    /// returned unchanged. No network I/O happens here.
    pub fn build(&self, source: EndpointSource) -> Result<ServiceClient, ClientError> {
        let url = match source {
            EndpointSource::Named(name) => {
                let lookup = self.lookup.ok_or_else(|| {
                    ClientError::invalid_argument(format!(
                        "no configuration lookup available to resolve '{name}'"
                    ))
                })?;
                lookup.clamav_config(&name)?.service_url().to_string()
            }
            EndpointSource::Config(config) => config.service_url().to_string(),
            EndpointSource::Url(url) => url,
        };

        tracing::debug!(endpoint = %url, "Building clamav client");

        ServiceClient::new(ClamAvRoutes::new(url), RetryPolicy::default())
    }
}

/// Builds a client for `source`, resolving named configurations through `lookup`.
pub fn build_client(
    source: EndpointSource,
    lookup: Option<&dyn ConfigLookup>,
) -> Result<ServiceClient, ClientError> {
    ClientFactory { lookup }.build(source)
}
