//! Client for a remote ClamAV scanning service.
//!
//! - [`factory`] - Resolves an endpoint and builds a [`ServiceClient`]
//! - [`routes`] - The service's route table
//! - [`retry`] - Retry policy handed to the transport
//! - [`service`] - The client itself
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clamav_client::client::{build_client, EndpointSource};
//! use clamav_client::config::ConfigSet;
//!
//! let configs = ConfigSet::from_path("clamav.toml")?;
//! let client = build_client(EndpointSource::named("default"), Some(&configs))?;
//! ```

pub mod factory;
pub mod retry;
pub mod routes;
pub mod service;

pub use factory::{build_client, ClientFactory, EndpointSource};
pub use retry::{RetryBudget, RetryCause, RetryPolicy};
pub use routes::{ClamAvRoutes, Route};
pub use service::ServiceClient;
