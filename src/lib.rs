//! # clamav-client
//!
//! Client construction for a remote ClamAV scanning service, and regex
//! include/exclude filters.
//!
//! ## Overview
//!
//! - Build a [`ServiceClient`] from a named configuration, a configuration
//!   value, or a raw URL. Every client carries a bounded [`RetryPolicy`]
//!   for the transport that sends its requests.
//! - Build a [`PatternFilter`] from include and exclude patterns and use it
//!   as a predicate over strings, or over any value through a projection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clamav_client::prelude::*;
//!
//! let configs = ConfigSet::from_path("clamav.toml")?;
//! let client = build_client(EndpointSource::named("default"), Some(&configs))?;
//! let request = client.post(Route::Scan);
//!
//! let filter = PatternFilter::new([r".*\.tar\.gz"], [r"debug-.*"], PatternFlags::NONE)?;
//! assert!(filter.matches("release.tar.gz"));
//! ```
//!
//! ## Architecture
//!
//! - **Client**: endpoint resolution, route table, retry policy, service client
//! - **Config**: service configuration values and named lookup
//! - **Filter**: compiled include/exclude predicates
//! - **Core**: error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod core;
pub mod filter;

// Re-export commonly used types at the crate root
pub use crate::client::{
    build_client, ClamAvRoutes, ClientFactory, EndpointSource, RetryBudget, RetryCause,
    RetryPolicy, Route, ServiceClient,
};
pub use crate::config::{ClamAvConfig, ConfigLookup, ConfigSet};
pub use crate::core::{ClientError, LookupError, PatternError, RetryError};
pub use crate::filter::{FilterSpec, PatternFilter, PatternFlags, ProjectedFilter};

/// Prelude module for convenient imports.
///
/// ```rust
/// use clamav_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{
        build_client, ClientFactory, EndpointSource, RetryPolicy, Route, ServiceClient,
    };
    pub use crate::config::{ClamAvConfig, ConfigLookup, ConfigSet};
    pub use crate::core::{ClientError, LookupError, PatternError};
    pub use crate::filter::{FilterSpec, PatternFilter, PatternFlags};
}
