//! Scanning service configuration and named lookup.

mod clamav;
mod lookup;

pub use clamav::ClamAvConfig;
pub use lookup::{ConfigLookup, ConfigSet};
