//! Regex include/exclude filters.
//!
//! A filter is built from two pattern lists and evaluates to a boolean:
//!
//! - Patterns must match the entire value, not a substring.
//! - An empty include list lets every value through the inclusion stage.
//! - A value matching any exclude pattern is rejected, even if it is included.
//!
//! Patterns are compiled when the filter is built; evaluation never fails.
//!
//! ## Usage
//!
//! ```rust
//! use clamav_client::filter::{PatternFilter, PatternFlags};
//!
//! let filter = PatternFilter::new(["foo.*"], ["foobar"], PatternFlags::NONE).unwrap();
//! assert!(filter.matches("foobaz"));
//! assert!(!filter.matches("foobar"));
//! assert!(!filter.matches("bar"));
//! ```

mod flags;
mod pattern;

pub use flags::PatternFlags;
pub use pattern::{FilterSpec, PatternFilter, ProjectedFilter};
