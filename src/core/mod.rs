//! Core types shared across the library.
//!
//! - [`error`] - Structured error types

pub mod error;

pub use error::{ClientError, LookupError, PatternError, RetryError};
