//! # Error Types
//!
//! This module defines the error type shared by every part of the tour search.
//! Configuration problems are reported before any work starts. Once the
//! generational loop is running, the only failure it can report is a broken
//! route invariant.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use tsp_genalg::error::{Result, TspError};
//!
//! fn check_cities(n: usize) -> Result<()> {
//!     if n < 2 {
//!         return Err(TspError::Configuration(format!(
//!             "At least 2 cities are required, got {}",
//!             n
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_cities(1).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use tsp_genalg::error::{OptionExt, TspError};
//!
//! fn shortest(lengths: &[f64]) -> tsp_genalg::error::Result<f64> {
//!     lengths
//!         .iter()
//!         .cloned()
//!         .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.min(x))))
//!         .ok_or_else_tsp(|| TspError::EmptyPopulation)
//! }
//!
//! assert_eq!(shortest(&[3.0, 1.5]).unwrap(), 1.5);
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Errors raised while configuring or running a tour search.
#[derive(Error, Debug)]
pub enum TspError {
    /// Invalid cities or evolution options. Raised before the run starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A city index outside of the city table was requested.
    #[error("City index {index} is out of range for a table of {len} cities")]
    IndexOutOfRange { index: usize, len: usize },

    /// A route stopped being a permutation of the city indices.
    ///
    /// Correct operators never produce this, so the run is aborted when it is seen.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// An operation needed at least one route.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Cities or options could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for tour search operations.
pub type Result<T> = std::result::Result<T, TspError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use tsp_genalg::error::ResultExt;
/// use std::fs::File;
///
/// fn open_cities(path: &str) -> tsp_genalg::error::Result<()> {
///     File::open(path).context("Failed to open city file")?;
///     Ok(())
/// }
///
/// assert!(open_cities("/definitely/not/here.json").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error into a `TspError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| TspError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TspError>` using `err_fn` for `None`.
    fn ok_or_else_tsp<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TspError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_tsp<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TspError,
    {
        self.ok_or_else(err_fn)
    }
}
