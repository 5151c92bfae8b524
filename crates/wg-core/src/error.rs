//! Base error type.
//!
//! Sub-crates define their own error enums and carry `CoreError` as the
//! source of the relevant variant.

use thiserror::Error;

/// The shared error type for `wg-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// No id after this one is representable.
    #[error("id {0} leaves no room for a following id")]
    IdSpaceExhausted(u64),
}

/// Shorthand result type for `wg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
