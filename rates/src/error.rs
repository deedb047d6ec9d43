//! Rate repository error types.

use ratevault_common::{AssetSymbol, FixedPointError, UnixSeconds};
use thiserror::Error;

use crate::source::QueryStatus;

/// Errors that can occur in the rate repository.
#[derive(Debug, Error)]
pub enum RateError {
    /// The asset's last update exceeds the freshness window.
    #[error("rate for {0} is stale")]
    StaleRate(AssetSymbol),

    /// The external price source reported a non-OK status.
    #[error("oracle unavailable for {symbol}: {status}")]
    OracleUnavailable {
        symbol: AssetSymbol,
        status: QueryStatus,
    },

    /// Inverse pricing bounds violated the configuration invariants.
    #[error("invalid inverse pricing bounds: {0}")]
    InvalidBounds(#[from] BoundsViolation),

    /// A configuration mutation was attempted without the
    /// administrator capability.
    #[error("unauthorized configuration attempt")]
    Unauthorized,

    /// A pushed update timestamp was too far in the future.
    #[error("update timestamp {supplied} is more than {tolerance}s ahead of {now}")]
    FutureTimestamp {
        supplied: UnixSeconds,
        now: UnixSeconds,
        tolerance: u64,
    },

    /// Pushed symbol and value lists differ in length.
    #[error("symbol list has {symbols} entries but value list has {values}")]
    LengthMismatch { symbols: usize, values: usize },

    /// Fixed-point arithmetic failure (division by zero or overflow).
    #[error(transparent)]
    Math(#[from] FixedPointError),
}

/// The specific bounds invariant an inverse pricing configuration
/// violated. Checks run in this order; the first violation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsViolation {
    /// `entry_point` must be above zero.
    #[error("entry point must be above zero")]
    ZeroEntryPoint,

    /// `lower_limit` must be above zero.
    #[error("lower limit must be above zero")]
    ZeroLowerLimit,

    /// `upper_limit` must be above the entry point.
    #[error("upper limit must be above the entry point")]
    UpperNotAboveEntry,

    /// `upper_limit` must be strictly less than double the entry point.
    #[error("upper limit must be less than double the entry point")]
    UpperAtOrAboveDoubleEntry,

    /// `lower_limit` must be below the entry point.
    #[error("lower limit must be below the entry point")]
    LowerNotBelowEntry,
}

/// Result type for rate repository operations.
pub type RateResult<T> = Result<T, RateError>;
