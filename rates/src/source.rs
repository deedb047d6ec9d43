//! External price source interface.

use async_trait::async_trait;
use ratevault_common::{AssetSymbol, Ufixed, UnixSeconds};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RateResult;

/// Status reported by the external price service alongside a quote.
///
/// Anything other than [`QueryStatus::Ok`] is treated as a hard
/// failure by the repository; a disagreed or invalid value would
/// corrupt every downstream conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    /// The quote is usable.
    Ok,
    /// The source could not produce a quote.
    Unavailable,
    /// Upstream feeds disagreed beyond tolerance.
    Disagreement,
    /// The quote failed the source's own validity checks.
    Invalid,
}

impl QueryStatus {
    /// Whether the quote may be used.
    pub fn is_ok(self) -> bool {
        matches!(self, QueryStatus::Ok)
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryStatus::Ok => "OK",
            QueryStatus::Unavailable => "UNAVAILABLE",
            QueryStatus::Disagreement => "DISAGREEMENT",
            QueryStatus::Invalid => "INVALID",
        };
        write!(f, "{s}")
    }
}

/// A single quote returned by the price service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Quoted value, scaled by the fixed-point unit.
    pub value: Ufixed,
    /// When the source last refreshed this value.
    pub updated_at: UnixSeconds,
    /// Outcome status for this query.
    pub status: QueryStatus,
}

impl PriceQuote {
    /// A usable quote.
    pub fn ok(value: Ufixed, updated_at: UnixSeconds) -> Self {
        Self {
            value,
            updated_at,
            status: QueryStatus::Ok,
        }
    }

    /// A failed quote carrying the given status.
    pub fn failed(status: QueryStatus) -> Self {
        Self {
            value: 0,
            updated_at: 0,
            status,
        }
    }
}

/// Trait for external price sources.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Query the current quote for an asset.
    async fn query(&self, symbol: AssetSymbol) -> RateResult<PriceQuote>;
}

/// Mock price source for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockPriceSource {
    name: String,
    quotes: dashmap::DashMap<AssetSymbol, PriceQuote>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockPriceSource {
    /// Create a new mock source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quotes: dashmap::DashMap::new(),
        }
    }

    /// Set the quote returned for an asset.
    pub fn set_quote(&self, symbol: AssetSymbol, quote: PriceQuote) {
        self.quotes.insert(symbol, quote);
    }

    /// Set a usable rate for an asset.
    pub fn set_rate(&self, symbol: AssetSymbol, value: Ufixed) {
        self.set_quote(symbol, PriceQuote::ok(value, 0));
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl PriceSource for MockPriceSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, symbol: AssetSymbol) -> RateResult<PriceQuote> {
        Ok(self
            .quotes
            .get(&symbol)
            .map(|q| *q)
            .unwrap_or_else(|| PriceQuote::failed(QueryStatus::Unavailable)))
    }
}
