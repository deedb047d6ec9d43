//! Oracle query adapter.
//!
//! Wraps the external price source behind a bounded-timeout query and
//! enforces the home-asset special case: the home asset is always
//! exactly one unit and never consults the source.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use ratevault_common::{AssetSymbol, Ufixed, UNIT};
use tracing::{debug, warn};

use crate::error::{RateError, RateResult};
use crate::source::{PriceQuote, PriceSource, QueryStatus};

/// Adapter from the repository's rate lookups to the external source.
pub struct OracleAdapter {
    home_asset: AssetSymbol,
    source: RwLock<Arc<dyn PriceSource>>,
    query_timeout: Duration,
}

impl OracleAdapter {
    /// Create a new adapter over the given source.
    pub fn new(
        home_asset: AssetSymbol,
        source: Arc<dyn PriceSource>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            home_asset,
            source: RwLock::new(source),
            query_timeout,
        }
    }

    /// The asset fixed at exactly one unit.
    pub fn home_asset(&self) -> AssetSymbol {
        self.home_asset
    }

    /// Name of the currently configured source.
    pub fn source_name(&self) -> String {
        self.source.read().name().to_string()
    }

    /// Swap the external source reference.
    pub fn rotate_source(&self, source: Arc<dyn PriceSource>) {
        *self.source.write() = source;
    }

    /// Fetch the live rate for an asset.
    ///
    /// Returns exactly [`UNIT`] for the home asset without touching
    /// the source. Any non-OK status propagates as
    /// [`RateError::OracleUnavailable`]; a stale or garbage value must
    /// never be substituted.
    pub async fn rate_for(&self, symbol: AssetSymbol) -> RateResult<Ufixed> {
        if symbol == self.home_asset {
            return Ok(UNIT);
        }

        let quote = self.query(symbol).await?;
        if !quote.status.is_ok() {
            warn!(%symbol, status = %quote.status, "oracle query failed");
            return Err(RateError::OracleUnavailable {
                symbol,
                status: quote.status,
            });
        }

        debug!(%symbol, value = quote.value, "oracle quote");
        Ok(quote.value)
    }

    async fn query(&self, symbol: AssetSymbol) -> RateResult<PriceQuote> {
        let source = self.source.read().clone();

        match tokio::time::timeout(self.query_timeout, source.query(symbol)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%symbol, timeout_ms = self.query_timeout.as_millis() as u64, "oracle query timed out");
                Err(RateError::OracleUnavailable {
                    symbol,
                    status: QueryStatus::Unavailable,
                })
            }
        }
    }
}
