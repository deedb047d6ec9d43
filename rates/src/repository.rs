//! The rate repository facade.
//!
//! Single source of truth for asset rates: staleness-gated lookups,
//! cross-asset conversion pivoting through the home asset, inverse
//! pricing resolution, and the administrator-gated configuration
//! surface. Every mutation applies atomically and appends an audit
//! record.

use std::sync::Arc;
use std::time::Duration;

use ratevault_common::{
    divide_round, multiply_round, AssetSymbol, Clock, Ufixed, UnixSeconds,
};
use tracing::{info, instrument};

use crate::basket::BasketDefinition;
use crate::error::{RateError, RateResult};
use crate::events::{AuditEvent, AuditLog};
use crate::inverse::{InversePricing, InversePricingEngine};
use crate::oracle::OracleAdapter;
use crate::source::PriceSource;
use crate::staleness::StalenessGuard;

/// Deployment constants for the repository.
#[derive(Debug, Clone)]
pub struct RateRepositoryConfig {
    /// The asset fixed at exactly one unit and exempt from staleness.
    pub home_asset: AssetSymbol,
    /// Maximum rate age before it is considered stale, in seconds.
    pub stale_period_secs: u64,
    /// How far ahead of the clock a pushed update timestamp may be.
    pub future_timestamp_tolerance_secs: u64,
    /// Bound on each external oracle query.
    pub oracle_query_timeout: Duration,
}

impl Default for RateRepositoryConfig {
    fn default() -> Self {
        Self {
            home_asset: AssetSymbol::from_static("sUSD"),
            stale_period_secs: 3 * 60 * 60,
            future_timestamp_tolerance_secs: 10 * 60,
            oracle_query_timeout: Duration::from_secs(5),
        }
    }
}

/// Capability token required by configuration mutations.
///
/// Unforgeable outside this module: one is minted per repository at
/// construction and compared by identity before any state is touched.
/// Reads require no capability.
#[derive(Debug, Clone)]
pub struct Administrator {
    key: u64,
}

/// The shared rate repository.
pub struct RateRepository {
    oracle: OracleAdapter,
    staleness: StalenessGuard,
    inverse: InversePricingEngine,
    basket: BasketDefinition,
    audit: AuditLog,
    clock: Arc<dyn Clock>,
    future_timestamp_tolerance: u64,
    admin_key: u64,
}

impl RateRepository {
    /// Create a repository, returning it together with its
    /// administrator capability.
    pub fn new(
        config: RateRepositoryConfig,
        basket: BasketDefinition,
        source: Arc<dyn PriceSource>,
        clock: Arc<dyn Clock>,
    ) -> (Self, Administrator) {
        static NEXT_ADMIN_KEY: std::sync::atomic::AtomicU64 =
            std::sync::atomic::AtomicU64::new(1);
        let key = NEXT_ADMIN_KEY.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        let repository = Self {
            oracle: OracleAdapter::new(
                config.home_asset,
                source,
                config.oracle_query_timeout,
            ),
            staleness: StalenessGuard::new(
                config.home_asset,
                config.stale_period_secs,
                clock.clone(),
            ),
            inverse: InversePricingEngine::new(),
            basket,
            audit: AuditLog::new(),
            clock,
            future_timestamp_tolerance: config.future_timestamp_tolerance_secs,
            admin_key: key,
        };

        (repository, Administrator { key })
    }

    fn authorize(&self, admin: &Administrator) -> RateResult<()> {
        if admin.key != self.admin_key {
            return Err(RateError::Unauthorized);
        }
        Ok(())
    }

    fn now(&self) -> UnixSeconds {
        self.clock.now_seconds()
    }

    /// The home asset symbol.
    pub fn home_asset(&self) -> AssetSymbol {
        self.oracle.home_asset()
    }

    /// The immutable basket definition.
    pub fn basket(&self) -> &BasketDefinition {
        &self.basket
    }

    /// The current staleness window in seconds.
    pub fn stale_period(&self) -> u64 {
        self.staleness.stale_period()
    }

    /// Snapshot of the audit log, oldest first.
    pub fn audit_log(&self) -> Vec<AuditEvent> {
        self.audit.snapshot()
    }

    /// Symbols currently under inverse pricing.
    pub fn inverted_assets(&self) -> Vec<AssetSymbol> {
        self.inverse.inverted_assets()
    }

    /// The inverse pricing record for an asset, if configured.
    pub fn inverse_pricing(&self, symbol: AssetSymbol) -> Option<InversePricing> {
        self.inverse.record(symbol)
    }

    /// Whether an asset's rate is stale.
    pub fn is_stale(&self, symbol: AssetSymbol) -> bool {
        self.staleness.is_stale(symbol)
    }

    /// Whether any asset in the list is stale. The home asset never
    /// trips the check.
    pub fn any_stale(&self, symbols: &[AssetSymbol]) -> bool {
        self.staleness.any_stale(symbols)
    }

    /// Whether an inverted asset has frozen at a boundary.
    pub fn is_frozen(&self, symbol: AssetSymbol) -> bool {
        self.inverse.is_frozen(symbol)
    }

    /// Last update time for an asset; zero if never updated.
    pub fn last_update_time_for(&self, symbol: AssetSymbol) -> UnixSeconds {
        self.staleness.last_update(symbol)
    }

    /// Element-wise [`Self::last_update_time_for`].
    pub fn last_update_times_for(&self, symbols: &[AssetSymbol]) -> Vec<UnixSeconds> {
        symbols
            .iter()
            .map(|s| self.staleness.last_update(*s))
            .collect()
    }

    /// The current effective rate for an asset.
    ///
    /// Gated on freshness; fetches live from the oracle (the home
    /// asset short-circuits to one unit) and resolves inverse pricing,
    /// latching the freeze when a boundary is crossed.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn rate_for(&self, symbol: AssetSymbol) -> RateResult<Ufixed> {
        if self.staleness.is_stale(symbol) {
            return Err(RateError::StaleRate(symbol));
        }

        let live = self.oracle.rate_for(symbol).await?;
        let outcome = self.inverse.effective_rate(symbol, live);
        if outcome.newly_frozen {
            info!(%symbol, frozen_rate = outcome.rate, "inverse rate froze at boundary");
            self.audit.append(AuditEvent::RateFrozen {
                at: self.now(),
                symbol,
                frozen_rate: outcome.rate,
            });
        }

        Ok(outcome.rate)
    }

    /// Element-wise [`Self::rate_for`]. Each element is independently
    /// consistent at read time; the list is not a snapshot.
    pub async fn rates_for(&self, symbols: &[AssetSymbol]) -> RateResult<Vec<Ufixed>> {
        let mut rates = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            rates.push(self.rate_for(*symbol).await?);
        }
        Ok(rates)
    }

    /// The equivalent amount of `dest` for `amount` of `source`,
    /// pivoting through the home asset.
    ///
    /// Both legs must be fresh, checked before the identity
    /// short-circuit. The two-step rounding (round on the multiply,
    /// round again on the divide) is the defined behavior and must not
    /// be algebraically simplified.
    #[instrument(skip(self), fields(source = %source, dest = %dest, amount))]
    pub async fn effective_value(
        &self,
        source: AssetSymbol,
        amount: Ufixed,
        dest: AssetSymbol,
    ) -> RateResult<Ufixed> {
        if self.staleness.is_stale(source) {
            return Err(RateError::StaleRate(source));
        }
        if self.staleness.is_stale(dest) {
            return Err(RateError::StaleRate(dest));
        }

        if source == dest {
            return Ok(amount);
        }

        let source_rate = self.rate_for(source).await?;
        let dest_rate = self.rate_for(dest).await?;

        let pivot = multiply_round(amount, source_rate)?;
        Ok(divide_round(pivot, dest_rate)?)
    }

    /// Replace the staleness window. Administrator only.
    pub fn set_stale_period(&self, admin: &Administrator, secs: u64) -> RateResult<()> {
        self.authorize(admin)?;

        self.staleness.set_stale_period(secs);
        self.audit.append(AuditEvent::StalePeriodUpdated {
            at: self.now(),
            stale_period: secs,
        });
        Ok(())
    }

    /// Record a pushed rate update. Administrator only; the sole
    /// writer of last-update timestamps.
    ///
    /// Rejects mismatched list lengths and timestamps further in the
    /// future than the configured tolerance. The home asset is
    /// skipped. The repository persists no numeric rate; supplied
    /// values flow into the audit record only.
    #[instrument(skip(self, admin, symbols, values), fields(count = symbols.len(), timestamp))]
    pub fn update_rates(
        &self,
        admin: &Administrator,
        symbols: &[AssetSymbol],
        values: &[Ufixed],
        timestamp: UnixSeconds,
    ) -> RateResult<()> {
        self.authorize(admin)?;

        if symbols.len() != values.len() {
            return Err(RateError::LengthMismatch {
                symbols: symbols.len(),
                values: values.len(),
            });
        }

        let now = self.now();
        if timestamp > now.saturating_add(self.future_timestamp_tolerance) {
            return Err(RateError::FutureTimestamp {
                supplied: timestamp,
                now,
                tolerance: self.future_timestamp_tolerance,
            });
        }

        let home = self.oracle.home_asset();
        for symbol in symbols {
            if *symbol != home {
                self.staleness.record_update(*symbol, timestamp);
            }
        }

        self.audit.append(AuditEvent::RatesUpdated {
            at: now,
            symbols: symbols.to_vec(),
            values: values.to_vec(),
            timestamp,
        });
        Ok(())
    }

    /// Configure inverse pricing for an asset. Administrator only.
    ///
    /// Reconfiguring re-anchors the market: bounds are overwritten as
    /// a single unit and any prior freeze is reset.
    pub fn configure_inverse(
        &self,
        admin: &Administrator,
        symbol: AssetSymbol,
        entry_point: Ufixed,
        upper_limit: Ufixed,
        lower_limit: Ufixed,
    ) -> RateResult<()> {
        self.authorize(admin)?;

        let record = self
            .inverse
            .configure(symbol, entry_point, upper_limit, lower_limit)?;
        self.audit.append(AuditEvent::InversePricingConfigured {
            at: self.now(),
            symbol,
            entry_point: record.entry_point,
            upper_limit: record.upper_limit,
            lower_limit: record.lower_limit,
        });
        Ok(())
    }

    /// Remove inverse pricing for an asset. Administrator only.
    /// Removing an unconfigured asset is a no-op.
    pub fn remove_inverse(&self, admin: &Administrator, symbol: AssetSymbol) -> RateResult<()> {
        self.authorize(admin)?;

        if self.inverse.remove(symbol) {
            self.audit.append(AuditEvent::InversePricingRemoved {
                at: self.now(),
                symbol,
            });
        }
        Ok(())
    }

    /// Rotate the external oracle endpoint. Administrator only.
    pub fn rotate_price_source(
        &self,
        admin: &Administrator,
        source: Arc<dyn PriceSource>,
    ) -> RateResult<()> {
        self.authorize(admin)?;

        self.oracle.rotate_source(source);
        self.audit.append(AuditEvent::PriceSourceRotated {
            at: self.now(),
            source: self.oracle.source_name(),
        });
        Ok(())
    }
}
