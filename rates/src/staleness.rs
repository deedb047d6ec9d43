//! Rate freshness tracking.
//!
//! Tracks per-asset last-update timestamps and evaluates them against
//! a single process-wide staleness window. This is a precondition
//! gate, not a side-effecting operation: every check reads the clock
//! fresh, since the current time advances externally.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use ratevault_common::{AssetSymbol, Clock, UnixSeconds};
use tracing::debug;

/// Evaluates whether a rate is too old to trust.
pub struct StalenessGuard {
    home_asset: AssetSymbol,
    last_update: DashMap<AssetSymbol, UnixSeconds>,
    stale_period: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl StalenessGuard {
    /// Create a guard with the given staleness window in seconds.
    pub fn new(home_asset: AssetSymbol, stale_period: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            home_asset,
            last_update: DashMap::new(),
            stale_period: AtomicU64::new(stale_period),
            clock,
        }
    }

    /// The current staleness window in seconds.
    pub fn stale_period(&self) -> u64 {
        self.stale_period.load(Ordering::SeqCst)
    }

    /// Replace the staleness window. Affects all assets immediately.
    pub fn set_stale_period(&self, secs: u64) {
        self.stale_period.store(secs, Ordering::SeqCst);
    }

    /// Record an update timestamp for an asset.
    pub fn record_update(&self, symbol: AssetSymbol, at: UnixSeconds) {
        self.last_update.insert(symbol, at);
    }

    /// Last update time for an asset; zero if never updated.
    pub fn last_update(&self, symbol: AssetSymbol) -> UnixSeconds {
        self.last_update.get(&symbol).map(|t| *t).unwrap_or(0)
    }

    /// Whether an asset's rate is stale.
    ///
    /// The home asset is always fresh. Any other asset is stale when
    /// `last_update + stale_period < now`; an asset that has never
    /// been updated fails closed under any positive window.
    pub fn is_stale(&self, symbol: AssetSymbol) -> bool {
        if symbol == self.home_asset {
            return false;
        }

        let last = self.last_update(symbol);
        let window_end = last.saturating_add(self.stale_period());
        let now = self.clock.now_seconds();

        let stale = window_end < now;
        if stale {
            debug!(%symbol, last, now, "rate is stale");
        }
        stale
    }

    /// Whether any asset in the list is stale.
    ///
    /// Short-circuits on the first stale entry; the home asset never
    /// trips the check.
    pub fn any_stale(&self, symbols: &[AssetSymbol]) -> bool {
        symbols.iter().any(|s| self.is_stale(*s))
    }
}
