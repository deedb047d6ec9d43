//! Append-only audit records for repository mutations.
//!
//! Every administrator mutation (and the freeze transition) appends a
//! record carrying the new state. The log is for off-system
//! observers; it is not part of the query contract.

use parking_lot::Mutex;
use ratevault_common::{AssetSymbol, Ufixed, UnixSeconds};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A single audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEvent {
    /// The staleness window changed.
    StalePeriodUpdated {
        at: UnixSeconds,
        stale_period: u64,
    },
    /// A push update refreshed last-update timestamps.
    RatesUpdated {
        at: UnixSeconds,
        symbols: Vec<AssetSymbol>,
        values: Vec<Ufixed>,
        timestamp: UnixSeconds,
    },
    /// Inverse pricing was configured for an asset.
    InversePricingConfigured {
        at: UnixSeconds,
        symbol: AssetSymbol,
        entry_point: Ufixed,
        upper_limit: Ufixed,
        lower_limit: Ufixed,
    },
    /// Inverse pricing was removed for an asset.
    InversePricingRemoved {
        at: UnixSeconds,
        symbol: AssetSymbol,
    },
    /// An inverted asset froze at a boundary.
    RateFrozen {
        at: UnixSeconds,
        symbol: AssetSymbol,
        frozen_rate: Ufixed,
    },
    /// The oracle endpoint was rotated.
    PriceSourceRotated {
        at: UnixSeconds,
        source: String,
    },
}

/// In-process append-only audit log.
#[derive(Default)]
pub struct AuditLog {
    entries: Mutex<Vec<AuditEvent>>,
}

impl AuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, mirroring it to tracing.
    pub fn append(&self, event: AuditEvent) {
        info!(event = ?event, "audit");
        self.entries.lock().push(event);
    }

    /// A snapshot of all records, oldest first.
    pub fn snapshot(&self) -> Vec<AuditEvent> {
        self.entries.lock().clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let log = AuditLog::new();
        log.append(AuditEvent::StalePeriodUpdated {
            at: 1,
            stale_period: 60,
        });
        log.append(AuditEvent::StalePeriodUpdated {
            at: 2,
            stale_period: 120,
        });

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot[0],
            AuditEvent::StalePeriodUpdated {
                at: 1,
                stale_period: 60
            }
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let log = AuditLog::new();
        log.append(AuditEvent::StalePeriodUpdated {
            at: 1,
            stale_period: 60,
        });

        let snapshot = log.snapshot();
        log.append(AuditEvent::StalePeriodUpdated {
            at: 2,
            stale_period: 120,
        });

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
