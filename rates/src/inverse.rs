//! Inverse pricing configuration and bounds engine.
//!
//! An inverted asset's effective rate mirrors the live rate around a
//! configured entry point: `2 * entry_point - live`. The moment that
//! mirrored value reaches either limit it is clamped to the boundary
//! and the asset freezes. Frozen is a one-way latch; only an
//! administrator reconfiguring the asset thaws it.

use std::collections::HashMap;

use parking_lot::RwLock;
use ratevault_common::{AssetSymbol, Ufixed};
use serde::{Deserialize, Serialize};

use crate::error::BoundsViolation;

/// Per-asset inverse pricing record.
///
/// Invariants, enforced at configuration time:
/// `0 < lower_limit < entry_point < upper_limit < 2 * entry_point`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InversePricing {
    /// Reference point the live rate is mirrored around.
    pub entry_point: Ufixed,
    /// Upper clamp for the mirrored rate.
    pub upper_limit: Ufixed,
    /// Lower clamp for the mirrored rate.
    pub lower_limit: Ufixed,
    /// Whether the asset has frozen at a boundary.
    pub frozen: bool,
    /// The boundary rate latched at freeze time; zero while unfrozen.
    pub frozen_rate: Ufixed,
}

/// Result of resolving a live rate through the inverse transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverseOutcome {
    /// The effective rate after mirroring and clamping.
    pub rate: Ufixed,
    /// True when this resolution performed the freeze transition.
    pub newly_frozen: bool,
}

#[derive(Default)]
struct Inner {
    records: HashMap<AssetSymbol, InversePricing>,
    // Dense membership list with a symbol-to-slot index so removal is
    // an O(1) swap with the last element. Order is not preserved
    // across removals and is not semantically significant.
    inverted: Vec<AssetSymbol>,
    slots: HashMap<AssetSymbol, usize>,
}

/// Owner-configured inverse pricing state for all assets.
#[derive(Default)]
pub struct InversePricingEngine {
    inner: RwLock<Inner>,
}

impl InversePricingEngine {
    /// Create an engine with no configured assets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure (or reconfigure) inverse pricing for an asset.
    ///
    /// Validates the bounds invariants in order and rejects on the
    /// first violation, touching nothing. On success the record is
    /// overwritten as a single unit, `frozen` resets to false, and the
    /// asset joins the inverted set if it was not already a member.
    pub fn configure(
        &self,
        symbol: AssetSymbol,
        entry_point: Ufixed,
        upper_limit: Ufixed,
        lower_limit: Ufixed,
    ) -> Result<InversePricing, BoundsViolation> {
        if entry_point == 0 {
            return Err(BoundsViolation::ZeroEntryPoint);
        }
        if lower_limit == 0 {
            return Err(BoundsViolation::ZeroLowerLimit);
        }
        if upper_limit <= entry_point {
            return Err(BoundsViolation::UpperNotAboveEntry);
        }
        if upper_limit >= entry_point.saturating_mul(2) {
            return Err(BoundsViolation::UpperAtOrAboveDoubleEntry);
        }
        if lower_limit >= entry_point {
            return Err(BoundsViolation::LowerNotBelowEntry);
        }

        let record = InversePricing {
            entry_point,
            upper_limit,
            lower_limit,
            frozen: false,
            frozen_rate: 0,
        };

        let mut inner = self.inner.write();
        if !inner.slots.contains_key(&symbol) {
            let slot = inner.inverted.len();
            inner.inverted.push(symbol);
            inner.slots.insert(symbol, slot);
        }
        inner.records.insert(symbol, record);

        Ok(record)
    }

    /// De-configure an asset, removing it from the inverted set.
    ///
    /// Returns false when the asset was not configured. Removal swaps
    /// the departing symbol with the last member and shrinks, fixing
    /// up the moved member's slot.
    pub fn remove(&self, symbol: AssetSymbol) -> bool {
        let mut inner = self.inner.write();
        if inner.records.remove(&symbol).is_none() {
            return false;
        }

        if let Some(slot) = inner.slots.remove(&symbol) {
            inner.inverted.swap_remove(slot);
            if slot < inner.inverted.len() {
                let moved = inner.inverted[slot];
                inner.slots.insert(moved, slot);
            }
        }
        true
    }

    /// Whether the asset is frozen. False when not configured.
    pub fn is_frozen(&self, symbol: AssetSymbol) -> bool {
        self.inner
            .read()
            .records
            .get(&symbol)
            .map(|r| r.frozen)
            .unwrap_or(false)
    }

    /// The configuration record, if any.
    pub fn record(&self, symbol: AssetSymbol) -> Option<InversePricing> {
        self.inner.read().records.get(&symbol).copied()
    }

    /// Symbols currently under inverse pricing, in storage order.
    pub fn inverted_assets(&self) -> Vec<AssetSymbol> {
        self.inner.read().inverted.clone()
    }

    /// Resolve a live rate through the inverse transform.
    ///
    /// Non-configured assets pass through unchanged. Frozen assets
    /// return the latched boundary without consulting the live rate.
    /// Otherwise the mirrored rate is `2 * entry_point - live`
    /// (saturating at zero); reaching either limit clamps to that
    /// boundary and latches the freeze.
    pub fn effective_rate(&self, symbol: AssetSymbol, live: Ufixed) -> InverseOutcome {
        {
            let inner = self.inner.read();
            match inner.records.get(&symbol) {
                None => {
                    return InverseOutcome {
                        rate: live,
                        newly_frozen: false,
                    }
                }
                Some(rec) if rec.frozen => {
                    return InverseOutcome {
                        rate: rec.frozen_rate,
                        newly_frozen: false,
                    }
                }
                Some(rec) => {
                    let mirrored = Self::mirror(rec, live);
                    if mirrored < rec.upper_limit && mirrored > rec.lower_limit {
                        return InverseOutcome {
                            rate: mirrored,
                            newly_frozen: false,
                        };
                    }
                }
            }
        }

        // Boundary crossed: latch the freeze under the write lock.
        let mut inner = self.inner.write();
        let Some(rec) = inner.records.get_mut(&symbol) else {
            return InverseOutcome {
                rate: live,
                newly_frozen: false,
            };
        };
        if rec.frozen {
            return InverseOutcome {
                rate: rec.frozen_rate,
                newly_frozen: false,
            };
        }

        let mirrored = Self::mirror(rec, live);
        let boundary = if mirrored >= rec.upper_limit {
            rec.upper_limit
        } else {
            rec.lower_limit
        };
        rec.frozen = true;
        rec.frozen_rate = boundary;

        InverseOutcome {
            rate: boundary,
            newly_frozen: true,
        }
    }

    fn mirror(rec: &InversePricing, live: Ufixed) -> Ufixed {
        // A live rate beyond double the entry point saturates to zero,
        // which clamps at the lower limit.
        rec.entry_point.saturating_mul(2).saturating_sub(live)
    }
}
