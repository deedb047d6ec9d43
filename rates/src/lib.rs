//! RateVault Rate Repository
//!
//! Shared rate repository: a single source of truth for current asset
//! rates, cross-asset conversion, and rate-validity state.
//!
//! # Features
//!
//! - Staleness gating with a uniform, immediately-effective window
//! - Home-asset special case: exactly one unit, never stale
//! - Inverse pricing with asymmetric bounds and a one-way freeze latch
//! - Conversion pivoting through the home asset with deterministic
//!   18-decimal rounding
//! - Administrator-gated configuration with append-only audit records
//!
//! # Example
//!
//! ```rust,ignore
//! use ratevault_rates::{RateRepository, RateRepositoryConfig, BasketDefinition};
//! use ratevault_common::{AssetSymbol, SystemClock, from_units};
//!
//! let (repo, admin) = RateRepository::new(
//!     RateRepositoryConfig::default(),
//!     basket,
//!     price_source,
//!     Arc::new(SystemClock),
//! );
//!
//! // Convert 10 sEUR into sJPY, pivoting through sUSD.
//! let out = repo.effective_value(seur, from_units(10), sjpy).await?;
//! ```

pub mod basket;
pub mod error;
pub mod events;
pub mod inverse;
pub mod oracle;
pub mod repository;
pub mod source;
pub mod staleness;

pub use basket::{BasketDefinition, BasketError, BASKET_SIZE};
pub use error::{BoundsViolation, RateError, RateResult};
pub use events::{AuditEvent, AuditLog};
pub use inverse::{InverseOutcome, InversePricing, InversePricingEngine};
pub use oracle::OracleAdapter;
pub use repository::{Administrator, RateRepository, RateRepositoryConfig};
pub use source::{PriceQuote, PriceSource, QueryStatus};
pub use staleness::StalenessGuard;

#[cfg(any(test, feature = "test-utils"))]
pub use source::MockPriceSource;
