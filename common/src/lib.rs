//! RateVault Common Types
//!
//! This crate contains the leaf types shared across the RateVault
//! repository: asset symbols, 18-decimal fixed-point arithmetic, and
//! the clock abstraction used for staleness evaluation.

pub mod asset;
pub mod fixed;
pub mod time;

pub use asset::*;
pub use fixed::*;
pub use time::*;
