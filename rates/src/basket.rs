//! Basket currency definition.
//!
//! The basket is a fixed ordered list of five assets composing an
//! equal-weighted reference currency. It is established once at
//! construction and never edited; redefining the basket means a new
//! deployment, not a live mutation.

use ratevault_common::AssetSymbol;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of assets in the basket.
pub const BASKET_SIZE: usize = 5;

/// Errors from constructing a [`BasketDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasketError {
    /// The same asset appeared more than once.
    #[error("duplicate asset {0} in basket")]
    DuplicateAsset(AssetSymbol),
}

/// The immutable set of assets composing the basket currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketDefinition {
    symbols: [AssetSymbol; BASKET_SIZE],
}

impl BasketDefinition {
    /// Define the basket. Members must be distinct.
    pub fn new(symbols: [AssetSymbol; BASKET_SIZE]) -> Result<Self, BasketError> {
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(BasketError::DuplicateAsset(*s));
            }
        }
        Ok(Self { symbols })
    }

    /// The basket members, in definition order.
    pub fn symbols(&self) -> &[AssetSymbol; BASKET_SIZE] {
        &self.symbols
    }

    /// Whether an asset participates in the basket.
    pub fn contains(&self, symbol: AssetSymbol) -> bool {
        self.symbols.contains(&symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> AssetSymbol {
        AssetSymbol::new(s).unwrap()
    }

    fn members() -> [AssetSymbol; BASKET_SIZE] {
        [sym("sUSD"), sym("sEUR"), sym("sJPY"), sym("sGBP"), sym("sCHF")]
    }

    #[test]
    fn test_basket_preserves_order() {
        let basket = BasketDefinition::new(members()).unwrap();
        assert_eq!(basket.symbols(), &members());
    }

    #[test]
    fn test_basket_contains() {
        let basket = BasketDefinition::new(members()).unwrap();

        assert!(basket.contains(sym("sJPY")));
        assert!(!basket.contains(sym("sBTC")));
    }

    #[test]
    fn test_basket_rejects_duplicates() {
        let dup = [sym("sUSD"), sym("sEUR"), sym("sEUR"), sym("sGBP"), sym("sCHF")];

        assert_eq!(
            BasketDefinition::new(dup),
            Err(BasketError::DuplicateAsset(sym("sEUR")))
        );
    }
}
