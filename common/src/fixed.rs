//! Deterministic 18-decimal fixed-point arithmetic.
//!
//! Rates and amounts are unsigned integers scaled by [`UNIT`] (1e18).
//! Multiplication and division go through 256-bit intermediates with
//! round-half-up semantics so results are bit-for-bit reproducible.
//! All downstream rate arithmetic must use these primitives; raw
//! integer multiply/divide would silently truncate.

use thiserror::Error;
use uint::construct_uint;

construct_uint! {
    /// 256-bit integer for intermediate products and quotients.
    pub struct U256(4);
}

/// The fixed-point scaling unit (1e18).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// A value scaled by [`UNIT`].
pub type Ufixed = u128;

/// Errors from fixed-point arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixedPointError {
    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// The result does not fit in 128 bits.
    #[error("fixed-point overflow")]
    Overflow,
}

/// Multiply two fixed-point values, rounding half up.
///
/// Computes `(a * b + UNIT/2) / UNIT` in 256-bit space.
pub fn multiply_round(a: Ufixed, b: Ufixed) -> Result<Ufixed, FixedPointError> {
    let product = U256::from(a) * U256::from(b) + U256::from(UNIT / 2);
    to_u128(product / U256::from(UNIT))
}

/// Divide two fixed-point values, rounding half up.
///
/// Computes `(a * UNIT + b/2) / b` in 256-bit space. Fails with
/// [`FixedPointError::DivisionByZero`] when `b` is zero.
pub fn divide_round(a: Ufixed, b: Ufixed) -> Result<Ufixed, FixedPointError> {
    if b == 0 {
        return Err(FixedPointError::DivisionByZero);
    }
    let numerator = U256::from(a) * U256::from(UNIT) + U256::from(b / 2);
    to_u128(numerator / U256::from(b))
}

/// Scale a whole number of units into fixed-point representation.
pub fn from_units(n: u64) -> Ufixed {
    u128::from(n) * UNIT
}

fn to_u128(v: U256) -> Result<u128, FixedPointError> {
    if v > U256::from(u128::MAX) {
        return Err(FixedPointError::Overflow);
    }
    Ok(v.as_u128())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiply_basic() {
        // 1.5 * 2 = 3
        let a = UNIT + UNIT / 2;
        let b = 2 * UNIT;
        assert_eq!(multiply_round(a, b).unwrap(), 3 * UNIT);
    }

    #[test]
    fn test_divide_basic() {
        // 3 / 2 = 1.5
        assert_eq!(
            divide_round(3 * UNIT, 2 * UNIT).unwrap(),
            UNIT + UNIT / 2
        );
    }

    #[test]
    fn test_multiply_rounds_half_up() {
        // Raw product of exactly half a unit rounds up to 1.
        assert_eq!(multiply_round(UNIT / 2, 1).unwrap(), 1);
        // Just under the midpoint rounds down to 0.
        assert_eq!(multiply_round(UNIT / 2 - 1, 1).unwrap(), 0);
    }

    #[test]
    fn test_divide_rounds_half_up() {
        // 1 / 3 = 0.333...333 (truncated at 18 places, below midpoint)
        assert_eq!(
            divide_round(UNIT, 3 * UNIT).unwrap(),
            333_333_333_333_333_333
        );
        // 2 / 3 = 0.666...667 (rounds up at the last place)
        assert_eq!(
            divide_round(2 * UNIT, 3 * UNIT).unwrap(),
            666_666_666_666_666_667
        );
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide_round(UNIT, 0), Err(FixedPointError::DivisionByZero));
    }

    #[test]
    fn test_multiply_overflow() {
        assert_eq!(
            multiply_round(u128::MAX, u128::MAX),
            Err(FixedPointError::Overflow)
        );
    }

    #[test]
    fn test_large_amounts_do_not_overflow_intermediates() {
        // A billion units converted at a rate of 2.0.
        let amount = from_units(1_000_000_000);
        assert_eq!(
            multiply_round(amount, 2 * UNIT).unwrap(),
            from_units(2_000_000_000)
        );
    }

    proptest! {
        #[test]
        fn prop_multiply_by_unit_is_identity(a in any::<u128>()) {
            prop_assert_eq!(multiply_round(a, UNIT).unwrap(), a);
        }

        #[test]
        fn prop_divide_by_unit_is_identity(a in any::<u128>()) {
            prop_assert_eq!(divide_round(a, UNIT).unwrap(), a);
        }

        #[test]
        fn prop_multiply_commutes(a in 0u128..from_units(1_000_000), b in 0u128..from_units(1_000_000)) {
            prop_assert_eq!(
                multiply_round(a, b).unwrap(),
                multiply_round(b, a).unwrap()
            );
        }

        #[test]
        fn prop_zero_annihilates(a in any::<u128>()) {
            prop_assert_eq!(multiply_round(a, 0).unwrap(), 0);
            prop_assert_eq!(multiply_round(0, a).unwrap(), 0);
        }
    }
}
