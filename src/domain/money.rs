//! Conversions between human amounts and on-chain base units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::DomainError;

/// Decimal places of the SUI coin.
pub const SUI_DECIMALS: u32 = 9;

/// One SUI in MIST.
pub const ONE_SUI: u64 = 1_000_000_000;

/// Converts a decimal amount into base units, e.g. `1.5` SUI into `1_500_000_000` MIST.
///
/// # Errors
///
/// [`DomainError::UnrepresentableAmount`] if the amount is negative, has more
/// fractional digits than `decimals`, or overflows `u64`.
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<u64, DomainError> {
    let unrepresentable = || DomainError::UnrepresentableAmount { amount, decimals };
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(unrepresentable());
    }
    let scale = Decimal::from(10u64.checked_pow(decimals).ok_or_else(unrepresentable)?);
    let scaled = amount.checked_mul(scale).ok_or_else(unrepresentable)?;
    if !scaled.fract().is_zero() {
        return Err(unrepresentable());
    }
    scaled.to_u64().ok_or_else(unrepresentable)
}

/// Converts base units back into a decimal amount.
#[must_use]
pub fn from_base_units(units: u64, decimals: u32) -> Decimal {
    let mut value = Decimal::from(units);
    // Decimal supports at most 28 digits of scale.
    if value.set_scale(decimals.min(28)).is_err() {
        return Decimal::ZERO;
    }
    value.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sui_to_mist() {
        assert_eq!(to_base_units(dec!(1.5), SUI_DECIMALS).unwrap(), 1_500_000_000);
        assert_eq!(to_base_units(dec!(10), SUI_DECIMALS).unwrap(), 10 * ONE_SUI);
        assert_eq!(to_base_units(dec!(0), SUI_DECIMALS).unwrap(), 0);
    }

    #[test]
    fn rejects_excess_precision_and_negatives() {
        assert!(to_base_units(dec!(0.0000000001), SUI_DECIMALS).is_err());
        assert!(to_base_units(dec!(-1), SUI_DECIMALS).is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(to_base_units(dec!(100000000000), SUI_DECIMALS).is_err());
    }

    #[test]
    fn mist_to_sui() {
        assert_eq!(from_base_units(1_500_000_000, SUI_DECIMALS), dec!(1.5));
        assert_eq!(from_base_units(7, 0), dec!(7));
    }
}
