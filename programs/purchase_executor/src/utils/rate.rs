//! Fixed-point DAI→LDO exchange rate arithmetic.
//!
//! `rate` is LDO per DAI scaled by `RATE_PRECISION`, so the DAI owed for an
//! LDO amount is `amount * RATE_PRECISION / rate`, rounded toward zero.

use crate::constants::RATE_PRECISION;
use crate::error::PurchaseError;

pub fn required_payment(ldo_amount: u64, dai_to_ldo_rate: u128) -> Result<u64, PurchaseError> {
    if dai_to_ldo_rate == 0 {
        return Err(PurchaseError::InvalidRate);
    }
    let scaled = (ldo_amount as u128)
        .checked_mul(RATE_PRECISION)
        .ok_or(PurchaseError::MathOverflow)?;
    u64::try_from(scaled / dai_to_ldo_rate).map_err(|_| PurchaseError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E9: u64 = 1_000_000_000;
    const E18: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn hundred_ldo_per_dai() {
        let rate = 100 * E18;
        assert_eq!(required_payment(1_000 * E9, rate).unwrap(), 10 * E9);
        assert_eq!(required_payment(3_000_000 * E9, rate).unwrap(), 30_000 * E9);
    }

    #[test]
    fn payment_truncates_toward_zero() {
        let rate = 3 * E18;
        assert_eq!(required_payment(10, rate).unwrap(), 3);
        assert_eq!(required_payment(2, rate).unwrap(), 0);
    }

    #[test]
    fn zero_rate_rejected() {
        assert!(matches!(required_payment(1, 0), Err(PurchaseError::InvalidRate)));
    }

    #[test]
    fn max_amount_does_not_overflow_intermediate() {
        assert_eq!(required_payment(u64::MAX, E18).unwrap(), u64::MAX);
        assert!(matches!(
            required_payment(u64::MAX, E18 / 2),
            Err(PurchaseError::MathOverflow)
        ));
    }

    #[test]
    fn treasury_diversification_terms() {
        // 10M LDO for 24,272,320 DAI.
        let rate = E18 * (10_000_000 * E9) as u128 / (24_272_320 * E9) as u128;
        assert_eq!(rate, 411_991_931_550_012_524);
        let cost = required_payment(10_000_000 * E9, rate).unwrap();
        assert!(cost >= 24_272_320 * E9);
        assert!(cost - 24_272_320 * E9 < E9);
    }
}
