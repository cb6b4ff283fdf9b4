use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, ODDS_SCALE};
use crate::errors::WagerError;

/// `amount * multiplier / ODDS_SCALE`, truncated toward zero.
pub fn mul_scaled(amount: u64, multiplier: u64) -> Result<u64> {
    let product = (amount as u128)
        .checked_mul(multiplier as u128)
        .ok_or(WagerError::MathOverflow)?
        / ODDS_SCALE as u128;
    u64::try_from(product).map_err(|_| WagerError::MathOverflow.into())
}

/// `numerator / denominator` as an ODDS_SCALE fixed-point ratio, truncated.
pub fn ratio_scaled(numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, WagerError::DivisionByZero);
    let ratio = (numerator as u128)
        .checked_mul(ODDS_SCALE as u128)
        .ok_or(WagerError::MathOverflow)?
        / denominator as u128;
    u64::try_from(ratio).map_err(|_| WagerError::MathOverflow.into())
}

/// Basis-point share of `amount`, truncated.
pub fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let share = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(WagerError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(share).map_err(|_| WagerError::MathOverflow.into())
}

/// Share of `whole` taken by `part`, in basis points. Zero when `whole` is zero.
pub fn utilization_bps(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    ((part as u128 * BPS_DENOMINATOR as u128) / whole as u128) as u64
}

/// LP shares minted for a deposit against the current reserve value.
pub fn shares_for_deposit(amount: u64, total_value: u64, total_shares: u64) -> Result<u64> {
    if total_shares == 0 || total_value == 0 {
        return Ok(amount);
    }
    let shares = (amount as u128)
        .checked_mul(total_shares as u128)
        .ok_or(WagerError::MathOverflow)?
        / total_value as u128;
    u64::try_from(shares).map_err(|_| WagerError::MathOverflow.into())
}

/// Reserve value redeemed by burning `shares`.
pub fn value_for_shares(shares: u64, total_value: u64, total_shares: u64) -> Result<u64> {
    require!(total_shares > 0, WagerError::DivisionByZero);
    let value = (shares as u128)
        .checked_mul(total_value as u128)
        .ok_or(WagerError::MathOverflow)?
        / total_shares as u128;
    u64::try_from(value).map_err(|_| WagerError::MathOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(anchor_err) => anchor_err.error_code_number,
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn mul_scaled_truncates_down() {
        assert_eq!(mul_scaled(1_000, 1_500_000).unwrap(), 1_500);
        // 3 * 1.333333 = 3.999999 -> 3
        assert_eq!(mul_scaled(3, 1_333_333).unwrap(), 3);
        assert_eq!(mul_scaled(0, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn mul_scaled_rejects_results_beyond_u64() {
        let err = mul_scaled(u64::MAX, 2 * ODDS_SCALE).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::MathOverflow));
    }

    #[test]
    fn ratio_scaled_reports_division_by_zero() {
        assert_eq!(ratio_scaled(300, 100).unwrap(), 3_000_000);
        let err = ratio_scaled(300, 0).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::DivisionByZero));
    }

    #[test]
    fn bps_of_computes_expected_values() {
        assert_eq!(bps_of(1_000, 1_000).unwrap(), 100);
        assert_eq!(bps_of(1_001, 1_500).unwrap(), 150);
        assert_eq!(bps_of(u64::MAX, 10_000).unwrap(), u64::MAX);
    }

    #[test]
    fn utilization_handles_empty_whole() {
        assert_eq!(utilization_bps(5, 0), 0);
        assert_eq!(utilization_bps(25, 100), 2_500);
    }

    #[test]
    fn first_deposit_mints_one_share_per_unit() {
        assert_eq!(shares_for_deposit(500, 0, 0).unwrap(), 500);
        assert_eq!(shares_for_deposit(500, 2_000, 1_000).unwrap(), 250);
        assert_eq!(value_for_shares(250, 2_000, 1_000).unwrap(), 500);
    }
}
