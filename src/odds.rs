//! Parimutuel pricing. Per-outcome pool quantities are turned into payout
//! multipliers once, when a round is seeded, and never touched again.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::*;
use crate::errors::WagerError;
use crate::math::{mul_scaled, ratio_scaled};
use crate::state::Match;

const SEED_DOMAIN: &[u8] = b"parlay_settlement:seed:v1";

/// Starting pool quantities for one match, derived only from the round id,
/// the match index and the operator-declared entropy. Every outcome receives
/// a strictly positive share of `seed_liquidity`.
pub fn seed_pools(
    round_id: u64,
    match_index: u8,
    entropy: &[u8; 32],
    seed_liquidity: u64,
) -> Result<[u64; OUTCOMES_PER_MATCH]> {
    let round_bytes = round_id.to_le_bytes();
    let index = [match_index];
    let digest = hashv(&[SEED_DOMAIN, round_bytes.as_ref(), index.as_ref(), entropy.as_ref()])
        .to_bytes();

    let weights: [u64; OUTCOMES_PER_MATCH] =
        core::array::from_fn(|i| SEED_WEIGHT_MIN + digest[i] as u64 % SEED_WEIGHT_SPREAD);
    let weight_sum: u64 = weights.iter().sum();

    let mut pools = [0u64; OUTCOMES_PER_MATCH];
    for (pool, weight) in pools.iter_mut().zip(weights) {
        let share = (seed_liquidity as u128)
            .checked_mul(weight as u128)
            .ok_or(WagerError::MathOverflow)?
            / weight_sum as u128;
        *pool = u64::try_from(share).map_err(|_| WagerError::MathOverflow)?;
        require!(*pool > 0, WagerError::DivisionByZero);
    }
    Ok(pools)
}

/// `total / outcome_pool` as a fixed-point multiplier.
pub fn raw_odds(total_pool: u64, outcome_pool: u64) -> Result<u64> {
    ratio_scaled(total_pool, outcome_pool)
}

/// Clamps a raw ratio and maps it linearly onto the target multiplier band.
/// Monotonic: a larger raw ratio never yields a smaller multiplier.
pub fn compress_odds(raw: u64) -> u64 {
    let clamped = raw.clamp(RAW_ODDS_FLOOR, RAW_ODDS_CEILING);
    TARGET_ODDS_MIN
        + (clamped - RAW_ODDS_FLOOR) * (TARGET_ODDS_MAX - TARGET_ODDS_MIN)
            / (RAW_ODDS_CEILING - RAW_ODDS_FLOOR)
}

pub fn price_match(pools: &[u64; OUTCOMES_PER_MATCH]) -> Result<[u64; OUTCOMES_PER_MATCH]> {
    let total = pools
        .iter()
        .try_fold(0u64, |acc, pool| acc.checked_add(*pool))
        .ok_or(WagerError::MathOverflow)?;
    let mut odds = [0u64; OUTCOMES_PER_MATCH];
    for (slot, pool) in odds.iter_mut().zip(pools) {
        *slot = compress_odds(raw_odds(total, *pool)?);
    }
    Ok(odds)
}

/// Prices every match and freezes the result. Fails without writing anything
/// if any match is already priced or has an empty outcome pool.
pub fn lock_odds(matches: &mut [Match]) -> Result<()> {
    let mut priced = Vec::with_capacity(matches.len());
    for m in matches.iter() {
        require!(!m.odds_locked(), WagerError::AlreadySeeded);
        priced.push(price_match(&m.pools)?);
    }
    for (m, odds) in matches.iter_mut().zip(priced) {
        m.odds = odds;
    }
    Ok(())
}

/// Product of the per-leg multipliers times the leg-count bonus. Each step
/// truncates, so rounding always favors the reserve.
pub fn combined_multiplier<I>(leg_odds: I, bonus: u64) -> Result<u64>
where
    I: IntoIterator<Item = u64>,
{
    let product = leg_odds
        .into_iter()
        .try_fold(ODDS_SCALE, |acc, odds| mul_scaled(acc, odds))?;
    mul_scaled(product, bonus)
}
