use anchor_lang::prelude::*;

use crate::errors::WagerError;
use crate::math::{bps_of, mul_scaled};
use crate::odds::combined_multiplier;
use crate::state::{parse_legs, Bet, BetStatus, Config, LegInput, ReserveVault, Round};

/// Price and liability fixed for a freshly accepted wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedBet {
    pub bonus: u64,
    pub multiplier: u64,
    pub liability: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelledBet {
    pub refund: u64,
    pub fee: u64,
    pub released: u64,
}

/// Accepts a wager against the round's locked odds.
///
/// The stake is credited to the reserve and the full worst-case payout is
/// moved from `available` into the round pool. Every check runs before the
/// first write: on error neither the reserve nor the round has changed, and
/// `bet` is left untouched.
pub fn place_bet(
    config: &Config,
    reserve: &mut ReserveVault,
    round: &mut Round,
    bet: &mut Bet,
    owner: Pubkey,
    inputs: &[LegInput],
    stake: u64,
    now: i64,
) -> Result<PlacedBet> {
    require!(!config.paused, WagerError::Paused);
    let legs = parse_legs(inputs)?;
    require!(stake > 0, WagerError::ZeroAmount);
    require!(
        stake >= config.min_stake && stake <= config.max_stake,
        WagerError::StakeOutOfRange
    );
    round.ensure_betting_open(now)?;

    let bonus = config.leg_count_bonus(legs.len())?;
    let leg_odds = legs
        .iter()
        .map(|leg| round.locked_odds(leg.match_index, leg.outcome))
        .collect::<Result<Vec<u64>>>()?;
    let multiplier = combined_multiplier(leg_odds, bonus)?;
    let liability = mul_scaled(stake, multiplier)?;

    // reserve check happens with the stake already counted as free value
    let available_after_stake = reserve
        .available
        .checked_add(stake)
        .ok_or(WagerError::MathOverflow)?;
    require!(
        available_after_stake >= liability,
        WagerError::InsufficientReserve
    );
    let reserve_total = reserve
        .total()?
        .checked_add(stake)
        .ok_or(WagerError::MathOverflow)?;
    let exposure_cap = bps_of(reserve_total, config.max_round_exposure_bps)?;
    let round_exposure = round
        .pool
        .remaining()
        .checked_add(liability)
        .ok_or(WagerError::MathOverflow)?;
    require!(round_exposure <= exposure_cap, WagerError::RoundExposureLimit);

    let mut next_round = round.clone();
    next_round.pool.lock(liability)?;
    for leg in legs.iter() {
        next_round.add_leg_volume(leg.match_index, leg.outcome, stake)?;
    }
    let stats = &mut next_round.stats;
    stats.total_volume = stats
        .total_volume
        .checked_add(stake)
        .ok_or(WagerError::MathOverflow)?;
    stats.bet_count += 1;

    let mut next_reserve = reserve.clone();
    next_reserve.credit(stake)?;
    next_reserve.lock(liability)?;

    *round = next_round;
    *reserve = next_reserve;

    bet.owner = owner;
    bet.round_id = round.id;
    bet.stake = stake;
    bet.legs = legs;
    bet.bonus = bonus;
    bet.multiplier = multiplier;
    bet.liability = liability;
    bet.status = BetStatus::Active;
    bet.placed_at = now;
    bet.paid_out = 0;
    bet.claimed_by = None;
    if bet.is_parlay() {
        round.stats.parlay_count += 1;
    }

    Ok(PlacedBet {
        bonus,
        multiplier,
        liability,
    })
}

/// Owner-only withdrawal of an active wager before settlement. Refunds the
/// stake minus the cancellation fee and releases the wager's liability.
pub fn cancel_bet(
    config: &Config,
    reserve: &mut ReserveVault,
    round: &mut Round,
    bet: &mut Bet,
    caller: Pubkey,
    now: i64,
) -> Result<CancelledBet> {
    bet.ensure_round(round)?;
    require_keys_eq!(bet.owner, caller, WagerError::NotBetOwner);
    bet.ensure_active()?;
    require!(!round.settled, WagerError::AlreadySettled);
    require!(now < round.end_time, WagerError::BettingClosed);

    let fee = bps_of(bet.stake, config.cancellation_fee_bps)?;
    let refund = bet.stake - fee;

    let mut next_round = round.clone();
    next_round.pool.unlock(bet.liability)?;
    for leg in bet.legs.iter() {
        next_round.remove_leg_volume(leg.match_index, leg.outcome, bet.stake)?;
    }
    let stats = &mut next_round.stats;
    stats.total_volume = stats
        .total_volume
        .checked_sub(bet.stake)
        .ok_or(WagerError::MathOverflow)?;
    stats.cancelled_count += 1;

    let mut next_reserve = reserve.clone();
    next_reserve.release(bet.liability)?;
    next_reserve.debit_available(refund)?;

    *round = next_round;
    *reserve = next_reserve;
    bet.status = BetStatus::Cancelled;

    Ok(CancelledBet {
        refund,
        fee,
        released: bet.liability,
    })
}
