use anchor_lang::prelude::*;

use crate::errors::WagerError;
use crate::math::bps_of;
use crate::state::{Config, ReserveVault, Round};

/// How the unclaimed remainder of a round pool was split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweptRound {
    pub remaining: u64,
    pub season_share: u64,
    pub protocol_cut: u64,
    pub released: u64,
}

/// Closes a round pool once the claim deadline has passed.
///
/// Only realized profit is split: the stakes of wagers resolved against the
/// pool minus what the pool paid for them. The season share and protocol cut
/// are carved from it and leave the vault. Everything else still locked for
/// the round returns to free reserve, which pays any late winner afterwards.
pub fn sweep_round(
    config: &Config,
    reserve: &mut ReserveVault,
    round: &mut Round,
    now: i64,
) -> Result<SweptRound> {
    require!(round.settled, WagerError::RoundNotSettled);
    require!(!round.pool.swept, WagerError::AlreadySwept);
    require!(now >= round.pool.sweep_deadline, WagerError::SweepTooEarly);

    let remaining = round.pool.remaining();
    require!(reserve.locked >= remaining, WagerError::InsufficientRoundPool);
    require!(
        reserve.settled_liability >= remaining,
        WagerError::InsufficientRoundPool
    );

    let profit = round.pool.realized_profit();
    let season_share = bps_of(profit, config.season_share_bps)?;
    let protocol_cut = bps_of(profit, config.protocol_cut_bps)?;
    let released = remaining
        .checked_sub(season_share)
        .and_then(|rest| rest.checked_sub(protocol_cut))
        .ok_or(WagerError::MathOverflow)?;

    reserve.debit_locked(remaining)?;
    reserve.clear_settled(remaining)?;
    reserve.credit(released)?;
    round.pool.swept = true;

    Ok(SweptRound {
        remaining,
        season_share,
        protocol_cut,
        released,
    })
}
