use anchor_lang::prelude::*;

use crate::constants::MAX_BATCH_CLAIM;
use crate::errors::WagerError;
use crate::math::bps_of;
use crate::state::{Bet, BetStatus, Config, ReserveVault, Round};

/// Where a winning payout is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutSource {
    /// Locked-but-unclaimed funds of the round itself.
    RoundPool,
    /// Free reserve, after the round pool has been swept. A late fee is withheld.
    Reserve,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    Lost,
    Paid {
        payout: u64,
        late_fee: u64,
        to_owner: u64,
        to_claimer: u64,
        source: PayoutSource,
    },
}

impl ClaimOutcome {
    pub fn transferred(&self) -> u64 {
        match self {
            ClaimOutcome::Lost => 0,
            ClaimOutcome::Paid {
                to_owner,
                to_claimer,
                ..
            } => to_owner + to_claimer,
        }
    }
}

/// Resolves a wager against the settled round and pays it out.
///
/// The owner may claim at any time after settlement. Anyone else may claim
/// once the claim deadline has passed, for a bounty on payouts at or above
/// the configured minimum. `min_payout` guards the amount the caller itself
/// receives. All accounting is committed here; the caller moves tokens
/// afterwards according to the returned outcome.
pub fn claim_bet(
    config: &Config,
    reserve: &mut ReserveVault,
    round: &mut Round,
    bet: &mut Bet,
    claimer: Pubkey,
    min_payout: u64,
    now: i64,
) -> Result<ClaimOutcome> {
    bet.ensure_round(round)?;
    require!(round.settled, WagerError::RoundNotSettled);
    bet.ensure_active()?;

    let is_bounty = claimer != bet.owner;
    if is_bounty {
        require!(
            now >= round.claim_deadline(),
            WagerError::ClaimDeadlineNotReached
        );
    }

    let won = bet.evaluate(round).ok_or(WagerError::RoundNotSettled)?;
    let resolved_stake = round
        .pool
        .resolved_stake
        .checked_add(bet.stake)
        .ok_or(WagerError::MathOverflow)?;
    if !won {
        if !round.pool.swept {
            round.pool.resolved_stake = resolved_stake;
        }
        round.stats.losers_resolved += 1;
        bet.status = BetStatus::Lost;
        bet.claimed_by = Some(claimer);
        return Ok(ClaimOutcome::Lost);
    }

    let payout = bet.payout()?;
    let from_pool = !round.pool.swept && round.pool.remaining() >= payout;
    let (source, late_fee) = if from_pool {
        (PayoutSource::RoundPool, 0)
    } else {
        (
            PayoutSource::Reserve,
            bps_of(payout, config.late_claim_fee_bps)?,
        )
    };
    let net = payout - late_fee;

    let (to_owner, to_claimer) = if is_bounty {
        require!(
            payout >= config.min_bounty_payout,
            WagerError::PayoutBelowBountyMinimum
        );
        let bounty = bps_of(net, config.bounty_bps)?;
        (net - bounty, bounty)
    } else {
        (net, 0)
    };
    let received = if is_bounty { to_claimer } else { to_owner };
    require!(received >= min_payout, WagerError::SlippageExceeded);

    let total_paid = round
        .stats
        .total_paid
        .checked_add(net)
        .ok_or(WagerError::MathOverflow)?;
    match source {
        PayoutSource::RoundPool => {
            require!(
                reserve.locked >= payout && reserve.settled_liability >= payout,
                WagerError::InsufficientRoundPool
            );
            round.pool.record_claim(payout)?;
            round.pool.resolved_stake = resolved_stake;
            reserve.debit_locked(payout)?;
            reserve.clear_settled(payout)?;
        }
        PayoutSource::Reserve => {
            reserve.debit_available(net)?;
        }
    }

    round.stats.total_paid = total_paid;
    round.stats.winners_paid += 1;
    bet.paid_out = net;
    bet.claimed_by = Some(claimer);
    bet.status = BetStatus::Claimed;

    Ok(ClaimOutcome::Paid {
        payout,
        late_fee,
        to_owner,
        to_claimer,
        source,
    })
}

/// Claims every wager in `bets` for one caller, in order. Entries run
/// against staged copies of the reserve and round; if any entry fails the
/// whole batch fails and nothing is written.
pub fn claim_batch(
    config: &Config,
    reserve: &mut ReserveVault,
    round: &mut Round,
    bets: &mut [Bet],
    claimer: Pubkey,
    min_payout: u64,
    now: i64,
) -> Result<Vec<ClaimOutcome>> {
    require!(!bets.is_empty(), WagerError::InvalidBetAccount);
    require!(bets.len() <= MAX_BATCH_CLAIM, WagerError::BatchTooLarge);
    for (i, bet) in bets.iter().enumerate() {
        require!(
            bets[..i].iter().all(|earlier| earlier.id != bet.id),
            WagerError::DuplicateBet
        );
    }

    let mut staged_reserve = reserve.clone();
    let mut staged_round = round.clone();
    let mut staged_bets = bets.to_vec();
    let outcomes = staged_bets
        .iter_mut()
        .map(|bet| {
            claim_bet(
                config,
                &mut staged_reserve,
                &mut staged_round,
                bet,
                claimer,
                min_payout,
                now,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    *reserve = staged_reserve;
    *round = staged_round;
    bets.clone_from_slice(&staged_bets);
    Ok(outcomes)
}

/// A wager a third party can profitably claim right now.
pub fn bounty_eligible(config: &Config, round: &Round, bet: &Bet, now: i64) -> Result<bool> {
    if bet.round_id != round.id
        || bet.status != BetStatus::Active
        || !round.settled
        || now < round.claim_deadline()
    {
        return Ok(false);
    }
    if bet.evaluate(round) != Some(true) {
        return Ok(false);
    }
    Ok(bet.payout()? >= config.min_bounty_payout)
}
