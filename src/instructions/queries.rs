use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{BET_SEED, CONFIG_SEED, MAX_QUERY_PAGE, RESERVE_SEED, ROUND_SEED, VAULT_SEED};
use crate::errors::WagerError;
use crate::instructions::remaining::load_bet;
use crate::ledger::bounty_eligible;
use crate::state::{Bet, BetStatus, Config, Leg, Outcome, ReserveVault, Round, RoundPhase, RoundStats};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub id: u64,
    pub phase: RoundPhase,
    pub start_time: i64,
    pub end_time: i64,
    pub betting_closes_at: i64,
    pub settled_at: i64,
    pub claim_deadline: i64,
    pub results: Vec<u8>,
    pub stats: RoundStats,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolUtilization {
    pub total_locked: u64,
    pub total_claimed: u64,
    pub remaining: u64,
    pub utilization_bps: u64,
    pub swept: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BetSummary {
    pub id: u64,
    pub owner: Pubkey,
    pub round_id: u64,
    pub stake: u64,
    pub legs: Vec<Leg>,
    pub bonus: u64,
    pub multiplier: u64,
    pub payout: u64,
    pub status: BetStatus,
    pub paid_out: u64,
    pub claimed_by: Option<Pubkey>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReserveStatus {
    pub available: u64,
    pub locked: u64,
    pub settled_liability: u64,
    pub redeemable: u64,
    pub total_shares: u64,
    pub utilization_bps: u64,
    pub vault_balance: u64,
}

impl RoundSummary {
    pub fn of(round: &Round, now: i64) -> Self {
        Self {
            id: round.id,
            phase: round.phase(now),
            start_time: round.start_time,
            end_time: round.end_time,
            betting_closes_at: round.betting_closes_at,
            settled_at: round.settled_at,
            claim_deadline: round.claim_deadline(),
            // 0 while a match has no result
            results: round
                .matches
                .iter()
                .map(|m| m.result.map_or(0, Outcome::to_wire))
                .collect(),
            stats: round.stats,
        }
    }
}

impl PoolUtilization {
    pub fn of(round: &Round) -> Self {
        Self {
            total_locked: round.pool.total_locked,
            total_claimed: round.pool.total_claimed,
            remaining: round.pool.remaining(),
            utilization_bps: round.pool.utilization_bps(),
            swept: round.pool.swept,
        }
    }
}

impl BetSummary {
    pub fn of(bet: &Bet, round: &Round) -> Result<Self> {
        Ok(Self {
            id: bet.id,
            owner: bet.owner,
            round_id: bet.round_id,
            stake: bet.stake,
            legs: bet.legs.clone(),
            bonus: bet.bonus,
            multiplier: bet.multiplier,
            payout: bet.payout()?,
            status: bet.resolved_status(round),
            paid_out: bet.paid_out,
            claimed_by: bet.claimed_by,
        })
    }
}

#[derive(Accounts)]
pub struct RoundView<'info> {
    #[account(seeds = [ROUND_SEED, &round.id.to_le_bytes()], bump = round.bump)]
    pub round: Box<Account<'info, Round>>,
}

#[derive(Accounts)]
pub struct BetView<'info> {
    #[account(seeds = [ROUND_SEED, &round.id.to_le_bytes()], bump = round.bump)]
    pub round: Box<Account<'info, Round>>,

    #[account(
        seeds = [BET_SEED, &bet.id.to_le_bytes()],
        bump = bet.bump,
        constraint = bet.round_id == round.id @ WagerError::InvalidRoundReference
    )]
    pub bet: Box<Account<'info, Bet>>,
}

#[derive(Accounts)]
pub struct ReserveView<'info> {
    #[account(seeds = [RESERVE_SEED], bump = reserve.bump)]
    pub reserve: Account<'info, ReserveVault>,

    #[account(seeds = [VAULT_SEED], bump = reserve.vault_bump)]
    pub vault: Box<Account<'info, TokenAccount>>,
}

#[derive(Accounts)]
pub struct BountyScan<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(seeds = [ROUND_SEED, &round.id.to_le_bytes()], bump = round.bump)]
    pub round: Box<Account<'info, Round>>,
}

pub fn round_summary(ctx: Context<RoundView>) -> Result<RoundSummary> {
    let now = Clock::get()?.unix_timestamp;
    Ok(RoundSummary::of(&ctx.accounts.round, now))
}

pub fn locked_odds(ctx: Context<RoundView>, match_index: u8, outcome: u8) -> Result<u64> {
    let outcome = Outcome::from_wire(outcome)?;
    ctx.accounts.round.locked_odds(match_index, outcome)
}

pub fn round_pool_utilization(ctx: Context<RoundView>) -> Result<PoolUtilization> {
    Ok(PoolUtilization::of(&ctx.accounts.round))
}

pub fn bet_summary(ctx: Context<BetView>) -> Result<BetSummary> {
    BetSummary::of(&ctx.accounts.bet, &ctx.accounts.round)
}

pub fn reserve_status(ctx: Context<ReserveView>) -> Result<ReserveStatus> {
    let reserve = &ctx.accounts.reserve;
    Ok(ReserveStatus {
        available: reserve.available,
        locked: reserve.locked,
        settled_liability: reserve.settled_liability,
        redeemable: reserve.redeemable()?,
        total_shares: reserve.total_shares,
        utilization_bps: reserve.utilization_bps()?,
        vault_balance: ctx.accounts.vault.amount,
    })
}

/// Ids of the supplied bets a third party could claim right now.
pub fn bounty_eligible_bets<'info>(
    ctx: Context<'_, '_, 'info, 'info, BountyScan<'info>>,
) -> Result<Vec<u64>> {
    require!(
        ctx.remaining_accounts.len() <= MAX_QUERY_PAGE,
        WagerError::PageTooLarge
    );
    let now = Clock::get()?.unix_timestamp;
    let mut eligible = Vec::new();
    for info in ctx.remaining_accounts.iter() {
        let bet = load_bet(info)?;
        if bounty_eligible(&ctx.accounts.config, &ctx.accounts.round, &bet, now)? {
            eligible.push(bet.id);
        }
    }
    Ok(eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Leg, ProtocolParams};

    fn settled_round() -> Round {
        let mut config = Config::default();
        config.apply_params(&ProtocolParams::default()).unwrap();
        let mut round = Round::default();
        round.open(3, 100, 255);
        round.seed(&config, &[2u8; 32], 100).unwrap();
        let end = round.end_time;
        round.settle(&[1u8; 10], 500, end).unwrap();
        round
    }

    #[test]
    fn round_summary_reports_phase_and_results() {
        let round = settled_round();
        let summary = RoundSummary::of(&round, round.settled_at);
        assert_eq!(summary.phase, RoundPhase::Settled);
        assert_eq!(summary.results, vec![1u8; 10]);
        assert_eq!(summary.claim_deadline, round.settled_at + 500);

        let fresh = RoundSummary::of(&Round::default(), 0);
        assert_eq!(fresh.phase, RoundPhase::Created);
        assert_eq!(fresh.results, vec![0u8; 10]);
    }

    #[test]
    fn bet_summary_reports_resolved_status() {
        let round = settled_round();
        let bet = Bet {
            id: 8,
            round_id: round.id,
            stake: 1_000,
            multiplier: 1_500_000,
            legs: vec![Leg {
                match_index: 4,
                outcome: Outcome::HomeWin,
            }],
            ..Default::default()
        };
        let summary = BetSummary::of(&bet, &round).unwrap();
        assert_eq!(summary.status, BetStatus::Won);
        assert_eq!(summary.payout, 1_500);
    }

    #[test]
    fn pool_utilization_of_fresh_round_is_zero() {
        let util = PoolUtilization::of(&Round::default());
        assert_eq!(util.utilization_bps, 0);
        assert_eq!(util.remaining, 0);
        assert!(!util.swept);
    }
}
