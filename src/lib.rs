#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod odds;
pub mod state;
pub mod transfer;

use constants::MATCHES_PER_ROUND;
use instructions::*;
use state::{ConfigUpdate, LegInput, ProtocolParams};

declare_id!("Cpppkt4QJkvG5YRvNoF3vvptk8Ht1Qf5ybsTW1eEso5X");

#[program]
pub mod parlay_settlement {
    use super::*;

    // --- Admin ---

    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        params: ProtocolParams,
    ) -> Result<()> {
        admin::initialize_protocol(ctx, params)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
        admin::update_config(ctx, update)
    }

    pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
        admin::set_paused(ctx, paused)
    }

    // --- Round control ---

    pub fn create_round(ctx: Context<CreateRound>) -> Result<()> {
        round::create_round(ctx)
    }

    pub fn seed_round(ctx: Context<SeedRound>, entropy: [u8; 32]) -> Result<()> {
        round::seed_round(ctx, entropy)
    }

    pub fn settle_round(
        ctx: Context<SettleRound>,
        results: [u8; MATCHES_PER_ROUND],
    ) -> Result<()> {
        round::settle_round(ctx, results)
    }

    pub fn sweep_round(ctx: Context<SweepRound>) -> Result<()> {
        round::sweep_round(ctx)
    }

    // --- Wagers ---

    pub fn place_bet(ctx: Context<PlaceBet>, legs: Vec<LegInput>, stake: u64) -> Result<()> {
        betting::place_bet(ctx, legs, stake)
    }

    pub fn cancel_bet(ctx: Context<CancelBet>) -> Result<()> {
        betting::cancel_bet(ctx)
    }

    pub fn claim_winnings(ctx: Context<ClaimWinnings>, min_payout: u64) -> Result<()> {
        claims::claim_winnings(ctx, min_payout)
    }

    pub fn batch_claim<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchClaim<'info>>,
        bet_ids: Vec<u64>,
        min_payout: u64,
    ) -> Result<()> {
        claims::batch_claim(ctx, bet_ids, min_payout)
    }

    // --- Liquidity ---

    pub fn add_liquidity(ctx: Context<AddLiquidity>, amount: u64) -> Result<()> {
        liquidity::add_liquidity(ctx, amount)
    }

    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, shares: u64) -> Result<()> {
        liquidity::remove_liquidity(ctx, shares)
    }

    // --- Read-only ---

    pub fn round_summary(ctx: Context<RoundView>) -> Result<RoundSummary> {
        queries::round_summary(ctx)
    }

    pub fn locked_odds(ctx: Context<RoundView>, match_index: u8, outcome: u8) -> Result<u64> {
        queries::locked_odds(ctx, match_index, outcome)
    }

    pub fn round_pool_utilization(ctx: Context<RoundView>) -> Result<PoolUtilization> {
        queries::round_pool_utilization(ctx)
    }

    pub fn bet_summary(ctx: Context<BetView>) -> Result<BetSummary> {
        queries::bet_summary(ctx)
    }

    pub fn reserve_status(ctx: Context<ReserveView>) -> Result<ReserveStatus> {
        queries::reserve_status(ctx)
    }

    pub fn bounty_eligible_bets<'info>(
        ctx: Context<'_, '_, 'info, 'info, BountyScan<'info>>,
    ) -> Result<Vec<u64>> {
        queries::bounty_eligible_bets(ctx)
    }
}
