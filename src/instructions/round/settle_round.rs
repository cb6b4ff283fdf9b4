use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, MATCHES_PER_ROUND, RESERVE_SEED, ROUND_SEED};
use crate::errors::WagerError;
use crate::events::RoundSettled;
use crate::ledger;
use crate::state::{Config, ReserveVault, Round};

#[derive(Accounts)]
pub struct SettleRound<'info> {
    pub oracle: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = oracle @ WagerError::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(mut, seeds = [RESERVE_SEED], bump = reserve.bump)]
    pub reserve: Account<'info, ReserveVault>,

    #[account(
        mut,
        seeds = [ROUND_SEED, &round.id.to_le_bytes()],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,
}

/// Records one result per match. Wagers are not touched here.
pub fn settle_round(ctx: Context<SettleRound>, results: [u8; MATCHES_PER_ROUND]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    ledger::settle_round(
        &accounts.config,
        &mut accounts.reserve,
        &mut accounts.round,
        &results,
        now,
    )?;
    let round = &accounts.round;

    msg!(
        "Round {} settled by oracle {}. Claim deadline: {}",
        round.id,
        accounts.oracle.key(),
        round.claim_deadline()
    );
    emit!(RoundSettled {
        round_id: round.id,
        results,
        settled_at: now,
        claim_deadline: round.claim_deadline(),
    });
    Ok(())
}
