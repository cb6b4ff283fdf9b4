use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, RESERVE_SEED, ROUND_SEED, VAULT_SEED};
use crate::errors::WagerError;
use crate::events::RoundSwept;
use crate::ledger;
use crate::state::{Config, ReserveVault, Round};
use crate::transfer::transfer_from_vault;

#[derive(Accounts)]
pub struct SweepRound<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = token_mint,
        has_one = season_pool @ WagerError::InvalidOwnerAccount,
        has_one = treasury @ WagerError::InvalidOwnerAccount
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(mut, seeds = [RESERVE_SEED], bump = reserve.bump)]
    pub reserve: Account<'info, ReserveVault>,

    #[account(mut, seeds = [VAULT_SEED], bump = reserve.vault_bump)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, &round.id.to_le_bytes()],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,

    pub token_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub season_pool: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub treasury: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Permissionless. Returns the round's unclaimed remainder to the reserve
/// after paying out the season share and protocol cut of its profit.
pub fn sweep_round(ctx: Context<SweepRound>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let swept = ledger::sweep_round(&accounts.config, &mut accounts.reserve, &mut accounts.round, now)?;

    msg!(
        "Round {} swept by {}. Remaining: {}, season: {}, protocol: {}, released: {}",
        accounts.round.id,
        accounts.caller.key(),
        swept.remaining,
        swept.season_share,
        swept.protocol_cut,
        swept.released
    );
    emit!(RoundSwept {
        round_id: accounts.round.id,
        remaining: swept.remaining,
        season_share: swept.season_share,
        protocol_cut: swept.protocol_cut,
        released: swept.released,
    });

    transfer_from_vault(
        &accounts.reserve,
        &accounts.vault,
        accounts.season_pool.to_account_info(),
        &accounts.token_mint,
        &accounts.token_program,
        swept.season_share,
    )?;
    transfer_from_vault(
        &accounts.reserve,
        &accounts.vault,
        accounts.treasury.to_account_info(),
        &accounts.token_mint,
        &accounts.token_program,
        swept.protocol_cut,
    )?;
    Ok(())
}
