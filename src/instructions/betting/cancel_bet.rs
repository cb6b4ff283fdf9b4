use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BET_SEED, CONFIG_SEED, RESERVE_SEED, ROUND_SEED, VAULT_SEED};
use crate::events::BetCancelled;
use crate::ledger;
use crate::state::{Bet, Config, ReserveVault, Round};
use crate::transfer::transfer_from_vault;

#[derive(Accounts)]
pub struct CancelBet<'info> {
    pub owner: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump, has_one = token_mint)]
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

    #[account(
        mut,
        seeds = [BET_SEED, &bet.id.to_le_bytes()],
        bump = bet.bump
    )]
    pub bet: Box<Account<'info, Bet>>,

    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = token_mint,
        token::authority = owner,
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Refunds the stake minus the cancellation fee. The fee stays in the reserve.
pub fn cancel_bet(ctx: Context<CancelBet>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let cancelled = ledger::cancel_bet(
        &accounts.config,
        &mut accounts.reserve,
        &mut accounts.round,
        &mut accounts.bet,
        accounts.owner.key(),
        now,
    )?;

    msg!(
        "Bet {} cancelled by {}. Refund: {}, fee: {}, released liability: {}",
        accounts.bet.id,
        accounts.owner.key(),
        cancelled.refund,
        cancelled.fee,
        cancelled.released
    );
    emit!(BetCancelled {
        bet_id: accounts.bet.id,
        round_id: accounts.bet.round_id,
        owner: accounts.bet.owner,
        refund: cancelled.refund,
        fee: cancelled.fee,
    });

    transfer_from_vault(
        &accounts.reserve,
        &accounts.vault,
        accounts.owner_token_account.to_account_info(),
        &accounts.token_mint,
        &accounts.token_program,
        cancelled.refund,
    )
}
