use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, LIQUIDITY_SEED, RESERVE_SEED, VAULT_SEED};
use crate::errors::WagerError;
use crate::events::LiquidityAdded;
use crate::state::{Config, LiquidityPosition, ReserveVault};
use crate::transfer::transfer_to_vault;

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    #[account(mut)]
    pub provider: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = token_mint,
        constraint = !config.paused @ WagerError::Paused
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(mut, seeds = [RESERVE_SEED], bump = reserve.bump)]
    pub reserve: Account<'info, ReserveVault>,

    #[account(mut, seeds = [VAULT_SEED], bump = reserve.vault_bump)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = provider,
        space = LiquidityPosition::LEN,
        seeds = [LIQUIDITY_SEED, provider.key().as_ref()],
        bump
    )]
    pub position: Account<'info, LiquidityPosition>,

    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = token_mint,
        token::authority = provider,
    )]
    pub provider_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Deposits into free reserve. Shares are priced against `available + locked`.
pub fn add_liquidity(ctx: Context<AddLiquidity>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;
    let shares = accounts.reserve.deposit_liquidity(amount)?;

    let position = &mut accounts.position;
    if position.provider == Pubkey::default() {
        position.provider = accounts.provider.key();
        position.bump = ctx.bumps.position;
    }
    position.record_deposit(amount, shares)?;

    msg!(
        "Liquidity added by {}: {} for {} share(s). Reserve available: {}, locked: {}",
        position.provider,
        amount,
        shares,
        accounts.reserve.available,
        accounts.reserve.locked
    );
    emit!(LiquidityAdded {
        provider: position.provider,
        amount,
        shares,
    });

    transfer_to_vault(
        &accounts.provider,
        &accounts.provider_token_account,
        &accounts.vault,
        &accounts.token_mint,
        &accounts.token_program,
        amount,
    )
}
