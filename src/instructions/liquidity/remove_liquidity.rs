use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, LIQUIDITY_SEED, RESERVE_SEED, VAULT_SEED};
use crate::errors::WagerError;
use crate::events::LiquidityRemoved;
use crate::state::{Config, LiquidityPosition, ReserveVault};
use crate::transfer::transfer_from_vault;

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    pub provider: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump, has_one = token_mint)]
    pub config: Box<Account<'info, Config>>,

    #[account(mut, seeds = [RESERVE_SEED], bump = reserve.bump)]
    pub reserve: Account<'info, ReserveVault>,

    #[account(mut, seeds = [VAULT_SEED], bump = reserve.vault_bump)]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [LIQUIDITY_SEED, provider.key().as_ref()],
        bump = position.bump,
        has_one = provider @ WagerError::Unauthorized
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
}

/// Burns shares for their current value. Locked liability cannot be withdrawn.
pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, shares: u64) -> Result<()> {
    let accounts = ctx.accounts;
    require!(
        accounts.position.shares >= shares,
        WagerError::InsufficientShares
    );
    let amount = accounts.reserve.withdraw_liquidity(shares)?;
    accounts.position.record_withdrawal(shares, amount)?;

    msg!(
        "Liquidity removed by {}: {} share(s) for {}",
        accounts.provider.key(),
        shares,
        amount
    );
    emit!(LiquidityRemoved {
        provider: accounts.provider.key(),
        amount,
        shares,
    });

    transfer_from_vault(
        &accounts.reserve,
        &accounts.vault,
        accounts.provider_token_account.to_account_info(),
        &accounts.token_mint,
        &accounts.token_program,
        amount,
    )
}
