use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, RESERVE_SEED, VAULT_SEED};
use crate::events::ConfigUpdated;
use crate::state::{Config, ProtocolParams, ReserveVault};

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = Config::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = authority,
        space = ReserveVault::LEN,
        seeds = [RESERVE_SEED],
        bump
    )]
    pub reserve: Account<'info, ReserveVault>,

    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED],
        bump,
        token::mint = token_mint,
        token::authority = reserve,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_mint: Box<Account<'info, Mint>>,

    /// CHECK: only the key is stored; it must sign settlements later.
    pub oracle: UncheckedAccount<'info>,

    #[account(token::mint = token_mint)]
    pub season_pool: Box<Account<'info, TokenAccount>>,

    #[account(token::mint = token_mint)]
    pub treasury: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_protocol(ctx: Context<InitializeProtocol>, params: ProtocolParams) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.apply_params(&params)?;
    config.authority = ctx.accounts.authority.key();
    config.oracle = ctx.accounts.oracle.key();
    config.token_mint = ctx.accounts.token_mint.key();
    config.season_pool = ctx.accounts.season_pool.key();
    config.treasury = ctx.accounts.treasury.key();
    config.next_round_id = 0;
    config.next_bet_id = 0;
    config.paused = false;
    config.bump = ctx.bumps.config;

    let reserve = &mut ctx.accounts.reserve;
    reserve.bump = ctx.bumps.reserve;
    reserve.vault_bump = ctx.bumps.vault;

    msg!(
        "Protocol initialized. Authority: {}, oracle: {}, mint: {}",
        config.authority,
        config.oracle,
        config.token_mint
    );
    emit!(ConfigUpdated {
        authority: config.authority,
    });
    Ok(())
}
