use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BET_SEED, CONFIG_SEED, RESERVE_SEED, ROUND_SEED, VAULT_SEED};
use crate::events::BetPlaced;
use crate::ledger;
use crate::state::{Bet, Config, LegInput, ReserveVault, Round};
use crate::transfer::transfer_to_vault;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = token_mint
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

    #[account(
        init,
        payer = owner,
        space = Bet::LEN,
        seeds = [BET_SEED, &config.next_bet_id.to_le_bytes()],
        bump
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
    pub system_program: Program<'info, System>,
}

pub fn place_bet(ctx: Context<PlaceBet>, legs: Vec<LegInput>, stake: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let bet_id = accounts.config.take_bet_id()?;

    let placed = ledger::place_bet(
        &accounts.config,
        &mut accounts.reserve,
        &mut accounts.round,
        &mut accounts.bet,
        accounts.owner.key(),
        &legs,
        stake,
        now,
    )?;
    let bet = &mut accounts.bet;
    bet.id = bet_id;
    bet.bump = ctx.bumps.bet;

    msg!(
        "Bet {} placed by {} on round {}: stake {}, {} leg(s), multiplier {}, liability {}",
        bet_id,
        bet.owner,
        bet.round_id,
        stake,
        bet.legs.len(),
        placed.multiplier,
        placed.liability
    );
    emit!(BetPlaced {
        bet_id,
        round_id: bet.round_id,
        owner: bet.owner,
        stake,
        legs: bet.legs.len() as u8,
        multiplier: placed.multiplier,
        liability: placed.liability,
    });

    transfer_to_vault(
        &accounts.owner,
        &accounts.owner_token_account,
        &accounts.vault,
        &accounts.token_mint,
        &accounts.token_program,
        stake,
    )
}
