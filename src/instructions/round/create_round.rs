use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, ROUND_SEED};
use crate::errors::WagerError;
use crate::events::{RoundCreated, RoundSeeded};
use crate::state::{Config, Round};

#[derive(Accounts)]
pub struct CreateRound<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ WagerError::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = authority,
        space = Round::LEN,
        seeds = [ROUND_SEED, &config.next_round_id.to_le_bytes()],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    pub system_program: Program<'info, System>,
}

pub fn create_round(ctx: Context<CreateRound>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let round_id = ctx.accounts.config.take_round_id()?;
    let round = &mut ctx.accounts.round;
    round.open(round_id, now, ctx.bumps.round);

    msg!("Round {} created at {}", round_id, now);
    emit!(RoundCreated {
        round_id,
        created_at: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SeedRound<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ WagerError::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [ROUND_SEED, &round.id.to_le_bytes()],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,
}

/// Injects starting pools, locks every match's odds and opens the betting window.
pub fn seed_round(ctx: Context<SeedRound>, entropy: [u8; 32]) -> Result<()> {
    let config = &ctx.accounts.config;
    require!(!config.paused, WagerError::Paused);
    let now = Clock::get()?.unix_timestamp;

    let round = &mut ctx.accounts.round;
    round.seed(config, &entropy, now)?;

    msg!(
        "Round {} seeded. Betting closes at {}, round ends at {}",
        round.id,
        round.betting_closes_at,
        round.end_time
    );
    emit!(RoundSeeded {
        round_id: round.id,
        start_time: round.start_time,
        end_time: round.end_time,
        betting_closes_at: round.betting_closes_at,
    });
    Ok(())
}
