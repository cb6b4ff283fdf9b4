use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::errors::WagerError;
use crate::events::{ConfigUpdated, PauseToggled};
use crate::state::{Config, ConfigUpdate};

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ WagerError::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,
}

/// Applies a partial update. Every bound is checked before anything is written.
pub fn update_config(ctx: Context<UpdateConfig>, update: ConfigUpdate) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.apply_update(&update)?;

    msg!(
        "Config updated. Cut: {} bps, season: {} bps, cancel fee: {} bps, late fee: {} bps, bounty: {} bps",
        config.protocol_cut_bps,
        config.season_share_bps,
        config.cancellation_fee_bps,
        config.late_claim_fee_bps,
        config.bounty_bps
    );
    emit!(ConfigUpdated {
        authority: config.authority,
    });
    Ok(())
}

pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.paused = paused;

    msg!("Protocol paused: {}", paused);
    emit!(PauseToggled { paused });
    Ok(())
}
