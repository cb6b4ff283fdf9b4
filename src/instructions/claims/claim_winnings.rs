use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BET_SEED, CONFIG_SEED, RESERVE_SEED, ROUND_SEED, VAULT_SEED};
use crate::errors::WagerError;
use crate::events::{BetLost, WinningsClaimed};
use crate::ledger::{self, ClaimOutcome, PayoutSource};
use crate::state::{Bet, Config, ReserveVault, Round};
use crate::transfer::transfer_from_vault;

#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    pub claimer: Signer<'info>,

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
        constraint = owner_token_account.owner == bet.owner @ WagerError::InvalidOwnerAccount
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    /// Only needed for third-party claims, where the bounty is paid here.
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = claimer,
    )]
    pub claimer_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
}

pub fn claim_winnings(ctx: Context<ClaimWinnings>, min_payout: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let claimer = accounts.claimer.key();
    require!(
        claimer == accounts.bet.owner || accounts.claimer_token_account.is_some(),
        WagerError::InvalidOwnerAccount
    );

    let outcome = ledger::claim_bet(
        &accounts.config,
        &mut accounts.reserve,
        &mut accounts.round,
        &mut accounts.bet,
        claimer,
        min_payout,
        now,
    )?;
    report_claim(&accounts.bet, claimer, &outcome);

    if let ClaimOutcome::Paid {
        to_owner,
        to_claimer,
        ..
    } = outcome
    {
        transfer_from_vault(
            &accounts.reserve,
            &accounts.vault,
            accounts.owner_token_account.to_account_info(),
            &accounts.token_mint,
            &accounts.token_program,
            to_owner,
        )?;
        if let Some(claimer_account) = accounts.claimer_token_account.as_ref() {
            transfer_from_vault(
                &accounts.reserve,
                &accounts.vault,
                claimer_account.to_account_info(),
                &accounts.token_mint,
                &accounts.token_program,
                to_claimer,
            )?;
        }
    }
    Ok(())
}

/// Logs and emits the result of one resolved claim.
pub(crate) fn report_claim(bet: &Bet, claimer: Pubkey, outcome: &ClaimOutcome) {
    match *outcome {
        ClaimOutcome::Lost => {
            msg!("Bet {} lost. No payout for {}", bet.id, bet.owner);
            emit!(BetLost {
                bet_id: bet.id,
                round_id: bet.round_id,
                owner: bet.owner,
            });
        }
        ClaimOutcome::Paid {
            payout,
            late_fee,
            to_owner,
            to_claimer,
            source,
        } => {
            msg!(
                "Bet {} paid {} (late fee {}): {} to owner {}, {} to claimer {}",
                bet.id,
                payout,
                late_fee,
                to_owner,
                bet.owner,
                to_claimer,
                claimer
            );
            emit!(WinningsClaimed {
                bet_id: bet.id,
                round_id: bet.round_id,
                owner: bet.owner,
                claimer,
                payout,
                late_fee,
                to_owner,
                bounty: to_claimer,
                from_reserve: source == PayoutSource::Reserve,
            });
        }
    }
}
