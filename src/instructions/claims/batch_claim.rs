use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, RESERVE_SEED, ROUND_SEED, VAULT_SEED};
use crate::errors::WagerError;
use crate::instructions::claims::claim_winnings::report_claim;
use crate::instructions::remaining::{check_owner_token_account, load_bet, store_bet};
use crate::ledger::{self, ClaimOutcome};
use crate::state::{Config, ReserveVault, Round};
use crate::transfer::transfer_from_vault;

#[derive(Accounts)]
pub struct BatchClaim<'info> {
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

    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = token_mint,
        token::authority = claimer,
    )]
    pub claimer_token_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
}

/// Claims up to `MAX_BATCH_CLAIM` bets of one round. `remaining_accounts`
/// holds `[bet, owner_token_account]` pairs in `bet_ids` order. Any entry
/// that fails aborts the whole call.
pub fn batch_claim<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchClaim<'info>>,
    bet_ids: Vec<u64>,
    min_payout: u64,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() == bet_ids.len() * 2,
        WagerError::InvalidBetAccount
    );

    let now = Clock::get()?.unix_timestamp;
    let remaining = ctx.remaining_accounts;
    let accounts = ctx.accounts;
    let claimer = accounts.claimer.key();
    let mint = accounts.config.token_mint;

    let mut bets = Vec::with_capacity(bet_ids.len());
    for (bet_id, pair) in bet_ids.iter().zip(remaining.chunks_exact(2)) {
        let bet = load_bet(&pair[0])?;
        require!(bet.id == *bet_id, WagerError::InvalidBetAccount);
        check_owner_token_account(&pair[1], bet.owner, mint)?;
        bets.push(bet);
    }

    let outcomes = ledger::claim_batch(
        &accounts.config,
        &mut accounts.reserve,
        &mut accounts.round,
        &mut bets,
        claimer,
        min_payout,
        now,
    )?;

    let mut owner_payouts: Vec<(AccountInfo<'info>, u64)> = Vec::with_capacity(bets.len());
    let mut bounty_total: u64 = 0;
    for ((bet, outcome), pair) in bets.iter().zip(outcomes.iter()).zip(remaining.chunks_exact(2)) {
        store_bet(&pair[0], bet)?;
        report_claim(bet, claimer, outcome);
        if let ClaimOutcome::Paid {
            to_owner,
            to_claimer,
            ..
        } = *outcome
        {
            owner_payouts.push((pair[1].clone(), to_owner));
            bounty_total = bounty_total
                .checked_add(to_claimer)
                .ok_or(WagerError::MathOverflow)?;
        }
    }
    require!(
        bounty_total == 0 || accounts.claimer_token_account.is_some(),
        WagerError::InvalidOwnerAccount
    );

    msg!(
        "Batch of {} bet(s) claimed by {}. Winners: {}, bounty total: {}",
        bet_ids.len(),
        claimer,
        owner_payouts.len(),
        bounty_total
    );

    for (owner_token_info, amount) in owner_payouts {
        transfer_from_vault(
            &accounts.reserve,
            &accounts.vault,
            owner_token_info,
            &accounts.token_mint,
            &accounts.token_program,
            amount,
        )?;
    }
    if let Some(claimer_account) = accounts.claimer_token_account.as_ref() {
        transfer_from_vault(
            &accounts.reserve,
            &accounts.vault,
            claimer_account.to_account_info(),
            &accounts.token_mint,
            &accounts.token_program,
            bounty_total,
        )?;
    }
    Ok(())
}
