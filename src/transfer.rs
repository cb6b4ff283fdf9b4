use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::RESERVE_SEED;
use crate::state::ReserveVault;

/// Moves tokens from a user-owned account into the vault. The user signs.
pub fn transfer_to_vault<'info>(
    authority: &Signer<'info>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    mint: &Account<'info, Mint>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let cpi_accounts = TransferChecked {
        from: from.to_account_info(),
        to: vault.to_account_info(),
        authority: authority.to_account_info(),
        mint: mint.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer_checked(cpi_ctx, amount, mint.decimals)
}

/// Pays out of the vault, signed by the reserve PDA.
///
/// Takes a raw `AccountInfo` destination so batch claims can pay accounts
/// passed through `remaining_accounts`. The token program checks the mint.
pub fn transfer_from_vault<'info>(
    reserve: &Account<'info, ReserveVault>,
    vault: &Account<'info, TokenAccount>,
    to: AccountInfo<'info>,
    mint: &Account<'info, Mint>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let signer_seeds: &[&[u8]] = &[RESERVE_SEED, &[reserve.bump]];
    let cpi_accounts = TransferChecked {
        from: vault.to_account_info(),
        to,
        authority: reserve.to_account_info(),
        mint: mint.to_account_info(),
    };
    let signer_binding = [signer_seeds];
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        &signer_binding,
    );
    token::transfer_checked(cpi_ctx, amount, mint.decimals)
}
