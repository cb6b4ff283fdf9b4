use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount};

use crate::constants::BET_SEED;
use crate::errors::WagerError;
use crate::state::Bet;

/// Reads a bet passed through `remaining_accounts`, checking program
/// ownership and that the address is the bet's own PDA.
pub fn load_bet(info: &AccountInfo) -> Result<Bet> {
    require_keys_eq!(*info.owner, crate::ID, WagerError::InvalidBetAccount);
    let data = info.try_borrow_data()?;
    let bet = Bet::try_deserialize(&mut &data[..])?;
    let expected = Pubkey::create_program_address(
        &[BET_SEED, &bet.id.to_le_bytes(), &[bet.bump]],
        &crate::ID,
    )
    .map_err(|_| error!(WagerError::InvalidBetAccount))?;
    require_keys_eq!(expected, *info.key, WagerError::InvalidBetAccount);
    Ok(bet)
}

pub fn store_bet(info: &AccountInfo, bet: &Bet) -> Result<()> {
    require!(info.is_writable, WagerError::InvalidBetAccount);
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    bet.try_serialize(&mut writer)
}

/// The payout destination must be a writable token account of `owner` in `mint`.
pub fn check_owner_token_account(info: &AccountInfo, owner: Pubkey, mint: Pubkey) -> Result<()> {
    require_keys_eq!(*info.owner, token::ID, WagerError::InvalidOwnerAccount);
    require!(info.is_writable, WagerError::InvalidOwnerAccount);
    let data = info.try_borrow_data()?;
    let account = TokenAccount::try_deserialize(&mut &data[..])?;
    require_keys_eq!(account.owner, owner, WagerError::InvalidOwnerAccount);
    require_keys_eq!(account.mint, mint, WagerError::InvalidOwnerAccount);
    Ok(())
}
