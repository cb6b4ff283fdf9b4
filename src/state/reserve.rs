use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::WagerError;
use crate::math::{shares_for_deposit, utilization_bps, value_for_shares};

/// Backing reserve. Every unit held in the vault token account is either
/// `available` (free to cover new liability) or `locked` (committed to the
/// worst-case payouts of rounds that have not been swept).
///
/// `settled_liability` is the part of `locked` owned by rounds whose results
/// are already public. It is excluded when shares are redeemed.
///
/// All balance movement goes through the methods below; each one checks
/// before it writes, so a failed call never leaves a half-applied update.
#[account]
#[derive(Default, Debug)]
pub struct ReserveVault {
    pub available: u64,
    pub locked: u64,
    pub settled_liability: u64,
    pub total_shares: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl ReserveVault {
    pub const LEN: usize = DISCRIMINATOR_LENGTH
        + U64_LENGTH // available
        + U64_LENGTH // locked
        + U64_LENGTH // settled_liability
        + U64_LENGTH // total_shares
        + U8_LENGTH  // bump
        + U8_LENGTH; // vault_bump

    pub fn total(&self) -> Result<u64> {
        self.available
            .checked_add(self.locked)
            .ok_or(WagerError::MathOverflow.into())
    }

    /// Value backing LP shares on withdrawal.
    pub fn redeemable(&self) -> Result<u64> {
        self.total()?
            .checked_sub(self.settled_liability)
            .ok_or(WagerError::MathOverflow.into())
    }

    pub fn utilization_bps(&self) -> Result<u64> {
        Ok(utilization_bps(self.locked, self.total()?))
    }

    /// Value that entered the vault and is immediately free (stakes, deposits).
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        let available = self
            .available
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        available
            .checked_add(self.locked)
            .ok_or(WagerError::MathOverflow)?;
        self.available = available;
        Ok(())
    }

    /// Moves `amount` from `available` to `locked`.
    pub fn lock(&mut self, amount: u64) -> Result<()> {
        require!(self.available >= amount, WagerError::InsufficientReserve);
        let locked = self
            .locked
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        self.available -= amount;
        self.locked = locked;
        Ok(())
    }

    /// Moves `amount` from `locked` back to `available`.
    pub fn release(&mut self, amount: u64) -> Result<()> {
        require!(self.locked >= amount, WagerError::MathOverflow);
        let available = self
            .available
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        self.locked -= amount;
        self.available = available;
        Ok(())
    }

    /// Value leaving the vault out of a round's locked liability.
    pub fn debit_locked(&mut self, amount: u64) -> Result<()> {
        require!(self.locked >= amount, WagerError::InsufficientRoundPool);
        self.locked -= amount;
        Ok(())
    }

    /// Moves a settled round's outstanding liability into `settled_liability`.
    pub fn mark_settled(&mut self, amount: u64) -> Result<()> {
        let settled = self
            .settled_liability
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        require!(settled <= self.locked, WagerError::InsufficientRoundPool);
        self.settled_liability = settled;
        Ok(())
    }

    pub fn clear_settled(&mut self, amount: u64) -> Result<()> {
        require!(
            self.settled_liability >= amount,
            WagerError::InsufficientRoundPool
        );
        self.settled_liability -= amount;
        Ok(())
    }

    /// Value leaving the vault out of free reserve.
    pub fn debit_available(&mut self, amount: u64) -> Result<()> {
        require!(self.available >= amount, WagerError::InsufficientReserve);
        self.available -= amount;
        Ok(())
    }

    /// Credits a liquidity deposit and returns the shares it is worth.
    pub fn deposit_liquidity(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, WagerError::ZeroAmount);
        let shares = shares_for_deposit(amount, self.total()?, self.total_shares)?;
        require!(shares > 0, WagerError::ZeroAmount);
        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(WagerError::MathOverflow)?;
        self.credit(amount)?;
        self.total_shares = total_shares;
        Ok(shares)
    }

    /// Burns `shares` and returns the value paid out. Shares are priced
    /// without settled liability, and only free reserve can be withdrawn.
    pub fn withdraw_liquidity(&mut self, shares: u64) -> Result<u64> {
        require!(shares > 0, WagerError::ZeroAmount);
        require!(shares <= self.total_shares, WagerError::InsufficientShares);
        let value = value_for_shares(shares, self.redeemable()?, self.total_shares)?;
        require!(value > 0, WagerError::ZeroAmount);
        require!(self.available >= value, WagerError::InsufficientReserve);
        self.available -= value;
        self.total_shares -= shares;
        Ok(value)
    }
}
