use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::WagerError;

#[account]
#[derive(Default, Debug)]
pub struct LiquidityPosition {
    pub provider: Pubkey,
    pub shares: u64,
    pub deposited: u64,
    pub withdrawn: u64,
    pub bump: u8,
}

impl LiquidityPosition {
    pub const LEN: usize = DISCRIMINATOR_LENGTH
        + PUBKEY_LENGTH // provider
        + U64_LENGTH    // shares
        + U64_LENGTH    // deposited
        + U64_LENGTH    // withdrawn
        + U8_LENGTH; // bump

    pub fn record_deposit(&mut self, amount: u64, shares: u64) -> Result<()> {
        let new_shares = self
            .shares
            .checked_add(shares)
            .ok_or(WagerError::MathOverflow)?;
        let deposited = self
            .deposited
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        self.shares = new_shares;
        self.deposited = deposited;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, shares: u64, amount: u64) -> Result<()> {
        require!(self.shares >= shares, WagerError::InsufficientShares);
        let withdrawn = self
            .withdrawn
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        self.shares -= shares;
        self.withdrawn = withdrawn;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdrawal_cannot_exceed_held_shares() {
        let mut position = LiquidityPosition::default();
        position.record_deposit(5_000, 5_000).unwrap();
        position.record_withdrawal(2_000, 2_100).unwrap();
        assert_eq!(position.shares, 3_000);
        assert_eq!(position.deposited, 5_000);
        assert_eq!(position.withdrawn, 2_100);

        let err = position.record_withdrawal(3_001, 1).unwrap_err();
        match err {
            anchor_lang::error::Error::AnchorError(e) => {
                assert_eq!(e.error_code_number, u32::from(WagerError::InsufficientShares))
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert_eq!(position.shares, 3_000);
    }
}
