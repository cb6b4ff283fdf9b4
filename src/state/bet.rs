use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::WagerError;
use crate::math::mul_scaled;
use crate::state::{Outcome, Round};

/// One prediction as submitted by the bettor: match index and wire outcome (1..=3).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegInput {
    pub match_index: u8,
    pub outcome: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leg {
    pub match_index: u8,
    pub outcome: Outcome,
}

impl Leg {
    pub const LEN: usize = U8_LENGTH + ENUM_TAG_LENGTH;
}

/// Validates leg shape: count within bounds, each match at most once (bitset
/// over match indices), every index inside the round, every outcome valid.
pub fn parse_legs(inputs: &[LegInput]) -> Result<Vec<Leg>> {
    require!(
        !inputs.is_empty() && inputs.len() <= MAX_LEGS,
        WagerError::InvalidLegCount
    );
    let mut seen: u32 = 0;
    let mut legs = Vec::with_capacity(inputs.len());
    for input in inputs {
        require!(
            (input.match_index as usize) < MATCHES_PER_ROUND,
            WagerError::InvalidMatchIndex
        );
        let bit = 1u32 << input.match_index;
        require!(seen & bit == 0, WagerError::DuplicateMatch);
        seen |= bit;
        legs.push(Leg {
            match_index: input.match_index,
            outcome: Outcome::from_wire(input.outcome)?,
        });
    }
    Ok(legs)
}

/// Active -> Cancelled, or Active -> Won | Lost -> Claimed. Never backwards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BetStatus {
    #[default]
    Active,
    Won,
    Lost,
    Cancelled,
    Claimed,
}

#[account]
#[derive(Default, Debug)]
pub struct Bet {
    pub id: u64,
    pub owner: Pubkey,
    pub round_id: u64,
    pub stake: u64,
    pub legs: Vec<Leg>,
    pub bonus: u64,
    pub multiplier: u64, // locked at placement, never rewritten
    pub liability: u64,
    pub status: BetStatus,
    pub placed_at: i64,
    pub paid_out: u64,
    pub claimed_by: Option<Pubkey>,
    pub bump: u8,
}

impl Bet {
    pub const LEN: usize = DISCRIMINATOR_LENGTH
        + U64_LENGTH    // id
        + PUBKEY_LENGTH // owner
        + U64_LENGTH    // round_id
        + U64_LENGTH    // stake
        + VEC_PREFIX_LENGTH + Leg::LEN * MAX_LEGS // legs
        + U64_LENGTH    // bonus
        + U64_LENGTH    // multiplier
        + U64_LENGTH    // liability
        + ENUM_TAG_LENGTH // status
        + I64_LENGTH    // placed_at
        + U64_LENGTH    // paid_out
        + OPTION_FLAG_LENGTH + PUBKEY_LENGTH // claimed_by
        + U8_LENGTH; // bump

    /// Payout owed if every leg wins. Truncated, never rounded up.
    pub fn payout(&self) -> Result<u64> {
        mul_scaled(self.stake, self.multiplier)
    }

    pub fn is_parlay(&self) -> bool {
        self.legs.len() > 1
    }

    /// `Some(true)` iff every leg matches the stored result; `None` while the
    /// round has no results.
    pub fn evaluate(&self, round: &Round) -> Option<bool> {
        if !round.settled {
            return None;
        }
        Some(
            self.legs
                .iter()
                .all(|leg| round.result(leg.match_index) == Some(leg.outcome)),
        )
    }

    /// Stored status, with unclaimed wagers on a settled round reported as
    /// `Won` or `Lost`.
    pub fn resolved_status(&self, round: &Round) -> BetStatus {
        match (self.status, self.evaluate(round)) {
            (BetStatus::Active, Some(true)) => BetStatus::Won,
            (BetStatus::Active, Some(false)) => BetStatus::Lost,
            (status, _) => status,
        }
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.status == BetStatus::Active, WagerError::AlreadyProcessed);
        Ok(())
    }

    pub fn ensure_round(&self, round: &Round) -> Result<()> {
        require!(self.round_id == round.id, WagerError::InvalidRoundReference);
        Ok(())
    }
}
