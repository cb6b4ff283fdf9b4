use anchor_lang::prelude::*;

use crate::constants::MATCHES_PER_ROUND;
use crate::errors::WagerError;
use crate::state::{Config, ReserveVault, Round};

/// Records the round's results and marks its outstanding liability as
/// settled in the reserve. From here on that liability is owed to known
/// winners and no longer backs LP withdrawals.
pub fn settle_round(
    config: &Config,
    reserve: &mut ReserveVault,
    round: &mut Round,
    results: &[u8; MATCHES_PER_ROUND],
    now: i64,
) -> Result<()> {
    let outstanding = round.pool.remaining();
    let settled = reserve
        .settled_liability
        .checked_add(outstanding)
        .ok_or(WagerError::MathOverflow)?;
    require!(settled <= reserve.locked, WagerError::InsufficientRoundPool);

    round.settle(results, config.claim_grace_period, now)?;
    reserve.mark_settled(outstanding)
}
