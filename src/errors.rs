use anchor_lang::prelude::*;

#[error_code]
pub enum WagerError {
    // --- Validation ---
    #[msg("Amount must be greater than zero.")]
    ZeroAmount,
    #[msg("Stake is outside the configured min/max bounds.")]
    StakeOutOfRange,
    #[msg("A wager must have between 1 and MAX_LEGS legs.")]
    InvalidLegCount,
    #[msg("The same match appears more than once in this wager.")]
    DuplicateMatch,
    #[msg("Match index is outside the round.")]
    InvalidMatchIndex,
    #[msg("Outcome must be 1, 2 or 3.")]
    InvalidOutcome,
    #[msg("Fee exceeds its hard upper bound.")]
    FeeAboveLimit,
    #[msg("Parlay bonus table must start at 1.0x, never decrease and stay under the cap.")]
    InvalidBonusTable,
    #[msg("Minimum stake must be positive and not above the maximum stake.")]
    InvalidStakeBounds,
    #[msg("Round schedule parameters are inconsistent.")]
    InvalidSchedule,
    #[msg("Too many entries in a single batch.")]
    BatchTooLarge,
    #[msg("Too many entries requested for one page.")]
    PageTooLarge,
    #[msg("Account references the wrong round.")]
    InvalidRoundReference,
    #[msg("Remaining accounts do not match the requested bets.")]
    InvalidBetAccount,
    #[msg("The same bet appears more than once in this batch.")]
    DuplicateBet,
    #[msg("Token account does not belong to the bet owner or uses the wrong mint.")]
    InvalidOwnerAccount,
    #[msg("Invalid authority for this action.")]
    Unauthorized,
    #[msg("Only the bet owner may perform this action.")]
    NotBetOwner,
    #[msg("Payout is below the caller's minimum acceptable amount.")]
    SlippageExceeded,
    #[msg("Payout is below the minimum required for a bounty claim.")]
    PayoutBelowBountyMinimum,

    // --- Resource ---
    #[msg("Available reserve cannot cover this liability.")]
    InsufficientReserve,
    #[msg("Round pool does not hold enough unclaimed funds.")]
    InsufficientRoundPool,
    #[msg("Round liability would exceed the exposure limit of the reserve.")]
    RoundExposureLimit,
    #[msg("Liquidity position does not hold enough shares.")]
    InsufficientShares,

    // --- State ---
    #[msg("Protocol is paused.")]
    Paused,
    #[msg("Round has already been seeded.")]
    AlreadySeeded,
    #[msg("Round has not been seeded yet.")]
    RoundNotSeeded,
    #[msg("Betting window has not opened yet.")]
    BettingNotOpen,
    #[msg("Betting window is closed for this round.")]
    BettingClosed,
    #[msg("Round has already been settled.")]
    AlreadySettled,
    #[msg("Round has not been settled yet.")]
    RoundNotSettled,
    #[msg("Round cannot be settled before its end time.")]
    SettlementTooEarly,
    #[msg("Wager has already been processed.")]
    AlreadyProcessed,
    #[msg("Third-party claims open only after the claim deadline.")]
    ClaimDeadlineNotReached,
    #[msg("Round cannot be swept before its sweep deadline.")]
    SweepTooEarly,
    #[msg("Round has already been swept.")]
    AlreadySwept,

    // --- Arithmetic ---
    #[msg("Calculation overflow.")]
    MathOverflow,
    #[msg("Division by zero.")]
    DivisionByZero,
}
