use anchor_lang::prelude::*;

#[event]
pub struct RoundCreated {
    pub round_id: u64,
    pub created_at: i64,
}

#[event]
pub struct RoundSeeded {
    pub round_id: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub betting_closes_at: i64,
}

#[event]
pub struct BetPlaced {
    pub bet_id: u64,
    pub round_id: u64,
    pub owner: Pubkey,
    pub stake: u64,
    pub legs: u8,
    pub multiplier: u64,
    pub liability: u64,
}

#[event]
pub struct BetCancelled {
    pub bet_id: u64,
    pub round_id: u64,
    pub owner: Pubkey,
    pub refund: u64,
    pub fee: u64,
}

#[event]
pub struct RoundSettled {
    pub round_id: u64,
    pub results: [u8; 10],
    pub settled_at: i64,
    pub claim_deadline: i64,
}

#[event]
pub struct BetLost {
    pub bet_id: u64,
    pub round_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct WinningsClaimed {
    pub bet_id: u64,
    pub round_id: u64,
    pub owner: Pubkey,
    pub claimer: Pubkey,
    pub payout: u64,
    pub late_fee: u64,
    pub to_owner: u64,
    pub bounty: u64,
    pub from_reserve: bool,
}

#[event]
pub struct RoundSwept {
    pub round_id: u64,
    pub remaining: u64,
    pub season_share: u64,
    pub protocol_cut: u64,
    pub released: u64,
}

#[event]
pub struct LiquidityAdded {
    pub provider: Pubkey,
    pub amount: u64,
    pub shares: u64,
}

#[event]
pub struct LiquidityRemoved {
    pub provider: Pubkey,
    pub amount: u64,
    pub shares: u64,
}

#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
}

#[event]
pub struct PauseToggled {
    pub paused: bool,
}
