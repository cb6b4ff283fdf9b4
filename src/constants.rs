// --- PDA Seeds ---
pub const CONFIG_SEED: &[u8] = b"config";
pub const RESERVE_SEED: &[u8] = b"reserve";
pub const VAULT_SEED: &[u8] = b"vault";
pub const ROUND_SEED: &[u8] = b"round";
pub const BET_SEED: &[u8] = b"bet";
pub const LIQUIDITY_SEED: &[u8] = b"liquidity";

// --- Round Shape ---
pub const MATCHES_PER_ROUND: usize = 10;
pub const OUTCOMES_PER_MATCH: usize = 3;
pub const MAX_LEGS: usize = 10;

// --- Fixed Point ---
// Multipliers and bonus factors are stored scaled by ODDS_SCALE (6 decimal places).
pub const ODDS_SCALE: u64 = 1_000_000;
pub const BPS_DENOMINATOR: u64 = 10_000;

// --- Odds Compression ---
// Raw pool ratios are clamped to [RAW_ODDS_FLOOR, RAW_ODDS_CEILING] and remapped
// linearly onto [TARGET_ODDS_MIN, TARGET_ODDS_MAX].
pub const RAW_ODDS_FLOOR: u64 = 1_200_000;
pub const RAW_ODDS_CEILING: u64 = 6_000_000;
pub const TARGET_ODDS_MIN: u64 = 1_250_000;
pub const TARGET_ODDS_MAX: u64 = 2_050_000;

// Seed weights per outcome fall in [SEED_WEIGHT_MIN, SEED_WEIGHT_MIN + SEED_WEIGHT_SPREAD).
pub const SEED_WEIGHT_MIN: u64 = 20;
pub const SEED_WEIGHT_SPREAD: u64 = 61;

// --- Hard Bounds (enforced at config write time) ---
pub const MAX_CANCELLATION_FEE_BPS: u16 = 5_000;
pub const MAX_LATE_CLAIM_FEE_BPS: u16 = 2_000;
pub const MAX_BOUNTY_BPS: u16 = 2_000;
pub const MAX_PROTOCOL_CUT_BPS: u16 = 5_000;
pub const MAX_SEASON_SHARE_BPS: u16 = 1_000;
pub const MAX_PARLAY_BONUS: u64 = 2_000_000;

// --- Batch / Page Limits ---
pub const MAX_BATCH_CLAIM: usize = 10;
pub const MAX_QUERY_PAGE: usize = 20;

// --- Defaults ---
pub const DEFAULT_PROTOCOL_CUT_BPS: u16 = 4_500;
pub const DEFAULT_SEASON_SHARE_BPS: u16 = 200;
pub const DEFAULT_CANCELLATION_FEE_BPS: u16 = 1_000;
pub const DEFAULT_LATE_CLAIM_FEE_BPS: u16 = 500;
pub const DEFAULT_BOUNTY_BPS: u16 = 1_000;
pub const DEFAULT_MAX_ROUND_EXPOSURE_BPS: u16 = 5_000;
pub const DEFAULT_MIN_STAKE: u64 = 1_000_000;
pub const DEFAULT_MAX_STAKE: u64 = 10_000_000_000;
pub const DEFAULT_MIN_BOUNTY_PAYOUT: u64 = 10_000_000;
pub const DEFAULT_CLAIM_GRACE_PERIOD: i64 = 24 * 60 * 60;
pub const DEFAULT_BETTING_CUTOFF: i64 = 5 * 60;
pub const DEFAULT_ROUND_DURATION: i64 = 60 * 60;
pub const DEFAULT_SEED_LIQUIDITY: u64 = 3_000_000_000;

// 1 leg 1.0x, 2 legs 1.15x, then linear up to 1.5x at 10 legs.
pub const DEFAULT_PARLAY_BONUS: [u64; MAX_LEGS] = [
    1_000_000, 1_150_000, 1_194_000, 1_238_000, 1_281_000, 1_325_000, 1_369_000, 1_413_000,
    1_456_000, 1_500_000,
];

// --- Account Sizing ---
pub const DISCRIMINATOR_LENGTH: usize = 8;
pub const PUBKEY_LENGTH: usize = 32;
pub const OPTION_FLAG_LENGTH: usize = 1;
pub const VEC_PREFIX_LENGTH: usize = 4;
pub const ENUM_TAG_LENGTH: usize = 1;
pub const U8_LENGTH: usize = 1;
pub const U16_LENGTH: usize = 2;
pub const BOOL_LENGTH: usize = 1;
pub const U64_LENGTH: usize = 8;
pub const I64_LENGTH: usize = 8;
