use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::WagerError;

/// Operator-tunable protocol parameters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProtocolParams {
    pub protocol_cut_bps: u16,
    pub season_share_bps: u16,
    pub cancellation_fee_bps: u16,
    pub late_claim_fee_bps: u16,
    pub bounty_bps: u16,
    pub max_round_exposure_bps: u16,
    pub min_stake: u64,
    pub max_stake: u64,
    pub min_bounty_payout: u64,
    pub parlay_bonus: [u64; MAX_LEGS],
    pub claim_grace_period: i64,
    pub betting_cutoff: i64,
    pub round_duration: i64,
    pub seed_liquidity: u64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            protocol_cut_bps: DEFAULT_PROTOCOL_CUT_BPS,
            season_share_bps: DEFAULT_SEASON_SHARE_BPS,
            cancellation_fee_bps: DEFAULT_CANCELLATION_FEE_BPS,
            late_claim_fee_bps: DEFAULT_LATE_CLAIM_FEE_BPS,
            bounty_bps: DEFAULT_BOUNTY_BPS,
            max_round_exposure_bps: DEFAULT_MAX_ROUND_EXPOSURE_BPS,
            min_stake: DEFAULT_MIN_STAKE,
            max_stake: DEFAULT_MAX_STAKE,
            min_bounty_payout: DEFAULT_MIN_BOUNTY_PAYOUT,
            parlay_bonus: DEFAULT_PARLAY_BONUS,
            claim_grace_period: DEFAULT_CLAIM_GRACE_PERIOD,
            betting_cutoff: DEFAULT_BETTING_CUTOFF,
            round_duration: DEFAULT_ROUND_DURATION,
            seed_liquidity: DEFAULT_SEED_LIQUIDITY,
        }
    }
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.cancellation_fee_bps <= MAX_CANCELLATION_FEE_BPS
                && self.late_claim_fee_bps <= MAX_LATE_CLAIM_FEE_BPS
                && self.bounty_bps <= MAX_BOUNTY_BPS
                && self.protocol_cut_bps <= MAX_PROTOCOL_CUT_BPS
                && self.season_share_bps <= MAX_SEASON_SHARE_BPS
                && self.max_round_exposure_bps as u64 <= BPS_DENOMINATOR,
            WagerError::FeeAboveLimit
        );
        require!(
            self.min_stake > 0 && self.min_stake <= self.max_stake,
            WagerError::InvalidStakeBounds
        );
        require!(
            self.parlay_bonus[0] == ODDS_SCALE
                && self.parlay_bonus.windows(2).all(|w| w[0] <= w[1])
                && self.parlay_bonus[MAX_LEGS - 1] <= MAX_PARLAY_BONUS,
            WagerError::InvalidBonusTable
        );
        require!(
            self.claim_grace_period > 0
                && self.round_duration > 0
                && self.betting_cutoff >= 0
                && self.betting_cutoff < self.round_duration
                && self.seed_liquidity >= (OUTCOMES_PER_MATCH as u64) * SEED_WEIGHT_SPREAD,
            WagerError::InvalidSchedule
        );
        Ok(())
    }
}

/// Partial update of [`ProtocolParams`]; unset fields keep their current value.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct ConfigUpdate {
    pub oracle: Option<Pubkey>,
    pub season_pool: Option<Pubkey>,
    pub treasury: Option<Pubkey>,
    pub protocol_cut_bps: Option<u16>,
    pub season_share_bps: Option<u16>,
    pub cancellation_fee_bps: Option<u16>,
    pub late_claim_fee_bps: Option<u16>,
    pub bounty_bps: Option<u16>,
    pub max_round_exposure_bps: Option<u16>,
    pub min_stake: Option<u64>,
    pub max_stake: Option<u64>,
    pub min_bounty_payout: Option<u64>,
    pub parlay_bonus: Option<[u64; MAX_LEGS]>,
    pub claim_grace_period: Option<i64>,
    pub betting_cutoff: Option<i64>,
    pub round_duration: Option<i64>,
    pub seed_liquidity: Option<u64>,
}

#[account]
#[derive(Default, Debug)]
pub struct Config {
    pub authority: Pubkey,
    pub oracle: Pubkey,
    pub token_mint: Pubkey,
    pub season_pool: Pubkey, // token account of the side reward pool
    pub treasury: Pubkey,    // token account receiving the protocol cut
    pub protocol_cut_bps: u16,
    pub season_share_bps: u16,
    pub cancellation_fee_bps: u16,
    pub late_claim_fee_bps: u16,
    pub bounty_bps: u16,
    pub max_round_exposure_bps: u16,
    pub min_stake: u64,
    pub max_stake: u64,
    pub min_bounty_payout: u64,
    pub parlay_bonus: [u64; MAX_LEGS],
    pub claim_grace_period: i64,
    pub betting_cutoff: i64,
    pub round_duration: i64,
    pub seed_liquidity: u64,
    pub next_round_id: u64,
    pub next_bet_id: u64,
    pub paused: bool,
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = DISCRIMINATOR_LENGTH
        + PUBKEY_LENGTH * 5 // authority, oracle, token_mint, season_pool, treasury
        + U16_LENGTH * 6    // fee bps fields
        + U64_LENGTH * 3    // min_stake, max_stake, min_bounty_payout
        + U64_LENGTH * MAX_LEGS // parlay_bonus
        + I64_LENGTH * 3    // claim_grace_period, betting_cutoff, round_duration
        + U64_LENGTH        // seed_liquidity
        + U64_LENGTH * 2    // next_round_id, next_bet_id
        + BOOL_LENGTH       // paused
        + U8_LENGTH; // bump

    pub fn params(&self) -> ProtocolParams {
        ProtocolParams {
            protocol_cut_bps: self.protocol_cut_bps,
            season_share_bps: self.season_share_bps,
            cancellation_fee_bps: self.cancellation_fee_bps,
            late_claim_fee_bps: self.late_claim_fee_bps,
            bounty_bps: self.bounty_bps,
            max_round_exposure_bps: self.max_round_exposure_bps,
            min_stake: self.min_stake,
            max_stake: self.max_stake,
            min_bounty_payout: self.min_bounty_payout,
            parlay_bonus: self.parlay_bonus,
            claim_grace_period: self.claim_grace_period,
            betting_cutoff: self.betting_cutoff,
            round_duration: self.round_duration,
            seed_liquidity: self.seed_liquidity,
        }
    }

    /// Validates every bound first, then writes. A rejected call leaves the config untouched.
    pub fn apply_params(&mut self, params: &ProtocolParams) -> Result<()> {
        params.validate()?;
        self.protocol_cut_bps = params.protocol_cut_bps;
        self.season_share_bps = params.season_share_bps;
        self.cancellation_fee_bps = params.cancellation_fee_bps;
        self.late_claim_fee_bps = params.late_claim_fee_bps;
        self.bounty_bps = params.bounty_bps;
        self.max_round_exposure_bps = params.max_round_exposure_bps;
        self.min_stake = params.min_stake;
        self.max_stake = params.max_stake;
        self.min_bounty_payout = params.min_bounty_payout;
        self.parlay_bonus = params.parlay_bonus;
        self.claim_grace_period = params.claim_grace_period;
        self.betting_cutoff = params.betting_cutoff;
        self.round_duration = params.round_duration;
        self.seed_liquidity = params.seed_liquidity;
        Ok(())
    }

    pub fn apply_update(&mut self, update: &ConfigUpdate) -> Result<()> {
        let current = self.params();
        let params = ProtocolParams {
            protocol_cut_bps: update.protocol_cut_bps.unwrap_or(current.protocol_cut_bps),
            season_share_bps: update.season_share_bps.unwrap_or(current.season_share_bps),
            cancellation_fee_bps: update
                .cancellation_fee_bps
                .unwrap_or(current.cancellation_fee_bps),
            late_claim_fee_bps: update.late_claim_fee_bps.unwrap_or(current.late_claim_fee_bps),
            bounty_bps: update.bounty_bps.unwrap_or(current.bounty_bps),
            max_round_exposure_bps: update
                .max_round_exposure_bps
                .unwrap_or(current.max_round_exposure_bps),
            min_stake: update.min_stake.unwrap_or(current.min_stake),
            max_stake: update.max_stake.unwrap_or(current.max_stake),
            min_bounty_payout: update.min_bounty_payout.unwrap_or(current.min_bounty_payout),
            parlay_bonus: update.parlay_bonus.unwrap_or(current.parlay_bonus),
            claim_grace_period: update.claim_grace_period.unwrap_or(current.claim_grace_period),
            betting_cutoff: update.betting_cutoff.unwrap_or(current.betting_cutoff),
            round_duration: update.round_duration.unwrap_or(current.round_duration),
            seed_liquidity: update.seed_liquidity.unwrap_or(current.seed_liquidity),
        };
        self.apply_params(&params)?;
        if let Some(oracle) = update.oracle {
            self.oracle = oracle;
        }
        if let Some(season_pool) = update.season_pool {
            self.season_pool = season_pool;
        }
        if let Some(treasury) = update.treasury {
            self.treasury = treasury;
        }
        Ok(())
    }

    /// Bonus factor for a wager with `legs` legs. Callers validate the leg count first.
    pub fn leg_count_bonus(&self, legs: usize) -> Result<u64> {
        require!(legs >= 1 && legs <= MAX_LEGS, WagerError::InvalidLegCount);
        Ok(self.parlay_bonus[legs - 1])
    }

    pub fn take_round_id(&mut self) -> Result<u64> {
        let id = self.next_round_id;
        self.next_round_id = id.checked_add(1).ok_or(WagerError::MathOverflow)?;
        Ok(id)
    }

    pub fn take_bet_id(&mut self) -> Result<u64> {
        let id = self.next_bet_id;
        self.next_bet_id = id.checked_add(1).ok_or(WagerError::MathOverflow)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(anchor_err) => anchor_err.error_code_number,
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    fn configured() -> Config {
        let mut config = Config::default();
        config.apply_params(&ProtocolParams::default()).unwrap();
        config
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(ProtocolParams::default().validate().is_ok());
    }

    #[test]
    fn cancellation_fee_is_capped_at_half() {
        let mut config = configured();
        let update = ConfigUpdate {
            cancellation_fee_bps: Some(MAX_CANCELLATION_FEE_BPS + 1),
            ..Default::default()
        };
        let err = config.apply_update(&update).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::FeeAboveLimit));
        assert_eq!(config.cancellation_fee_bps, DEFAULT_CANCELLATION_FEE_BPS);

        let update = ConfigUpdate {
            cancellation_fee_bps: Some(MAX_CANCELLATION_FEE_BPS),
            ..Default::default()
        };
        config.apply_update(&update).unwrap();
        assert_eq!(config.cancellation_fee_bps, MAX_CANCELLATION_FEE_BPS);
    }

    #[test]
    fn rejected_update_leaves_every_field_unchanged() {
        let mut config = configured();
        let oracle_before = config.oracle;
        let update = ConfigUpdate {
            oracle: Some(Pubkey::new_unique()),
            bounty_bps: Some(500),
            min_stake: Some(10),
            max_stake: Some(5),
            ..Default::default()
        };
        let err = config.apply_update(&update).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InvalidStakeBounds));
        assert_eq!(config.oracle, oracle_before);
        assert_eq!(config.bounty_bps, DEFAULT_BOUNTY_BPS);
        assert_eq!(config.min_stake, DEFAULT_MIN_STAKE);
    }

    #[test]
    fn bonus_table_must_be_monotonic_from_one() {
        let mut table = DEFAULT_PARLAY_BONUS;
        table[4] = 1_100_000;
        let params = ProtocolParams {
            parlay_bonus: table,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InvalidBonusTable));

        let mut table = DEFAULT_PARLAY_BONUS;
        table[0] = 1_050_000;
        let params = ProtocolParams {
            parlay_bonus: table,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn cutoff_must_fit_inside_round() {
        let params = ProtocolParams {
            betting_cutoff: DEFAULT_ROUND_DURATION,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InvalidSchedule));
    }

    #[test]
    fn leg_count_bonus_reads_the_table() {
        let config = configured();
        assert_eq!(config.leg_count_bonus(1).unwrap(), ODDS_SCALE);
        assert_eq!(config.leg_count_bonus(2).unwrap(), 1_150_000);
        assert_eq!(config.leg_count_bonus(MAX_LEGS).unwrap(), 1_500_000);
        assert!(config.leg_count_bonus(0).is_err());
        assert!(config.leg_count_bonus(MAX_LEGS + 1).is_err());
    }

    #[test]
    fn ids_are_sequential() {
        let mut config = configured();
        assert_eq!(config.take_round_id().unwrap(), 0);
        assert_eq!(config.take_round_id().unwrap(), 1);
        assert_eq!(config.take_bet_id().unwrap(), 0);
        assert_eq!(config.next_round_id, 2);
    }
}
