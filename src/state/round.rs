use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::WagerError;
use crate::math::utilization_bps;
use crate::odds;
use crate::state::Config;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    /// Outcomes travel as 1, 2 or 3.
    pub fn from_wire(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Outcome::HomeWin),
            2 => Ok(Outcome::AwayWin),
            3 => Ok(Outcome::Draw),
            _ => err!(WagerError::InvalidOutcome),
        }
    }

    pub fn to_wire(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Outcome::HomeWin => 0,
            Outcome::AwayWin => 1,
            Outcome::Draw => 2,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Match {
    pub pools: [u64; OUTCOMES_PER_MATCH],
    pub total_pool: u64,
    pub odds: [u64; OUTCOMES_PER_MATCH],
    pub result: Option<Outcome>,
}

impl Match {
    pub const LEN: usize = U64_LENGTH * OUTCOMES_PER_MATCH // pools
        + U64_LENGTH                                      // total_pool
        + U64_LENGTH * OUTCOMES_PER_MATCH                 // odds
        + OPTION_FLAG_LENGTH + ENUM_TAG_LENGTH; // result

    pub fn odds_locked(&self) -> bool {
        self.odds.iter().any(|o| *o != 0)
    }

    fn add_volume(&mut self, outcome: Outcome, amount: u64) -> Result<()> {
        let pool = self.pools[outcome.index()]
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        let total = self
            .total_pool
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        self.pools[outcome.index()] = pool;
        self.total_pool = total;
        Ok(())
    }

    fn remove_volume(&mut self, outcome: Outcome, amount: u64) -> Result<()> {
        let pool = self.pools[outcome.index()]
            .checked_sub(amount)
            .ok_or(WagerError::MathOverflow)?;
        let total = self
            .total_pool
            .checked_sub(amount)
            .ok_or(WagerError::MathOverflow)?;
        self.pools[outcome.index()] = pool;
        self.total_pool = total;
        Ok(())
    }
}

/// Value physically reserved for one round's payouts.
///
/// `resolved_stake` sums the stakes of wagers resolved against the pool
/// (lost, or paid from it) before the sweep.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundPool {
    pub total_locked: u64,
    pub total_claimed: u64,
    pub resolved_stake: u64,
    pub sweep_deadline: i64,
    pub swept: bool,
}

impl RoundPool {
    pub const LEN: usize = U64_LENGTH * 3 + I64_LENGTH + BOOL_LENGTH;

    pub fn remaining(&self) -> u64 {
        self.total_locked.saturating_sub(self.total_claimed)
    }

    pub fn utilization_bps(&self) -> u64 {
        utilization_bps(self.total_claimed, self.total_locked)
    }

    /// Net gain on resolved wagers: their stakes minus what the pool paid
    /// for them. Unresolved wagers may still win, so they count for nothing.
    pub fn realized_profit(&self) -> u64 {
        self.resolved_stake
            .saturating_sub(self.total_claimed)
            .min(self.remaining())
    }

    pub fn lock(&mut self, amount: u64) -> Result<()> {
        self.total_locked = self
            .total_locked
            .checked_add(amount)
            .ok_or(WagerError::MathOverflow)?;
        Ok(())
    }

    pub fn unlock(&mut self, amount: u64) -> Result<()> {
        require!(self.remaining() >= amount, WagerError::InsufficientRoundPool);
        self.total_locked -= amount;
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        require!(!self.swept, WagerError::AlreadySwept);
        require!(self.remaining() >= amount, WagerError::InsufficientRoundPool);
        self.total_claimed += amount;
        Ok(())
    }
}

/// Analytics counters. Not read by any payout computation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats {
    pub total_volume: u64,
    pub bet_count: u64,
    pub parlay_count: u64,
    pub cancelled_count: u64,
    pub winners_paid: u64,
    pub losers_resolved: u64,
    pub total_paid: u64,
}

impl RoundStats {
    pub const LEN: usize = U64_LENGTH * 7;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Created,
    Seeded,
    BettingOpen,
    BettingClosed,
    Settled,
    Swept,
}

#[account]
#[derive(Default, Debug)]
pub struct Round {
    pub id: u64,
    pub created_at: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub betting_closes_at: i64,
    pub seeded: bool,
    pub settled: bool,
    pub settled_at: i64,
    pub matches: [Match; MATCHES_PER_ROUND],
    pub pool: RoundPool,
    pub stats: RoundStats,
    pub bump: u8,
}

impl Round {
    pub const LEN: usize = DISCRIMINATOR_LENGTH
        + U64_LENGTH     // id
        + I64_LENGTH * 4 // created_at, start_time, end_time, betting_closes_at
        + BOOL_LENGTH    // seeded
        + BOOL_LENGTH    // settled
        + I64_LENGTH     // settled_at
        + Match::LEN * MATCHES_PER_ROUND
        + RoundPool::LEN
        + RoundStats::LEN
        + U8_LENGTH; // bump

    pub fn open(&mut self, id: u64, now: i64, bump: u8) {
        self.id = id;
        self.created_at = now;
        self.bump = bump;
    }

    /// Created -> Seeded. Injects starting pools into every outcome, locks the
    /// odds and fixes the betting window. Touches nothing on failure.
    pub fn seed(&mut self, config: &Config, entropy: &[u8; 32], now: i64) -> Result<()> {
        require!(!self.seeded, WagerError::AlreadySeeded);
        let end_time = now
            .checked_add(config.round_duration)
            .ok_or(WagerError::MathOverflow)?;
        let betting_closes_at = end_time
            .checked_sub(config.betting_cutoff)
            .ok_or(WagerError::MathOverflow)?;

        let mut matches = self.matches;
        for (index, m) in matches.iter_mut().enumerate() {
            let pools = odds::seed_pools(self.id, index as u8, entropy, config.seed_liquidity)?;
            m.pools = pools;
            m.total_pool = pools.iter().sum();
        }
        odds::lock_odds(&mut matches)?;

        self.matches = matches;
        self.start_time = now;
        self.end_time = end_time;
        self.betting_closes_at = betting_closes_at;
        self.seeded = true;
        Ok(())
    }

    pub fn ensure_betting_open(&self, now: i64) -> Result<()> {
        require!(self.seeded, WagerError::RoundNotSeeded);
        require!(!self.settled, WagerError::AlreadySettled);
        require!(now >= self.start_time, WagerError::BettingNotOpen);
        require!(now < self.betting_closes_at, WagerError::BettingClosed);
        Ok(())
    }

    /// BettingClosed -> Settled. Cost is proportional to the match count only;
    /// wagers are resolved lazily when claimed.
    pub fn settle(
        &mut self,
        results: &[u8; MATCHES_PER_ROUND],
        grace_period: i64,
        now: i64,
    ) -> Result<()> {
        require!(self.seeded, WagerError::RoundNotSeeded);
        require!(!self.settled, WagerError::AlreadySettled);
        require!(now >= self.end_time, WagerError::SettlementTooEarly);

        let mut outcomes = [Outcome::HomeWin; MATCHES_PER_ROUND];
        for (slot, value) in outcomes.iter_mut().zip(results) {
            *slot = Outcome::from_wire(*value)?;
        }
        let sweep_deadline = now
            .checked_add(grace_period)
            .ok_or(WagerError::MathOverflow)?;

        for (m, outcome) in self.matches.iter_mut().zip(outcomes) {
            m.result = Some(outcome);
        }
        self.settled = true;
        self.settled_at = now;
        self.pool.sweep_deadline = sweep_deadline;
        Ok(())
    }

    /// Bounty claims and sweeps open at the same moment.
    pub fn claim_deadline(&self) -> i64 {
        self.pool.sweep_deadline
    }

    pub fn phase(&self, now: i64) -> RoundPhase {
        if self.pool.swept {
            RoundPhase::Swept
        } else if self.settled {
            RoundPhase::Settled
        } else if !self.seeded {
            RoundPhase::Created
        } else if now < self.start_time {
            RoundPhase::Seeded
        } else if now < self.betting_closes_at {
            RoundPhase::BettingOpen
        } else {
            RoundPhase::BettingClosed
        }
    }

    pub fn locked_odds(&self, match_index: u8, outcome: Outcome) -> Result<u64> {
        require!(self.seeded, WagerError::RoundNotSeeded);
        let m = self
            .matches
            .get(match_index as usize)
            .ok_or(WagerError::InvalidMatchIndex)?;
        Ok(m.odds[outcome.index()])
    }

    pub fn result(&self, match_index: u8) -> Option<Outcome> {
        self.matches
            .get(match_index as usize)
            .and_then(|m| m.result)
    }

    pub(crate) fn add_leg_volume(
        &mut self,
        match_index: u8,
        outcome: Outcome,
        stake: u64,
    ) -> Result<()> {
        self.matches
            .get_mut(match_index as usize)
            .ok_or(WagerError::InvalidMatchIndex)?
            .add_volume(outcome, stake)
    }

    pub(crate) fn remove_leg_volume(
        &mut self,
        match_index: u8,
        outcome: Outcome,
        stake: u64,
    ) -> Result<()> {
        self.matches
            .get_mut(match_index as usize)
            .ok_or(WagerError::InvalidMatchIndex)?
            .remove_volume(outcome, stake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProtocolParams;

    fn error_code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(anchor_err) => anchor_err.error_code_number,
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.apply_params(&ProtocolParams::default()).unwrap();
        config
    }

    fn seeded_round(now: i64) -> Round {
        let mut round = Round::default();
        round.open(4, now, 255);
        round.seed(&config(), &[3u8; 32], now).unwrap();
        round
    }

    #[test]
    fn outcome_wire_values() {
        assert_eq!(Outcome::from_wire(1).unwrap(), Outcome::HomeWin);
        assert_eq!(Outcome::from_wire(3).unwrap(), Outcome::Draw);
        assert_eq!(Outcome::AwayWin.to_wire(), 2);
        for bad in [0u8, 4, 255] {
            let err = Outcome::from_wire(bad).unwrap_err();
            assert_eq!(error_code(err), u32::from(WagerError::InvalidOutcome));
        }
    }

    #[test]
    fn seeding_fills_every_outcome_and_fixes_window() {
        let round = seeded_round(1_000);
        assert!(round.seeded);
        assert_eq!(round.end_time, 1_000 + DEFAULT_ROUND_DURATION);
        assert_eq!(round.betting_closes_at, round.end_time - DEFAULT_BETTING_CUTOFF);
        for m in round.matches.iter() {
            assert!(m.pools.iter().all(|p| *p > 0));
            assert_eq!(m.pools.iter().sum::<u64>(), m.total_pool);
            assert!(m.odds_locked());
        }
    }

    #[test]
    fn seeding_twice_fails() {
        let mut round = seeded_round(1_000);
        let before = round.matches;
        let err = round.seed(&config(), &[7u8; 32], 2_000).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::AlreadySeeded));
        assert_eq!(round.matches, before);
        assert_eq!(round.start_time, 1_000);
    }

    #[test]
    fn betting_window_distinguishes_early_and_late() {
        let mut round = Round::default();
        let err = round.ensure_betting_open(0).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::RoundNotSeeded));

        round = seeded_round(1_000);
        assert!(round.ensure_betting_open(1_000).is_ok());
        let err = round.ensure_betting_open(999).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::BettingNotOpen));
        let err = round.ensure_betting_open(round.betting_closes_at).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::BettingClosed));
    }

    #[test]
    fn settle_requires_end_time_and_valid_results() {
        let mut round = seeded_round(1_000);
        let results = [1u8, 2, 3, 1, 2, 3, 1, 2, 3, 1];
        let err = round
            .settle(&results, DEFAULT_CLAIM_GRACE_PERIOD, round.end_time - 1)
            .unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::SettlementTooEarly));

        let mut bad = results;
        bad[9] = 4;
        let err = round
            .settle(&bad, DEFAULT_CLAIM_GRACE_PERIOD, round.end_time)
            .unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InvalidOutcome));
        assert!(!round.settled);
        assert!(round.matches.iter().all(|m| m.result.is_none()));

        let now = round.end_time;
        round.settle(&results, DEFAULT_CLAIM_GRACE_PERIOD, now).unwrap();
        assert!(round.settled);
        assert_eq!(round.result(2), Some(Outcome::Draw));
        assert_eq!(round.claim_deadline(), now + DEFAULT_CLAIM_GRACE_PERIOD);

        let err = round.settle(&results, DEFAULT_CLAIM_GRACE_PERIOD, now).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::AlreadySettled));
    }

    #[test]
    fn settle_before_seeding_fails() {
        let mut round = Round::default();
        let err = round.settle(&[1u8; MATCHES_PER_ROUND], 10, 0).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::RoundNotSeeded));
    }

    #[test]
    fn phase_follows_lifecycle() {
        let mut round = Round::default();
        assert_eq!(round.phase(0), RoundPhase::Created);
        round = seeded_round(1_000);
        assert_eq!(round.phase(1_000), RoundPhase::BettingOpen);
        assert_eq!(round.phase(round.betting_closes_at), RoundPhase::BettingClosed);
        let end = round.end_time;
        round.settle(&[2u8; MATCHES_PER_ROUND], 100, end).unwrap();
        assert_eq!(round.phase(end), RoundPhase::Settled);
        round.pool.swept = true;
        assert_eq!(round.phase(end + 100), RoundPhase::Swept);
    }

    #[test]
    fn locked_odds_rejects_bad_index() {
        let round = seeded_round(1_000);
        assert!(round.locked_odds(0, Outcome::Draw).unwrap() >= TARGET_ODDS_MIN);
        let err = round
            .locked_odds(MATCHES_PER_ROUND as u8, Outcome::Draw)
            .unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InvalidMatchIndex));
    }

    #[test]
    fn pool_claims_never_exceed_locked() {
        let mut pool = RoundPool::default();
        pool.lock(1_000).unwrap();
        pool.record_claim(600).unwrap();
        let err = pool.record_claim(401).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InsufficientRoundPool));
        assert_eq!(pool.remaining(), 400);
        assert_eq!(pool.utilization_bps(), 6_000);
        let err = pool.unlock(401).unwrap_err();
        assert_eq!(error_code(err), u32::from(WagerError::InsufficientRoundPool));
    }

    #[test]
    fn realized_profit_ignores_unresolved_wagers() {
        let mut pool = RoundPool::default();
        pool.lock(5_000).unwrap();
        assert_eq!(pool.realized_profit(), 0);

        // a 1_000 loser and a 400 winner paid 1_200
        pool.resolved_stake = 1_400;
        pool.record_claim(1_200).unwrap();
        assert_eq!(pool.realized_profit(), 200);

        // resolved winners cost more than resolved losers brought in
        pool.record_claim(800).unwrap();
        assert_eq!(pool.realized_profit(), 0);
    }
}
