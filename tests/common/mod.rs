#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use parlay_settlement::constants::MATCHES_PER_ROUND;
use parlay_settlement::errors::WagerError;
use parlay_settlement::ledger::{self, CancelledBet, ClaimOutcome, SweptRound};
use parlay_settlement::state::{
    Bet, BetStatus, Config, LegInput, LiquidityPosition, ProtocolParams, ReserveVault, Round,
};

pub fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(anchor_err) => anchor_err.error_code_number,
        other => panic!("unexpected error variant: {other:?}"),
    }
}

pub fn code(err: WagerError) -> u32 {
    u32::from(err)
}

pub fn legs(picks: &[(u8, u8)]) -> Vec<LegInput> {
    picks
        .iter()
        .map(|&(match_index, outcome)| LegInput {
            match_index,
            outcome,
        })
        .collect()
}

/// Token balances keyed by owner. Only `mint` creates value.
#[derive(Default)]
pub struct TokenLedger {
    balances: HashMap<Pubkey, u64>,
    minted: u64,
}

impl TokenLedger {
    pub fn mint(&mut self, to: Pubkey, amount: u64) {
        *self.balances.entry(to).or_default() += amount;
        self.minted += amount;
    }

    pub fn transfer(&mut self, from: Pubkey, to: Pubkey, amount: u64) {
        if amount == 0 {
            return;
        }
        let source = self.balances.entry(from).or_default();
        assert!(*source >= amount, "token transfer exceeds balance");
        *source -= amount;
        *self.balances.entry(to).or_default() += amount;
    }

    pub fn balance(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.balances.values().sum()
    }

    pub fn minted(&self) -> u64 {
        self.minted
    }
}

/// Drives the engine the way the instruction handlers do: accounting first,
/// token movement second.
pub struct Harness {
    pub config: Config,
    pub reserve: ReserveVault,
    pub rounds: Vec<Round>,
    pub bets: Vec<Bet>,
    pub positions: HashMap<Pubkey, LiquidityPosition>,
    pub tokens: TokenLedger,
    pub vault: Pubkey,
    pub now: i64,
}

impl Harness {
    pub fn new(params: ProtocolParams) -> Self {
        let mut config = Config::default();
        config.apply_params(&params).unwrap();
        config.season_pool = Pubkey::new_unique();
        config.treasury = Pubkey::new_unique();
        config.oracle = Pubkey::new_unique();
        Self {
            config,
            reserve: ReserveVault::default(),
            rounds: Vec::new(),
            bets: Vec::new(),
            positions: HashMap::new(),
            tokens: TokenLedger::default(),
            vault: Pubkey::new_unique(),
            now: 1_700_000_000,
        }
    }

    pub fn permissive() -> ProtocolParams {
        ProtocolParams {
            min_stake: 1,
            min_bounty_payout: 1,
            max_round_exposure_bps: 10_000,
            ..Default::default()
        }
    }

    pub fn user(&mut self, funds: u64) -> Pubkey {
        let key = Pubkey::new_unique();
        self.tokens.mint(key, funds);
        key
    }

    pub fn add_liquidity(&mut self, provider: Pubkey, amount: u64) -> Result<u64> {
        let shares = self.reserve.deposit_liquidity(amount)?;
        let position = self.positions.entry(provider).or_default();
        position.provider = provider;
        position.record_deposit(amount, shares)?;
        self.tokens.transfer(provider, self.vault, amount);
        Ok(shares)
    }

    pub fn remove_liquidity(&mut self, provider: Pubkey, shares: u64) -> Result<u64> {
        let held = self.positions.get(&provider).map_or(0, |p| p.shares);
        require!(held >= shares, WagerError::InsufficientShares);
        let amount = self.reserve.withdraw_liquidity(shares)?;
        if let Some(position) = self.positions.get_mut(&provider) {
            position.record_withdrawal(shares, amount)?;
        }
        self.tokens.transfer(self.vault, provider, amount);
        Ok(amount)
    }

    /// Creates and seeds a round at the current time.
    pub fn open_round(&mut self) -> Result<usize> {
        let id = self.config.take_round_id()?;
        let mut round = Round::default();
        round.open(id, self.now, 255);
        let mut entropy = [0u8; 32];
        entropy[..8].copy_from_slice(&id.to_le_bytes());
        round.seed(&self.config, &entropy, self.now)?;
        self.rounds.push(round);
        Ok(self.rounds.len() - 1)
    }

    pub fn place(
        &mut self,
        round: usize,
        owner: Pubkey,
        picks: &[(u8, u8)],
        stake: u64,
    ) -> Result<usize> {
        let mut bet = Bet::default();
        ledger::place_bet(
            &self.config,
            &mut self.reserve,
            &mut self.rounds[round],
            &mut bet,
            owner,
            &legs(picks),
            stake,
            self.now,
        )?;
        bet.id = self.config.take_bet_id()?;
        self.tokens.transfer(owner, self.vault, stake);
        self.bets.push(bet);
        Ok(self.bets.len() - 1)
    }

    pub fn cancel(&mut self, bet: usize, caller: Pubkey) -> Result<CancelledBet> {
        let round = self.round_of(bet);
        let cancelled = ledger::cancel_bet(
            &self.config,
            &mut self.reserve,
            &mut self.rounds[round],
            &mut self.bets[bet],
            caller,
            self.now,
        )?;
        self.tokens.transfer(self.vault, caller, cancelled.refund);
        Ok(cancelled)
    }

    pub fn settle(&mut self, round: usize, results: [u8; MATCHES_PER_ROUND]) -> Result<()> {
        ledger::settle_round(
            &self.config,
            &mut self.reserve,
            &mut self.rounds[round],
            &results,
            self.now,
        )
    }

    pub fn claim(&mut self, bet: usize, claimer: Pubkey, min_payout: u64) -> Result<ClaimOutcome> {
        let round = self.round_of(bet);
        let outcome = ledger::claim_bet(
            &self.config,
            &mut self.reserve,
            &mut self.rounds[round],
            &mut self.bets[bet],
            claimer,
            min_payout,
            self.now,
        )?;
        if let ClaimOutcome::Paid {
            to_owner,
            to_claimer,
            ..
        } = outcome
        {
            let owner = self.bets[bet].owner;
            self.tokens.transfer(self.vault, owner, to_owner);
            self.tokens.transfer(self.vault, claimer, to_claimer);
        }
        Ok(outcome)
    }

    /// Claims `bets` in one call. All of them are taken to belong to the
    /// round of the first; a stray one makes the whole call fail.
    pub fn claim_batch(
        &mut self,
        bets: &[usize],
        claimer: Pubkey,
        min_payout: u64,
    ) -> Result<Vec<ClaimOutcome>> {
        let round = bets.first().map_or(0, |&bet| self.round_of(bet));
        let mut staged: Vec<Bet> = bets.iter().map(|&bet| self.bets[bet].clone()).collect();
        let outcomes = ledger::claim_batch(
            &self.config,
            &mut self.reserve,
            &mut self.rounds[round],
            &mut staged,
            claimer,
            min_payout,
            self.now,
        )?;

        let mut bounty_total = 0;
        for ((&bet, claimed), outcome) in bets.iter().zip(staged).zip(outcomes.iter()) {
            self.bets[bet] = claimed;
            if let ClaimOutcome::Paid {
                to_owner,
                to_claimer,
                ..
            } = *outcome
            {
                let owner = self.bets[bet].owner;
                self.tokens.transfer(self.vault, owner, to_owner);
                bounty_total += to_claimer;
            }
        }
        self.tokens.transfer(self.vault, claimer, bounty_total);
        Ok(outcomes)
    }

    pub fn sweep(&mut self, round: usize) -> Result<SweptRound> {
        let swept = ledger::sweep_round(
            &self.config,
            &mut self.reserve,
            &mut self.rounds[round],
            self.now,
        )?;
        self.tokens
            .transfer(self.vault, self.config.season_pool, swept.season_share);
        self.tokens
            .transfer(self.vault, self.config.treasury, swept.protocol_cut);
        Ok(swept)
    }

    pub fn round_of(&self, bet: usize) -> usize {
        let round_id = self.bets[bet].round_id;
        self.rounds
            .iter()
            .position(|r| r.id == round_id)
            .expect("bet references a known round")
    }

    /// Every accounting invariant that must hold between operations.
    pub fn assert_invariants(&self) {
        assert_eq!(
            self.tokens.balance(&self.vault),
            self.reserve.available + self.reserve.locked,
            "vault balance must equal available + locked"
        );
        let unswept: u64 = self
            .rounds
            .iter()
            .filter(|r| !r.pool.swept)
            .map(|r| r.pool.remaining())
            .sum();
        assert_eq!(self.reserve.locked, unswept, "locked must equal open round pools");
        let settled: u64 = self
            .rounds
            .iter()
            .filter(|r| r.settled && !r.pool.swept)
            .map(|r| r.pool.remaining())
            .sum();
        assert_eq!(
            self.reserve.settled_liability, settled,
            "settled liability must equal settled round pools"
        );
        assert_eq!(self.tokens.total(), self.tokens.minted(), "no value created or destroyed");

        for round in &self.rounds {
            assert!(round.pool.total_claimed <= round.pool.total_locked);
            for m in round.matches.iter() {
                assert_eq!(m.pools.iter().sum::<u64>(), m.total_pool);
            }
            if round.settled {
                let owed: u64 = self
                    .bets
                    .iter()
                    .filter(|b| b.round_id == round.id)
                    .filter(|b| b.status != BetStatus::Cancelled)
                    .filter(|b| b.evaluate(round) == Some(true))
                    .map(|b| b.payout().unwrap())
                    .sum();
                assert!(owed <= round.pool.total_locked, "liability must cover every winner");
            }
        }
    }
}
