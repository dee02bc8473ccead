//! Staking farm with reward-per-token accounting.
//!
//! # Accrual
//!
//! While tokens are staked the farm emits `reward_rate` reward units per
//! second, split pro rata across stakers:
//!
//! ```text
//! reward_per_token += reward_rate × Δt × SCALE / total_staked
//! earned(user)     += stake × (reward_per_token − paid(user)) / SCALE
//! ```
//!
//! Every stake, unstake and claim first brings the global accumulator and
//! the caller's entry up to `now`. Accrual stops at the farm's end time or
//! when it is deactivated, whichever comes first.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::WalletAddress;
use crate::error::AmmError;

/// Fixed-point scale of the reward-per-token accumulator.
pub const REWARD_SCALE: u128 = 1_000_000_000;

/// One staker's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStake {
    /// Tokens staked.
    pub amount: u64,
    /// Accumulator value at the last settlement, scaled by [`REWARD_SCALE`].
    pub reward_per_token_paid: u128,
    /// Rewards earned and not yet claimed.
    pub rewards_earned: u64,
}

/// A single staking pool emitting rewards at a constant rate.
///
/// Timestamps are unix seconds supplied by the caller.
///
/// # Example
///
/// ```rust
/// use tidepool::domain::WalletAddress;
/// use tidepool::farm::YieldFarm;
///
/// let mut farm = YieldFarm::new(10, 0, 3_600).expect("valid farm");
/// let alice = WalletAddress::new("alice");
/// farm.stake(&alice, 1_000, 0).expect("staked");
/// assert_eq!(farm.pending_rewards(&alice, 100).expect("pending"), 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldFarm {
    reward_rate: u64,
    ends_at: i64,
    total_staked: u64,
    reward_per_token_stored: u128,
    last_update: i64,
    active: bool,
    stakes: HashMap<WalletAddress, UserStake>,
}

impl YieldFarm {
    /// Opens a farm at `start` that emits `reward_rate` per second for
    /// `duration` seconds.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for a non-positive duration.
    /// - [`AmmError::Overflow`] if `start + duration` overflows.
    pub fn new(reward_rate: u64, start: i64, duration: i64) -> Result<Self, AmmError> {
        if duration <= 0 {
            return Err(AmmError::InvalidConfiguration(
                "farm duration must be positive",
            ));
        }
        let ends_at = start
            .checked_add(duration)
            .ok_or(AmmError::Overflow("farm end time overflow"))?;
        Ok(Self {
            reward_rate,
            ends_at,
            total_staked: 0,
            reward_per_token_stored: 0,
            last_update: start,
            active: true,
            stakes: HashMap::new(),
        })
    }

    /// Returns the emission rate in reward units per second.
    #[must_use]
    pub const fn reward_rate(&self) -> u64 {
        self.reward_rate
    }

    /// Returns the time at which emission stops.
    #[must_use]
    pub const fn ends_at(&self) -> i64 {
        self.ends_at
    }

    /// Returns the sum of all stakes.
    #[must_use]
    pub const fn total_staked(&self) -> u64 {
        self.total_staked
    }

    /// Returns the stored accumulator, scaled by [`REWARD_SCALE`].
    #[must_use]
    pub const fn reward_per_token(&self) -> u128 {
        self.reward_per_token_stored
    }

    /// Returns `true` until [`YieldFarm::deactivate`] is called.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `user`'s position, if any.
    #[must_use]
    pub fn stake_of(&self, user: &WalletAddress) -> Option<&UserStake> {
        self.stakes.get(user)
    }

    /// Brings the global accumulator up to `now`.
    ///
    /// A `now` earlier than the last update is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the accumulator overflows.
    pub fn update_reward(&mut self, now: i64) -> Result<(), AmmError> {
        self.reward_per_token_stored = self.reward_per_token_at(now)?;
        self.last_update = self.last_update.max(now.min(self.ends_at));
        Ok(())
    }

    /// Stakes `amount` for `user`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::FarmNotActive`] after deactivation.
    /// - [`AmmError::InvalidInput`] for a zero amount.
    /// - [`AmmError::Overflow`] if a total overflows.
    pub fn stake(&mut self, user: &WalletAddress, amount: u64, now: i64) -> Result<(), AmmError> {
        if !self.active {
            return Err(AmmError::FarmNotActive);
        }
        if amount == 0 {
            return Err(AmmError::InvalidInput("stake amount must be positive"));
        }
        self.update_reward(now)?;
        let mut entry = self.settled_entry(user)?;

        entry.amount = entry
            .amount
            .checked_add(amount)
            .ok_or(AmmError::Overflow("user stake overflow"))?;
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or(AmmError::Overflow("total stake overflow"))?;

        self.store_entry(user, entry);
        self.total_staked = total;
        debug!(user = %user, amount, total_staked = total, "staked");
        Ok(())
    }

    /// Withdraws `amount` of `user`'s stake. Allowed after deactivation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] for a zero amount.
    /// - [`AmmError::InsufficientStake`] if `amount` exceeds the stake.
    pub fn unstake(&mut self, user: &WalletAddress, amount: u64, now: i64) -> Result<(), AmmError> {
        if amount == 0 {
            return Err(AmmError::InvalidInput("unstake amount must be positive"));
        }
        let staked = self.stakes.get(user).map_or(0, |s| s.amount);
        if staked < amount {
            return Err(AmmError::InsufficientStake);
        }
        self.update_reward(now)?;
        let mut entry = self.settled_entry(user)?;

        entry.amount -= amount;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientStake)?;
        self.store_entry(user, entry);
        debug!(user = %user, amount, total_staked = self.total_staked, "unstaked");
        Ok(())
    }

    /// Pays out everything `user` has earned up to `now`. Allowed after
    /// deactivation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NoRewards`] if nothing has been earned.
    /// - [`AmmError::Overflow`] on accumulator overflow.
    pub fn claim_rewards(&mut self, user: &WalletAddress, now: i64) -> Result<u64, AmmError> {
        self.update_reward(now)?;
        let mut entry = self.settled_entry(user)?;
        let rewards = entry.rewards_earned;
        if rewards == 0 {
            return Err(AmmError::NoRewards);
        }
        entry.rewards_earned = 0;
        self.store_entry(user, entry);
        debug!(user = %user, rewards, "rewards claimed");
        Ok(rewards)
    }

    /// Returns what `user` could claim at `now` without mutating the farm.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on accumulator overflow.
    pub fn pending_rewards(&self, user: &WalletAddress, now: i64) -> Result<u64, AmmError> {
        let rpt = self.reward_per_token_at(now)?;
        match self.stakes.get(user) {
            Some(stake) => earned(stake, rpt),
            None => Ok(0),
        }
    }

    /// Stops emission at `now`. Staking is refused afterwards; unstaking
    /// and claiming keep working.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on accumulator overflow.
    pub fn deactivate(&mut self, now: i64) -> Result<(), AmmError> {
        self.update_reward(now)?;
        self.ends_at = self.ends_at.min(self.last_update);
        self.active = false;
        debug!(ends_at = self.ends_at, "farm deactivated");
        Ok(())
    }

    fn reward_per_token_at(&self, now: i64) -> Result<u128, AmmError> {
        if self.total_staked == 0 {
            return Ok(self.reward_per_token_stored);
        }
        let elapsed = now.min(self.ends_at).saturating_sub(self.last_update).max(0);
        let elapsed = u128::try_from(elapsed).map_err(|_| AmmError::Overflow("elapsed time"))?;
        let increase = u128::from(self.reward_rate)
            .checked_mul(elapsed)
            .and_then(|v| v.checked_mul(REWARD_SCALE))
            .ok_or(AmmError::Overflow("reward accrual overflow"))?
            / u128::from(self.total_staked);
        self.reward_per_token_stored
            .checked_add(increase)
            .ok_or(AmmError::Overflow("reward per token overflow"))
    }

    // Caller must have run `update_reward` first.
    fn settled_entry(&self, user: &WalletAddress) -> Result<UserStake, AmmError> {
        let mut entry = self.stakes.get(user).copied().unwrap_or_default();
        entry.rewards_earned = earned(&entry, self.reward_per_token_stored)?;
        entry.reward_per_token_paid = self.reward_per_token_stored;
        Ok(entry)
    }

    // Drops positions with nothing staked and nothing owed.
    fn store_entry(&mut self, user: &WalletAddress, entry: UserStake) {
        if entry.amount == 0 && entry.rewards_earned == 0 {
            self.stakes.remove(user);
        } else {
            self.stakes.insert(user.clone(), entry);
        }
    }
}

fn earned(stake: &UserStake, reward_per_token: u128) -> Result<u64, AmmError> {
    let delta = reward_per_token.saturating_sub(stake.reward_per_token_paid);
    let accrued = u128::from(stake.amount)
        .checked_mul(delta)
        .ok_or(AmmError::Overflow("user reward overflow"))?
        / REWARD_SCALE;
    let total = u128::from(stake.rewards_earned)
        .checked_add(accrued)
        .ok_or(AmmError::Overflow("user reward overflow"))?;
    u64::try_from(total).map_err(|_| AmmError::Overflow("user reward exceeds u64"))
}
