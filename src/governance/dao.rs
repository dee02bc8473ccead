//! Token-weighted proposal voting.
//!
//! # Lifecycle
//!
//! ```text
//! create_proposal ──► Active ──(voting_ends_at passes, quorum met,
//!                                for > against)──► Queued
//! ```
//!
//! A proposal is open for votes while `now <= voting_ends_at`. Once that
//! has passed it can be queued, which stamps an execution ETA of
//! `now + execution_delay`. Token balances are supplied by the caller;
//! the module only checks them against thresholds.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::WalletAddress;
use crate::error::AmmError;

/// What a proposal would change if executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalType {
    /// Adjust a protocol parameter.
    ParameterChange,
    /// Spend from the treasury.
    TreasurySpend,
    /// Upgrade a contract.
    UpgradeContract,
    /// Open a new yield farm.
    AddFarm,
}

/// Where a proposal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    /// Accepting votes.
    Active,
    /// Passed and waiting for its execution ETA.
    Queued,
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteType {
    /// Supports the proposal.
    For,
    /// Opposes the proposal.
    Against,
}

/// A recorded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRecord {
    /// Direction of the vote.
    pub vote: VoteType,
    /// Weight counted for the vote.
    pub voting_power: u64,
}

/// A delegation of voting power to another address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    /// Address receiving the voting power.
    pub delegate: WalletAddress,
    /// Amount delegated.
    pub amount: u64,
    /// When the delegation was made, in unix seconds.
    pub created_at: i64,
}

/// A governance proposal and its running tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    id: u64,
    proposer: WalletAddress,
    title: String,
    description: String,
    proposal_type: ProposalType,
    votes_for: u64,
    votes_against: u64,
    status: ProposalStatus,
    created_at: i64,
    voting_ends_at: i64,
    execution_eta: Option<i64>,
}

impl Proposal {
    /// Returns the sequential proposal id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the address that opened the proposal.
    #[must_use]
    pub const fn proposer(&self) -> &WalletAddress {
        &self.proposer
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the proposal type.
    #[must_use]
    pub const fn proposal_type(&self) -> ProposalType {
        self.proposal_type
    }

    /// Returns the voting power cast in favour.
    #[must_use]
    pub const fn votes_for(&self) -> u64 {
        self.votes_for
    }

    /// Returns the voting power cast against.
    #[must_use]
    pub const fn votes_against(&self) -> u64 {
        self.votes_against
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProposalStatus {
        self.status
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Returns the last second at which votes are accepted.
    #[must_use]
    pub const fn voting_ends_at(&self) -> i64 {
        self.voting_ends_at
    }

    /// Returns the execution ETA once the proposal is queued.
    #[must_use]
    pub const fn execution_eta(&self) -> Option<i64> {
        self.execution_eta
    }
}

/// Proposal registry with thresholds for proposing and for quorum.
///
/// # Example
///
/// ```rust
/// use tidepool::domain::WalletAddress;
/// use tidepool::governance::{Governance, ProposalType, VoteType};
///
/// let mut dao = Governance::new(100, 50, 1_000, 500).expect("valid governance");
/// let alice = WalletAddress::new("alice");
/// let id = dao
///     .create_proposal(&alice, 1_000, "Lower fee", "30 bp to 25 bp", ProposalType::ParameterChange, 0)
///     .expect("created");
/// dao.cast_vote(&alice, id, VoteType::For, 600, 1_000, 10).expect("voted");
/// assert_eq!(dao.queue_proposal(id, 101).expect("queued"), 151);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Governance {
    voting_period: i64,
    execution_delay: i64,
    proposal_threshold: u64,
    quorum_threshold: u64,
    proposals: Vec<Proposal>,
    votes: HashMap<(u64, WalletAddress), VoteRecord>,
    delegations: HashMap<WalletAddress, Delegation>,
}

impl Governance {
    /// Creates a governance instance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for a non-positive voting
    /// period or a negative execution delay.
    pub fn new(
        voting_period: i64,
        execution_delay: i64,
        proposal_threshold: u64,
        quorum_threshold: u64,
    ) -> Result<Self, AmmError> {
        if voting_period <= 0 {
            return Err(AmmError::InvalidConfiguration(
                "voting period must be positive",
            ));
        }
        if execution_delay < 0 {
            return Err(AmmError::InvalidConfiguration(
                "execution delay must not be negative",
            ));
        }
        Ok(Self {
            voting_period,
            execution_delay,
            proposal_threshold,
            quorum_threshold,
            proposals: Vec::new(),
            votes: HashMap::new(),
            delegations: HashMap::new(),
        })
    }

    /// Returns the voting window length in seconds.
    #[must_use]
    pub const fn voting_period(&self) -> i64 {
        self.voting_period
    }

    /// Returns the delay between queueing and the execution ETA.
    #[must_use]
    pub const fn execution_delay(&self) -> i64 {
        self.execution_delay
    }

    /// Returns the token balance needed to open a proposal.
    #[must_use]
    pub const fn proposal_threshold(&self) -> u64 {
        self.proposal_threshold
    }

    /// Returns the total voting power a proposal needs to be queued.
    #[must_use]
    pub const fn quorum_threshold(&self) -> u64 {
        self.quorum_threshold
    }

    /// Returns the number of proposals created so far.
    #[must_use]
    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Looks up a proposal.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ProposalNotFound`] for an unknown id.
    pub fn proposal(&self, id: u64) -> Result<&Proposal, AmmError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.proposals.get(idx))
            .ok_or(AmmError::ProposalNotFound(id))
    }

    /// Returns `voter`'s vote on proposal `id`, if any.
    #[must_use]
    pub fn vote_of(&self, id: u64, voter: &WalletAddress) -> Option<&VoteRecord> {
        self.votes.get(&(id, voter.clone()))
    }

    /// Returns `delegator`'s current delegation, if any.
    #[must_use]
    pub fn delegation_of(&self, delegator: &WalletAddress) -> Option<&Delegation> {
        self.delegations.get(delegator)
    }

    /// Returns the total voting power delegated to `delegate`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum overflows.
    pub fn delegated_to(&self, delegate: &WalletAddress) -> Result<u64, AmmError> {
        self.delegations
            .values()
            .filter(|d| &d.delegate == delegate)
            .try_fold(0u64, |acc, d| {
                acc.checked_add(d.amount)
                    .ok_or(AmmError::Overflow("delegated power overflow"))
            })
    }

    /// Opens a proposal at `now` and returns its id.
    ///
    /// `token_balance` is the proposer's governance token balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientTokensForProposal`] below the proposal threshold.
    /// - [`AmmError::Overflow`] if the voting deadline overflows.
    pub fn create_proposal(
        &mut self,
        proposer: &WalletAddress,
        token_balance: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        proposal_type: ProposalType,
        now: i64,
    ) -> Result<u64, AmmError> {
        if token_balance < self.proposal_threshold {
            return Err(AmmError::InsufficientTokensForProposal);
        }
        let voting_ends_at = now
            .checked_add(self.voting_period)
            .ok_or(AmmError::Overflow("voting deadline overflow"))?;
        let id = self.proposal_count();
        self.proposals.push(Proposal {
            id,
            proposer: proposer.clone(),
            title: title.into(),
            description: description.into(),
            proposal_type,
            votes_for: 0,
            votes_against: 0,
            status: ProposalStatus::Active,
            created_at: now,
            voting_ends_at,
            execution_eta: None,
        });
        debug!(id, proposer = %proposer, ?proposal_type, voting_ends_at, "proposal created");
        Ok(id)
    }

    /// Records `voter`'s vote on proposal `id` with `voting_power`.
    ///
    /// `token_balance` is the voter's governance token balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ProposalNotFound`] for an unknown id.
    /// - [`AmmError::ProposalNotActive`] once the proposal has been queued.
    /// - [`AmmError::VotingPeriodEnded`] after `voting_ends_at`.
    /// - [`AmmError::InsufficientVotingPower`] if `voting_power` exceeds the balance.
    /// - [`AmmError::AlreadyVoted`] on a second vote by the same address.
    /// - [`AmmError::Overflow`] if a tally overflows.
    pub fn cast_vote(
        &mut self,
        voter: &WalletAddress,
        id: u64,
        vote: VoteType,
        voting_power: u64,
        token_balance: u64,
        now: i64,
    ) -> Result<(), AmmError> {
        let key = (id, voter.clone());
        let already_voted = self.votes.contains_key(&key);
        let proposal = self.proposal_mut(id)?;
        if proposal.status != ProposalStatus::Active {
            return Err(AmmError::ProposalNotActive);
        }
        if now > proposal.voting_ends_at {
            return Err(AmmError::VotingPeriodEnded);
        }
        if token_balance < voting_power {
            return Err(AmmError::InsufficientVotingPower);
        }
        if already_voted {
            return Err(AmmError::AlreadyVoted);
        }

        let tally = match vote {
            VoteType::For => &mut proposal.votes_for,
            VoteType::Against => &mut proposal.votes_against,
        };
        *tally = tally
            .checked_add(voting_power)
            .ok_or(AmmError::Overflow("vote tally overflow"))?;
        self.votes.insert(key, VoteRecord { vote, voting_power });
        debug!(id, voter = %voter, ?vote, voting_power, "vote cast");
        Ok(())
    }

    /// Queues a passed proposal and returns its execution ETA.
    ///
    /// A proposal passes when the total voting power reaches the quorum
    /// and strictly more of it was cast for than against.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ProposalNotFound`] for an unknown id.
    /// - [`AmmError::ProposalNotActive`] if already queued.
    /// - [`AmmError::VotingPeriodNotEnded`] while `now <= voting_ends_at`.
    /// - [`AmmError::QuorumNotMet`] below the quorum threshold.
    /// - [`AmmError::ProposalFailed`] unless votes for exceed votes against.
    /// - [`AmmError::Overflow`] if a sum overflows.
    pub fn queue_proposal(&mut self, id: u64, now: i64) -> Result<i64, AmmError> {
        let quorum = self.quorum_threshold;
        let delay = self.execution_delay;
        let proposal = self.proposal_mut(id)?;
        if proposal.status != ProposalStatus::Active {
            return Err(AmmError::ProposalNotActive);
        }
        if now <= proposal.voting_ends_at {
            return Err(AmmError::VotingPeriodNotEnded);
        }
        let total = proposal
            .votes_for
            .checked_add(proposal.votes_against)
            .ok_or(AmmError::Overflow("total votes overflow"))?;
        if total < quorum {
            return Err(AmmError::QuorumNotMet);
        }
        if proposal.votes_for <= proposal.votes_against {
            return Err(AmmError::ProposalFailed);
        }
        let eta = now
            .checked_add(delay)
            .ok_or(AmmError::Overflow("execution eta overflow"))?;
        proposal.status = ProposalStatus::Queued;
        proposal.execution_eta = Some(eta);
        debug!(id, total_votes = total, eta, "proposal queued");
        Ok(eta)
    }

    /// Delegates `amount` of `delegator`'s voting power to `delegate`,
    /// replacing any earlier delegation by the same address.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] when delegating to oneself.
    /// - [`AmmError::InsufficientTokensForDelegation`] if `amount` exceeds the balance.
    pub fn delegate_voting_power(
        &mut self,
        delegator: &WalletAddress,
        delegate: &WalletAddress,
        amount: u64,
        token_balance: u64,
        now: i64,
    ) -> Result<(), AmmError> {
        if delegator == delegate {
            return Err(AmmError::InvalidInput("cannot delegate to self"));
        }
        if token_balance < amount {
            return Err(AmmError::InsufficientTokensForDelegation);
        }
        self.delegations.insert(
            delegator.clone(),
            Delegation {
                delegate: delegate.clone(),
                amount,
                created_at: now,
            },
        );
        debug!(delegator = %delegator, delegate = %delegate, amount, "voting power delegated");
        Ok(())
    }

    fn proposal_mut(&mut self, id: u64) -> Result<&mut Proposal, AmmError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.proposals.get_mut(idx))
            .ok_or(AmmError::ProposalNotFound(id))
    }
}
