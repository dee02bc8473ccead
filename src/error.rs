//! Unified error types for the Tidepool library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. The pricing engine itself only ever produces
//! [`AmmError::InvalidInput`]; the remaining variants belong to pool
//! settlement, configuration, the mock wallet, the yield farm and
//! governance.

use thiserror::Error;

use crate::domain::PoolId;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Errors produced by Tidepool operations.
#[derive(Debug, Error)]
pub enum AmmError {
    /// An amount or reserve was zero, negative, NaN or infinite.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A fee rate outside `[0, 1)`.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The pool cannot satisfy the requested output or withdrawal.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The settled output fell below the caller's minimum.
    #[error("slippage exceeded: output {output} is below minimum {minimum}")]
    SlippageExceeded {
        /// Output the trade would have produced.
        output: f64,
        /// Minimum output the caller accepted.
        minimum: f64,
    },

    /// No pool is registered under the given id.
    #[error("pool not found: {0}")]
    PoolNotFound(PoolId),

    /// A pool with the same id is already registered.
    #[error("duplicate pool: {0}")]
    DuplicatePool(PoolId),

    /// A liquidity change was malformed.
    #[error("invalid liquidity: {0}")]
    InvalidLiquidity(&'static str),

    /// Integer accounting overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The wallet must be connected for this operation.
    #[error("wallet not connected")]
    WalletNotConnected,

    /// A transaction signature was not produced by the mock connection.
    #[error("invalid transaction signature: {0}")]
    InvalidSignature(String),

    /// Unstaking more than the user has staked.
    #[error("insufficient stake amount")]
    InsufficientStake,

    /// Claiming with no accrued rewards.
    #[error("no rewards to claim")]
    NoRewards,

    /// The farm no longer accepts stakes.
    #[error("farm is not active")]
    FarmNotActive,

    /// The proposer holds fewer tokens than the proposal threshold.
    #[error("insufficient tokens to create proposal")]
    InsufficientTokensForProposal,

    /// No proposal exists with the given id.
    #[error("proposal not found: {0}")]
    ProposalNotFound(u64),

    /// The proposal no longer accepts votes or has already been queued.
    #[error("proposal is not active")]
    ProposalNotActive,

    /// The vote arrived after the voting deadline.
    #[error("voting period has ended")]
    VotingPeriodEnded,

    /// The requested voting power exceeds the voter's balance.
    #[error("insufficient voting power")]
    InsufficientVotingPower,

    /// The address has already voted on this proposal.
    #[error("user has already voted")]
    AlreadyVoted,

    /// Queueing was attempted before the voting deadline.
    #[error("voting period has not ended")]
    VotingPeriodNotEnded,

    /// Total voting power is below the quorum threshold.
    #[error("quorum not met")]
    QuorumNotMet,

    /// Votes for did not exceed votes against.
    #[error("proposal failed")]
    ProposalFailed,

    /// The delegated amount exceeds the delegator's balance.
    #[error("insufficient tokens for delegation")]
    InsufficientTokensForDelegation,

    /// A TOML configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
