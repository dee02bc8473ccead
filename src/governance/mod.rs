//! Governance: token-weighted proposals, voting, queueing and delegation.

mod dao;

pub use dao::{
    Delegation, Governance, Proposal, ProposalStatus, ProposalType, VoteRecord, VoteType,
};
