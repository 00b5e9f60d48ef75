//! Error types for multisig engine operations
//!
//! Every operation validates all of its preconditions before touching any
//! state, so surfacing one of these errors always means nothing changed.

use thiserror::Error;

/// Errors related to multisig engine operations
#[derive(Error, Debug)]
pub enum MultisigError {
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("Owners must be unique")]
    DuplicateOwner,
    #[error("TTL must be at least one slot")]
    InvalidTtl,
    #[error("Not an owner of this group: {0}")]
    NotAnOwner(String),
    #[error("Proposal has already been executed")]
    AlreadyExecuted,
    #[error("Stale proposal: created under owner set version {proposal}, group is at {current}")]
    StaleProposal { proposal: u64, current: u64 },
    #[error("Threshold not met: have {have} approvals from current owners, need {need}")]
    ThresholdNotMet { have: usize, need: u8 },
    #[error("Proposal not expired: now {now}, expires at slot {expires_at}")]
    NotExpired { now: u64, expires_at: u64 },
    #[error("Invocation attempted under an authority the target does not own")]
    AuthorityMismatch,
    #[error("Successor does not match the one designated at proposal creation")]
    SuccessorMismatch,
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Proposal not found: {0}")]
    ProposalNotFound(String),
    #[error("Invalid group instruction payload: {0}")]
    InvalidInstruction(#[from] serde_json::Error),
    #[error("Insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: u64, have: u64 },
    #[error("Wrapped action failed: {0}")]
    InvocationFailed(String),
}
