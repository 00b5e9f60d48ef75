//! Quorumsig: a threshold multi-signature authorization engine
//!
//! This crate provides the state machine behind M-of-N collective
//! authorization:
//! - Groups: ordered, duplicate-free owner sets with a threshold and a
//!   version counter bumped on every membership change
//! - Proposals: pending actions accumulating owner approvals, with a TTL
//!   and a storage deposit reclaimed on drop
//! - A deterministic, engine-controlled authority identity that actions are
//!   executed as, without any private key existing for it
//! - Self-amendment: owner-set changes are themselves proposals, and the
//!   version counter stales every in-flight proposal when one executes
//!
//! The host environment supplies time, identity verification, and the
//! actual performance of approved actions; see [`host`] for those seams.
//!
//! # Example
//!
//! ```rust
//! use quorumsig::crypto::random_principal;
//! use quorumsig::engine::Engine;
//! use quorumsig::host::{ManualClock, NullInvoker};
//! use quorumsig::store::PROPOSAL_ALLOTMENT;
//!
//! let a = random_principal();
//! let b = random_principal();
//! let c = random_principal();
//!
//! let mut engine = Engine::new();
//! engine.fund(&a, PROPOSAL_ALLOTMENT);
//!
//! // 2-of-3 group
//! let group = engine
//!     .create_group(vec![a.clone(), b.clone(), c], 2, vec![0; 16])
//!     .unwrap();
//!
//! let clock = ManualClock::starting_at(1);
//! let proposal = engine
//!     .create_proposal(
//!         &group.id,
//!         random_principal(),
//!         b"payload".to_vec(),
//!         random_principal(),
//!         100,
//!         a.clone(),
//!         &clock,
//!     )
//!     .unwrap();
//!
//! // Proposing counts as a's approval; b's signature meets the threshold
//! engine.approve(&proposal.id, &b).unwrap();
//! engine.execute(&proposal.id, &mut NullInvoker).unwrap();
//! assert!(engine.proposal(&proposal.id).unwrap().executed);
//! ```

pub mod cli;
pub mod crypto;
pub mod engine;
pub mod host;
pub mod store;

// Re-export commonly used types
pub use crypto::{random_principal, random_salt};
pub use engine::{
    authority_for, derive_authority, Engine, Group, GroupInstruction, MultisigError, Proposal,
};
pub use host::{ActionInvoker, Clock, ManualClock, NullInvoker, SystemClock};
pub use store::{Storage, StorageConfig, StorageLedger, PROPOSAL_ALLOTMENT};
