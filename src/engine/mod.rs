//! Threshold multisig authorization core
//!
//! Groups hold an owner set, a threshold, and a version counter; proposals
//! wrap one pending action each and carry the owner approvals collected so
//! far. Execution happens under a deterministic authority derived from the
//! group, and owner-set changes travel through the same proposal mechanism
//! they govern.
//!
//! # Example
//!
//! ```ignore
//! use quorumsig::engine::Engine;
//! use quorumsig::host::{ManualClock, NullInvoker};
//!
//! // Create a 2-of-3 group
//! let group = engine.create_group(vec![a, b, c], 2, salt)?;
//!
//! // Propose an action, collect approvals, execute
//! let proposal = engine.create_proposal(&group.id, target, payload, successor, ttl, a, &clock)?;
//! engine.approve(&proposal.id, &b)?;
//! engine.execute(&proposal.id, &mut NullInvoker)?;
//! ```

pub mod authority;
pub mod error;
pub mod executor;
pub mod group;
pub mod proposal;
pub mod registry;

pub use authority::{authority_for, derive_authority, is_authority_id};
pub use error::MultisigError;
pub use executor::GroupInstruction;
pub use group::Group;
pub use proposal::Proposal;
pub use registry::Engine;
