//! Group (owner set) records
//!
//! A group is the unit of governance: an ordered, duplicate-free list of
//! owner principals, an approval threshold, and a version counter that is
//! bumped on every owner-set mutation. In-flight proposals snapshot the
//! version at creation, so a mutation automatically invalidates approvals
//! collected under the old owner set.

use crate::crypto::{encode_id, VERSION_RECORD};
use crate::engine::error::MultisigError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A threshold multisig group
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    /// Stable record identifier, derived from the founding configuration
    pub id: String,
    /// Current owner principals, ordered, no duplicates
    pub owners: Vec<String>,
    /// Minimum approvals required (M in M-of-N)
    pub threshold: u8,
    /// Owner-set generation counter, starts at 0
    pub version: u64,
    /// Opaque salt fixing the authority derivation for this group's lifetime
    pub salt: Vec<u8>,
    /// Creation timestamp (audit only, not consulted by any invariant)
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group at owner-set version 0
    pub fn new(owners: Vec<String>, threshold: u8, salt: Vec<u8>) -> Result<Self, MultisigError> {
        validate_owner_set(&owners, threshold)?;

        let id = derive_group_id(&owners, threshold, &salt);

        Ok(Self {
            id,
            owners,
            threshold,
            version: 0,
            salt,
            created_at: Utc::now(),
        })
    }

    /// Check whether a principal is a current owner
    pub fn is_owner(&self, principal: &str) -> bool {
        self.owners.iter().any(|o| o == principal)
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.threshold, self.owners.len())
    }

    /// Replace the owner set and threshold, bumping the version counter.
    ///
    /// Only reachable through the executor acting under this group's derived
    /// authority; there is deliberately no public path to this mutation.
    pub(crate) fn set_owners(
        &mut self,
        new_owners: Vec<String>,
        new_threshold: u8,
    ) -> Result<(), MultisigError> {
        validate_owner_set(&new_owners, new_threshold)?;

        self.owners = new_owners;
        self.threshold = new_threshold;
        self.version += 1;

        log::info!(
            "group {} owner set updated to {} (version {})",
            self.id,
            self.description(),
            self.version
        );

        Ok(())
    }
}

/// Validate an owner list and threshold pair
///
/// Duplicates are rejected before any threshold consideration; an empty
/// owner list can never satisfy `threshold <= len`, so it falls out of the
/// bounds check.
fn validate_owner_set(owners: &[String], threshold: u8) -> Result<(), MultisigError> {
    let mut sorted = owners.to_vec();
    sorted.sort();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(MultisigError::DuplicateOwner);
        }
    }

    if threshold == 0 {
        return Err(MultisigError::InvalidThreshold(
            "threshold must be at least 1".to_string(),
        ));
    }

    if threshold as usize > owners.len() {
        return Err(MultisigError::InvalidThreshold(format!(
            "threshold {} exceeds owner count {}",
            threshold,
            owners.len()
        )));
    }

    Ok(())
}

/// Derive the stable group identifier from the founding configuration
///
/// Owners are sorted first so the id does not depend on declaration order.
/// Each owner is length-prefixed so field boundaries stay unambiguous.
fn derive_group_id(owners: &[String], threshold: u8, salt: &[u8]) -> String {
    let mut sorted = owners.to_vec();
    sorted.sort();

    let mut data = vec![threshold];
    for owner in &sorted {
        data.extend_from_slice(&(owner.len() as u32).to_le_bytes());
        data.extend_from_slice(owner.as_bytes());
    }
    data.extend_from_slice(salt);

    encode_id(VERSION_RECORD, &data)
}
