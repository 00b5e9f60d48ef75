//! Proposal records and approval tracking
//!
//! A proposal wraps one pending action: an opaque target/payload pair, the
//! owner approvals collected so far, and the owner-set version it was created
//! under. Approvals are a set keyed by owner identifier, so they can be
//! re-checked against the *current* owner list at execution time; approvals
//! from owners removed since creation simply stop counting.

use crate::crypto::{encode_id, VERSION_RECORD};
use crate::engine::error::MultisigError;
use crate::engine::group::Group;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A pending action awaiting threshold approval
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique record identifier
    pub id: String,
    /// Owning group record id (immutable)
    pub group: String,
    /// Destination principal the action is addressed to (immutable)
    pub target: String,
    /// Opaque action arguments (immutable)
    pub payload: Vec<u8>,
    /// Owner who created the proposal
    pub proposer: String,
    /// Principal designated to receive the reclaimed storage allotment
    pub successor: String,
    /// Owner identifiers who have approved
    pub approvals: BTreeSet<String>,
    /// Group.version snapshot taken at creation
    pub group_version: u64,
    /// Logical slot at creation
    pub created_slot: u64,
    /// Absolute expiry slot (created_slot + ttl)
    pub expires_at: u64,
    /// Set true exactly once, on successful execution
    pub executed: bool,
    /// Storage deposit charged at creation, refunded on drop
    pub allotment: u64,
    /// Wall-clock creation timestamp (audit only)
    pub created_at: DateTime<Utc>,
}

impl Proposal {
    /// Create a new proposal against the current state of its group
    ///
    /// The proposer's own approval is recorded immediately, so a 2-of-N
    /// proposal needs only one further signature.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        group: &Group,
        target: String,
        payload: Vec<u8>,
        successor: String,
        ttl: u64,
        proposer: String,
        now: u64,
        allotment: u64,
    ) -> Result<Self, MultisigError> {
        if !group.is_owner(&proposer) {
            return Err(MultisigError::NotAnOwner(proposer));
        }
        if ttl == 0 {
            return Err(MultisigError::InvalidTtl);
        }

        let created_at = Utc::now();
        let id = derive_proposal_id(&group.id, &target, &payload, &proposer, now, &created_at);

        // Creating a proposal counts as the proposer's approval
        let mut approvals = BTreeSet::new();
        approvals.insert(proposer.clone());

        Ok(Self {
            id,
            group: group.id.clone(),
            target,
            payload,
            proposer,
            successor,
            approvals,
            group_version: group.version,
            created_slot: now,
            expires_at: now.saturating_add(ttl),
            executed: false,
            allotment,
            created_at,
        })
    }

    /// Record an approval from a current owner
    ///
    /// Idempotent per owner: a repeated approval is accepted and changes
    /// nothing. Returns whether the approval was newly recorded.
    pub fn add_approval(&mut self, owner: &str, group: &Group) -> Result<bool, MultisigError> {
        if !group.is_owner(owner) {
            return Err(MultisigError::NotAnOwner(owner.to_string()));
        }
        if self.executed {
            return Err(MultisigError::AlreadyExecuted);
        }
        if self.group_version != group.version {
            return Err(MultisigError::StaleProposal {
                proposal: self.group_version,
                current: group.version,
            });
        }

        Ok(self.approvals.insert(owner.to_string()))
    }

    /// Count approvals from principals in the given owner list
    pub fn approvals_among(&self, owners: &[String]) -> usize {
        owners.iter().filter(|o| self.approvals.contains(*o)).count()
    }

    /// Check whether the TTL window has elapsed
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Check whether this proposal targets its own group's owner set
    pub fn is_self_target(&self) -> bool {
        self.target == self.group
    }

    /// Get number of approvals collected (including from since-removed owners)
    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }
}

/// Derive a proposal record id from its creation details
///
/// Variable-length fields are length-prefixed so boundaries between them
/// stay unambiguous; the wall-clock nanos disambiguate identical proposals
/// created in the same slot.
fn derive_proposal_id(
    group_id: &str,
    target: &str,
    payload: &[u8],
    proposer: &str,
    slot: u64,
    created_at: &DateTime<Utc>,
) -> String {
    fn push_field(data: &mut Vec<u8>, field: &[u8]) {
        data.extend_from_slice(&(field.len() as u32).to_le_bytes());
        data.extend_from_slice(field);
    }

    let mut data = Vec::new();
    push_field(&mut data, group_id.as_bytes());
    push_field(&mut data, target.as_bytes());
    push_field(&mut data, payload);
    push_field(&mut data, proposer.as_bytes());
    data.extend_from_slice(&slot.to_le_bytes());
    data.extend_from_slice(
        &created_at
            .timestamp_nanos_opt()
            .unwrap_or(0)
            .to_le_bytes(),
    );
    encode_id(VERSION_RECORD, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random_principal;

    fn sample_group() -> Group {
        let owners = (0..3).map(|_| random_principal()).collect();
        Group::new(owners, 2, vec![1; 16]).unwrap()
    }

    fn sample_proposal(group: &Group) -> Proposal {
        Proposal::new(
            group,
            random_principal(),
            b"payload".to_vec(),
            random_principal(),
            10,
            group.owners[0].clone(),
            100,
            1000,
        )
        .unwrap()
    }

    #[test]
    fn test_proposal_creation() {
        let group = sample_group();
        let proposal = sample_proposal(&group);

        assert_eq!(proposal.group, group.id);
        assert_eq!(proposal.group_version, 0);
        assert_eq!(proposal.created_slot, 100);
        assert_eq!(proposal.expires_at, 110);
        assert!(!proposal.executed);

        // Proposing is signing: the proposer is approved from the start
        assert_eq!(proposal.approval_count(), 1);
        assert!(proposal.approvals.contains(&group.owners[0]));
    }

    #[test]
    fn test_non_owner_cannot_propose() {
        let group = sample_group();
        let result = Proposal::new(
            &group,
            random_principal(),
            vec![],
            random_principal(),
            10,
            random_principal(),
            100,
            1000,
        );
        assert!(matches!(result, Err(MultisigError::NotAnOwner(_))));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let group = sample_group();
        let result = Proposal::new(
            &group,
            random_principal(),
            vec![],
            random_principal(),
            0,
            group.owners[0].clone(),
            100,
            1000,
        );
        assert!(matches!(result, Err(MultisigError::InvalidTtl)));
    }

    #[test]
    fn test_approval_is_idempotent() {
        let group = sample_group();
        let mut proposal = sample_proposal(&group);

        assert!(proposal.add_approval(&group.owners[1], &group).unwrap());
        assert_eq!(proposal.approval_count(), 2);

        // Same owner again: accepted, set unchanged
        assert!(!proposal.add_approval(&group.owners[1], &group).unwrap());
        assert_eq!(proposal.approval_count(), 2);

        // The proposer re-approving is equally a no-op
        assert!(!proposal.add_approval(&group.owners[0], &group).unwrap());
        assert_eq!(proposal.approval_count(), 2);
    }

    #[test]
    fn test_non_owner_approval_rejected() {
        let group = sample_group();
        let mut proposal = sample_proposal(&group);

        let result = proposal.add_approval(&random_principal(), &group);
        assert!(matches!(result, Err(MultisigError::NotAnOwner(_))));
        assert_eq!(proposal.approval_count(), 1);
    }

    #[test]
    fn test_stale_proposal_cannot_be_approved() {
        let mut group = sample_group();
        let mut proposal = sample_proposal(&group);

        let survivor = group.owners[0].clone();
        group
            .set_owners(vec![survivor.clone(), random_principal()], 2)
            .unwrap();

        let result = proposal.add_approval(&survivor, &group);
        assert!(matches!(
            result,
            Err(MultisigError::StaleProposal {
                proposal: 0,
                current: 1
            })
        ));
    }

    #[test]
    fn test_approvals_counted_against_current_owners() {
        let group = sample_group();
        let mut proposal = sample_proposal(&group);

        // owners[0] proposed; one more approval makes two
        proposal.add_approval(&group.owners[1], &group).unwrap();
        assert_eq!(proposal.approvals_among(&group.owners), 2);

        // Drop one approver from the hypothetical current owner list
        let remaining = vec![group.owners[0].clone(), group.owners[2].clone()];
        assert_eq!(proposal.approvals_among(&remaining), 1);
    }

    #[test]
    fn test_proposal_id_respects_field_boundaries() {
        // Same concatenated bytes split differently between target and
        // payload must never collide, even at identical timestamps
        let at = Utc::now();
        let id1 = derive_proposal_id("g", "ab", b"c", "p", 1, &at);
        let id2 = derive_proposal_id("g", "a", b"bc", "p", 1, &at);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_expiry_boundary() {
        let group = sample_group();
        let proposal = sample_proposal(&group);

        assert!(!proposal.is_expired(109));
        assert!(proposal.is_expired(110));
        assert!(proposal.is_expired(200));
    }
}
