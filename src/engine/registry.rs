//! Engine registry: the keyed store of groups and proposals
//!
//! Holds every group and proposal record by identifier and exposes the
//! operation surface the host invokes: create_group, create_proposal,
//! approve, execute, and drop_proposal. The host serializes operations per
//! record; operations on different proposals of one group may interleave in
//! any order, which is why staleness is carried by the version snapshot on
//! each proposal rather than by anything in this registry.

use crate::engine::authority::authority_for;
use crate::engine::error::MultisigError;
use crate::engine::executor;
use crate::engine::group::Group;
use crate::engine::proposal::Proposal;
use crate::host::{ActionInvoker, Clock};
use crate::store::{StorageLedger, PROPOSAL_ALLOTMENT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Threshold multisig engine: groups, proposals, and the allotment ledger
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Engine {
    /// Groups by record id
    groups: HashMap<String, Group>,
    /// Pending and executed-but-not-yet-dropped proposals by record id
    proposals: HashMap<String, Proposal>,
    /// Storage allotment balances
    ledger: StorageLedger,
}

impl Engine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new group at owner-set version 0
    ///
    /// The id is a pure function of the configuration, so re-creating an
    /// identical group returns the existing record.
    pub fn create_group(
        &mut self,
        owners: Vec<String>,
        threshold: u8,
        salt: Vec<u8>,
    ) -> Result<Group, MultisigError> {
        let group = Group::new(owners, threshold, salt)?;

        if let Some(existing) = self.groups.get(&group.id) {
            return Ok(existing.clone());
        }

        log::info!("created group {} ({})", group.id, group.description());
        self.groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    /// Propose an action on behalf of a group
    ///
    /// The proposer must be a current owner and pays the record's storage
    /// allotment; both checks happen before anything is stored. The new
    /// proposal starts with the proposer's approval already recorded.
    pub fn create_proposal(
        &mut self,
        group_id: &str,
        target: String,
        payload: Vec<u8>,
        successor: String,
        ttl: u64,
        proposer: String,
        clock: &dyn Clock,
    ) -> Result<Proposal, MultisigError> {
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| MultisigError::GroupNotFound(group_id.to_string()))?;

        let proposal = Proposal::new(
            group,
            target,
            payload,
            successor,
            ttl,
            proposer,
            clock.slot(),
            PROPOSAL_ALLOTMENT,
        )?;

        self.ledger.charge(&proposal.proposer, proposal.allotment)?;

        log::info!(
            "created proposal {} for group {} (expires at slot {})",
            proposal.id,
            group_id,
            proposal.expires_at
        );
        self.proposals.insert(proposal.id.clone(), proposal.clone());
        Ok(proposal)
    }

    /// Record an owner's approval on a proposal
    ///
    /// Idempotent per owner; returns whether the approval was new.
    pub fn approve(&mut self, proposal_id: &str, owner: &str) -> Result<bool, MultisigError> {
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or_else(|| MultisigError::ProposalNotFound(proposal_id.to_string()))?;
        let group = self
            .groups
            .get(&proposal.group)
            .ok_or_else(|| MultisigError::GroupNotFound(proposal.group.clone()))?;

        proposal.add_approval(owner, group)
    }

    /// Execute a proposal whose threshold is met
    ///
    /// Single-shot: on success the proposal is latched executed and every
    /// later attempt fails with `AlreadyExecuted`. A failure anywhere leaves
    /// the proposal, the group, and the ledger unchanged — approvals in
    /// particular survive a `ThresholdNotMet` rejection.
    pub fn execute(
        &mut self,
        proposal_id: &str,
        invoker: &mut dyn ActionInvoker,
    ) -> Result<(), MultisigError> {
        let proposal = self
            .proposals
            .get(proposal_id)
            .ok_or_else(|| MultisigError::ProposalNotFound(proposal_id.to_string()))?;
        let group = self
            .groups
            .get_mut(&proposal.group)
            .ok_or_else(|| MultisigError::GroupNotFound(proposal.group.clone()))?;

        executor::run(group, proposal, invoker)?;

        if let Some(proposal) = self.proposals.get_mut(proposal_id) {
            proposal.executed = true;
        }
        Ok(())
    }

    /// Reclaim a proposal's storage, paying its allotment to the successor
    ///
    /// Public: anyone may drop a proposal that has executed or expired. The
    /// successor argument must match the one designated at creation. This is
    /// the only way a proposal record is ever deleted.
    pub fn drop_proposal(
        &mut self,
        proposal_id: &str,
        successor: &str,
        clock: &dyn Clock,
    ) -> Result<u64, MultisigError> {
        let proposal = self
            .proposals
            .get(proposal_id)
            .ok_or_else(|| MultisigError::ProposalNotFound(proposal_id.to_string()))?;

        if proposal.successor != successor {
            return Err(MultisigError::SuccessorMismatch);
        }

        let now = clock.slot();
        if !proposal.executed && !proposal.is_expired(now) {
            return Err(MultisigError::NotExpired {
                now,
                expires_at: proposal.expires_at,
            });
        }

        let allotment = proposal.allotment;
        self.proposals.remove(proposal_id);
        self.ledger.credit(successor, allotment);

        log::info!(
            "dropped proposal {}, released {} to {}",
            proposal_id,
            allotment,
            successor
        );
        Ok(allotment)
    }

    /// Get a group by id
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id)
    }

    /// Get a proposal by id
    pub fn proposal(&self, proposal_id: &str) -> Option<&Proposal> {
        self.proposals.get(proposal_id)
    }

    /// Authority identifier a group's actions are performed as
    pub fn authority_of(&self, group_id: &str) -> Result<String, MultisigError> {
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| MultisigError::GroupNotFound(group_id.to_string()))?;
        Ok(authority_for(group))
    }

    /// List all groups
    pub fn list_groups(&self) -> Vec<&Group> {
        self.groups.values().collect()
    }

    /// List proposals belonging to a group
    pub fn proposals_for_group(&self, group_id: &str) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| p.group == group_id)
            .collect()
    }

    /// Get group count
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Get proposal count
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// The allotment ledger
    pub fn ledger(&self) -> &StorageLedger {
        &self.ledger
    }

    /// Credit a principal's storage balance (host faucet)
    pub fn fund(&mut self, principal: &str, amount: u64) {
        self.ledger.credit(principal, amount);
    }
}
