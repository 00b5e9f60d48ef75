//! Proposal execution
//!
//! Validates a proposal against the current group state and dispatches its
//! action under the group's derived authority. Owner-set changes are not a
//! special operation: they are ordinary proposals whose target is the group
//! itself, with the new configuration encoded in the payload. Executing one
//! bumps the group version and thereby stales every other in-flight
//! proposal.
//!
//! Expiry is deliberately not checked here. An expired proposal that still
//! meets the threshold under the current owner set remains executable; the
//! TTL gates only the reclamation path.

use crate::engine::authority::authority_for;
use crate::engine::error::MultisigError;
use crate::engine::group::Group;
use crate::engine::proposal::Proposal;
use crate::host::ActionInvoker;
use serde::{Deserialize, Serialize};

/// Instruction payload understood by self-targeting proposals
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupInstruction {
    /// Replace the owner set and threshold
    SetOwners {
        owners: Vec<String>,
        threshold: u8,
    },
}

impl GroupInstruction {
    /// Encode into a proposal payload
    pub fn encode(&self) -> Result<Vec<u8>, MultisigError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from a proposal payload
    pub fn decode(payload: &[u8]) -> Result<Self, MultisigError> {
        Ok(serde_json::from_slice(payload)?)
    }
}

/// Validate the execute preconditions without side effects
pub fn check_executable(proposal: &Proposal, group: &Group) -> Result<(), MultisigError> {
    if proposal.executed {
        return Err(MultisigError::AlreadyExecuted);
    }
    if proposal.group_version != group.version {
        return Err(MultisigError::StaleProposal {
            proposal: proposal.group_version,
            current: group.version,
        });
    }

    let have = proposal.approvals_among(&group.owners);
    if have < group.threshold as usize {
        return Err(MultisigError::ThresholdNotMet {
            have,
            need: group.threshold,
        });
    }

    Ok(())
}

/// Execute a proposal's action against its group
///
/// All checks precede all effects: if dispatch fails, the group is left
/// untouched and the caller must not mark the proposal executed.
pub fn run(
    group: &mut Group,
    proposal: &Proposal,
    invoker: &mut dyn ActionInvoker,
) -> Result<(), MultisigError> {
    check_executable(proposal, group)?;

    let authority = authority_for(group);

    if proposal.is_self_target() {
        let instruction = GroupInstruction::decode(&proposal.payload)?;
        apply_group_instruction(group, &authority, instruction)?;
    } else {
        invoker
            .invoke(&authority, &proposal.target, &proposal.payload)
            .map_err(MultisigError::InvocationFailed)?;
    }

    log::info!(
        "executed proposal {} for group {} (target {})",
        proposal.id,
        group.id,
        proposal.target
    );

    Ok(())
}

/// Apply a group instruction under a presented authority
///
/// The authority equality check makes the restriction structural: this is
/// the only call path into `Group::set_owners`, and it refuses any identity
/// other than the one derived for this exact group.
pub(crate) fn apply_group_instruction(
    group: &mut Group,
    authority: &str,
    instruction: GroupInstruction,
) -> Result<(), MultisigError> {
    if authority != authority_for(group) {
        return Err(MultisigError::AuthorityMismatch);
    }

    match instruction {
        GroupInstruction::SetOwners { owners, threshold } => group.set_owners(owners, threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random_principal;
    use crate::host::RecordingInvoker;

    fn sample_group() -> Group {
        let owners = (0..3).map(|_| random_principal()).collect();
        Group::new(owners, 2, vec![3; 16]).unwrap()
    }

    fn approved_proposal(group: &Group, target: String, payload: Vec<u8>) -> Proposal {
        let mut proposal = Proposal::new(
            group,
            target,
            payload,
            random_principal(),
            10,
            group.owners[0].clone(),
            100,
            1000,
        )
        .unwrap();
        // owners[0] proposed; owners[1] completes the 2-of-3 threshold
        proposal.add_approval(&group.owners[1], group).unwrap();
        proposal
    }

    #[test]
    fn test_threshold_not_met() {
        let group = sample_group();
        // Only the proposer's implicit approval: one short of the threshold
        let proposal = Proposal::new(
            &group,
            random_principal(),
            vec![],
            random_principal(),
            10,
            group.owners[0].clone(),
            100,
            1000,
        )
        .unwrap();

        let result = check_executable(&proposal, &group);
        assert!(matches!(
            result,
            Err(MultisigError::ThresholdNotMet { have: 1, need: 2 })
        ));
    }

    #[test]
    fn test_external_action_dispatched_under_authority() {
        let mut group = sample_group();
        let target = random_principal();
        let proposal = approved_proposal(&group, target.clone(), b"do the thing".to_vec());

        let expected_authority = authority_for(&group);
        let mut invoker = RecordingInvoker::default();
        run(&mut group, &proposal, &mut invoker).unwrap();

        assert_eq!(invoker.calls.len(), 1);
        assert_eq!(invoker.calls[0].authority, expected_authority);
        assert_eq!(invoker.calls[0].target, target);
        assert_eq!(group.version, 0);
    }

    #[test]
    fn test_self_target_rewrites_owner_set() {
        let mut group = sample_group();
        let new_owners = vec![group.owners[0].clone(), random_principal()];
        let payload = GroupInstruction::SetOwners {
            owners: new_owners.clone(),
            threshold: 2,
        }
        .encode()
        .unwrap();
        let proposal = approved_proposal(&group, group.id.clone(), payload);

        let mut invoker = RecordingInvoker::default();
        run(&mut group, &proposal, &mut invoker).unwrap();

        assert_eq!(group.owners, new_owners);
        assert_eq!(group.version, 1);
        // Self-target never leaves the engine
        assert!(invoker.calls.is_empty());
    }

    #[test]
    fn test_self_target_with_garbage_payload() {
        let mut group = sample_group();
        let proposal = approved_proposal(&group, group.id.clone(), b"not json".to_vec());

        let mut invoker = RecordingInvoker::default();
        let result = run(&mut group, &proposal, &mut invoker);
        assert!(matches!(result, Err(MultisigError::InvalidInstruction(_))));
        assert_eq!(group.version, 0);
    }

    #[test]
    fn test_invoker_failure_leaves_group_untouched() {
        let mut group = sample_group();
        let proposal = approved_proposal(&group, random_principal(), vec![]);

        let mut invoker = RecordingInvoker {
            fail_with: Some("host said no".to_string()),
            ..Default::default()
        };
        let result = run(&mut group, &proposal, &mut invoker);
        assert!(matches!(result, Err(MultisigError::InvocationFailed(_))));
        assert_eq!(group.version, 0);
    }

    #[test]
    fn test_wrong_authority_rejected() {
        let mut group = sample_group();
        let other_group = sample_group();
        let foreign_authority = authority_for(&other_group);

        let result = apply_group_instruction(
            &mut group,
            &foreign_authority,
            GroupInstruction::SetOwners {
                owners: vec![random_principal()],
                threshold: 1,
            },
        );
        assert!(matches!(result, Err(MultisigError::AuthorityMismatch)));
        assert_eq!(group.version, 0);
    }

    #[test]
    fn test_instruction_codec() {
        let instruction = GroupInstruction::SetOwners {
            owners: vec![random_principal()],
            threshold: 1,
        };
        let payload = instruction.encode().unwrap();
        assert_eq!(GroupInstruction::decode(&payload).unwrap(), instruction);
    }
}
