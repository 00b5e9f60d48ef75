//! Command handlers for the quorumsig CLI
//!
//! Each handler loads the persisted engine, applies one operation, and
//! saves the result back, mirroring the one-operation-per-call host model.

use crate::crypto::{random_principal, random_salt};
use crate::engine::{Engine, GroupInstruction};
use crate::host::{LoggingInvoker, SystemClock};
use crate::store::{Storage, StorageConfig};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub engine: Engine,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize application state, loading any persisted engine
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let storage = Storage::new(storage_config)?;

        let engine = if storage.exists() {
            storage.load()?
        } else {
            let engine = Engine::new();
            storage.save(&engine)?;
            engine
        };

        Ok(Self {
            engine,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.engine)?;
        Ok(())
    }
}

/// Generate a fresh principal identifier
pub fn cmd_principal_new() -> CliResult<()> {
    let principal = random_principal();
    println!("🔑 New principal: {}", principal);
    Ok(())
}

/// Credit a principal's storage balance
pub fn cmd_fund(state: &mut AppState, principal: &str, amount: u64) -> CliResult<()> {
    state.engine.fund(principal, amount);
    state.save()?;

    println!(
        "💰 Funded {}: balance now {}",
        principal,
        state.engine.ledger().balance(principal)
    );
    Ok(())
}

/// Create a new group
pub fn cmd_create_group(state: &mut AppState, owners: Vec<String>, threshold: u8) -> CliResult<()> {
    let group = state.engine.create_group(owners, threshold, random_salt())?;
    let authority = state.engine.authority_of(&group.id)?;
    state.save()?;

    println!("✅ Group created ({})", group.description());
    println!("   🆔 Id: {}", group.id);
    println!("   🖋️  Authority: {}", authority);
    println!("   🔢 Version: {}", group.version);
    Ok(())
}

/// Propose an action for a group
pub fn cmd_propose(
    state: &mut AppState,
    group_id: &str,
    target: &str,
    payload_hex: &str,
    successor: &str,
    ttl: u64,
    proposer: &str,
) -> CliResult<()> {
    let payload = hex::decode(payload_hex)?;

    let proposal = state.engine.create_proposal(
        group_id,
        target.to_string(),
        payload,
        successor.to_string(),
        ttl,
        proposer.to_string(),
        &SystemClock,
    )?;
    state.save()?;

    println!("📋 Proposal created");
    println!("   🆔 Id: {}", proposal.id);
    println!("   🎯 Target: {}", proposal.target);
    println!("   ⏳ Expires at slot: {}", proposal.expires_at);
    Ok(())
}

/// Print the payload hex for an owner-set change proposal
pub fn cmd_set_owners_payload(owners: Vec<String>, threshold: u8) -> CliResult<()> {
    let payload = GroupInstruction::SetOwners { owners, threshold }.encode()?;
    println!("{}", hex::encode(payload));
    Ok(())
}

/// Approve a proposal as an owner
pub fn cmd_approve(state: &mut AppState, proposal_id: &str, owner: &str) -> CliResult<()> {
    let newly = state.engine.approve(proposal_id, owner)?;
    state.save()?;

    let proposal = state
        .engine
        .proposal(proposal_id)
        .ok_or("proposal vanished after approval")?;
    if newly {
        println!(
            "✍️  Approved: {} of {} signatures",
            proposal.approval_count(),
            state
                .engine
                .group(&proposal.group)
                .map(|g| g.threshold)
                .unwrap_or(0)
        );
    } else {
        println!("✍️  Already approved by this owner, nothing changed");
    }
    Ok(())
}

/// Execute a proposal that has reached its threshold
pub fn cmd_execute(state: &mut AppState, proposal_id: &str) -> CliResult<()> {
    state.engine.execute(proposal_id, &mut LoggingInvoker)?;
    state.save()?;

    println!("🚀 Proposal executed: {}", proposal_id);
    Ok(())
}

/// Drop an executed or expired proposal, reclaiming its storage
pub fn cmd_drop(state: &mut AppState, proposal_id: &str, successor: &str) -> CliResult<()> {
    let refund = state.engine.drop_proposal(proposal_id, successor, &SystemClock)?;
    state.save()?;

    println!("🗑️  Proposal dropped, {} released to {}", refund, successor);
    Ok(())
}

/// Show groups and their pending proposals
pub fn cmd_show(state: &AppState) -> CliResult<()> {
    println!("📊 Engine state ({:?})", state.data_dir);
    println!(
        "   Groups: {}, proposals: {}",
        state.engine.group_count(),
        state.engine.proposal_count()
    );

    for group in state.engine.list_groups() {
        println!("\n   Group {} ({})", group.id, group.description());
        println!("   ├─ Version: {}", group.version);
        for owner in &group.owners {
            println!("   ├─ Owner: {}", owner);
        }
        for proposal in state.engine.proposals_for_group(&group.id) {
            let status = if proposal.executed {
                "executed"
            } else {
                "pending"
            };
            println!(
                "   └─ Proposal {} [{}] {} approvals, expires at slot {}",
                proposal.id,
                status,
                proposal.approval_count(),
                proposal.expires_at
            );
        }
    }
    Ok(())
}
