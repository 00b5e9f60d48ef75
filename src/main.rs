//! Quorumsig CLI Application
//!
//! A command-line host for the threshold multisig engine.

use clap::{Parser, Subcommand};
use quorumsig::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quorumsig")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A threshold multi-signature authorization engine", long_about = None)]
struct Cli {
    /// Data directory for engine storage
    #[arg(short, long, default_value = ".quorumsig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh principal identifier
    Principal,

    /// Credit a principal's storage balance
    Fund {
        /// Principal to credit
        #[arg(short, long)]
        principal: String,

        /// Amount of storage units
        #[arg(short, long)]
        amount: u64,
    },

    /// Create a new multisig group
    CreateGroup {
        /// Owner principal identifiers
        #[arg(short, long, required = true, num_args = 1..)]
        owners: Vec<String>,

        /// Approvals required to execute (M in M-of-N)
        #[arg(short, long)]
        threshold: u8,
    },

    /// Propose an action for a group
    Propose {
        /// Group record id
        #[arg(short, long)]
        group: String,

        /// Target principal (use the group id for owner-set changes)
        #[arg(long)]
        target: String,

        /// Hex-encoded action payload
        #[arg(long, default_value = "")]
        payload: String,

        /// Principal receiving the storage refund on drop
        #[arg(short, long)]
        successor: String,

        /// Time-to-live in slots (seconds)
        #[arg(long, default_value = "3600")]
        ttl: u64,

        /// Proposing owner
        #[arg(long)]
        proposer: String,
    },

    /// Print the payload hex for an owner-set change
    SetOwnersPayload {
        /// New owner principal identifiers
        #[arg(short, long, required = true, num_args = 1..)]
        owners: Vec<String>,

        /// New threshold
        #[arg(short, long)]
        threshold: u8,
    },

    /// Approve a proposal as an owner
    Approve {
        /// Proposal record id
        #[arg(long)]
        proposal: String,

        /// Approving owner
        #[arg(long)]
        owner: String,
    },

    /// Execute a proposal that has reached its threshold
    Execute {
        /// Proposal record id
        #[arg(long)]
        proposal: String,
    },

    /// Drop an executed or expired proposal
    Drop {
        /// Proposal record id
        #[arg(long)]
        proposal: String,

        /// Designated successor receiving the storage refund
        #[arg(long)]
        successor: String,
    },

    /// Show groups and proposals
    Show,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    // Stateless commands first
    match &args.command {
        Commands::Principal => return cli::cmd_principal_new(),
        Commands::SetOwnersPayload { owners, threshold } => {
            return cli::cmd_set_owners_payload(owners.clone(), *threshold);
        }
        _ => {}
    }

    let mut state = AppState::new(args.data_dir.clone())?;

    match args.command {
        Commands::Principal | Commands::SetOwnersPayload { .. } => unreachable!(),

        Commands::Fund { principal, amount } => {
            cli::cmd_fund(&mut state, &principal, amount)?;
        }

        Commands::CreateGroup { owners, threshold } => {
            cli::cmd_create_group(&mut state, owners, threshold)?;
        }

        Commands::Propose {
            group,
            target,
            payload,
            successor,
            ttl,
            proposer,
        } => {
            cli::cmd_propose(
                &mut state, &group, &target, &payload, &successor, ttl, &proposer,
            )?;
        }

        Commands::Approve { proposal, owner } => {
            cli::cmd_approve(&mut state, &proposal, &owner)?;
        }

        Commands::Execute { proposal } => {
            cli::cmd_execute(&mut state, &proposal)?;
        }

        Commands::Drop {
            proposal,
            successor,
        } => {
            cli::cmd_drop(&mut state, &proposal, &successor)?;
        }

        Commands::Show => {
            cli::cmd_show(&state)?;
        }
    }

    Ok(())
}
