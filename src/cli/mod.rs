//! CLI command handlers
//!
//! Implements the command handlers behind the `quorumsig` binary. The CLI
//! acts as a minimal host: wall-clock slots, a logging invoker, and JSON
//! persistence of the engine between invocations.

pub mod commands;

pub use commands::{
    cmd_approve, cmd_create_group, cmd_drop, cmd_execute, cmd_fund, cmd_principal_new,
    cmd_propose, cmd_set_owners_payload, cmd_show, AppState, CliResult,
};
