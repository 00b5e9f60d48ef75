//! Wrapped-action invocation
//!
//! Once a proposal clears its checks, the engine hands the action to the
//! host through this seam: "call `target` with `payload`, authorized as
//! `authority`". The host reports success or failure; a failure rejects the
//! whole execute operation with no state change.

/// A single invocation the engine requested from the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvokedAction {
    pub authority: String,
    pub target: String,
    pub payload: Vec<u8>,
}

/// Performs a call "as" the derived authority
pub trait ActionInvoker {
    /// Invoke the wrapped action; an `Err` aborts the execute operation
    fn invoke(&mut self, authority: &str, target: &str, payload: &[u8]) -> Result<(), String>;
}

/// Invoker that accepts every action without performing anything
#[derive(Debug, Default)]
pub struct NullInvoker;

impl ActionInvoker for NullInvoker {
    fn invoke(&mut self, _authority: &str, _target: &str, _payload: &[u8]) -> Result<(), String> {
        Ok(())
    }
}

/// Invoker that records every call, optionally failing them
#[derive(Debug, Default)]
pub struct RecordingInvoker {
    /// Actions received so far
    pub calls: Vec<InvokedAction>,
    /// When set, every invocation is rejected with this message
    pub fail_with: Option<String>,
}

impl ActionInvoker for RecordingInvoker {
    fn invoke(&mut self, authority: &str, target: &str, payload: &[u8]) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        self.calls.push(InvokedAction {
            authority: authority.to_string(),
            target: target.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// Invoker that logs actions and accepts them (CLI host)
#[derive(Debug, Default)]
pub struct LoggingInvoker;

impl ActionInvoker for LoggingInvoker {
    fn invoke(&mut self, authority: &str, target: &str, payload: &[u8]) -> Result<(), String> {
        log::info!(
            "invoking target {} as {} ({} payload bytes)",
            target,
            authority,
            payload.len()
        );
        Ok(())
    }
}
