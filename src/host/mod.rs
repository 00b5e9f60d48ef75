//! Host environment collaborators
//!
//! The engine owns state transitions but borrows everything environmental
//! from its host: the logical clock that drives TTLs and the invoker that
//! performs the wrapped action under the derived authority. Identity
//! verification also stays host-side — operations receive the authorizing
//! principal as an argument and trust it.

pub mod clock;
pub mod invoker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use invoker::{ActionInvoker, InvokedAction, LoggingInvoker, NullInvoker, RecordingInvoker};
