//! # lumen_event - Signal/Slot Observer Registry
//!
//! Runtime-checked signal wiring with:
//! - Signature-gated connections (exact shape match required)
//! - Symmetric bookkeeping on both sides of every connection
//! - Forced disconnection when either side is dropped
//! - Reentrancy-safe emission in connection order
//!
//! A `Signal` is declared as a field of the object that owns it; a `Slot`
//! wraps a callback. Connecting the two succeeds only when their signatures
//! are equal, and either side can be dropped at any time without leaving the
//! other holding a stale reference.

mod relation;
pub mod signal;
pub mod slot;

pub use signal::{ConnectStatus, Signal};
pub use slot::Slot;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::signal::{ConnectStatus, Signal};
    pub use crate::slot::Slot;
}
