//! Simulation error types.
//!
//! All errors that can occur while building a model, looking up signals, or
//! evaluating regions are variants of [`SimError`].

use crate::region::Region;

/// Errors that can occur during model construction or evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A region still had pending triggers after its iteration cap was spent,
    /// indicating a combinational loop.
    #[error("{region} region did not converge within {max_iterations} iterations")]
    NonConvergence {
        /// The region that failed to settle.
        region: Region,
        /// The cap that was exceeded.
        max_iterations: u32,
    },

    /// No signal is registered under the dotted path.
    #[error("signal not found: {path}")]
    SignalNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// No scope is registered under the dotted path.
    #[error("scope not found: {path}")]
    ScopeNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// A scope or signal was registered twice under the same full path.
    #[error("duplicate path: {path}")]
    DuplicatePath {
        /// The conflicting full path.
        path: String,
    },

    /// A signal was declared with an empty, inverted, or oversized range.
    #[error("invalid width for {path}: [{msb}:{lsb}]")]
    InvalidWidth {
        /// Full path of the signal being declared.
        path: String,
        /// Declared most significant bit.
        msb: u32,
        /// Declared least significant bit.
        lsb: u32,
    },

    /// A scope or signal named a parent scope that does not exist.
    #[error("unknown parent scope with ID {0}")]
    UnknownParent(u32),

    /// A harness attempted to write a parameter or other read-only signal.
    #[error("signal is read-only: {path}")]
    ReadOnlySignal {
        /// Path of the read-only signal.
        path: String,
    },
}
