//! Signal identity and metadata.

use dpsim_common::{define_id, BitRange};
use serde::{Deserialize, Serialize};

use crate::scope::ScopeId;

define_id!(
    /// Opaque handle to a signal in a model's store.
    ///
    /// Handles are only meaningful for the model that issued them.
    SignalId
);

/// The role a signal plays in its scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// A module input port.
    Input,
    /// A module output port.
    Output,
    /// A wire or variable that is not a port.
    Internal,
    /// An elaboration-time constant.
    Parameter,
}

/// Whether a harness may write a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    /// Writable through the model.
    ReadWrite,
    /// Fixed at construction.
    ReadOnly,
}

impl SignalKind {
    /// The access a signal of this kind is registered with.
    ///
    /// Outputs are driven by processes only, so harness writes to them are
    /// rejected like writes to parameters.
    pub fn default_access(self) -> Access {
        match self {
            SignalKind::Parameter | SignalKind::Output => Access::ReadOnly,
            SignalKind::Input | SignalKind::Internal => Access::ReadWrite,
        }
    }
}

/// Static description of a registered signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalInfo {
    /// Local name within its scope.
    pub name: String,
    /// Full dotted path, e.g. `harness.alu.o_Alu_Result`.
    pub path: String,
    /// Declared bit range; values are stored right-aligned.
    pub range: BitRange,
    /// Port, wire, or parameter.
    pub kind: SignalKind,
    /// Write permission.
    pub access: Access,
    /// The scope the signal is declared in.
    pub scope: ScopeId,
}

impl SignalInfo {
    /// Number of bits in the signal.
    pub fn width(&self) -> u32 {
        self.range.width()
    }
}
