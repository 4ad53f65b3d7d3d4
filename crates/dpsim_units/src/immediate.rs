//! Immediate-value decoder.
//!
//! The unit receives the instruction with its 7 opcode bits already stripped
//! (the *remainder*, 25 bits wide: remainder bit `k` is instruction bit
//! `k + 7`) and a format selector, and reassembles the 32-bit immediate of
//! the selected RISC-V format.

use dpsim_common::sign_extend;
use serde::{Deserialize, Serialize};

/// Width of the instruction remainder port.
pub const REMAINDER_BITS: u32 = 25;

/// Mask of the significant remainder bits.
pub const REMAINDER_MASK: u32 = (1 << REMAINDER_BITS) - 1;

/// Number of opcode bits removed from the instruction.
pub const OPCODE_BITS: u32 = 7;

// Field extraction constants, expressed on the remainder.

/// U-type: instruction bits `[31:12]` kept in place.
const U_MASK: u32 = 0xFFFF_F000;

/// I-type: `imm[11:0]` is remainder `[24:13]`.
const I_SHIFT: u32 = 13;
const I_MASK: u32 = 0xFFF;

/// S-type: `imm[11:5]` is remainder `[24:18]`, `imm[4:0]` is remainder `[4:0]`.
const S_HI_SHIFT: u32 = 13;
const S_HI_MASK: u32 = 0xFE0;
const S_LO_MASK: u32 = 0x1F;

/// B-type: `imm[12]` r[24], `imm[11]` r[0], `imm[10:5]` r[23:18], `imm[4:1]` r[4:1].
const B_BIT12_SHIFT: u32 = 12;
const B_BIT12_MASK: u32 = 0x1000;
const B_BIT11_SHIFT: u32 = 11;
const B_BIT11_MASK: u32 = 0x800;
const B_HI_SHIFT: u32 = 13;
const B_HI_MASK: u32 = 0x7E0;
const B_LO_MASK: u32 = 0x1E;

/// J-type: `imm[20]` r[24], `imm[19:12]` r[12:5], `imm[11]` r[13], `imm[10:1]` r[23:14].
const J_BIT20_SHIFT: u32 = 4;
const J_BIT20_MASK: u32 = 0x10_0000;
const J_MID_SHIFT: u32 = 7;
const J_MID_MASK: u32 = 0xF_F000;
const J_BIT11_SHIFT: u32 = 2;
const J_BIT11_MASK: u32 = 0x800;
const J_LO_SHIFT: u32 = 13;
const J_LO_MASK: u32 = 0x7FE;

/// Immediate format selected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImmFormat {
    /// Upper immediate (`lui`, `auipc`).
    U,
    /// Conditional branch offset.
    B,
    /// Register-immediate and loads.
    I,
    /// Jump offset (`jal`).
    J,
    /// Stores.
    S,
}

impl ImmFormat {
    /// Decodes the low four bits of a format selector, as the selector port
    /// holds them.
    ///
    /// `IMM_UNKNOWN_TYPE` and the unused codes 6 to 15 decode to `None`.
    pub fn from_select(select: u8) -> Option<Self> {
        match select & 0b1111 {
            0 => Some(ImmFormat::U),
            1 => Some(ImmFormat::B),
            2 => Some(ImmFormat::I),
            3 => Some(ImmFormat::J),
            4 => Some(ImmFormat::S),
            _ => None,
        }
    }

    /// The selector code for this format.
    pub fn select(self) -> u8 {
        self as u8
    }
}

/// Strips the opcode from a full instruction word, yielding the remainder
/// fed to the decoder port.
pub fn remainder_of(instruction: u32) -> u32 {
    instruction >> OPCODE_BITS
}

fn sext(value: u32, bits: u32) -> u32 {
    sign_extend(u64::from(value), bits) as u32
}

/// The datapath immediate decoder.
pub struct ImmediateDecoder;

impl ImmediateDecoder {
    /// Reassembles the immediate of `format` from a 25-bit remainder.
    pub fn decode(format: ImmFormat, remainder: u32) -> u32 {
        let r = remainder & REMAINDER_MASK;
        match format {
            ImmFormat::U => (r << OPCODE_BITS) & U_MASK,
            ImmFormat::I => sext((r >> I_SHIFT) & I_MASK, 12),
            ImmFormat::S => sext(((r >> S_HI_SHIFT) & S_HI_MASK) | (r & S_LO_MASK), 12),
            ImmFormat::B => sext(
                ((r >> B_BIT12_SHIFT) & B_BIT12_MASK)
                    | ((r << B_BIT11_SHIFT) & B_BIT11_MASK)
                    | ((r >> B_HI_SHIFT) & B_HI_MASK)
                    | (r & B_LO_MASK),
                13,
            ),
            ImmFormat::J => sext(
                ((r >> J_BIT20_SHIFT) & J_BIT20_MASK)
                    | ((r << J_MID_SHIFT) & J_MID_MASK)
                    | ((r >> J_BIT11_SHIFT) & J_BIT11_MASK)
                    | ((r >> J_LO_SHIFT) & J_LO_MASK),
                21,
            ),
        }
    }

    /// Evaluates the unit as the selector port sees it; unknown formats
    /// produce `0`.
    pub fn evaluate(select: u8, remainder: u32) -> u32 {
        ImmFormat::from_select(select).map_or(0, |format| Self::decode(format, remainder))
    }
}
