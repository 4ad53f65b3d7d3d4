//! Arithmetic Logic Unit (ALU).
//!
//! The datapath ALU is a 32-bit, purely combinational unit. A 5-bit selector
//! picks one of eight operations; every selector with bit 3 or bit 4 set
//! (including [`ALU_SEL_UNKNOWN`](crate::select::ALU_SEL_UNKNOWN)) produces
//! zero. Arithmetic wraps modulo 2^32.

use serde::{Deserialize, Serialize};

/// Bit mask applied to the B operand to form the shift amount.
const SHAMT_MASK: u32 = 0x1f;

/// Selector bits that force a zero result when any is set.
const SEL_UNDEFINED_MASK: u8 = 0b1_1000;

/// Decoded ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    /// `A + B`
    Add,
    /// `A - B`
    Sub,
    /// `A & B`
    And,
    /// `A | B`
    Or,
    /// `A ^ B`
    Xor,
    /// `A << B[4:0]`
    Sll,
    /// `A >> B[4:0]`, zero fill
    Srl,
    /// `A >> B[4:0]`, sign fill
    Sra,
}

impl AluOp {
    /// Decodes a raw selector. Returns `None` for selectors that yield zero.
    ///
    /// Only the low five bits of `select` are significant, matching the
    /// width of the selector port.
    pub fn from_select(select: u8) -> Option<Self> {
        let select = select & 0x1f;
        if select & SEL_UNDEFINED_MASK != 0 {
            return None;
        }
        Some(match select {
            0 => AluOp::Add,
            1 => AluOp::Sub,
            2 => AluOp::And,
            3 => AluOp::Or,
            4 => AluOp::Xor,
            5 => AluOp::Sll,
            6 => AluOp::Srl,
            _ => AluOp::Sra,
        })
    }

    /// The selector code for this operation.
    pub fn select(self) -> u8 {
        self as u8
    }
}

/// The datapath ALU.
pub struct Alu;

impl Alu {
    /// Executes a decoded operation on two 32-bit operands.
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        let shamt = b & SHAMT_MASK;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
            AluOp::Sll => a << shamt,
            AluOp::Srl => a >> shamt,
            AluOp::Sra => ((a as i32) >> shamt) as u32,
        }
    }

    /// Evaluates the unit exactly as the selector port sees it.
    ///
    /// Undefined selectors produce `0`.
    pub fn evaluate(select: u8, a: u32, b: u32) -> u32 {
        AluOp::from_select(select).map_or(0, |op| Self::execute(op, a, b))
    }
}
