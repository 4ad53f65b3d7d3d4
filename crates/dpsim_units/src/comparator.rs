//! Branch comparator.
//!
//! Two 32-bit operands and a 4-bit selector produce a single-bit result. Any
//! selector with bit 3 set compares false. Below that the selector decodes as
//! a small tree: bit 2 picks the signed relational pair, otherwise bit 1 picks
//! the unsigned relational pair, otherwise equality. Within each pair bit 0
//! picks the second member (`>=` or `!=`).

use serde::{Deserialize, Serialize};

const SEL_PORT_MASK: u8 = 0b1111;
const SEL_GUARD: u8 = 0b1000;
const SEL_SIGNED: u8 = 0b100;
const SEL_RELATIONAL: u8 = 0b010;
const SEL_INVERT: u8 = 0b001;

/// Decoded comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `A == B`
    Eq,
    /// `A != B`
    Ne,
    /// `A < B`, unsigned
    Ltu,
    /// `A >= B`, unsigned
    Geu,
    /// `A < B`, signed
    Lt,
    /// `A >= B`, signed
    Ge,
}

impl CompareOp {
    /// Decodes the low four bits of `select`, as the selector port holds them.
    ///
    /// Selector 6 (`CMP_SEL_UNKNOWN`), 7 and anything with bit 3 set decode
    /// to `None`; the unit reports `false` for all of them.
    pub fn from_select(select: u8) -> Option<Self> {
        let select = select & SEL_PORT_MASK;
        if select & SEL_GUARD != 0 {
            return None;
        }
        let invert = select & SEL_INVERT != 0;
        if select & SEL_SIGNED != 0 {
            if select & SEL_RELATIONAL != 0 {
                None
            } else if invert {
                Some(CompareOp::Ge)
            } else {
                Some(CompareOp::Lt)
            }
        } else if select & SEL_RELATIONAL != 0 {
            Some(if invert { CompareOp::Geu } else { CompareOp::Ltu })
        } else {
            Some(if invert { CompareOp::Ne } else { CompareOp::Eq })
        }
    }

    /// The selector code for this comparison.
    pub fn select(self) -> u8 {
        self as u8
    }
}

/// The datapath branch comparator.
pub struct Comparator;

impl Comparator {
    /// Applies a decoded comparison.
    pub fn compare(op: CompareOp, a: u32, b: u32) -> bool {
        match op {
            CompareOp::Eq => a == b,
            CompareOp::Ne => a != b,
            CompareOp::Ltu => a < b,
            CompareOp::Geu => a >= b,
            CompareOp::Lt => (a as i32) < (b as i32),
            CompareOp::Ge => (a as i32) >= (b as i32),
        }
    }

    /// Evaluates the unit as the selector port sees it.
    pub fn evaluate(select: u8, a: u32, b: u32) -> bool {
        CompareOp::from_select(select).is_some_and(|op| Self::compare(op, a, b))
    }
}
