//! Combinational functional units of the RISC-V datapath.
//!
//! Each unit is a stateless function of its input ports: the [`Alu`], the
//! branch [`Comparator`] and the [`ImmediateDecoder`]. Raw selector values are
//! decoded by the `from_select` constructors of [`AluOp`], [`CompareOp`] and
//! [`ImmFormat`]; the `evaluate` entry points accept any selector and never
//! fail. The package constants shared with the HDL live in [`select`].

#![warn(missing_docs)]

pub mod alu;
pub mod comparator;
pub mod immediate;
pub mod select;

pub use alu::{Alu, AluOp};
pub use comparator::{CompareOp, Comparator};
pub use immediate::{remainder_of, ImmFormat, ImmediateDecoder, REMAINDER_BITS};
pub use select::{PackageParam, PACKAGE_PARAMS};
