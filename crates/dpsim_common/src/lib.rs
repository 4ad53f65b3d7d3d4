//! Shared foundational types used across the dpsim workspace.
//!
//! This crate provides the dense ID-indexed [`Arena`] used for signal and scope
//! storage, bit-level helpers for width masking and sign extension, and the
//! name [`Interner`] used by the scope table.

#![warn(missing_docs)]

pub mod arena;
pub mod bits;
pub mod ident;

pub use arena::{Arena, ArenaId};
pub use bits::{mask, sign_extend, BitRange, WidthError, MAX_WIDTH};
pub use ident::{Ident, Interner};
