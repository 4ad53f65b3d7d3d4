//! Bit-width helpers: masking, sign extension, and declared bit ranges.
//!
//! Stored signal values are always unsigned and truncated to their declared
//! width. Signed views are produced on demand with [`sign_extend`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest signal the store can hold.
pub const MAX_WIDTH: u32 = 64;

/// Returns a mask with the low `width` bits set.
///
/// `width` values of 64 or more yield an all-ones mask; 0 yields 0.
pub fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Sign-extends the low `bits` bits of `value` to a full `i64`.
///
/// Bits above `bits` are ignored. A `bits` of 0 yields 0.
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    match bits {
        0 => 0,
        b if b >= 64 => value as i64,
        b => {
            let shift = 64 - b;
            ((value << shift) as i64) >> shift
        }
    }
}

/// A declared width was outside `1..=MAX_WIDTH` or its range was inverted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bit range [{msb}:{lsb}] (width must be 1..={MAX_WIDTH})")]
pub struct WidthError {
    /// Declared most significant bit.
    pub msb: u32,
    /// Declared least significant bit.
    pub lsb: u32,
}

/// A declared `[msb:lsb]` bit range, as written in the HDL port list.
///
/// Values are stored right-aligned regardless of `lsb`; the range is kept so
/// introspection can report it the way the design declared it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitRange {
    msb: u32,
    lsb: u32,
}

impl BitRange {
    /// Creates a range, rejecting `msb < lsb` and widths above [`MAX_WIDTH`].
    pub fn new(msb: u32, lsb: u32) -> Result<Self, WidthError> {
        if msb < lsb || msb - lsb >= MAX_WIDTH {
            return Err(WidthError { msb, lsb });
        }
        Ok(Self { msb, lsb })
    }

    /// Creates a `[width-1:0]` range.
    pub fn with_width(width: u32) -> Result<Self, WidthError> {
        if width == 0 {
            return Err(WidthError { msb: 0, lsb: 1 });
        }
        Self::new(width - 1, 0)
    }

    /// Most significant declared bit.
    pub fn msb(self) -> u32 {
        self.msb
    }

    /// Least significant declared bit.
    pub fn lsb(self) -> u32 {
        self.lsb
    }

    /// Number of bits in the range.
    pub fn width(self) -> u32 {
        self.msb - self.lsb + 1
    }

    /// Mask covering the range's width.
    pub fn mask(self) -> u64 {
        mask(self.width())
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.msb, self.lsb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mask_edges() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 1);
        assert_eq!(mask(25), 0x01FF_FFFF);
        assert_eq!(mask(32), 0xFFFF_FFFF);
        assert_eq!(mask(64), u64::MAX);
    }

    #[test]
    fn sign_extend_negative_twelve_bit() {
        assert_eq!(sign_extend(0xFFF, 12), -1);
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(0x7FF, 12), 2047);
    }

    #[test]
    fn sign_extend_ignores_high_garbage() {
        assert_eq!(sign_extend(0xABC0_0001, 4), 1);
    }

    #[test]
    fn range_width_and_display() {
        let r = BitRange::new(31, 7).unwrap();
        assert_eq!(r.width(), 25);
        assert_eq!(r.to_string(), "[31:7]");
        assert_eq!(BitRange::new(0, 0).unwrap().width(), 1);
        assert_eq!(BitRange::with_width(5).unwrap().msb(), 4);
    }

    #[test]
    fn range_rejects_inverted_and_oversized() {
        assert!(BitRange::new(3, 4).is_err());
        assert!(BitRange::new(64, 0).is_err());
        assert!(BitRange::with_width(0).is_err());
        assert!(BitRange::new(63, 0).is_ok());
    }

    #[test]
    fn width_error_display() {
        let e = WidthError { msb: 70, lsb: 0 };
        assert_eq!(
            e.to_string(),
            "invalid bit range [70:0] (width must be 1..=64)"
        );
    }

    proptest! {
        #[test]
        fn sign_extend_matches_i32_cast(v in any::<u32>()) {
            prop_assert_eq!(sign_extend(v as u64, 32), v as i32 as i64);
        }

        #[test]
        fn masked_value_fits_width(v in any::<u64>(), w in 1u32..=64) {
            let m = v & mask(w);
            prop_assert!(w == 64 || m >> w == 0);
        }
    }
}
