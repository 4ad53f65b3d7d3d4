//! Fixed-size trigger bitsets.

use std::fmt;

const WORD_BITS: usize = 64;

/// A fixed-size bitset; bit `i` means "watched condition `i` fired since the
/// vector was last cleared".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerVector {
    words: Vec<u64>,
    len: usize,
}

impl TriggerVector {
    /// Creates a vector of `len` clear bits.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector has zero bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "trigger index {index} out of range");
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Returns bit `index`; out-of-range bits read as clear.
    pub fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Whether any bit is set.
    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// ORs `other` into `self`. Bits beyond `self.len()` are dropped.
    pub fn or_assign(&mut self, other: &TriggerVector) {
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst |= src;
        }
        if let Some(last) = self.words.last_mut() {
            let tail = self.len % WORD_BITS;
            if tail != 0 {
                *last &= (1u64 << tail) - 1;
            }
        }
    }

    /// Indices of the set bits, ascending.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }
}

impl fmt::Display for TriggerVector {
    /// Bits printed most significant first, like a Verilog literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'b", self.len)?;
        for i in (0..self.len).rev() {
            f.write_str(if self.get(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
