//! Width-masked signal storage with change stamping.
//!
//! The store owns the value of every signal in a model. Values are `u64`
//! containers, always masked to the signal's declared width. Every write that
//! actually changes a value advances a global change epoch and stamps the
//! signal with it; processes compare those stamps against the epoch at which
//! they last ran to decide whether they are triggered.

use dpsim_common::{sign_extend, Arena};
use tracing::trace;

use crate::signal::{SignalId, SignalInfo};

/// A signal's metadata plus its current value.
#[derive(Debug, Clone)]
struct SignalSlot {
    info: SignalInfo,
    value: u64,
    changed_at: u64,
}

/// Storage for every signal of a model.
#[derive(Debug, Default)]
pub struct SignalStore {
    signals: Arena<SignalId, SignalSlot>,
    epoch: u64,
}

impl SignalStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a signal with an initial value. The value is masked to the
    /// signal's width and does not count as a change.
    pub fn alloc(&mut self, info: SignalInfo, initial: u64) -> SignalId {
        let value = initial & info.range.mask();
        self.signals.alloc(SignalSlot {
            info,
            value,
            changed_at: 0,
        })
    }

    /// Number of registered signals.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the store has no signals.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Metadata of a signal.
    pub fn info(&self, id: SignalId) -> &SignalInfo {
        &self.signals.get(id).info
    }

    /// Iterates over every signal handle and its metadata in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalId, &SignalInfo)> {
        self.signals.iter().map(|(id, slot)| (id, &slot.info))
    }

    /// The current value, right-aligned and zero-extended.
    pub fn read(&self, id: SignalId) -> u64 {
        self.signals.get(id).value
    }

    /// The current value sign-extended from the signal's width.
    pub fn read_signed(&self, id: SignalId) -> i64 {
        let slot = self.signals.get(id);
        sign_extend(slot.value, slot.info.width())
    }

    /// Masks and stores `value`. Returns whether the stored value changed;
    /// only a change advances the epoch.
    pub fn write(&mut self, id: SignalId, value: u64) -> bool {
        let slot = self.signals.get_mut(id);
        let value = value & slot.info.range.mask();
        if slot.value == value {
            return false;
        }
        self.epoch += 1;
        trace!(signal = %slot.info.path, old = slot.value, new = value, "signal write");
        slot.value = value;
        slot.changed_at = self.epoch;
        true
    }

    /// The current change epoch. Starts at 0 and increases by one per
    /// value-changing write.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the signal changed after `epoch`.
    pub fn changed_since(&self, id: SignalId, epoch: u64) -> bool {
        self.signals.get(id).changed_at > epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeId;
    use crate::signal::{Access, SignalKind};
    use dpsim_common::BitRange;
    use proptest::prelude::*;

    fn info(path: &str, width: u32) -> SignalInfo {
        SignalInfo {
            name: path.rsplit('.').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            range: BitRange::with_width(width).unwrap(),
            kind: SignalKind::Internal,
            access: Access::ReadWrite,
            scope: ScopeId::from_raw(0),
        }
    }

    #[test]
    fn alloc_masks_initial_value() {
        let mut store = SignalStore::new();
        let id = store.alloc(info("t.a", 4), 0xFF);
        assert_eq!(store.read(id), 0xF);
        assert_eq!(store.epoch(), 0);
        assert!(!store.changed_since(id, 0));
    }

    #[test]
    fn write_masks_and_stamps() {
        let mut store = SignalStore::new();
        let a = store.alloc(info("t.a", 5), 0);
        let b = store.alloc(info("t.b", 32), 0);
        assert!(store.write(a, 0x3F));
        assert_eq!(store.read(a), 0x1F);
        assert_eq!(store.epoch(), 1);
        assert!(store.changed_since(a, 0));
        assert!(!store.changed_since(a, 1));
        assert!(!store.changed_since(b, 0));
    }

    #[test]
    fn unchanged_write_does_not_advance_epoch() {
        let mut store = SignalStore::new();
        let a = store.alloc(info("t.a", 8), 7);
        assert!(!store.write(a, 7));
        assert!(!store.write(a, 0x107));
        assert_eq!(store.epoch(), 0);
    }

    #[test]
    fn read_signed_uses_declared_width() {
        let mut store = SignalStore::new();
        let a = store.alloc(info("t.a", 32), 0);
        store.write(a, 0x8000_0000);
        assert_eq!(store.read_signed(a), -0x8000_0000);
        let bit = store.alloc(info("t.bit", 1), 1);
        assert_eq!(store.read_signed(bit), -1);
        assert_eq!(store.read(bit), 1);
    }

    #[test]
    fn iter_in_registration_order() {
        let mut store = SignalStore::new();
        store.alloc(info("t.x", 1), 0);
        store.alloc(info("t.y", 1), 0);
        let paths: Vec<_> = store.iter().map(|(_, i)| i.path.as_str()).collect();
        assert_eq!(paths, vec!["t.x", "t.y"]);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    proptest! {
        #[test]
        fn stored_value_always_fits_width(width in 1u32..=64, value: u64) {
            let mut store = SignalStore::new();
            let id = store.alloc(info("t.v", width), 0);
            store.write(id, value);
            prop_assert_eq!(store.read(id), value & dpsim_common::mask(width));
        }
    }
}
