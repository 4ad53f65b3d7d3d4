//! Processes: the units of evaluation the scheduler runs.
//!
//! A process is a body implementing [`Evaluate`] plus the list of signals it
//! is sensitive to. Bodies see the store only through an [`EvalContext`],
//! which offers blocking writes (visible immediately) and deferred writes
//! (committed in the non-blocking-assign region).

use std::fmt;

use crate::signal::SignalId;
use crate::store::SignalStore;

/// The behaviour of a process.
///
/// Implemented for any `FnMut(&mut EvalContext<'_>)`, so simple processes can
/// be written as closures.
pub trait Evaluate {
    /// Recomputes the process outputs from its inputs.
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>);
}

impl<F> Evaluate for F
where
    F: FnMut(&mut EvalContext<'_>),
{
    fn evaluate(&mut self, ctx: &mut EvalContext<'_>) {
        self(ctx)
    }
}

/// The view of the store handed to a running process.
pub struct EvalContext<'a> {
    store: &'a mut SignalStore,
    deferred: &'a mut Vec<(SignalId, u64)>,
}

impl<'a> EvalContext<'a> {
    pub(crate) fn new(store: &'a mut SignalStore, deferred: &'a mut Vec<(SignalId, u64)>) -> Self {
        Self { store, deferred }
    }

    /// Reads a signal's current value.
    pub fn read(&self, id: SignalId) -> u64 {
        self.store.read(id)
    }

    /// Reads a signal sign-extended from its width.
    pub fn read_signed(&self, id: SignalId) -> i64 {
        self.store.read_signed(id)
    }

    /// Blocking write: stored immediately, masked to the signal's width.
    /// Returns whether the value changed.
    ///
    /// Access control applies to harness writes only; processes drive any
    /// signal they are wired to.
    pub fn write(&mut self, id: SignalId, value: u64) -> bool {
        self.store.write(id, value)
    }

    /// Non-blocking write: committed after the non-blocking-assign region's
    /// processes have run. Later schedules of the same signal win.
    pub fn schedule(&mut self, id: SignalId, value: u64) {
        self.deferred.push((id, value));
    }
}

/// A registered process and its scheduling state.
pub(crate) struct ProcessSlot {
    pub(crate) name: String,
    sensitivity: Vec<SignalId>,
    /// Store epoch observed when the process last started.
    seen_epoch: u64,
    /// Set until the first run so every process settles once.
    settle_pending: bool,
    body: Box<dyn Evaluate>,
}

impl ProcessSlot {
    pub(crate) fn new(name: String, sensitivity: Vec<SignalId>, body: Box<dyn Evaluate>) -> Self {
        Self {
            name,
            sensitivity,
            seen_epoch: 0,
            settle_pending: true,
            body,
        }
    }

    /// Whether the process has not run yet or any watched signal changed
    /// since it last started.
    pub(crate) fn is_triggered(&self, store: &SignalStore) -> bool {
        self.settle_pending
            || self
                .sensitivity
                .iter()
                .any(|&id| store.changed_since(id, self.seen_epoch))
    }

    /// Runs the body. Changes the body makes to its own inputs re-trigger it.
    pub(crate) fn run(&mut self, ctx: &mut EvalContext<'_>) {
        self.seen_epoch = ctx.store.epoch();
        self.settle_pending = false;
        self.body.evaluate(ctx);
    }
}

impl fmt::Debug for ProcessSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessSlot")
            .field("name", &self.name)
            .field("sensitivity", &self.sensitivity)
            .field("seen_epoch", &self.seen_epoch)
            .field("settle_pending", &self.settle_pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeId;
    use crate::signal::{Access, SignalInfo, SignalKind};
    use dpsim_common::BitRange;

    fn store_with(widths: &[u32]) -> (SignalStore, Vec<SignalId>) {
        let mut store = SignalStore::new();
        let ids = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                store.alloc(
                    SignalInfo {
                        name: format!("s{i}"),
                        path: format!("t.s{i}"),
                        range: BitRange::with_width(w).unwrap(),
                        kind: SignalKind::Internal,
                        access: Access::ReadWrite,
                        scope: ScopeId::from_raw(0),
                    },
                    0,
                )
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn new_process_is_triggered_once() {
        let (mut store, ids) = store_with(&[8, 8]);
        let (a, y) = (ids[0], ids[1]);
        let mut slot = ProcessSlot::new(
            "copy".into(),
            vec![a],
            Box::new(move |ctx: &mut EvalContext<'_>| {
                let v = ctx.read(a);
                ctx.write(y, v);
            }),
        );
        assert!(slot.is_triggered(&store));
        let mut deferred = Vec::new();
        slot.run(&mut EvalContext::new(&mut store, &mut deferred));
        assert!(!slot.is_triggered(&store));

        store.write(a, 9);
        assert!(slot.is_triggered(&store));
        slot.run(&mut EvalContext::new(&mut store, &mut deferred));
        assert_eq!(store.read(y), 9);
        assert!(!slot.is_triggered(&store));
    }

    #[test]
    fn writing_own_input_retriggers() {
        let (mut store, ids) = store_with(&[8]);
        let x = ids[0];
        let mut slot = ProcessSlot::new(
            "inc".into(),
            vec![x],
            Box::new(move |ctx: &mut EvalContext<'_>| {
                let v = ctx.read(x);
                ctx.write(x, v + 1);
            }),
        );
        let mut deferred = Vec::new();
        slot.run(&mut EvalContext::new(&mut store, &mut deferred));
        assert!(slot.is_triggered(&store));
    }

    #[test]
    fn schedule_defers_write() {
        let (mut store, ids) = store_with(&[4]);
        let q = ids[0];
        let mut deferred = Vec::new();
        let mut ctx = EvalContext::new(&mut store, &mut deferred);
        ctx.schedule(q, 3);
        assert_eq!(ctx.read(q), 0);
        assert_eq!(deferred, vec![(q, 3)]);
    }

    #[test]
    fn unwatched_change_does_not_trigger() {
        let (mut store, ids) = store_with(&[1, 1]);
        let mut slot = ProcessSlot::new("noop".into(), vec![ids[0]], Box::new(|_: &mut EvalContext<'_>| {}));
        let mut deferred = Vec::new();
        slot.run(&mut EvalContext::new(&mut store, &mut deferred));
        store.write(ids[1], 1);
        assert!(!slot.is_triggered(&store));
    }
}
