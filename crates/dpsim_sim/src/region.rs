//! Evaluation regions and their per-region process sets.
//!
//! A [`Region`] groups processes that are scheduled together. Each region owns
//! its processes and a [`TriggerVector`] with one bit per process; the
//! scheduler decides when bits are computed, run and cleared.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::process::{EvalContext, ProcessSlot};
use crate::signal::SignalId;
use crate::store::SignalStore;
use crate::trigger::TriggerVector;

/// The evaluation regions, in scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Combinational logic fed directly from harness inputs. Settles first.
    InputCombo,
    /// Logic re-evaluated inside the outer loop.
    Active,
    /// Non-blocking-assign region; commits deferred writes.
    NonBlocking,
}

impl Region {
    /// Every region, in scheduling order.
    pub const ALL: [Region; 3] = [Region::InputCombo, Region::Active, Region::NonBlocking];

    /// The message reported when this region exceeds its iteration cap.
    pub fn fatal_message(self) -> &'static str {
        match self {
            Region::InputCombo => "Input combinational region did not converge.",
            Region::Active => "Active region did not converge.",
            Region::NonBlocking => "NBA region did not converge.",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Region::InputCombo => "Input combinational",
            Region::Active => "Active",
            Region::NonBlocking => "NBA",
        })
    }
}

/// The processes of one region and its pending trigger bits.
pub(crate) struct RegionState {
    region: Region,
    processes: Vec<ProcessSlot>,
    triggers: TriggerVector,
}

impl RegionState {
    pub(crate) fn new(region: Region, processes: Vec<ProcessSlot>) -> Self {
        let triggers = TriggerVector::new(processes.len());
        Self {
            region,
            processes,
            triggers,
        }
    }

    pub(crate) fn region(&self) -> Region {
        self.region
    }

    pub(crate) fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub(crate) fn triggers(&self) -> &TriggerVector {
        &self.triggers
    }

    pub(crate) fn process_name(&self, index: usize) -> &str {
        &self.processes[index].name
    }

    /// A fresh vector with the bit of every process whose watched inputs
    /// changed since it last ran.
    fn fired(&self, store: &SignalStore) -> TriggerVector {
        let mut fired = TriggerVector::new(self.processes.len());
        for (i, proc) in self.processes.iter().enumerate() {
            if proc.is_triggered(store) {
                fired.set(i);
            }
        }
        fired
    }

    /// ORs the freshly fired bits into the vector, keeping bits that are
    /// already set. Returns whether any bit is set afterwards.
    pub(crate) fn latch_triggers(&mut self, store: &SignalStore) -> bool {
        let fired = self.fired(store);
        self.triggers.or_assign(&fired);
        self.triggers.any()
    }

    /// The bits that are set plus those a fresh computation would set,
    /// without modifying the vector.
    pub(crate) fn pending_triggers(&self, store: &SignalStore) -> TriggerVector {
        let mut pending = self.triggers.clone();
        pending.or_assign(&self.fired(store));
        pending
    }

    /// Recomputes the trigger vector from scratch.
    pub(crate) fn compute_triggers(&mut self, store: &SignalStore) -> bool {
        self.triggers = self.fired(store);
        self.triggers.any()
    }

    /// Runs every process whose bit is set, in registration order, then
    /// clears the vector. Returns the number of processes run.
    pub(crate) fn run_triggered(
        &mut self,
        store: &mut SignalStore,
        deferred: &mut Vec<(SignalId, u64)>,
    ) -> u64 {
        let mut runs = 0;
        let region = self.region;
        for index in self.triggers.iter_set() {
            let proc = &mut self.processes[index];
            debug!(region = %region, process = %proc.name, "running process");
            let mut ctx = EvalContext::new(store, deferred);
            proc.run(&mut ctx);
            runs += 1;
        }
        self.triggers.clear_all();
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeId;
    use crate::signal::{Access, SignalInfo, SignalKind};
    use dpsim_common::BitRange;

    fn idle() -> Box<dyn crate::process::Evaluate> {
        Box::new(|_: &mut EvalContext<'_>| {})
    }

    /// A one-bit signal `s` watched by process 0; process 1 watches nothing.
    fn watched_pair() -> (SignalStore, SignalId, RegionState) {
        let mut store = SignalStore::new();
        let s = store.alloc(
            SignalInfo {
                name: "s".into(),
                path: "t.s".into(),
                range: BitRange::new(0, 0).unwrap(),
                kind: SignalKind::Internal,
                access: Access::ReadWrite,
                scope: ScopeId::from_raw(0),
            },
            0,
        );
        let state = RegionState::new(
            Region::NonBlocking,
            vec![
                ProcessSlot::new("watch_s".into(), vec![s], idle()),
                ProcessSlot::new("watch_none".into(), Vec::new(), idle()),
            ],
        );
        (store, s, state)
    }

    #[test]
    fn settle_pass_fires_every_process_once() {
        let (mut store, _, mut state) = watched_pair();
        assert!(state.latch_triggers(&store));
        assert_eq!(state.triggers().to_string(), "2'b11");
        let mut deferred = Vec::new();
        assert_eq!(state.run_triggered(&mut store, &mut deferred), 2);
        assert!(!state.triggers().any());
        assert!(!state.compute_triggers(&store));
    }

    #[test]
    fn latch_accumulates_where_compute_replaces() {
        let (mut store, s, mut state) = watched_pair();
        let mut deferred = Vec::new();
        state.latch_triggers(&store);
        state.run_triggered(&mut store, &mut deferred);

        // Bit 1 left over from an earlier latch; only `s` changes now.
        state.triggers.set(1);
        store.write(s, 1);
        assert!(state.latch_triggers(&store));
        assert_eq!(state.triggers().to_string(), "2'b11");
        assert_eq!(state.triggers().count(), 2);

        assert!(state.compute_triggers(&store));
        assert_eq!(state.triggers().to_string(), "2'b01");
    }

    #[test]
    fn pending_triggers_leave_the_vector_alone() {
        let (mut store, s, mut state) = watched_pair();
        let mut deferred = Vec::new();
        state.latch_triggers(&store);
        state.run_triggered(&mut store, &mut deferred);
        store.write(s, 1);
        let pending = state.pending_triggers(&store);
        assert_eq!(pending.to_string(), "2'b01");
        assert!(!state.triggers().any());
        assert_eq!(state.process_name(0), "watch_s");
    }

    #[test]
    fn fatal_messages_name_the_region() {
        assert_eq!(
            Region::InputCombo.fatal_message(),
            "Input combinational region did not converge."
        );
        assert_eq!(
            Region::Active.fatal_message(),
            "Active region did not converge."
        );
        assert_eq!(
            Region::NonBlocking.fatal_message(),
            "NBA region did not converge."
        );
    }

    #[test]
    fn regions_order_by_schedule() {
        assert!(Region::InputCombo < Region::Active);
        assert!(Region::Active < Region::NonBlocking);
        for (i, r) in Region::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn region_serializes_by_name() {
        let json = serde_json::to_string(&Region::NonBlocking).unwrap();
        assert_eq!(json, "\"NonBlocking\"");
    }
}
