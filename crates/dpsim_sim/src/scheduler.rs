//! Bounded fixed-point evaluation across regions.
//!
//! One call to [`Scheduler::eval`] settles the model:
//!
//! 1. The input-combinational region runs until none of its processes is
//!    triggered.
//! 2. The outer non-blocking loop then repeats: run the active region to a
//!    fixed point, latching the non-blocking region's triggers on every
//!    active trigger computation; run the triggered non-blocking processes and
//!    commit deferred writes. It stops once a non-blocking phase has no work.
//!
//! Every loop checks its counter before each phase and fails once the counter
//! exceeds the region's cap, so a loop that never settles performs `cap + 1`
//! working phases before reporting [`SimError::NonConvergence`].

use dpsim_config::SchedulerConfig;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::SimError;
use crate::region::{Region, RegionState};
use crate::signal::SignalId;
use crate::store::SignalStore;

/// Iteration counts from one settled evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvalStats {
    /// Input-combinational phases that ran at least one process.
    pub input_combo_iterations: u32,
    /// Active phases that ran at least one process, over all outer iterations.
    pub active_iterations: u32,
    /// Non-blocking phases that did work.
    pub nba_iterations: u32,
    /// Passes of the outer non-blocking loop.
    pub outer_iterations: u32,
    /// Total process bodies evaluated.
    pub process_runs: u64,
}

/// Per-region iteration caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationCaps {
    /// Cap for [`Region::InputCombo`].
    pub input_combo: u32,
    /// Cap for [`Region::Active`].
    pub active: u32,
    /// Cap for [`Region::NonBlocking`].
    pub nba: u32,
}

impl IterationCaps {
    /// The same cap for every region.
    pub fn uniform(cap: u32) -> Self {
        Self {
            input_combo: cap,
            active: cap,
            nba: cap,
        }
    }

    /// The cap of `region`.
    pub fn get(&self, region: Region) -> u32 {
        match region {
            Region::InputCombo => self.input_combo,
            Region::Active => self.active,
            Region::NonBlocking => self.nba,
        }
    }
}

impl From<&SchedulerConfig> for IterationCaps {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            input_combo: config.input_combo_cap(),
            active: config.active_cap(),
            nba: config.nba_cap(),
        }
    }
}

/// Owns the region process sets and runs the convergence loops.
pub(crate) struct Scheduler {
    /// Indexed by [`Region::index`].
    regions: Vec<RegionState>,
    /// Writes scheduled with `EvalContext::schedule`, awaiting the
    /// non-blocking commit.
    deferred: Vec<(SignalId, u64)>,
    caps: IterationCaps,
    dump_triggers: bool,
}

impl Scheduler {
    pub(crate) fn new(regions: Vec<RegionState>, caps: IterationCaps, dump_triggers: bool) -> Self {
        debug_assert!(regions
            .iter()
            .zip(Region::ALL)
            .all(|(state, region)| state.region() == region));
        Self {
            regions,
            deferred: Vec::new(),
            caps,
            dump_triggers,
        }
    }

    pub(crate) fn caps(&self) -> IterationCaps {
        self.caps
    }

    pub(crate) fn process_count(&self) -> usize {
        self.regions.iter().map(RegionState::process_count).sum()
    }

    pub(crate) fn region_process_count(&self, region: Region) -> usize {
        self.regions[region.index()].process_count()
    }

    /// Settles the model.
    pub(crate) fn eval(&mut self, store: &mut SignalStore) -> Result<EvalStats, SimError> {
        let mut stats = EvalStats::default();

        let mut count = 0;
        loop {
            self.check_cap(Region::InputCombo, count, store)?;
            count += 1;
            if !self.eval_phase(Region::InputCombo, store, &mut stats) {
                break;
            }
        }

        let mut outer = 0;
        loop {
            self.check_cap(Region::NonBlocking, outer, store)?;
            outer += 1;
            stats.outer_iterations += 1;

            let mut active = 0;
            loop {
                self.check_cap(Region::Active, active, store)?;
                active += 1;
                if !self.eval_phase(Region::Active, store, &mut stats) {
                    break;
                }
            }

            if !self.eval_phase(Region::NonBlocking, store, &mut stats) {
                break;
            }
        }

        debug!(
            input_combo = stats.input_combo_iterations,
            active = stats.active_iterations,
            nba = stats.nba_iterations,
            outer = stats.outer_iterations,
            runs = stats.process_runs,
            "evaluation settled"
        );
        Ok(stats)
    }

    /// Runs one phase of `region`. Returns whether it did any work.
    pub(crate) fn eval_phase(
        &mut self,
        region: Region,
        store: &mut SignalStore,
        stats: &mut EvalStats,
    ) -> bool {
        match region {
            Region::InputCombo | Region::Active => {
                let state = &mut self.regions[region.index()];
                let triggered = state.compute_triggers(store);
                if region == Region::Active {
                    self.regions[Region::NonBlocking.index()].latch_triggers(store);
                }
                if !triggered {
                    return false;
                }
                let state = &mut self.regions[region.index()];
                debug!(
                    region = %region,
                    triggers = %state.triggers(),
                    fired = state.triggers().count(),
                    "evaluating region"
                );
                stats.process_runs += state.run_triggered(store, &mut self.deferred);
                match region {
                    Region::InputCombo => stats.input_combo_iterations += 1,
                    _ => stats.active_iterations += 1,
                }
                true
            }
            Region::NonBlocking => {
                let state = &mut self.regions[region.index()];
                if !state.triggers().any() && self.deferred.is_empty() {
                    return false;
                }
                debug!(
                    region = %region,
                    triggers = %state.triggers(),
                    fired = state.triggers().count(),
                    "evaluating region"
                );
                stats.process_runs += state.run_triggered(store, &mut self.deferred);
                for (id, value) in self.deferred.drain(..) {
                    store.write(id, value);
                }
                stats.nba_iterations += 1;
                true
            }
        }
    }

    /// Fails once `count` exceeds the cap of `region`.
    fn check_cap(&self, region: Region, count: u32, store: &SignalStore) -> Result<(), SimError> {
        let max_iterations = self.caps.get(region);
        if count <= max_iterations {
            return Ok(());
        }
        if self.dump_triggers {
            self.dump_region_triggers(region, store);
        }
        Err(SimError::NonConvergence {
            region,
            max_iterations,
        })
    }

    fn dump_region_triggers(&self, region: Region, store: &SignalStore) {
        let state = &self.regions[region.index()];
        let pending = state.pending_triggers(store);
        error!(region = %region, triggers = %pending, "pending triggers");
        for index in pending.iter_set() {
            error!(
                region = %region,
                index,
                process = %state.process_name(index),
                "trigger is active"
            );
        }
    }
}
