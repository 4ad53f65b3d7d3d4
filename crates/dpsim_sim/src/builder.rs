//! Incremental construction of a [`Model`].
//!
//! The builder registers scopes, signals and processes; [`ModelBuilder::build`]
//! freezes them into a model whose every process is pending its settle run.

use dpsim_common::BitRange;
use dpsim_config::{FatalPolicy, SimConfig};
use tracing::{debug, info};

use crate::error::SimError;
use crate::model::Model;
use crate::process::{Evaluate, ProcessSlot};
use crate::region::{Region, RegionState};
use crate::scheduler::{IterationCaps, Scheduler};
use crate::scope::{ScopeId, ScopeKind, ScopeTable};
use crate::signal::{SignalId, SignalInfo, SignalKind};
use crate::store::SignalStore;

/// Builds a [`Model`] from scopes, signals and processes.
pub struct ModelBuilder {
    store: SignalStore,
    scopes: ScopeTable,
    /// Indexed by [`Region::index`].
    processes: Vec<Vec<ProcessSlot>>,
    caps: IterationCaps,
    policy: FatalPolicy,
    dump_triggers: bool,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

impl ModelBuilder {
    /// Creates a builder using the scheduler and trace settings of `config`.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            store: SignalStore::new(),
            scopes: ScopeTable::new(),
            processes: Region::ALL.iter().map(|_| Vec::new()).collect(),
            caps: IterationCaps::from(&config.scheduler),
            policy: config.scheduler.on_non_convergence,
            dump_triggers: config.trace.dump_triggers,
        }
    }

    /// Overrides every region's iteration cap.
    pub fn with_caps(mut self, caps: IterationCaps) -> Self {
        self.caps = caps;
        self
    }

    /// Overrides the non-convergence policy.
    pub fn with_policy(mut self, policy: FatalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a root package scope.
    pub fn package(&mut self, name: &str) -> Result<ScopeId, SimError> {
        self.scopes.add_scope(None, name, name, ScopeKind::Package)
    }

    /// Adds a module instance `name` of definition `def_name`.
    pub fn module(
        &mut self,
        parent: Option<ScopeId>,
        name: &str,
        def_name: &str,
    ) -> Result<ScopeId, SimError> {
        self.scopes.add_scope(parent, name, def_name, ScopeKind::Module)
    }

    /// Declares a signal `[msb:lsb]` in `scope`, initially zero.
    pub fn signal(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SignalKind,
        msb: u32,
        lsb: u32,
    ) -> Result<SignalId, SimError> {
        self.declare(scope, name, kind, msb, lsb, 0)
    }

    /// Declares an input port.
    pub fn input(&mut self, scope: ScopeId, name: &str, msb: u32, lsb: u32) -> Result<SignalId, SimError> {
        self.signal(scope, name, SignalKind::Input, msb, lsb)
    }

    /// Declares an output port.
    pub fn output(&mut self, scope: ScopeId, name: &str, msb: u32, lsb: u32) -> Result<SignalId, SimError> {
        self.signal(scope, name, SignalKind::Output, msb, lsb)
    }

    /// Declares an internal wire.
    pub fn wire(&mut self, scope: ScopeId, name: &str, msb: u32, lsb: u32) -> Result<SignalId, SimError> {
        self.signal(scope, name, SignalKind::Internal, msb, lsb)
    }

    /// Declares a read-only `[msb:0]` parameter holding `value`.
    pub fn parameter(
        &mut self,
        scope: ScopeId,
        name: &str,
        msb: u32,
        value: u64,
    ) -> Result<SignalId, SimError> {
        self.declare(scope, name, SignalKind::Parameter, msb, 0, value)
    }

    fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SignalKind,
        msb: u32,
        lsb: u32,
        initial: u64,
    ) -> Result<SignalId, SimError> {
        let path = self.scopes.signal_path(scope, name)?;
        let range = BitRange::new(msb, lsb).map_err(|_| SimError::InvalidWidth {
            path: path.clone(),
            msb,
            lsb,
        })?;
        if self.scopes.lookup_signal(&path).is_ok() {
            return Err(SimError::DuplicatePath { path });
        }
        let id = self.store.alloc(
            SignalInfo {
                name: name.to_string(),
                path,
                range,
                kind,
                access: kind.default_access(),
                scope,
            },
            initial,
        );
        self.scopes.add_signal(scope, name, id)?;
        Ok(id)
    }

    /// Registers a process in `region`, triggered by changes to any of
    /// `sensitivity`. Processes of a region run in registration order.
    pub fn process(
        &mut self,
        region: Region,
        name: &str,
        sensitivity: &[SignalId],
        body: impl Evaluate + 'static,
    ) {
        debug!(region = %region, process = name, inputs = sensitivity.len(), "registering process");
        self.processes[region.index()].push(ProcessSlot::new(
            name.to_string(),
            sensitivity.to_vec(),
            Box::new(body),
        ));
    }

    /// Freezes the builder into a model.
    pub fn build(self) -> Model {
        let regions = Region::ALL
            .into_iter()
            .zip(self.processes)
            .map(|(region, procs)| RegionState::new(region, procs))
            .collect();
        let scheduler = Scheduler::new(regions, self.caps, self.dump_triggers);
        info!(
            scopes = self.scopes.len(),
            signals = self.store.len(),
            processes = scheduler.process_count(),
            "model constructed"
        );
        Model::new(self.store, self.scopes, scheduler, self.policy)
    }
}
