//! The simulation model: signal store, scope table and scheduler.
//!
//! A [`Model`] is driven strictly in the order write inputs, [`eval`], read
//! outputs. All mutation goes through `&mut Model`.
//!
//! [`eval`]: Model::eval

use dpsim_config::FatalPolicy;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::SimError;
use crate::region::Region;
use crate::scheduler::{EvalStats, IterationCaps, Scheduler};
use crate::scope::{ScopeNode, ScopeTable};
use crate::signal::{Access, SignalId, SignalInfo, SignalKind};
use crate::store::SignalStore;

/// One signal's state as captured by [`Model::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalSnapshot {
    /// Full dotted path.
    pub path: String,
    /// Width in bits.
    pub width: u32,
    /// Port, wire, or parameter.
    pub kind: SignalKind,
    /// Current value.
    pub value: u64,
}

/// A constructed simulation model.
///
/// Build one with [`ModelBuilder`](crate::ModelBuilder).
pub struct Model {
    store: SignalStore,
    scopes: ScopeTable,
    scheduler: Scheduler,
    policy: FatalPolicy,
}

impl Model {
    pub(crate) fn new(
        store: SignalStore,
        scopes: ScopeTable,
        scheduler: Scheduler,
        policy: FatalPolicy,
    ) -> Self {
        Self {
            store,
            scopes,
            scheduler,
            policy,
        }
    }

    /// Resolves a full dotted signal path to a handle.
    pub fn lookup(&self, path: &str) -> Result<SignalId, SimError> {
        self.scopes.lookup_signal(path)
    }

    /// Metadata of a signal.
    pub fn signal_info(&self, id: SignalId) -> &SignalInfo {
        self.store.info(id)
    }

    /// Resolves a full dotted scope path.
    pub fn scope(&self, path: &str) -> Result<&ScopeNode, SimError> {
        let id = self.scopes.lookup_scope(path)?;
        Ok(self.scopes.get(id))
    }

    /// The scope hierarchy.
    pub fn scopes(&self) -> &ScopeTable {
        &self.scopes
    }

    /// Every signal whose full path starts with `prefix`, sorted by path.
    pub fn signals_matching<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, SignalId)> + 'a {
        self.scopes.signals_with_prefix(prefix)
    }

    /// Current value of a signal, zero-extended.
    pub fn read(&self, id: SignalId) -> u64 {
        self.store.read(id)
    }

    /// Current value of a signal, sign-extended from its width.
    pub fn read_signed(&self, id: SignalId) -> i64 {
        self.store.read_signed(id)
    }

    /// Reads a signal by path.
    pub fn read_path(&self, path: &str) -> Result<u64, SimError> {
        Ok(self.read(self.lookup(path)?))
    }

    /// Writes a harness value, masked to the signal's width. Takes effect on
    /// the next [`eval`](Model::eval).
    pub fn write(&mut self, id: SignalId, value: u64) -> Result<(), SimError> {
        let info = self.store.info(id);
        if info.access == Access::ReadOnly {
            return Err(SimError::ReadOnlySignal {
                path: info.path.clone(),
            });
        }
        self.store.write(id, value);
        Ok(())
    }

    /// Writes a signal by path.
    pub fn write_path(&mut self, path: &str, value: u64) -> Result<(), SimError> {
        let id = self.lookup(path)?;
        self.write(id, value)
    }

    /// Settles every region, applying the configured [`FatalPolicy`] if a
    /// region does not converge.
    pub fn eval(&mut self) -> EvalStats {
        match self.try_eval() {
            Ok(stats) => stats,
            Err(err) => self.fatal(&err),
        }
    }

    /// Settles every region, returning [`SimError::NonConvergence`] instead
    /// of applying the fatal policy.
    pub fn try_eval(&mut self) -> Result<EvalStats, SimError> {
        self.scheduler.eval(&mut self.store)
    }

    fn fatal(&self, err: &SimError) -> ! {
        let message = match err {
            SimError::NonConvergence { region, .. } => region.fatal_message().to_string(),
            other => other.to_string(),
        };
        error!(error = %err, "{message}");
        match self.policy {
            FatalPolicy::Abort => std::process::abort(),
            FatalPolicy::Panic => panic!("{message}"),
        }
    }

    /// Captures every signal in registration order.
    pub fn snapshot(&self) -> Vec<SignalSnapshot> {
        self.store
            .iter()
            .map(|(id, info)| SignalSnapshot {
                path: info.path.clone(),
                width: info.width(),
                kind: info.kind,
                value: self.store.read(id),
            })
            .collect()
    }

    /// Number of signals.
    pub fn signal_count(&self) -> usize {
        self.store.len()
    }

    /// Number of processes over all regions.
    pub fn process_count(&self) -> usize {
        self.scheduler.process_count()
    }

    /// Number of processes in one region.
    pub fn region_process_count(&self, region: Region) -> usize {
        self.scheduler.region_process_count(region)
    }

    /// The iteration caps in effect.
    pub fn caps(&self) -> IterationCaps {
        self.scheduler.caps()
    }

    /// The non-convergence policy in effect.
    pub fn policy(&self) -> FatalPolicy {
        self.policy
    }

    /// Tears the model down, removing scopes child-first. Returns the scope
    /// paths in removal order.
    pub fn destroy(self) -> Vec<String> {
        let order = self.scopes.teardown_order();
        for path in &order {
            debug!(scope = %path, "removing scope");
        }
        info!(scopes = order.len(), signals = self.store.len(), "model destroyed");
        order
    }
}
