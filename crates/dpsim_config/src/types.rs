//! Configuration types deserialized from `dpsim.toml`.

use serde::Deserialize;

/// Iteration cap applied to every region unless overridden.
///
/// One hundred, as in Verilated evaluation loops.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Name of the top-level scope of the datapath model.
pub const DEFAULT_TOP: &str = "harness";

/// The top-level configuration parsed from `dpsim.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Convergence loop settings.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Model construction settings.
    #[serde(default)]
    pub model: ModelConfig,
    /// Diagnostic output settings.
    #[serde(default)]
    pub trace: TraceConfig,
}

/// What `eval` does once a region fails to converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatalPolicy {
    /// Log the failure and abort the process.
    #[default]
    Abort,
    /// Log the failure and panic with the region message, so an embedding
    /// harness can catch the unwind.
    Panic,
}

/// Iteration caps and the non-convergence policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Cap shared by every region without an explicit override.
    #[serde(default = "SchedulerConfig::default_max_iterations")]
    pub max_iterations: u32,
    /// Override for the input-combinational region.
    #[serde(default)]
    pub input_combo_max_iterations: Option<u32>,
    /// Override for the active region.
    #[serde(default)]
    pub active_max_iterations: Option<u32>,
    /// Override for the non-blocking-assign region.
    #[serde(default)]
    pub nba_max_iterations: Option<u32>,
    /// Behaviour on non-convergence.
    #[serde(default)]
    pub on_non_convergence: FatalPolicy,
}

impl SchedulerConfig {
    fn default_max_iterations() -> u32 {
        DEFAULT_MAX_ITERATIONS
    }

    /// Effective cap for the input-combinational region.
    pub fn input_combo_cap(&self) -> u32 {
        self.input_combo_max_iterations
            .unwrap_or(self.max_iterations)
    }

    /// Effective cap for the active region.
    pub fn active_cap(&self) -> u32 {
        self.active_max_iterations.unwrap_or(self.max_iterations)
    }

    /// Effective cap for the non-blocking-assign region.
    pub fn nba_cap(&self) -> u32 {
        self.nba_max_iterations.unwrap_or(self.max_iterations)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            input_combo_max_iterations: None,
            active_max_iterations: None,
            nba_max_iterations: None,
            on_non_convergence: FatalPolicy::Abort,
        }
    }
}

/// Model construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Local name of the top scope; must not contain `.`.
    #[serde(default = "ModelConfig::default_top")]
    pub top: String,
}

impl ModelConfig {
    fn default_top() -> String {
        DEFAULT_TOP.to_string()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP.to_string(),
        }
    }
}

/// Diagnostic output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Log the pending trigger bits of a region before reporting its
    /// non-convergence.
    #[serde(default = "TraceConfig::default_dump_triggers")]
    pub dump_triggers: bool,
}

impl TraceConfig {
    fn default_dump_triggers() -> bool {
        true
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            dump_triggers: true,
        }
    }
}
