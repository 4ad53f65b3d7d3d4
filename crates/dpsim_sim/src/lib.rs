//! Trigger-driven combinational simulation kernel.
//!
//! A [`Model`] holds every signal of a design in a width-masked
//! [`SignalStore`], indexes them by dotted path in a [`ScopeTable`], and runs
//! its processes to a fixed point on every [`Model::eval`]. Processes belong
//! to one of three [`Region`]s; each region keeps a [`TriggerVector`] with a
//! bit per process, re-evaluated while any bit is set and bounded by a
//! per-region iteration cap.
//!
//! Models are assembled with a [`ModelBuilder`]:
//!
//! ```
//! use dpsim_sim::{EvalContext, ModelBuilder, Region};
//!
//! let mut b = ModelBuilder::default();
//! let top = b.module(None, "top", "inverter").unwrap();
//! let a = b.input(top, "a", 0, 0).unwrap();
//! let y = b.output(top, "y", 0, 0).unwrap();
//! b.process(Region::InputCombo, "not", &[a], move |ctx: &mut EvalContext<'_>| {
//!     let v = ctx.read(a);
//!     ctx.write(y, !v);
//! });
//! let mut model = b.build();
//! model.eval();
//! assert_eq!(model.read(y), 1);
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod model;
pub mod process;
pub mod region;
pub mod scheduler;
pub mod scope;
pub mod signal;
pub mod store;
pub mod trigger;

pub use builder::ModelBuilder;
pub use error::SimError;
pub use model::{Model, SignalSnapshot};
pub use process::{EvalContext, Evaluate};
pub use region::Region;
pub use scheduler::{EvalStats, IterationCaps};
pub use scope::{ScopeId, ScopeKind, ScopeNode, ScopeTable};
pub use signal::{Access, SignalId, SignalInfo, SignalKind};
pub use store::SignalStore;
pub use trigger::TriggerVector;
