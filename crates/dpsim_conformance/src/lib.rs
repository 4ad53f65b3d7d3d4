//! Shared fixtures for the conformance suite in `tests/`.
//!
//! - [`encode`]: raw RISC-V instruction encoders for immediate round-trips.
//! - [`datapath`] / [`datapath_with`]: harness construction with a panic
//!   policy so non-convergence surfaces as a test failure instead of an abort.
//! - [`oscillator`]: a minimal model that never converges.
//! - [`init_tracing`]: opt-in log output, filtered by `RUST_LOG`.
//! - [`capture_logs`]: error-level log output of a closure, as text.

use std::io;
use std::sync::{Arc, Mutex, Once, PoisonError};

use dpsim_config::{FatalPolicy, SimConfig};
use dpsim_datapath::Datapath;
use dpsim_sim::{EvalContext, Model, ModelBuilder, Region, SignalId, SimError};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

pub mod encode;

static TRACING: Once = Once::new();

/// Installs a `fmt` subscriber honouring `RUST_LOG`. Safe to call from every
/// test; only the first call has an effect.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The default configuration with [`FatalPolicy::Panic`].
pub fn test_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.scheduler.on_non_convergence = FatalPolicy::Panic;
    config
}

/// A freshly built harness using [`test_config`].
pub fn datapath() -> Datapath {
    datapath_with(&test_config())
}

/// A freshly built harness for `config`.
///
/// # Panics
///
/// Panics if the harness cannot be built from `config`.
pub fn datapath_with(config: &SimConfig) -> Datapath {
    init_tracing();
    match Datapath::new(config) {
        Ok(dp) => dp,
        Err(err) => panic!("harness construction failed: {err}"),
    }
}

/// An inverter in `region` whose output feeds its own input, so the model
/// never settles. The returned signal counts the inverter's runs.
pub fn oscillator(config: &SimConfig, region: Region) -> Result<(Model, SignalId), SimError> {
    let mut b = ModelBuilder::new(config);
    let top = b.module(None, "ring", "ring")?;
    let y = b.wire(top, "y", 0, 0)?;
    let ticks = b.wire(top, "ticks", 31, 0)?;
    b.process(region, "inverter", &[y], move |ctx: &mut EvalContext<'_>| {
        let v = ctx.read(y);
        ctx.write(y, !v);
        let t = ctx.read(ticks);
        ctx.write(ticks, t + 1);
    });
    Ok((b.build(), ticks))
}

/// A shared in-memory sink for a `fmt` subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a thread-local subscriber recording error-level events
/// without colour codes, and returns its result with the recorded text.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(LevelFilter::ERROR)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
