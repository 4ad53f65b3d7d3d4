//! The default fatal policy ends the process. The test re-runs its own binary
//! as a child that evaluates a non-converging model under the default config.

use std::process::Command;

use dpsim_config::SimConfig;
use dpsim_conformance::oscillator;
use dpsim_sim::Region;
use tracing_subscriber::filter::LevelFilter;

const CHILD_ENV: &str = "DPSIM_ABORT_CHILD";
const TEST_NAME: &str = "default_policy_aborts_the_process";

fn run_child() -> ! {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(LevelFilter::ERROR)
        .try_init();
    let (mut model, _) = oscillator(&SimConfig::default(), Region::Active).unwrap();
    let _ = model.eval();
    panic!("eval returned from a non-converging model");
}

#[test]
fn default_policy_aborts_the_process() {
    if std::env::var_os(CHILD_ENV).is_some() {
        run_child();
    }

    let output = Command::new(std::env::current_exe().unwrap())
        .args([TEST_NAME, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();

    assert!(!output.status.success(), "child exited with {}", output.status);
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // SIGABRT
        assert_eq!(output.status.signal(), Some(6), "child exited with {}", output.status);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Active region did not converge."), "{stderr}");
    assert!(stderr.contains("pending triggers"), "{stderr}");
}
