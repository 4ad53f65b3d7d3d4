//! Building the harness from a `dpsim.toml` on disk.

use dpsim_config::{load_config, ConfigError, FatalPolicy, CONFIG_FILE_NAME};
use dpsim_conformance::datapath_with;
use dpsim_sim::Region;

fn write_config(dir: &tempfile::TempDir, body: &str) {
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), body).unwrap();
}

#[test]
fn harness_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        &dir,
        r#"
[scheduler]
max_iterations = 8
on_non_convergence = "panic"

[model]
top = "tb"
"#,
    );
    let config = load_config(dir.path()).unwrap();
    let mut dp = datapath_with(&config);
    assert_eq!(dp.model().caps().get(Region::NonBlocking), 8);
    assert_eq!(dp.model().policy(), FatalPolicy::Panic);

    dp.model_mut().write_path("tb.alu.i_Input_A", 5).unwrap();
    dp.model_mut().write_path("tb.alu.i_Input_B", 7).unwrap();
    dp.eval();
    assert_eq!(dp.model().read_path("tb.alu.o_Alu_Result").unwrap(), 12);
}

#[test]
fn invalid_top_is_rejected_before_construction() {
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, "[model]\ntop = \"\"\n");
    assert!(matches!(
        load_config(dir.path()),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_config(dir.path()), Err(ConfigError::IoError(_))));
}
