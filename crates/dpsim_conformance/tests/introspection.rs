//! Scope-table lookups, access control and teardown of the harness model.

use dpsim_conformance::datapath;
use dpsim_datapath::paths;
use dpsim_sim::{Access, ScopeKind, SignalKind, SimError};
use dpsim_units::PACKAGE_PARAMS;

#[test]
fn alu_result_is_a_32_bit_output() {
    let dp = datapath();
    let id = dp.model().lookup("harness.alu.o_Alu_Result").unwrap();
    let info = dp.model().signal_info(id);
    assert_eq!(info.width(), 32);
    assert_eq!(info.kind, SignalKind::Output);
    assert_eq!(info.access, Access::ReadOnly);
    assert_eq!(id, dp.ports().alu.result);
}

#[test]
fn harness_cannot_drive_outputs() {
    let mut dp = datapath();
    assert_eq!(
        dp.model_mut().write_path(paths::ALU_RESULT, 1).unwrap_err(),
        SimError::ReadOnlySignal {
            path: paths::ALU_RESULT.into()
        }
    );
    let input = dp.model().lookup(paths::ALU_INPUT_A).unwrap();
    assert_eq!(dp.model().signal_info(input).access, Access::ReadWrite);
}

#[test]
fn unknown_path_is_not_found() {
    let dp = datapath();
    assert_eq!(
        dp.model().lookup("nonexistent.path").unwrap_err(),
        SimError::SignalNotFound {
            path: "nonexistent.path".into()
        }
    );
    assert!(matches!(
        dp.model().lookup("harness.alu"),
        Err(SimError::SignalNotFound { .. })
    ));
}

#[test]
fn instruction_port_keeps_declared_range() {
    let dp = datapath();
    let id = dp.model().lookup(paths::IMM_INSTRUCTION).unwrap();
    let info = dp.model().signal_info(id);
    assert_eq!(info.range.to_string(), "[31:7]");
    assert_eq!(info.width(), 25);
}

#[test]
fn package_parameters_are_registered_read_only() {
    let mut dp = datapath();
    for param in PACKAGE_PARAMS {
        let path = format!("$unit.{}", param.name);
        let id = dp.model().lookup(&path).unwrap();
        let info = dp.model().signal_info(id);
        assert_eq!(info.kind, SignalKind::Parameter);
        assert_eq!(info.access, Access::ReadOnly);
        assert_eq!(info.range.msb(), param.msb, "{path}");
        assert_eq!(dp.model().read(id), param.value, "{path}");
    }
    let err = dp.model_mut().write_path("$unit.ALU_SEL_ADD", 1).unwrap_err();
    assert_eq!(
        err,
        SimError::ReadOnlySignal {
            path: "$unit.ALU_SEL_ADD".into()
        }
    );
}

#[test]
fn harness_parameters() {
    let dp = datapath();
    assert_eq!(dp.model().read_path("harness.XLEN").unwrap(), 32);
    assert_eq!(dp.model().read_path("harness.REG_ADDR_WIDTH").unwrap(), 5);
    assert_eq!(dp.model().read_path("$unit.ALU_SEL_UNKNOWN").unwrap(), 8);
    assert_eq!(dp.model().read_path("$unit.CMP_SEL_UNKNOWN").unwrap(), 6);
}

#[test]
fn scope_tree() {
    let dp = datapath();
    let model = dp.model();
    let unit = model.scope("$unit").unwrap();
    assert_eq!(unit.kind(), ScopeKind::Package);
    assert_eq!(unit.parent(), None);

    let harness = model.scope("harness").unwrap();
    assert_eq!(harness.kind(), ScopeKind::Module);
    let children: Vec<_> = harness
        .children()
        .iter()
        .map(|&c| model.scopes().get(c).path().to_string())
        .collect();
    assert_eq!(
        children,
        vec![
            "harness.alu",
            "harness.comparator_unit",
            "harness.immediate_unit"
        ]
    );
    assert_eq!(model.scopes().roots().count(), 2);
    assert_eq!(
        model.scope("harness.comparator_unit").unwrap().def_name(),
        "comparator_unit"
    );
    assert!(matches!(
        model.scope("harness.fpu"),
        Err(SimError::ScopeNotFound { .. })
    ));
}

#[test]
fn unit_ports_listed_by_prefix() {
    let dp = datapath();
    let ports: Vec<_> = dp
        .model()
        .signals_matching("harness.comparator_unit.")
        .map(|(path, _)| path.rsplit('.').next().unwrap_or(path).to_string())
        .collect();
    assert_eq!(
        ports,
        vec!["i_Compare_Select", "i_Input_A", "i_Input_B", "o_Compare_Result"]
    );
}

#[test]
fn teardown_is_reverse_of_construction() {
    let dp = datapath();
    let order = dp.destroy();
    assert_eq!(order.first().map(String::as_str), Some("harness.immediate_unit"));
    assert_eq!(order.last().map(String::as_str), Some("$unit"));
    let harness = order.iter().position(|p| p == "harness").unwrap();
    let alu = order.iter().position(|p| p == "harness.alu").unwrap();
    assert!(alu < harness);
}
