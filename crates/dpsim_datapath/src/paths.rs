//! Full signal paths of the default (`harness`) hierarchy.

/// `harness.alu.i_Alu_Select`
pub const ALU_SELECT: &str = "harness.alu.i_Alu_Select";
/// `harness.alu.i_Input_A`
pub const ALU_INPUT_A: &str = "harness.alu.i_Input_A";
/// `harness.alu.i_Input_B`
pub const ALU_INPUT_B: &str = "harness.alu.i_Input_B";
/// `harness.alu.o_Alu_Result`
pub const ALU_RESULT: &str = "harness.alu.o_Alu_Result";

/// `harness.comparator_unit.i_Compare_Select`
pub const CMP_SELECT: &str = "harness.comparator_unit.i_Compare_Select";
/// `harness.comparator_unit.i_Input_A`
pub const CMP_INPUT_A: &str = "harness.comparator_unit.i_Input_A";
/// `harness.comparator_unit.i_Input_B`
pub const CMP_INPUT_B: &str = "harness.comparator_unit.i_Input_B";
/// `harness.comparator_unit.o_Compare_Result`
pub const CMP_RESULT: &str = "harness.comparator_unit.o_Compare_Result";

/// `harness.immediate_unit.i_Imm_Select`
pub const IMM_SELECT: &str = "harness.immediate_unit.i_Imm_Select";
/// `harness.immediate_unit.i_Instruction_No_Opcode`
pub const IMM_INSTRUCTION: &str = "harness.immediate_unit.i_Instruction_No_Opcode";
/// `harness.immediate_unit.o_Immediate`
pub const IMM_RESULT: &str = "harness.immediate_unit.o_Immediate";

/// Every unit port path, in declaration order.
pub const ALL_PORTS: [&str; 11] = [
    ALU_SELECT,
    ALU_INPUT_A,
    ALU_INPUT_B,
    ALU_RESULT,
    CMP_SELECT,
    CMP_INPUT_A,
    CMP_INPUT_B,
    CMP_RESULT,
    IMM_SELECT,
    IMM_INSTRUCTION,
    IMM_RESULT,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Datapath;
    use dpsim_config::SimConfig;

    #[test]
    fn every_path_resolves_in_default_harness() {
        let dp = Datapath::new(&SimConfig::default()).unwrap();
        for path in ALL_PORTS {
            let id = dp.model().lookup(path).unwrap();
            assert_eq!(dp.model().signal_info(id).path, path);
        }
        assert_eq!(dp.model().signals_matching("harness.").count(), ALL_PORTS.len() + 2);
    }
}
