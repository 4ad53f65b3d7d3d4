//! The RISC-V datapath harness model.
//!
//! [`Datapath`] builds the `harness` hierarchy (ALU, branch comparator,
//! immediate decoder) on top of a [`dpsim_sim::Model`] and exposes typed port
//! handles alongside the generic path-based surface.
//!
//! ```
//! use dpsim_config::SimConfig;
//! use dpsim_datapath::{paths, Datapath};
//!
//! let mut dp = Datapath::new(&SimConfig::default()).unwrap();
//! let model = dp.model_mut();
//! model.write_path(paths::ALU_SELECT, 0).unwrap();
//! model.write_path(paths::ALU_INPUT_A, 0x7FFF_FFFF).unwrap();
//! model.write_path(paths::ALU_INPUT_B, 1).unwrap();
//! model.eval();
//! assert_eq!(model.read_path(paths::ALU_RESULT).unwrap(), 0x8000_0000);
//! ```

#![warn(missing_docs)]

pub mod harness;
pub mod paths;

use dpsim_config::SimConfig;
use dpsim_sim::{EvalStats, Model, SimError};

pub use harness::{AluPorts, ComparatorPorts, ImmediatePorts, Ports};

/// The harness model plus handles to every unit port.
pub struct Datapath {
    model: Model,
    ports: Ports,
}

impl Datapath {
    /// Builds the harness. The top scope is named after `config.model.top`.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let (model, ports) = harness::build(config)?;
        Ok(Self { model, ports })
    }

    /// The underlying model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The underlying model, for writes and evaluation.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Port handles of every unit.
    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Drives the ALU ports, settles the model and returns `o_Alu_Result`.
    pub fn alu(&mut self, select: u8, a: u32, b: u32) -> Result<u32, SimError> {
        let p = self.ports.alu;
        self.model.write(p.select, u64::from(select))?;
        self.model.write(p.input_a, u64::from(a))?;
        self.model.write(p.input_b, u64::from(b))?;
        self.model.eval();
        Ok(self.model.read(p.result) as u32)
    }

    /// Drives the comparator ports, settles the model and returns
    /// `o_Compare_Result`.
    pub fn compare(&mut self, select: u8, a: u32, b: u32) -> Result<bool, SimError> {
        let p = self.ports.comparator;
        self.model.write(p.select, u64::from(select))?;
        self.model.write(p.input_a, u64::from(a))?;
        self.model.write(p.input_b, u64::from(b))?;
        self.model.eval();
        Ok(self.model.read(p.result) == 1)
    }

    /// Drives the immediate decoder with a full instruction word (its opcode
    /// is dropped), settles the model and returns `o_Immediate`.
    pub fn immediate(&mut self, select: u8, instruction: u32) -> Result<u32, SimError> {
        let p = self.ports.immediate;
        self.model.write(p.select, u64::from(select))?;
        self.model
            .write(p.instruction, u64::from(dpsim_units::remainder_of(instruction)))?;
        self.model.eval();
        Ok(self.model.read(p.immediate) as u32)
    }

    /// Settles the model; see [`Model::eval`].
    pub fn eval(&mut self) -> EvalStats {
        self.model.eval()
    }

    /// Tears the model down; see [`Model::destroy`].
    pub fn destroy(self) -> Vec<String> {
        self.model.destroy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpsim_units::select::*;

    fn datapath() -> Datapath {
        Datapath::new(&SimConfig::default()).unwrap()
    }

    #[test]
    fn first_eval_settles_outputs_from_zero_inputs() {
        let mut dp = datapath();
        let stats = dp.eval();
        assert_eq!(stats.input_combo_iterations, 1);
        assert_eq!(stats.outer_iterations, 1);
        assert_eq!(stats.process_runs, 3);
        // BEQ of 0 and 0.
        assert_eq!(dp.model().read(dp.ports().comparator.result), 1);
        assert_eq!(dp.model().read(dp.ports().alu.result), 0);
    }

    #[test]
    fn only_touched_unit_reruns() {
        let mut dp = datapath();
        dp.eval();
        let p = dp.ports().alu;
        dp.model_mut().write(p.input_a, 5).unwrap();
        let stats = dp.eval();
        assert_eq!(stats.process_runs, 1);
        assert_eq!(dp.model().read(p.result), 5);
    }

    #[test]
    fn alu_helper() {
        let mut dp = datapath();
        assert_eq!(dp.alu(ALU_SEL_ADD, 0xFFFF_FFFF, 1).unwrap(), 0);
        assert_eq!(dp.alu(ALU_SEL_SRA, 0x8000_0000, 4).unwrap(), 0xF800_0000);
        assert_eq!(dp.alu(ALU_SEL_UNKNOWN, 1, 2).unwrap(), 0);
    }

    #[test]
    fn compare_helper() {
        let mut dp = datapath();
        assert!(dp.compare(CMP_SEL_BLT, 0x8000_0000, 1).unwrap());
        assert!(!dp.compare(CMP_SEL_BLTU, 0x8000_0000, 1).unwrap());
        assert!(!dp.compare(CMP_SEL_UNKNOWN, 3, 3).unwrap());
    }

    #[test]
    fn immediate_helper() {
        let mut dp = datapath();
        // lui x1, 0x12345
        assert_eq!(dp.immediate(IMM_U_TYPE, 0x1234_50B7).unwrap(), 0x1234_5000);
    }

    #[test]
    fn selector_bit_three_reaches_the_units() {
        let mut dp = datapath();
        // 0b1010 is BLTU with the guard bit set: the 4-bit port keeps it.
        assert!(!dp.compare(0b1010, 1, 2).unwrap());
        assert!(!dp.compare(8, 0, 0).unwrap());
        assert_eq!(dp.immediate(8 | 2, 0xFFF0_0093).unwrap(), 0);
        // Bits above the port width are masked away.
        assert!(dp.compare(0x10 | 2, 1, 2).unwrap());
    }

    #[test]
    fn destroy_removes_units_before_harness() {
        let dp = datapath();
        assert_eq!(
            dp.destroy(),
            vec![
                "harness.immediate_unit",
                "harness.comparator_unit",
                "harness.alu",
                "harness",
                "$unit",
            ]
        );
    }

    #[test]
    fn snapshot_includes_parameters() {
        let dp = datapath();
        let snap = dp.model().snapshot();
        let xlen = snap.iter().find(|s| s.path == "$unit.XLEN").unwrap();
        assert_eq!(xlen.value, 32);
        assert_eq!(xlen.width, 32);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("harness.immediate_unit.o_Immediate"));
    }
}
