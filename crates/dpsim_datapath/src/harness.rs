//! Construction of the harness model.
//!
//! The hierarchy mirrors the HDL test harness:
//!
//! ```text
//! $unit                      package: selector codes and widths
//! harness                    XLEN, REG_ADDR_WIDTH
//! ├── alu                    arithmetic_logic_unit
//! ├── comparator_unit        comparator_unit
//! └── immediate_unit         immediate_unit
//! ```
//!
//! Each unit is one input-combinational process sensitive to its input ports.

use dpsim_config::SimConfig;
use dpsim_sim::{EvalContext, Model, ModelBuilder, Region, ScopeId, SignalId, SimError};
use dpsim_units::select::{ALU_SEL_WIDTH, CMP_SEL_WIDTH, IMM_SEL_WIDTH, REG_ADDR_WIDTH, XLEN};
use dpsim_units::{Alu, Comparator, ImmediateDecoder, PACKAGE_PARAMS};
use tracing::info;

/// Name of the compilation-unit package scope.
pub const UNIT_PACKAGE: &str = "$unit";

/// Instance and definition names of the ALU.
pub const ALU_INSTANCE: (&str, &str) = ("alu", "arithmetic_logic_unit");
/// Instance and definition names of the comparator.
pub const COMPARATOR_INSTANCE: (&str, &str) = ("comparator_unit", "comparator_unit");
/// Instance and definition names of the immediate decoder.
pub const IMMEDIATE_INSTANCE: (&str, &str) = ("immediate_unit", "immediate_unit");

/// Port range of the instruction remainder, in instruction bit positions.
const REMAINDER_MSB: u32 = 31;
const REMAINDER_LSB: u32 = 7;
const WORD_MSB: u32 = XLEN - 1;

/// Handles to the ALU ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluPorts {
    /// `i_Alu_Select[4:0]`
    pub select: SignalId,
    /// `i_Input_A[31:0]`
    pub input_a: SignalId,
    /// `i_Input_B[31:0]`
    pub input_b: SignalId,
    /// `o_Alu_Result[31:0]`
    pub result: SignalId,
}

/// Handles to the comparator ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparatorPorts {
    /// `i_Compare_Select[3:0]`
    pub select: SignalId,
    /// `i_Input_A[31:0]`
    pub input_a: SignalId,
    /// `i_Input_B[31:0]`
    pub input_b: SignalId,
    /// `o_Compare_Result`
    pub result: SignalId,
}

/// Handles to the immediate decoder ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediatePorts {
    /// `i_Imm_Select[3:0]`
    pub select: SignalId,
    /// `i_Instruction_No_Opcode[31:7]`
    pub instruction: SignalId,
    /// `o_Immediate[31:0]`
    pub immediate: SignalId,
}

/// Every unit's port handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ports {
    /// ALU ports.
    pub alu: AluPorts,
    /// Comparator ports.
    pub comparator: ComparatorPorts,
    /// Immediate decoder ports.
    pub immediate: ImmediatePorts,
}

/// Builds the harness model described by `config`.
pub fn build(config: &SimConfig) -> Result<(Model, Ports), SimError> {
    let mut b = ModelBuilder::new(config);

    let unit = b.package(UNIT_PACKAGE)?;
    for param in PACKAGE_PARAMS {
        b.parameter(unit, param.name, param.msb, param.value)?;
    }

    let top = b.module(None, &config.model.top, "harness")?;
    b.parameter(top, "REG_ADDR_WIDTH", 31, u64::from(REG_ADDR_WIDTH))?;
    b.parameter(top, "XLEN", 31, u64::from(XLEN))?;

    let alu = alu_unit(&mut b, top)?;
    let comparator = comparator_unit(&mut b, top)?;
    let immediate = immediate_unit(&mut b, top)?;

    let model = b.build();
    info!(top = %config.model.top, signals = model.signal_count(), "harness built");
    Ok((
        model,
        Ports {
            alu,
            comparator,
            immediate,
        },
    ))
}

fn alu_unit(b: &mut ModelBuilder, top: ScopeId) -> Result<AluPorts, SimError> {
    let (name, def) = ALU_INSTANCE;
    let scope = b.module(Some(top), name, def)?;
    let ports = AluPorts {
        select: b.input(scope, "i_Alu_Select", ALU_SEL_WIDTH, 0)?,
        input_a: b.input(scope, "i_Input_A", WORD_MSB, 0)?,
        input_b: b.input(scope, "i_Input_B", WORD_MSB, 0)?,
        result: b.output(scope, "o_Alu_Result", WORD_MSB, 0)?,
    };
    let p = ports;
    b.process(
        Region::InputCombo,
        "harness.alu",
        &[p.select, p.input_a, p.input_b],
        move |ctx: &mut EvalContext<'_>| {
            let result = Alu::evaluate(
                ctx.read(p.select) as u8,
                ctx.read(p.input_a) as u32,
                ctx.read(p.input_b) as u32,
            );
            ctx.write(p.result, u64::from(result));
        },
    );
    Ok(ports)
}

fn comparator_unit(b: &mut ModelBuilder, top: ScopeId) -> Result<ComparatorPorts, SimError> {
    let (name, def) = COMPARATOR_INSTANCE;
    let scope = b.module(Some(top), name, def)?;
    let ports = ComparatorPorts {
        select: b.input(scope, "i_Compare_Select", CMP_SEL_WIDTH, 0)?,
        input_a: b.input(scope, "i_Input_A", WORD_MSB, 0)?,
        input_b: b.input(scope, "i_Input_B", WORD_MSB, 0)?,
        result: b.output(scope, "o_Compare_Result", 0, 0)?,
    };
    let p = ports;
    b.process(
        Region::InputCombo,
        "harness.comparator_unit",
        &[p.select, p.input_a, p.input_b],
        move |ctx: &mut EvalContext<'_>| {
            let taken = Comparator::evaluate(
                ctx.read(p.select) as u8,
                ctx.read(p.input_a) as u32,
                ctx.read(p.input_b) as u32,
            );
            ctx.write(p.result, u64::from(taken));
        },
    );
    Ok(ports)
}

fn immediate_unit(b: &mut ModelBuilder, top: ScopeId) -> Result<ImmediatePorts, SimError> {
    let (name, def) = IMMEDIATE_INSTANCE;
    let scope = b.module(Some(top), name, def)?;
    let ports = ImmediatePorts {
        select: b.input(scope, "i_Imm_Select", IMM_SEL_WIDTH, 0)?,
        instruction: b.input(scope, "i_Instruction_No_Opcode", REMAINDER_MSB, REMAINDER_LSB)?,
        immediate: b.output(scope, "o_Immediate", WORD_MSB, 0)?,
    };
    let p = ports;
    b.process(
        Region::InputCombo,
        "harness.immediate_unit",
        &[p.select, p.instruction],
        move |ctx: &mut EvalContext<'_>| {
            let imm = ImmediateDecoder::evaluate(
                ctx.read(p.select) as u8,
                ctx.read(p.instruction) as u32,
            );
            ctx.write(p.immediate, u64::from(imm));
        },
    );
    Ok(ports)
}
