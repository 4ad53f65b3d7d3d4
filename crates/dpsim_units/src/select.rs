//! Selector codes and shared datapath parameters.
//!
//! These are the constants of the design's compilation-unit package. The
//! functional units decode selector bits directly; the named codes exist for
//! harnesses and for registration in the `$unit` scope.

/// Register width of the datapath.
pub const XLEN: u32 = 32;

/// Register-file address width.
pub const REG_ADDR_WIDTH: u32 = 5;

/// Highest bit index of the ALU selector port (`[ALU_SEL_WIDTH:0]`).
pub const ALU_SEL_WIDTH: u32 = 4;
/// Highest bit index of the comparator selector port (`[CMP_SEL_WIDTH:0]`).
pub const CMP_SEL_WIDTH: u32 = 3;
/// Highest bit index of the immediate selector port (`[IMM_SEL_WIDTH:0]`).
pub const IMM_SEL_WIDTH: u32 = 3;

/// ALU selector: `A + B`.
pub const ALU_SEL_ADD: u8 = 0;
/// ALU selector: `A - B`.
pub const ALU_SEL_SUB: u8 = 1;
/// ALU selector: `A & B`.
pub const ALU_SEL_AND: u8 = 2;
/// ALU selector: `A | B`.
pub const ALU_SEL_OR: u8 = 3;
/// ALU selector: `A ^ B`.
pub const ALU_SEL_XOR: u8 = 4;
/// ALU selector: `A << B[4:0]`.
pub const ALU_SEL_SLL: u8 = 5;
/// ALU selector: `A >> B[4:0]` (logical).
pub const ALU_SEL_SRL: u8 = 6;
/// ALU selector: `A >>> B[4:0]` (arithmetic).
pub const ALU_SEL_SRA: u8 = 7;
/// ALU selector reserved for "no operation decoded"; yields zero.
pub const ALU_SEL_UNKNOWN: u8 = 8;

/// Comparator selector: equal.
pub const CMP_SEL_BEQ: u8 = 0;
/// Comparator selector: not equal.
pub const CMP_SEL_BNE: u8 = 1;
/// Comparator selector: unsigned less-than.
pub const CMP_SEL_BLTU: u8 = 2;
/// Comparator selector: unsigned greater-or-equal.
pub const CMP_SEL_BGEU: u8 = 3;
/// Comparator selector: signed less-than.
pub const CMP_SEL_BLT: u8 = 4;
/// Comparator selector: signed greater-or-equal.
pub const CMP_SEL_BGE: u8 = 5;
/// Comparator selector reserved for "not a branch"; always false.
pub const CMP_SEL_UNKNOWN: u8 = 6;

/// Immediate selector: U-type.
pub const IMM_U_TYPE: u8 = 0;
/// Immediate selector: B-type.
pub const IMM_B_TYPE: u8 = 1;
/// Immediate selector: I-type.
pub const IMM_I_TYPE: u8 = 2;
/// Immediate selector: J-type.
pub const IMM_J_TYPE: u8 = 3;
/// Immediate selector: S-type.
pub const IMM_S_TYPE: u8 = 4;
/// Immediate selector reserved for formats without an immediate; yields zero.
pub const IMM_UNKNOWN_TYPE: u8 = 5;

/// Register write-back source: ALU result.
pub const REG_WRITE_ALU: u32 = 0;
/// Register write-back source: comparator result.
pub const REG_WRITE_CU: u32 = 1;
/// Register write-back source: immediate.
pub const REG_WRITE_IMM: u32 = 2;
/// Register write-back source: `pc + 4`.
pub const REG_WRITE_PC_NEXT: u32 = 3;
/// Register write-back source: data memory.
pub const REG_WRITE_DMEM: u32 = 4;
/// No register write-back.
pub const REG_WRITE_NONE: u32 = 5;

/// A named package constant with its declared `[msb:0]` width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageParam {
    /// Parameter name as declared.
    pub name: &'static str,
    /// Parameter value.
    pub value: u64,
    /// Declared most significant bit (`lsb` is always 0).
    pub msb: u32,
}

const fn param(name: &'static str, value: u64, msb: u32) -> PackageParam {
    PackageParam { name, value, msb }
}

/// Every constant of the compilation-unit package, in declaration-name order.
pub const PACKAGE_PARAMS: &[PackageParam] = &[
    param("ALU_SEL_ADD", ALU_SEL_ADD as u64, 4),
    param("ALU_SEL_AND", ALU_SEL_AND as u64, 4),
    param("ALU_SEL_OR", ALU_SEL_OR as u64, 4),
    param("ALU_SEL_SLL", ALU_SEL_SLL as u64, 4),
    param("ALU_SEL_SRA", ALU_SEL_SRA as u64, 4),
    param("ALU_SEL_SRL", ALU_SEL_SRL as u64, 4),
    param("ALU_SEL_SUB", ALU_SEL_SUB as u64, 4),
    param("ALU_SEL_UNKNOWN", ALU_SEL_UNKNOWN as u64, 4),
    param("ALU_SEL_WIDTH", ALU_SEL_WIDTH as u64, 31),
    param("ALU_SEL_XOR", ALU_SEL_XOR as u64, 4),
    param("CMP_SEL_BEQ", CMP_SEL_BEQ as u64, 3),
    param("CMP_SEL_BGE", CMP_SEL_BGE as u64, 3),
    param("CMP_SEL_BGEU", CMP_SEL_BGEU as u64, 3),
    param("CMP_SEL_BLT", CMP_SEL_BLT as u64, 3),
    param("CMP_SEL_BLTU", CMP_SEL_BLTU as u64, 3),
    param("CMP_SEL_BNE", CMP_SEL_BNE as u64, 3),
    param("CMP_SEL_UNKNOWN", CMP_SEL_UNKNOWN as u64, 3),
    param("CMP_SEL_WIDTH", CMP_SEL_WIDTH as u64, 31),
    param("IMM_B_TYPE", IMM_B_TYPE as u64, 31),
    param("IMM_I_TYPE", IMM_I_TYPE as u64, 31),
    param("IMM_J_TYPE", IMM_J_TYPE as u64, 31),
    param("IMM_SEL_WIDTH", IMM_SEL_WIDTH as u64, 31),
    param("IMM_S_TYPE", IMM_S_TYPE as u64, 31),
    param("IMM_UNKNOWN_TYPE", IMM_UNKNOWN_TYPE as u64, 31),
    param("IMM_U_TYPE", IMM_U_TYPE as u64, 31),
    param("REG_ADDR_WIDTH", REG_ADDR_WIDTH as u64, 31),
    param("REG_WRITE_ALU", REG_WRITE_ALU as u64, 31),
    param("REG_WRITE_CU", REG_WRITE_CU as u64, 31),
    param("REG_WRITE_DMEM", REG_WRITE_DMEM as u64, 31),
    param("REG_WRITE_IMM", REG_WRITE_IMM as u64, 31),
    param("REG_WRITE_NONE", REG_WRITE_NONE as u64, 31),
    param("REG_WRITE_PC_NEXT", REG_WRITE_PC_NEXT as u64, 31),
    param("XLEN", XLEN as u64, 31),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_params_are_unique_and_fit_their_width() {
        for (i, p) in PACKAGE_PARAMS.iter().enumerate() {
            assert!(
                PACKAGE_PARAMS[i + 1..].iter().all(|q| q.name != p.name),
                "duplicate parameter {}",
                p.name
            );
            assert_eq!(p.value & dpsim_common::mask(p.msb + 1), p.value, "{}", p.name);
        }
    }

    #[test]
    fn package_has_every_selector_code() {
        assert_eq!(PACKAGE_PARAMS.len(), 33);
        let unknown = PACKAGE_PARAMS
            .iter()
            .find(|p| p.name == "ALU_SEL_UNKNOWN")
            .unwrap();
        assert_eq!(unknown.value, 8);
    }
}
