//! RISC-V instruction encoders.
//!
//! Only the fields the immediate decoder reads matter; register and function
//! fields are carried so the words are real instructions.

/// `OP-IMM` major opcode.
pub const OP_IMM: u32 = 0b001_0011;
/// `LOAD` major opcode.
pub const OP_LOAD: u32 = 0b000_0011;
/// `STORE` major opcode.
pub const OP_STORE: u32 = 0b010_0011;
/// `BRANCH` major opcode.
pub const OP_BRANCH: u32 = 0b110_0011;
/// `LUI` major opcode.
pub const OP_LUI: u32 = 0b011_0111;
/// `AUIPC` major opcode.
pub const OP_AUIPC: u32 = 0b001_0111;
/// `JAL` major opcode.
pub const OP_JAL: u32 = 0b110_1111;

/// Encode an I-type instruction.
pub fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm_bits = (imm as u32) & 0xFFF;
    imm_bits << 20 | (rs1 & 0x1F) << 15 | (funct3 & 0x7) << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode an S-type instruction.
pub fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let hi = (v >> 5) & 0x7F;
    let lo = v & 0x1F;
    hi << 25 | (rs2 & 0x1F) << 20 | (rs1 & 0x1F) << 15 | (funct3 & 0x7) << 12 | lo << 7 | (opcode & 0x7F)
}

/// Encode a B-type instruction. Bit 0 of `imm` is dropped.
pub fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let bit12 = (v >> 12) & 1;
    let bits10_5 = (v >> 5) & 0x3F;
    let bits4_1 = (v >> 1) & 0xF;
    let bit11 = (v >> 11) & 1;
    bit12 << 31
        | bits10_5 << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | bits4_1 << 8
        | bit11 << 7
        | (opcode & 0x7F)
}

/// Encode a U-type instruction from the 20-bit upper immediate.
pub fn u_type(opcode: u32, rd: u32, imm20: u32) -> u32 {
    (imm20 & 0xFFFFF) << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode a J-type instruction. Bit 0 of `imm` is dropped.
pub fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let bit20 = (v >> 20) & 1;
    let bits10_1 = (v >> 1) & 0x3FF;
    let bit11 = (v >> 11) & 1;
    let bits19_12 = (v >> 12) & 0xFF;
    bit20 << 31 | bits10_1 << 21 | bit11 << 20 | bits19_12 << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}
