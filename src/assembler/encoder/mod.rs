/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Bit-exact per-mnemonic ARM64 encoder. Each instruction is a base word
//! OR'd with fields derived from its operands; operand decoding and range
//! validation are preconditions checked here, not by callers.

pub mod constants;
pub mod utility_functions;

use crate::errors::AsmError;
use constants::*;
use utility_functions::{truncate_field, valid_signed_imm};

/// Encodes one instruction to its 32-bit word. The meaning of `a`, `b`,
/// `c` is mnemonic-dependent (see the operand pattern each one decodes
/// against in the assembler): most take `(Rd, Rn, Rm)`, the branches take
/// an offset, and `cmp`/`br`/`blr` use only as many slots as they need.
pub fn encode(mnemonic: &str, a: i64, b: i64, c: i64) -> Result<u32, AsmError> {
    match mnemonic {
        "add" => Ok(ADD_BASE | rrr_fields(a, b, c)),
        "sub" => Ok(SUB_BASE | rrr_fields(a, b, c)),
        "mul" => Ok(MUL_BASE | rrr_fields(a, b, c)),
        "smulh" => Ok(SMULH_BASE | rrr_fields(a, b, c)),
        "umulh" => Ok(UMULH_BASE | rrr_fields(a, b, c)),
        "sdiv" => Ok(SDIV_BASE | rrr_fields(a, b, c)),
        "udiv" => Ok(UDIV_BASE | rrr_fields(a, b, c)),
        "cmp" => Ok(CMP_BASE | ((reg(a) << 5) | (reg(b) << 16))),
        "br" => Ok(BR_BASE | (reg(a) << 5)),
        "blr" => Ok(BLR_BASE | (reg(a) << 5)),
        "ldur" => encode_ldur_stur(LDUR_BASE, a, b, c),
        "stur" => encode_ldur_stur(STUR_BASE, a, b, c),
        "ldr" => encode_ldr(a, b),
        "b" => encode_b(a),
        "b.cond" => encode_b_cond(a, b),
        _ => Err(AsmError::UnknownInstruction(mnemonic.to_string())),
    }
}

fn reg(n: i64) -> u32 {
    (n as u32) & 0x1F
}

fn rrr_fields(rd: i64, rn: i64, rm: i64) -> u32 {
    reg(rd) | (reg(rn) << 5) | (reg(rm) << 16)
}

fn encode_ldur_stur(base: u32, rt: i64, rn: i64, imm: i64) -> Result<u32, AsmError> {
    if !valid_signed_imm(imm, 9) {
        return Err(AsmError::ImmediateRange(format!(
            "ldur/stur immediate out of range: {imm}"
        )));
    }
    let imm_field = truncate_field(imm, 9) << 12;
    Ok(base | reg(rt) | (reg(rn) << 5) | imm_field)
}

fn encode_ldr(rd: i64, offset: i64) -> Result<u32, AsmError> {
    let quotient = pc_relative_quotient(offset)?;
    if !valid_signed_imm(quotient, 19) {
        return Err(AsmError::ImmediateRange(format!(
            "ldr offset out of range: {offset}"
        )));
    }
    Ok(LDR_BASE | reg(rd) | (truncate_field(quotient, 19) << 5))
}

fn encode_b(offset: i64) -> Result<u32, AsmError> {
    let quotient = pc_relative_quotient(offset)?;
    if !valid_signed_imm(quotient, 26) {
        return Err(AsmError::ImmediateRange(format!(
            "b offset out of range: {offset}"
        )));
    }
    Ok(B_BASE | truncate_field(quotient, 26))
}

fn encode_b_cond(cond: i64, offset: i64) -> Result<u32, AsmError> {
    let quotient = pc_relative_quotient(offset)?;
    if !valid_signed_imm(quotient, 19) {
        return Err(AsmError::ImmediateRange(format!(
            "b.cond offset out of range: {offset}"
        )));
    }
    Ok(B_COND_BASE | (truncate_field(quotient, 19) << 5) | ((cond as u32) & 0x1F))
}

fn pc_relative_quotient(offset: i64) -> Result<i64, AsmError> {
    if offset % 4 != 0 {
        return Err(AsmError::ImmediateRange(format!(
            "offset not divisible by 4: {offset}"
        )));
    }
    Ok(offset / 4)
}
