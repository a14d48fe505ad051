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

use crate::assembler::encoder::constants::CONDITIONS;
use crate::errors::AsmError;

/// Decodes a register lexeme to its 0..31 number. `xzr` and `sp` both
/// yield 31; `xN` yields `N` for `0 <= N <= 30`. `N > 30` is rejected here
/// even though the numeric parse alone would accept it, per the rule that
/// 31 only ever enters through the alias spellings.
pub fn read_reg(lexeme: &str) -> Result<u8, AsmError> {
    if lexeme == "xzr" || lexeme == "sp" {
        return Ok(31);
    }
    let digits = lexeme
        .strip_prefix('x')
        .ok_or_else(|| AsmError::InvalidRegister(lexeme.to_string()))?;
    let n: u32 = digits
        .parse()
        .map_err(|_| AsmError::InvalidRegister(lexeme.to_string()))?;
    if n > 30 {
        return Err(AsmError::InvalidRegister(lexeme.to_string()));
    }
    Ok(n as u8)
}

/// Decodes a decimal (optionally signed) or `0x`/`0X`-prefixed hex literal.
pub fn read_imm(lexeme: &str) -> Result<i64, AsmError> {
    if let Some(hex) = lexeme.strip_prefix("0x").or_else(|| lexeme.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16)
            .map_err(|_| AsmError::Syntax(format!("malformed hex immediate: {lexeme}")));
    }
    lexeme
        .parse::<i64>()
        .map_err(|_| AsmError::Syntax(format!("malformed immediate: {lexeme}")))
}

/// `validSignedImm(v, bits)`: true iff `v` fits in a signed field of
/// `bits` width.
pub fn valid_signed_imm(v: i64, bits: u32) -> bool {
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    v >= min && v <= max
}

/// Masks a (possibly negative) value to its two's-complement field width.
pub fn truncate_field(v: i64, bits: u32) -> u32 {
    let mask = if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 };
    (v as u32) & mask
}

/// Looks up a condition suffix (without the leading `.`) in the 10-entry
/// table, failing with `UnknownCondition` otherwise.
pub fn cond_value(suffix: &str) -> Result<u32, AsmError> {
    CONDITIONS
        .iter()
        .find(|&&(name, _)| name == suffix)
        .map(|&(_, value)| value)
        .ok_or_else(|| AsmError::UnknownCondition(suffix.to_string()))
}

/// Little-endian bytes of a 32-bit instruction word, low byte first.
pub fn emit_word32(word: u32) -> [u8; 4] {
    word.to_le_bytes()
}

/// Little-endian bytes of a 64-bit `.8byte` datum, low byte first.
pub fn emit_word64(word: u64) -> [u8; 8] {
    word.to_le_bytes()
}

/// Parses a `.8byte` numeric operand with base auto-detection: `0x`/`0X`
/// prefix is hex, otherwise decimal. Used for both literal values and
/// label addresses are handled separately by the caller.
pub fn parse_u64_literal(lexeme: &str) -> Result<u64, AsmError> {
    if let Some(hex) = lexeme.strip_prefix("0x").or_else(|| lexeme.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
            .map_err(|_| AsmError::Syntax(format!("malformed hex literal: {lexeme}")))
    } else {
        lexeme
            .parse::<u64>()
            .map_err(|_| AsmError::Syntax(format!("malformed decimal literal: {lexeme}")))
    }
}
