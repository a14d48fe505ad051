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

//! The two-pass assembler: groups a flat token stream into statements,
//! resolves label addresses in pass 1, then encodes and emits in pass 2.

pub mod encoder;
pub mod symbol_table;

use crate::errors::AsmError;
use crate::token::{Token, TokenKind};
use encoder::utility_functions::{cond_value, parse_u64_literal, read_imm, read_reg};
use symbol_table::SymbolTable;

/// The output of a successful assembly: the emitted machine code and the
/// symbol table used to produce it (the diagnostic dump walks the latter).
#[derive(Debug)]
pub struct AssembleOutput {
    pub bytes: Vec<u8>,
    pub symbols: SymbolTable,
}

enum StatementKind {
    LabelOnly(String),
    Data8,
    Instruction,
}

/// Collapses a token stream into statements at `NEWLINE` boundaries,
/// discarding empty statements. A trailing statement with no terminating
/// newline is still collected.
fn group_statements(tokens: &[Token]) -> Vec<Vec<Token>> {
    let mut statements = Vec::new();
    let mut current = Vec::new();
    for tok in tokens {
        if tok.kind == TokenKind::Newline {
            if !current.is_empty() {
                statements.push(std::mem::take(&mut current));
            }
        } else {
            current.push(tok.clone());
        }
    }
    if !current.is_empty() {
        statements.push(current);
    }
    statements
}

fn classify(statement: &[Token]) -> Result<StatementKind, AsmError> {
    if statement.len() == 1 && statement[0].kind == TokenKind::Label {
        let name = statement[0]
            .lexeme
            .strip_suffix(':')
            .unwrap_or(&statement[0].lexeme)
            .to_string();
        return Ok(StatementKind::LabelOnly(name));
    }
    match statement.first() {
        Some(t) if t.kind == TokenKind::DotId && t.lexeme == ".8byte" => Ok(StatementKind::Data8),
        Some(t) if t.kind == TokenKind::Id => Ok(StatementKind::Instruction),
        _ => Err(AsmError::Syntax(format!(
            "malformed statement: {statement:?}"
        ))),
    }
}

fn pattern_for(mnemonic: &str) -> Result<&'static str, AsmError> {
    match mnemonic {
        "add" | "sub" | "mul" | "smulh" | "umulh" | "sdiv" | "udiv" => Ok("rcrcz"),
        "cmp" => Ok("rcz"),
        "br" | "blr" => Ok("r"),
        "ldur" | "stur" => Ok("rclrcit"),
        "ldr" => Ok("rcj"),
        "b" => Ok("j"),
        _ => Err(AsmError::UnknownInstruction(mnemonic.to_string())),
    }
}

/// Decodes `tokens` against `pattern`, producing one `i64` per register or
/// immediate code (`r`, `z`, `i`, `j`); punctuation codes (`c`, `l`, `t`)
/// are checked but produce nothing. Too few or too many tokens for the
/// pattern is a fatal error.
fn decode_pattern(
    pattern: &str,
    tokens: &[Token],
    symbols: &SymbolTable,
    pc: u64,
) -> Result<Vec<i64>, AsmError> {
    let codes: Vec<char> = pattern.chars().collect();
    if tokens.len() != codes.len() {
        return Err(AsmError::Syntax(format!(
            "expected {} operand token(s), got {}",
            codes.len(),
            tokens.len()
        )));
    }

    let mut values = Vec::new();
    for (code, tok) in codes.iter().zip(tokens) {
        match code {
            'r' => {
                if tok.kind == TokenKind::Reg || (tok.kind == TokenKind::Id && tok.lexeme == "sp")
                {
                    values.push(read_reg(&tok.lexeme)? as i64);
                } else {
                    return Err(AsmError::InvalidRegister(tok.lexeme.clone()));
                }
            }
            'z' => {
                if tok.kind == TokenKind::Reg || tok.kind == TokenKind::ZReg {
                    values.push(read_reg(&tok.lexeme)? as i64);
                } else {
                    return Err(AsmError::InvalidRegister(tok.lexeme.clone()));
                }
            }
            'c' => require_kind(tok, TokenKind::Comma)?,
            'l' => require_kind(tok, TokenKind::LBrack)?,
            't' => require_kind(tok, TokenKind::RBrack)?,
            'i' => {
                if matches!(tok.kind, TokenKind::Int | TokenKind::HexInt) {
                    values.push(read_imm(&tok.lexeme)?);
                } else {
                    return Err(AsmError::Syntax(format!(
                        "expected an immediate: {}",
                        tok.lexeme
                    )));
                }
            }
            'j' => {
                let v = match tok.kind {
                    TokenKind::Int | TokenKind::HexInt => read_imm(&tok.lexeme)?,
                    TokenKind::Id => {
                        let addr = symbols.lookup(&tok.lexeme)?;
                        addr as i64 - pc as i64
                    }
                    _ => {
                        return Err(AsmError::Syntax(format!(
                            "expected an immediate or label: {}",
                            tok.lexeme
                        )))
                    }
                };
                values.push(v);
            }
            other => unreachable!("not in the operand pattern alphabet: {other}"),
        }
    }
    Ok(values)
}

fn require_kind(tok: &Token, kind: TokenKind) -> Result<(), AsmError> {
    if tok.kind == kind {
        Ok(())
    } else {
        Err(AsmError::Syntax(format!("unexpected token: {}", tok.lexeme)))
    }
}

/// Decodes one instruction statement's operands, handling the `b.cond`
/// special case: `ID "b"` followed by a `DOTID` consumes the condition
/// suffix and substitutes the `b.cond` mnemonic before applying `b`'s `j`
/// pattern to the rest.
fn decode_instruction(
    statement: &[Token],
    symbols: &SymbolTable,
    pc: u64,
) -> Result<(String, i64, i64, i64), AsmError> {
    let mnemonic = statement[0].lexeme.as_str();
    let operands = &statement[1..];

    if mnemonic == "b" {
        if let Some(first) = operands.first() {
            if first.kind == TokenKind::DotId {
                let suffix = first.lexeme.strip_prefix('.').unwrap_or(&first.lexeme);
                let cond = cond_value(suffix)?;
                let values = decode_pattern("j", &operands[1..], symbols, pc)?;
                return Ok(("b.cond".to_string(), cond as i64, values[0], 0));
            }
        }
    }

    let pattern = pattern_for(mnemonic)?;
    let values = decode_pattern(pattern, operands, symbols, pc)?;
    Ok((
        mnemonic.to_string(),
        values.first().copied().unwrap_or(0),
        values.get(1).copied().unwrap_or(0),
        values.get(2).copied().unwrap_or(0),
    ))
}

/// Runs the full two-pass assembly over an already-lexed token stream.
pub fn assemble(tokens: &[Token]) -> Result<AssembleOutput, AsmError> {
    let statements = group_statements(tokens);

    // Pass 1: symbol resolution.
    let mut symbols = SymbolTable::new();
    let mut pc: u64 = 0;
    for statement in &statements {
        match classify(statement)? {
            StatementKind::LabelOnly(name) => symbols.define(&name, pc)?,
            StatementKind::Data8 => pc += 8,
            StatementKind::Instruction => pc += 4,
        }
    }

    // Pass 2: encode and emit.
    let mut bytes = Vec::new();
    pc = 0;
    for statement in &statements {
        match classify(statement)? {
            StatementKind::LabelOnly(_) => {}
            StatementKind::Data8 => {
                if statement.len() < 2 {
                    return Err(AsmError::MissingOperand(".8byte requires a value".to_string()));
                }
                if statement.len() > 2 {
                    return Err(AsmError::Syntax("extra tokens after .8byte value".to_string()));
                }
                let value_tok = &statement[1];
                let value: u64 = match value_tok.kind {
                    TokenKind::Id => symbols.lookup(&value_tok.lexeme)?,
                    TokenKind::Int | TokenKind::HexInt => parse_u64_literal(&value_tok.lexeme)?,
                    _ => {
                        return Err(AsmError::Syntax(format!(
                            "invalid .8byte value: {}",
                            value_tok.lexeme
                        )))
                    }
                };
                bytes.extend_from_slice(&value.to_le_bytes());
                pc += 8;
            }
            StatementKind::Instruction => {
                let (mnemonic, a, b, c) = decode_instruction(statement, &symbols, pc)?;
                let word = encoder::encode(&mnemonic, a, b, c)?;
                bytes.extend_from_slice(&word.to_le_bytes());
                pc += 4;
            }
        }
    }

    Ok(AssembleOutput { bytes, symbols })
}

/// Renders the post-assembly diagnostic dump: `NAME ADDRESS\n` per label,
/// in definition order.
pub fn diagnostic_dump(symbols: &SymbolTable) -> String {
    let mut out = String::new();
    for name in symbols.order() {
        let address = symbols
            .lookup(name)
            .expect("name came from the table's own order()");
        out.push_str(&format!("{name} {address}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Token {
        Token::new(TokenKind::Id, s)
    }
    fn reg(s: &str) -> Token {
        Token::new(TokenKind::Reg, s)
    }
    fn comma() -> Token {
        Token::new(TokenKind::Comma, ",")
    }
    fn nl() -> Token {
        Token::newline()
    }

    #[test]
    fn empty_program_produces_no_bytes() {
        let out = assemble(&[]).unwrap();
        assert!(out.bytes.is_empty());
        assert_eq!(diagnostic_dump(&out.symbols), "");
    }

    #[test]
    fn single_add_instruction() {
        let tokens = vec![
            id("add"),
            reg("x1"),
            comma(),
            reg("x2"),
            comma(),
            reg("x3"),
            nl(),
        ];
        let out = assemble(&tokens).unwrap();
        assert_eq!(out.bytes.len(), 4);
    }

    #[test]
    fn label_and_backward_branch() {
        let tokens = vec![
            Token::new(TokenKind::Label, "loop:"),
            nl(),
            id("add"),
            reg("x1"),
            comma(),
            reg("x1"),
            comma(),
            reg("x3"),
            nl(),
            id("b"),
            id("loop"),
            nl(),
        ];
        let out = assemble(&tokens).unwrap();
        assert_eq!(out.bytes.len(), 8);
        assert_eq!(diagnostic_dump(&out.symbols), "loop 0\n");
        // b loop: offset = 0 - 4 = -4, quotient -1, imm26 = 0x3FFFFFF.
        let word = u32::from_le_bytes(out.bytes[4..8].try_into().unwrap());
        assert_eq!(word, 0x1400_0000 | 0x03FF_FFFF);
    }

    #[test]
    fn data_directive_and_label_reference() {
        let tokens = vec![
            Token::new(TokenKind::DotId, ".8byte"),
            id("target"),
            nl(),
            Token::new(TokenKind::Label, "target:"),
            nl(),
            id("br"),
            reg("x30"),
            nl(),
        ];
        let out = assemble(&tokens).unwrap();
        assert_eq!(out.bytes.len(), 12);
        assert_eq!(u64::from_le_bytes(out.bytes[0..8].try_into().unwrap()), 8);
        assert_eq!(diagnostic_dump(&out.symbols), "target 8\n");
    }

    #[test]
    fn duplicate_label_is_fatal() {
        let tokens = vec![
            Token::new(TokenKind::Label, "loop:"),
            nl(),
            Token::new(TokenKind::Label, "loop:"),
            nl(),
        ];
        assert!(matches!(assemble(&tokens), Err(AsmError::DuplicateLabel(_))));
    }

    #[test]
    fn undefined_label_is_fatal() {
        let tokens = vec![id("b"), id("nowhere"), nl()];
        assert!(matches!(assemble(&tokens), Err(AsmError::UndefinedLabel(_))));
    }

    #[test]
    fn extra_operand_tokens_are_fatal() {
        let tokens = vec![id("br"), reg("x1"), comma(), reg("x2"), nl()];
        assert!(matches!(assemble(&tokens), Err(AsmError::Syntax(_))));
    }

    #[test]
    fn b_cond_consumes_dotid_condition() {
        let tokens = vec![
            id("b"),
            Token::new(TokenKind::DotId, ".eq"),
            id("done"),
            nl(),
            Token::new(TokenKind::Label, "done:"),
            nl(),
        ];
        let out = assemble(&tokens).unwrap();
        assert_eq!(out.bytes.len(), 4);
        let word = u32::from_le_bytes(out.bytes[0..4].try_into().unwrap());
        // offset 4 - 0 = 4, quotient 1; cond .eq = 0.
        assert_eq!(word, 0x5400_0000 | (1 << 5));
    }

    #[test]
    fn ldur_stur_immediate_range() {
        let in_range = vec![
            id("ldur"),
            reg("x1"),
            comma(),
            Token::new(TokenKind::LBrack, "["),
            reg("x2"),
            comma(),
            Token::new(TokenKind::Int, "255"),
            Token::new(TokenKind::RBrack, "]"),
            nl(),
        ];
        assert!(assemble(&in_range).is_ok());

        let out_of_range = vec![
            id("ldur"),
            reg("x1"),
            comma(),
            Token::new(TokenKind::LBrack, "["),
            reg("x2"),
            comma(),
            Token::new(TokenKind::Int, "256"),
            Token::new(TokenKind::RBrack, "]"),
            nl(),
        ];
        assert!(matches!(
            assemble(&out_of_range),
            Err(AsmError::ImmediateRange(_))
        ));
    }

    #[test]
    fn modulo_expansion_emits_three_instructions() {
        // sdiv x4,x5,x6 ; mul x4,x4,x6 ; sub x4,x5,x4
        let tokens = vec![
            id("sdiv"), reg("x4"), comma(), reg("x5"), comma(), reg("x6"), nl(),
            id("mul"), reg("x4"), comma(), reg("x4"), comma(), reg("x6"), nl(),
            id("sub"), reg("x4"), comma(), reg("x5"), comma(), reg("x4"), nl(),
        ];
        let out = assemble(&tokens).unwrap();
        assert_eq!(out.bytes.len(), 12);
    }
}
