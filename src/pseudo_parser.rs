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

//! Line-oriented recursive-descent parser turning the C-like pseudocode
//! into [`IrInstruction`]s. One line is one production; there is no
//! lookahead across lines and no operator precedence to speak of, so a
//! hand-rolled dispatch on the first word (or first character, for the
//! store form) is all this needs.

use crate::errors::AsmError;
use crate::ir::{require_operand, ArithOp, CmpCond, IrInstruction};

fn is_register_lexeme(word: &str) -> bool {
    crate::ir::is_register_lexeme(word)
}

/// Parses a whole pseudocode program into its IR.
pub fn parse_program(source: &str) -> Result<Vec<IrInstruction>, AsmError> {
    let mut program = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        program.push(parse_line(trimmed)?);
    }
    Ok(program)
}

fn parse_line(line: &str) -> Result<IrInstruction, AsmError> {
    if line.starts_with('*') {
        return parse_store(line);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["label", name] => Ok(IrInstruction::Label {
            dst: name.to_string(),
        }),
        ["goto", label] => Ok(IrInstruction::Branch {
            label: label.to_string(),
        }),
        ["call", reg] => {
            require_register(reg)?;
            Ok(IrInstruction::Call {
                src1: reg.to_string(),
            })
        }
        ["ret"] => Ok(IrInstruction::Ret),
        [".8byte", rest @ ..] => {
            let value = require_operand(rest.first().copied(), ".8byte value")?;
            if rest.len() > 1 {
                return Err(AsmError::Syntax("extra tokens after .8byte value".to_string()));
            }
            Ok(IrInstruction::Data8 {
                imm: value.to_string(),
            })
        }
        ["if", a, op, b, "goto", label] => {
            require_register(a)?;
            require_register(b)?;
            let cond = CmpCond::from_symbol(op)
                .ok_or_else(|| AsmError::Syntax(format!("unknown comparison operator: {op}")))?;
            Ok(IrInstruction::CmpBranch {
                src1: a.to_string(),
                src2: b.to_string(),
                cond,
                label: label.to_string(),
            })
        }
        ["if", ..] => Err(AsmError::MissingOperand("if clause missing goto".to_string())),
        [dst, "=", ..] => parse_assignment(dst, line.splitn(2, '=').nth(1).unwrap_or("")),
        _ => Err(AsmError::Syntax(line.to_string())),
    }
}

fn require_register(word: &str) -> Result<(), AsmError> {
    if is_register_lexeme(word) {
        Ok(())
    } else {
        Err(AsmError::InvalidRegister(word.to_string()))
    }
}

fn parse_assignment(dst: &str, rhs_raw: &str) -> Result<IrInstruction, AsmError> {
    require_register(dst)?;
    let rhs = rhs_raw.trim();

    if let Some(addr_text) = rhs.strip_prefix('*') {
        let (base, imm) = parse_address_expr(addr_text)?;
        return Ok(IrInstruction::Load {
            dst: dst.to_string(),
            src1: base,
            imm,
        });
    }

    let words: Vec<&str> = rhs.split_whitespace().collect();
    match words.as_slice() {
        [a, op, b] => {
            require_register(a)?;
            require_register(b)?;
            let arith = ArithOp::from_symbol(op)
                .ok_or_else(|| AsmError::Syntax(format!("unknown operator: {op}")))?;
            Ok(IrInstruction::Arith {
                op: arith,
                dst: dst.to_string(),
                src1: a.to_string(),
                src2: b.to_string(),
            })
        }
        [x] => {
            require_register(x)?;
            Ok(IrInstruction::Mov {
                dst: dst.to_string(),
                src1: x.to_string(),
            })
        }
        _ => Err(AsmError::Syntax(format!("malformed assignment: {rhs}"))),
    }
}

fn parse_store(line: &str) -> Result<IrInstruction, AsmError> {
    let rest = &line[1..];
    let mut halves = rest.splitn(2, '=');
    let addr_raw = halves.next().unwrap_or("");
    let src_raw = halves
        .next()
        .ok_or_else(|| AsmError::Syntax(format!("store missing '=': {line}")))?;
    let (base, imm) = parse_address_expr(addr_raw)?;
    let src = src_raw.trim();
    require_register(src)?;
    Ok(IrInstruction::Store {
        dst: base,
        src1: src.to_string(),
        imm,
    })
}

/// Parses `X` or `(X + IMM)` — the shared shape of a load's RHS and a
/// store's LHS after the leading `*` is stripped. Tolerant of whitespace
/// adjoining the parenthesis or the base register, per the tokenisation
/// rule for parenthesised address expressions.
fn parse_address_expr(text: &str) -> Result<(String, String), AsmError> {
    let s = text.trim();
    if let Some(stripped) = s.strip_prefix('(') {
        let close = stripped
            .find(')')
            .ok_or_else(|| AsmError::Syntax(format!("unterminated address expression: {text}")))?;
        let inner = &stripped[..close];
        let trailing = &stripped[close + 1..];
        if !trailing.trim().is_empty() {
            return Err(AsmError::Syntax(format!(
                "unexpected text after address expression: {text}"
            )));
        }
        let mut halves = inner.splitn(2, '+');
        let base = halves.next().unwrap_or("").trim();
        require_register(base)?;
        let imm = halves
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("0")
            .to_string();
        Ok((base.to_string(), imm))
    } else {
        require_register(s)?;
        Ok((s.to_string(), "0".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_and_goto() {
        let program = parse_program("label loop\ngoto loop\n").unwrap();
        assert_eq!(
            program,
            vec![
                IrInstruction::Label {
                    dst: "loop".to_string()
                },
                IrInstruction::Branch {
                    label: "loop".to_string()
                },
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let program = parse_program("# a comment\n\nret\n").unwrap();
        assert_eq!(program, vec![IrInstruction::Ret]);
    }

    #[test]
    fn arith_assignment() {
        let program = parse_program("x1 = x2 + x3\n").unwrap();
        assert_eq!(
            program,
            vec![IrInstruction::Arith {
                op: ArithOp::Add,
                dst: "x1".to_string(),
                src1: "x2".to_string(),
                src2: "x3".to_string(),
            }]
        );
    }

    #[test]
    fn mov_assignment() {
        let program = parse_program("x1 = x2\n").unwrap();
        assert_eq!(
            program,
            vec![IrInstruction::Mov {
                dst: "x1".to_string(),
                src1: "x2".to_string(),
            }]
        );
    }

    #[test]
    fn load_bare_register() {
        let program = parse_program("x1 = *x2\n").unwrap();
        assert_eq!(
            program,
            vec![IrInstruction::Load {
                dst: "x1".to_string(),
                src1: "x2".to_string(),
                imm: "0".to_string(),
            }]
        );
    }

    #[test]
    fn load_with_offset_and_loose_whitespace() {
        let program = parse_program("x1 = *(x2 + 8)\n").unwrap();
        assert_eq!(
            program,
            vec![IrInstruction::Load {
                dst: "x1".to_string(),
                src1: "x2".to_string(),
                imm: "8".to_string(),
            }]
        );
        let program2 = parse_program("x1 = * (x2+8)\n").unwrap();
        assert_eq!(program, program2);
    }

    #[test]
    fn store_form() {
        let program = parse_program("*(x2 + 8) = x1\n").unwrap();
        assert_eq!(
            program,
            vec![IrInstruction::Store {
                dst: "x2".to_string(),
                src1: "x1".to_string(),
                imm: "8".to_string(),
            }]
        );
    }

    #[test]
    fn conditional_goto() {
        let program = parse_program("if x1 == x2 goto done\n").unwrap();
        assert_eq!(
            program,
            vec![IrInstruction::CmpBranch {
                src1: "x1".to_string(),
                src2: "x2".to_string(),
                cond: CmpCond::Eq,
                label: "done".to_string(),
            }]
        );
    }

    #[test]
    fn conditional_loop_scenario() {
        let source = "label loop\nif x1 == x2 goto done\nx1 = x1 + x3\ngoto loop\nlabel done\nret\n";
        let program = parse_program(source).unwrap();
        assert_eq!(program.len(), 6);
    }

    #[test]
    fn unmatched_line_is_syntax_error() {
        assert!(matches!(
            parse_line("frobnicate x1"),
            Err(AsmError::Syntax(_))
        ));
    }

    #[test]
    fn if_without_goto_is_missing_operand() {
        assert!(matches!(
            parse_line("if x1 == x2 done"),
            Err(AsmError::MissingOperand(_))
        ));
    }

    #[test]
    fn bare_data8_directive_is_missing_operand() {
        assert!(matches!(
            parse_line(".8byte"),
            Err(AsmError::MissingOperand(_))
        ));
    }

    #[test]
    fn data8_with_extra_tokens_is_syntax_error() {
        assert!(matches!(
            parse_line(".8byte target extra"),
            Err(AsmError::Syntax(_))
        ));
    }
}
