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

//! Instruction selection: lowers a slice of [`IrInstruction`] to the same
//! token stream the raw-assembly lexer and the pre-tokenized reader
//! produce, so the two-pass assembler never needs to know which front end
//! it is fed from.

use crate::ir::{ArithOp, IrInstruction};
use crate::token::{classify_immediate, classify_register, Token, TokenKind};

fn reg_token(lexeme: &str) -> Token {
    let kind = classify_register(lexeme).unwrap_or(TokenKind::Id);
    Token::new(kind, lexeme)
}

fn imm_token(lexeme: &str) -> Token {
    Token::new(classify_immediate(lexeme), lexeme)
}

fn id(lexeme: &str) -> Token {
    Token::new(TokenKind::Id, lexeme)
}

fn comma() -> Token {
    Token::new(TokenKind::Comma, ",")
}

/// Appends one statement's tokens to `out`, followed by the `NEWLINE` that
/// separates every statement (including the sub-statements of a
/// multi-statement expansion such as `MOD` or `CMP_BRANCH`).
fn push_statement(out: &mut Vec<Token>, statement: Vec<Token>) {
    out.extend(statement);
    out.push(Token::newline());
}

fn arith_mnemonic(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "add",
        ArithOp::Sub => "sub",
        ArithOp::Mul => "mul",
        ArithOp::Div => "sdiv",
        ArithOp::Mod => "sdiv",
    }
}

/// Lowers one IR instruction into its token-stream expansion, appending to
/// `out`. `MOD` and `CMP_BRANCH` expand into more than one statement.
pub fn lower_instruction(instr: &IrInstruction, out: &mut Vec<Token>) {
    match instr {
        IrInstruction::Label { dst } => {
            push_statement(out, vec![Token::new(TokenKind::Label, format!("{dst}:"))]);
        }
        IrInstruction::Arith {
            op: op @ (ArithOp::Add | ArithOp::Sub | ArithOp::Mul | ArithOp::Div),
            dst,
            src1,
            src2,
        } => {
            push_statement(
                out,
                vec![
                    id(arith_mnemonic(*op)),
                    reg_token(dst),
                    comma(),
                    reg_token(src1),
                    comma(),
                    reg_token(src2),
                ],
            );
        }
        IrInstruction::Arith {
            op: ArithOp::Mod,
            dst,
            src1,
            src2,
        } => {
            push_statement(
                out,
                vec![
                    id("sdiv"),
                    reg_token(dst),
                    comma(),
                    reg_token(src1),
                    comma(),
                    reg_token(src2),
                ],
            );
            push_statement(
                out,
                vec![
                    id("mul"),
                    reg_token(dst),
                    comma(),
                    reg_token(dst),
                    comma(),
                    reg_token(src2),
                ],
            );
            push_statement(
                out,
                vec![
                    id("sub"),
                    reg_token(dst),
                    comma(),
                    reg_token(src1),
                    comma(),
                    reg_token(dst),
                ],
            );
        }
        IrInstruction::Mov { dst, src1 } => {
            push_statement(
                out,
                vec![
                    id("add"),
                    reg_token(dst),
                    comma(),
                    reg_token(src1),
                    comma(),
                    Token::new(TokenKind::ZReg, "xzr"),
                ],
            );
        }
        IrInstruction::Load { dst, src1, imm } => {
            push_statement(
                out,
                vec![
                    id("ldur"),
                    reg_token(dst),
                    comma(),
                    Token::new(TokenKind::LBrack, "["),
                    reg_token(src1),
                    comma(),
                    imm_token(imm),
                    Token::new(TokenKind::RBrack, "]"),
                ],
            );
        }
        IrInstruction::Store { dst, src1, imm } => {
            push_statement(
                out,
                vec![
                    id("stur"),
                    reg_token(src1),
                    comma(),
                    Token::new(TokenKind::LBrack, "["),
                    reg_token(dst),
                    comma(),
                    imm_token(imm),
                    Token::new(TokenKind::RBrack, "]"),
                ],
            );
        }
        IrInstruction::CmpBranch {
            src1,
            src2,
            cond,
            label,
        } => {
            push_statement(
                out,
                vec![id("cmp"), reg_token(src1), comma(), reg_token(src2)],
            );
            push_statement(
                out,
                vec![
                    id("b"),
                    Token::new(TokenKind::DotId, format!(".{}", cond.suffix())),
                    id(label),
                ],
            );
        }
        IrInstruction::Branch { label } => {
            push_statement(out, vec![id("b"), id(label)]);
        }
        IrInstruction::Call { src1 } => {
            push_statement(out, vec![id("blr"), reg_token(src1)]);
        }
        IrInstruction::Ret => {
            push_statement(out, vec![id("br"), Token::new(TokenKind::Reg, "x30")]);
        }
        IrInstruction::Data8 { imm } => {
            push_statement(
                out,
                vec![Token::new(TokenKind::DotId, ".8byte"), imm_token(imm)],
            );
        }
    }
}

/// Lowers a whole program's IR to its token stream.
pub fn lower_program(instructions: &[IrInstruction]) -> Vec<Token> {
    let mut out = Vec::new();
    for instr in instructions {
        lower_instruction(instr, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::CmpCond;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn add_lowers_to_single_statement() {
        let ir = IrInstruction::Arith {
            op: ArithOp::Add,
            dst: "x1".to_string(),
            src1: "x2".to_string(),
            src2: "x3".to_string(),
        };
        let tokens = lower_program(&[ir]);
        assert_eq!(tokens.last(), Some(&Token::newline()));
        assert_eq!(tokens[0], Token::new(TokenKind::Id, "add"));
        assert_eq!(tokens[1], Token::new(TokenKind::Reg, "x1"));
    }

    #[test]
    fn mod_expands_to_three_statements() {
        let ir = IrInstruction::Arith {
            op: ArithOp::Mod,
            dst: "x4".to_string(),
            src1: "x5".to_string(),
            src2: "x6".to_string(),
        };
        let tokens = lower_program(&[ir]);
        let newlines = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
        assert_eq!(newlines, 3);
        assert_eq!(tokens[0], Token::new(TokenKind::Id, "sdiv"));
    }

    #[test]
    fn cmp_branch_expands_to_two_statements_with_cond_suffix() {
        let ir = IrInstruction::CmpBranch {
            src1: "x1".to_string(),
            src2: "x2".to_string(),
            cond: CmpCond::Eq,
            label: "done".to_string(),
        };
        let tokens = lower_program(&[ir]);
        let newlines = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
        assert_eq!(newlines, 2);
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::DotId && t.lexeme == ".eq"));
    }

    #[test]
    fn mov_lowers_to_add_with_xzr() {
        let ir = IrInstruction::Mov {
            dst: "x1".to_string(),
            src1: "x2".to_string(),
        };
        let tokens = lower_program(&[ir]);
        assert_eq!(kinds(&tokens[..tokens.len() - 1]), vec![
            TokenKind::Id,
            TokenKind::Reg,
            TokenKind::Comma,
            TokenKind::Reg,
            TokenKind::Comma,
            TokenKind::ZReg,
        ]);
    }

    #[test]
    fn label_lowers_to_label_token() {
        let ir = IrInstruction::Label {
            dst: "loop".to_string(),
        };
        let tokens = lower_program(&[ir]);
        assert_eq!(tokens[0], Token::new(TokenKind::Label, "loop:"));
    }

    #[test]
    fn data8_with_hex_literal() {
        let ir = IrInstruction::Data8 {
            imm: "0x10".to_string(),
        };
        let tokens = lower_program(&[ir]);
        assert_eq!(tokens[0], Token::new(TokenKind::DotId, ".8byte"));
        assert_eq!(tokens[1], Token::new(TokenKind::HexInt, "0x10"));
    }
}
