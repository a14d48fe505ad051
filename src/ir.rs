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

//! The target-independent middle layer of the pseudocode pipeline. A sum
//! type rather than a single tagged record with an op code: exhaustive
//! matching in the codegen means a new variant that nobody lowers is a
//! compile error, not a silently-dropped instruction.

use crate::errors::AsmError;

/// The five arithmetic IR operations, shared by `ADD`/`SUB`/`MUL`/`DIV`/`MOD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    /// Maps the pseudocode's infix operator to an `ArithOp`. Anything else
    /// is not an arithmetic assignment.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => ArithOp::Add,
            "-" => ArithOp::Sub,
            "*" => ArithOp::Mul,
            "/" => ArithOp::Div,
            "%" => ArithOp::Mod,
            _ => return None,
        })
    }
}

/// The six comparison operators an `if` clause may use. All six have a
/// direct ARM64 condition-code counterpart, so constructing a `CmpCond`
/// from pseudocode text can never itself fail at the codegen stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpCond {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpCond {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "==" => CmpCond::Eq,
            "!=" => CmpCond::Ne,
            "<" => CmpCond::Lt,
            "<=" => CmpCond::Le,
            ">" => CmpCond::Gt,
            ">=" => CmpCond::Ge,
            _ => return None,
        })
    }

    /// The condition-code suffix used by `b.cond` tokens (`eq`, `ne`, ...).
    pub fn suffix(self) -> &'static str {
        match self {
            CmpCond::Eq => "eq",
            CmpCond::Ne => "ne",
            CmpCond::Lt => "lt",
            CmpCond::Le => "le",
            CmpCond::Gt => "gt",
            CmpCond::Ge => "ge",
        }
    }

    /// The comparison operator as written in source, used by the IR dump.
    pub fn symbol(self) -> &'static str {
        match self {
            CmpCond::Eq => "==",
            CmpCond::Ne => "!=",
            CmpCond::Lt => "<",
            CmpCond::Le => "<=",
            CmpCond::Gt => ">",
            CmpCond::Ge => ">=",
        }
    }
}

/// One target-independent instruction. Register fields hold source
/// register lexemes (`x3`, `xzr`, `sp`); `label` and `imm` hold raw
/// pseudocode text carried through to the token stage unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrInstruction {
    Label {
        dst: String,
    },
    Arith {
        op: ArithOp,
        dst: String,
        src1: String,
        src2: String,
    },
    Mov {
        dst: String,
        src1: String,
    },
    Load {
        dst: String,
        src1: String,
        imm: String,
    },
    Store {
        dst: String,
        src1: String,
        imm: String,
    },
    CmpBranch {
        src1: String,
        src2: String,
        cond: CmpCond,
        label: String,
    },
    Branch {
        label: String,
    },
    Call {
        src1: String,
    },
    Ret,
    Data8 {
        imm: String,
    },
}

/// Parses a register lexeme: `xzr`, `sp`, or `xN` with `N` decimal. Used by
/// the pseudocode parser to decide whether a word is a register operand
/// before committing to a production.
pub fn is_register_lexeme(word: &str) -> bool {
    word == "xzr" || word == "sp" || matches!(word.strip_prefix('x'), Some(n) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Unwraps an optional operand word, rejecting a missing or empty one with
/// `AsmError::MissingOperand(what)`. Used by the `.8byte` production.
pub fn require_operand<'a>(word: Option<&'a str>, what: &str) -> Result<&'a str, AsmError> {
    match word {
        Some(w) if !w.is_empty() => Ok(w),
        _ => Err(AsmError::MissingOperand(what.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arith_op_symbols() {
        assert_eq!(ArithOp::from_symbol("+"), Some(ArithOp::Add));
        assert_eq!(ArithOp::from_symbol("%"), Some(ArithOp::Mod));
        assert_eq!(ArithOp::from_symbol("^"), None);
    }

    #[test]
    fn cmp_cond_symbols_and_suffixes() {
        assert_eq!(CmpCond::from_symbol("=="), Some(CmpCond::Eq));
        assert_eq!(CmpCond::from_symbol(">="), Some(CmpCond::Ge));
        assert_eq!(CmpCond::from_symbol("<>"), None);
        assert_eq!(CmpCond::Eq.suffix(), "eq");
        assert_eq!(CmpCond::Ge.suffix(), "ge");
    }

    #[test]
    fn register_lexemes() {
        assert!(is_register_lexeme("xzr"));
        assert!(is_register_lexeme("sp"));
        assert!(is_register_lexeme("x12"));
        assert!(!is_register_lexeme("x"));
        assert!(!is_register_lexeme("label"));
    }
}
