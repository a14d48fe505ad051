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

//! The token alphabet shared by every input mode: the pre-tokenized reader,
//! the raw-assembly lexer, and the pseudocode-to-IR lowering all produce
//! the same closed set of [`TokenKind`]s, which the two-pass assembler
//! consumes without caring which front end produced them.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    DotId,
    Label,
    Id,
    HexInt,
    Reg,
    ZReg,
    Int,
    Comma,
    LBrack,
    RBrack,
    Newline,
}

impl TokenKind {
    /// Maps the upper-case names used by the pre-tokenized input format
    /// (`KIND LEXEME` pairs) onto a `TokenKind`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "DOTID" => TokenKind::DotId,
            "LABEL" => TokenKind::Label,
            "ID" => TokenKind::Id,
            "HEXINT" => TokenKind::HexInt,
            "REG" => TokenKind::Reg,
            "ZREG" => TokenKind::ZReg,
            "INT" => TokenKind::Int,
            "COMMA" => TokenKind::Comma,
            "LBRACK" => TokenKind::LBrack,
            "RBRACK" => TokenKind::RBrack,
            "NEWLINE" => TokenKind::Newline,
            _ => return None,
        })
    }
}

/// A single `(kind, lexeme)` pair. `lexeme` is empty for `Newline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn newline() -> Self {
        Token {
            kind: TokenKind::Newline,
            lexeme: String::new(),
        }
    }
}

/// Classifies a register lexeme as it appears in source text: `xzr` is a
/// `ZReg`, `sp` is an ordinary `Id` (only `r`-slots accept it), and `xN`
/// with `N` in `0..30` is a `Reg`. Anything else is not a register token
/// and callers should classify it as a plain `Id` or numeric token instead.
pub fn classify_register(lexeme: &str) -> Option<TokenKind> {
    if lexeme == "xzr" {
        Some(TokenKind::ZReg)
    } else if lexeme == "sp" {
        Some(TokenKind::Id)
    } else if let Some(n) = lexeme.strip_prefix('x') {
        if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) {
            n.parse::<u32>().ok().filter(|&v| v <= 30).map(|_| TokenKind::Reg)
        } else {
            None
        }
    } else {
        None
    }
}

/// Classifies an immediate-or-label lexeme per the rule shared by the IR
/// codegen and the raw lexer: `0x`/`0X`-prefixed is `HexInt`, a signed
/// decimal run is `Int`, anything else is a label reference (`Id`).
pub fn classify_immediate(lexeme: &str) -> TokenKind {
    if lexeme.len() > 2 && (lexeme.starts_with("0x") || lexeme.starts_with("0X")) {
        TokenKind::HexInt
    } else {
        let digits = lexeme.strip_prefix('-').unwrap_or(lexeme);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Int
        } else {
            TokenKind::Id
        }
    }
}
