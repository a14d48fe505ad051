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

//! Reader for the default `--tokenized` input mode: whitespace-separated
//! `KIND LEXEME` pairs, one per line, with `NEWLINE` carrying no lexeme.

use crate::errors::AsmError;
use crate::token::{Token, TokenKind};

pub fn read(source: &str) -> Result<Vec<Token>, AsmError> {
    let mut tokens = Vec::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, char::is_whitespace);
        let kind_name = parts.next().unwrap_or("");
        let kind = TokenKind::from_name(kind_name)
            .ok_or_else(|| AsmError::Syntax(format!("unknown token kind: {kind_name}")))?;
        if kind == TokenKind::Newline {
            tokens.push(Token::newline());
            continue;
        }
        let lexeme = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AsmError::Syntax(format!("{kind_name} requires a lexeme")))?;
        tokens.push(Token::new(kind, lexeme));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_an_instruction_statement() {
        let source = "ID add\nREG x1\nCOMMA ,\nREG x2\nCOMMA ,\nREG x3\nNEWLINE\n";
        let tokens = read(source).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Id, "add"),
                Token::new(TokenKind::Reg, "x1"),
                Token::new(TokenKind::Comma, ","),
                Token::new(TokenKind::Reg, "x2"),
                Token::new(TokenKind::Comma, ","),
                Token::new(TokenKind::Reg, "x3"),
                Token::newline(),
            ]
        );
    }

    #[test]
    fn unknown_kind_is_a_syntax_error() {
        assert!(matches!(read("BOGUS x1\n"), Err(AsmError::Syntax(_))));
    }

    #[test]
    fn missing_lexeme_is_a_syntax_error() {
        assert!(matches!(read("REG\n"), Err(AsmError::Syntax(_))));
    }
}
