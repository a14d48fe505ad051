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

//! Hand-rolled scanner for `--raw` mode. The token alphabet is tiny and the
//! recognition rules are conventional, so this reaches for character-class
//! scanning over one line at a time rather than a grammar engine.

use crate::errors::AsmError;
use crate::token::{classify_immediate, classify_register, Token, TokenKind};

/// Lexes a whole raw-assembly source string into tokens, one `NEWLINE` per
/// source line (including the final line if non-empty).
pub fn lex(source: &str) -> Result<Vec<Token>, AsmError> {
    let mut tokens = Vec::new();
    for line in source.lines() {
        lex_line(line, &mut tokens)?;
        tokens.push(Token::newline());
    }
    Ok(tokens)
}

fn lex_line(line: &str, tokens: &mut Vec<Token>) -> Result<(), AsmError> {
    let code = strip_comment(line);
    let mut chars = code.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        match ch {
            ',' => {
                chars.next();
                tokens.push(Token::new(TokenKind::Comma, ","));
            }
            '[' => {
                chars.next();
                tokens.push(Token::new(TokenKind::LBrack, "["));
            }
            ']' => {
                chars.next();
                tokens.push(Token::new(TokenKind::RBrack, "]"));
            }
            _ => {
                let end = find_word_end(code, start);
                let word = &code[start..end];
                for _ in start..end {
                    chars.next();
                }
                tokens.push(classify_word(word)?);
            }
        }
    }
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    let slash = line.find("//");
    let hash = line.find('#');
    match (slash, hash) {
        (Some(a), Some(b)) => &line[..a.min(b)],
        (Some(a), None) => &line[..a],
        (None, Some(b)) => &line[..b],
        (None, None) => line,
    }
}

/// Finds where the word starting at `start` ends. A `.` terminates the word
/// unless it is the word's first character, so `b.eq` lexes as `ID "b"`
/// followed by `DOTID ".eq"` with no space required, matching how condition
/// suffixes are written in ARM64 assembly.
fn find_word_end(code: &str, start: usize) -> usize {
    code[start..]
        .char_indices()
        .find(|&(i, c)| {
            c.is_whitespace() || matches!(c, ',' | '[' | ']') || (c == '.' && i > 0)
        })
        .map(|(i, _)| start + i)
        .unwrap_or(code.len())
}

/// Classifies one whitespace/punctuation-delimited word into its token.
fn classify_word(word: &str) -> Result<Token, AsmError> {
    if let Some(label) = word.strip_suffix(':') {
        return Ok(Token::new(TokenKind::Label, format!("{label}:")));
    }
    if let Some(kind) = classify_register(word) {
        return Ok(Token::new(kind, word));
    }
    if word.starts_with('.') {
        return Ok(Token::new(TokenKind::DotId, word));
    }
    let first = word.chars().next().ok_or_else(|| AsmError::Syntax("empty token".to_string()))?;
    if first.is_ascii_digit() || (first == '-' && word.len() > 1) {
        return Ok(Token::new(classify_immediate(word), word));
    }
    Ok(Token::new(TokenKind::Id, word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_an_instruction_line() {
        let tokens = lex("add x1, x2, x3\n").unwrap();
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
    fn lexes_label_and_data_directive() {
        let tokens = lex("target:\n.8byte target\n").unwrap();
        assert_eq!(tokens[0], Token::new(TokenKind::Label, "target:"));
        assert_eq!(tokens[2], Token::new(TokenKind::DotId, ".8byte"));
        assert_eq!(tokens[3], Token::new(TokenKind::Id, "target"));
    }

    #[test]
    fn lexes_brackets_and_hex_immediate() {
        let tokens = lex("ldur x1, [x2, 0x10]\n").unwrap();
        assert!(tokens.contains(&Token::new(TokenKind::LBrack, "[")));
        assert!(tokens.contains(&Token::new(TokenKind::RBrack, "]")));
        assert!(tokens.contains(&Token::new(TokenKind::HexInt, "0x10")));
    }

    #[test]
    fn strips_line_comments() {
        let tokens = lex("ret // return to caller\n").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Id, "ret"), Token::newline()]);
    }

    #[test]
    fn classifies_zreg_and_negative_immediate() {
        let tokens = lex("cmp x1, xzr\nb -4\n").unwrap();
        assert!(tokens.contains(&Token::new(TokenKind::ZReg, "xzr")));
        assert!(tokens.contains(&Token::new(TokenKind::Int, "-4")));
    }

    #[test]
    fn splits_condition_suffix_without_a_space() {
        let tokens = lex("b.eq done\n").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Id, "b"),
                Token::new(TokenKind::DotId, ".eq"),
                Token::new(TokenKind::Id, "done"),
                Token::newline(),
            ]
        );
    }
}
