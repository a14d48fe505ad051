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

pub mod assembler;
pub mod errors;
pub mod file_reader;
pub mod ir;
pub mod ir_codegen;
pub mod ir_dump;
pub mod pseudo_parser;
pub mod raw_lexer;
pub mod token;
pub mod tokenized_reader;

use std::path::Path;

use anyhow::Result;
use assembler::AssembleOutput;
use errors::AsmError;
use file_reader::FileReader;

/// Which of the three input forms a source file is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Tokenized,
    Raw,
    High,
}

/// Reads `path` through `reader`, mapping any failure to `AsmError::Io` so
/// it flows through the same fatal-error taxonomy as the rest of the
/// pipeline instead of an opaque `anyhow` chain.
fn read_source<F: FileReader>(path: &Path, reader: &F) -> Result<String, AsmError> {
    reader
        .read_to_string(path)
        .map_err(|e| AsmError::Io(format!("failed to read {}: {e}", path.display())))
}

/// Reads `path` (or standard input for `-`) through `reader`, lowers it to
/// a token stream according to `mode`, then runs the two-pass assembler.
pub fn assemble<F: FileReader>(path: &Path, mode: InputMode, reader: &F) -> Result<AssembleOutput> {
    let source = read_source(path, reader)?;
    let tokens = lower(&source, mode)?;
    Ok(assembler::assemble(&tokens)?)
}

fn lower(source: &str, mode: InputMode) -> Result<Vec<token::Token>> {
    let tokens = match mode {
        InputMode::Tokenized => tokenized_reader::read(source)?,
        InputMode::Raw => raw_lexer::lex(source)?,
        InputMode::High => {
            let ir = pseudo_parser::parse_program(source)?;
            ir_codegen::lower_program(&ir)
        }
    };
    Ok(tokens)
}

/// Parses pseudocode and renders its IR as `--dump-ir --high` text, without
/// running the assembler.
pub fn dump_ir<F: FileReader>(path: &Path, reader: &F) -> Result<String> {
    let source = read_source(path, reader)?;
    let ir = pseudo_parser::parse_program(&source)?;
    Ok(ir_dump::dump(&ir))
}
