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

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use arm64asm::file_reader::AsmFileReader;
use arm64asm::InputMode;
use clap::Parser as ClapParser;

#[derive(ClapParser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Pre-tokenized `KIND LEXEME` input (the default).
    #[clap(long)]
    tokenized: bool,
    /// Raw ARM64 assembly text input.
    #[clap(long)]
    raw: bool,
    /// C-like pseudocode input.
    #[clap(long)]
    high: bool,
    /// Write the pseudocode's IR to the diagnostic channel instead of assembling.
    #[clap(long)]
    dump_ir: bool,
    /// Input file, or `-`/omitted for standard input.
    file: Option<PathBuf>,
}

impl Opts {
    fn mode(&self) -> InputMode {
        if self.raw {
            InputMode::Raw
        } else if self.high {
            InputMode::High
        } else {
            InputMode::Tokenized
        }
    }

    fn path(&self) -> PathBuf {
        match &self.file {
            Some(p) if p != &PathBuf::from("-") => p.clone(),
            _ => PathBuf::from("-"),
        }
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    let reader = AsmFileReader;
    let path = opts.path();

    if opts.dump_ir && opts.high {
        return match arm64asm::dump_ir(&path, &reader) {
            Ok(rendered) => {
                eprint!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("ERROR: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match arm64asm::assemble(&path, opts.mode(), &reader) {
        Ok(output) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            if handle.write_all(&output.bytes).is_err() {
                eprintln!("ERROR: failed to write to stdout");
                return ExitCode::FAILURE;
            }
            eprint!("{}", arm64asm::assembler::diagnostic_dump(&output.symbols));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
