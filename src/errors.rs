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

use thiserror::Error;

/// Every failure in this crate is fatal: an `AsmError` aborts the run after
/// one `ERROR:` line is written to the diagnostic channel. There is no
/// partial-success or retry path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("Syntax Error: {0}")]
    Syntax(String),

    #[error("Unknown Instruction: {0}")]
    UnknownInstruction(String),

    #[error("Invalid Register: {0}")]
    InvalidRegister(String),

    #[error("Immediate out of range: {0}")]
    ImmediateRange(String),

    #[error("Unknown Condition: {0}")]
    UnknownCondition(String),

    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),

    #[error("Undefined label: {0}")]
    UndefinedLabel(String),

    #[error("Missing operand: {0}")]
    MissingOperand(String),

    #[error("IO error: {0}")]
    Io(String),
}
