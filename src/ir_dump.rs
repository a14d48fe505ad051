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

//! Human-readable `--dump-ir --high` rendering, written to the diagnostic
//! channel instead of assembling.

use crate::ir::{ArithOp, IrInstruction};
use std::fmt::Write as _;

fn arith_name(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "ADD",
        ArithOp::Sub => "SUB",
        ArithOp::Mul => "MUL",
        ArithOp::Div => "DIV",
        ArithOp::Mod => "MOD",
    }
}

/// Renders a whole program's IR, one line per instruction.
pub fn dump(program: &[IrInstruction]) -> String {
    let mut out = String::new();
    for instr in program {
        dump_one(instr, &mut out);
    }
    out
}

fn dump_one(instr: &IrInstruction, out: &mut String) {
    match instr {
        IrInstruction::Label { dst } => {
            let _ = writeln!(out, "{dst}:");
        }
        IrInstruction::Arith { op, dst, src1, src2 } => {
            let _ = writeln!(out, "  {} {dst}, {src1}, {src2}", arith_name(*op));
        }
        IrInstruction::Mov { dst, src1 } => {
            let _ = writeln!(out, "  MOV {dst}, {src1}");
        }
        IrInstruction::Load { dst, src1, imm } => {
            let _ = writeln!(out, "  LOAD {dst}, [{src1} + {imm}]");
        }
        IrInstruction::Store { dst, src1, imm } => {
            let _ = writeln!(out, "  STORE [{dst} + {imm}], {src1}");
        }
        IrInstruction::CmpBranch {
            src1,
            src2,
            cond,
            label,
        } => {
            let _ = writeln!(out, "  CMP_BRANCH {src1} {} {src2}, {label}", cond.symbol());
        }
        IrInstruction::Branch { label } => {
            let _ = writeln!(out, "  BRANCH {label}");
        }
        IrInstruction::Call { src1 } => {
            let _ = writeln!(out, "  CALL {src1}");
        }
        IrInstruction::Ret => {
            let _ = writeln!(out, "  RET");
        }
        IrInstruction::Data8 { imm } => {
            let _ = writeln!(out, "  DATA8 {imm}");
        }
    }
}
