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

// Base words for the fixed ARM64 teaching subset. Each mnemonic's encoded
// word is this base OR'd with its operand-derived fields.
pub const ADD_BASE: u32 = 0x8B20_6000;
pub const SUB_BASE: u32 = 0xCB20_6000;
pub const MUL_BASE: u32 = 0x9B00_7C00;
pub const SMULH_BASE: u32 = 0x9B40_7C00;
pub const UMULH_BASE: u32 = 0x9BC0_7C00;
pub const SDIV_BASE: u32 = 0x9AC0_0C00;
pub const UDIV_BASE: u32 = 0x9AC0_0800;
pub const CMP_BASE: u32 = 0xEB20_601F;
pub const BR_BASE: u32 = 0xD61F_0000;
pub const BLR_BASE: u32 = 0xD63F_0000;
pub const LDUR_BASE: u32 = 0xF840_0000;
pub const STUR_BASE: u32 = 0xF800_0000;
pub const LDR_BASE: u32 = 0x5800_0000;
pub const B_BASE: u32 = 0x1400_0000;
pub const B_COND_BASE: u32 = 0x5400_0000;

/// `.eq 0, .ne 1, .hs 2, .lo 3, .hi 8, .ls 9, .ge 10, .lt 11, .gt 12, .le 13`
pub const CONDITIONS: &[(&str, u32)] = &[
    ("eq", 0),
    ("ne", 1),
    ("hs", 2),
    ("lo", 3),
    ("hi", 8),
    ("ls", 9),
    ("ge", 10),
    ("lt", 11),
    ("gt", 12),
    ("le", 13),
];
