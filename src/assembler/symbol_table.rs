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

use crate::errors::AsmError;
use std::collections::HashMap;

/// Insertion-ordered label → byte-address map. Lookups go through the
/// `HashMap`; the diagnostic dump after pass 2 walks `order` so labels are
/// reported in first-definition order rather than hash order.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    addresses: HashMap<String, u64>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `name` at `address`, or fails with `DuplicateLabel` if it is
    /// already defined. A failed call leaves both the lookup map and the
    /// order list untouched.
    pub fn define(&mut self, name: &str, address: u64) -> Result<(), AsmError> {
        if self.addresses.contains_key(name) {
            return Err(AsmError::DuplicateLabel(name.to_string()));
        }
        self.addresses.insert(name.to_string(), address);
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<u64, AsmError> {
        self.addresses
            .get(name)
            .copied()
            .ok_or_else(|| AsmError::UndefinedLabel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.addresses.contains_key(name)
    }

    /// Names in first-definition order, for the post-pass diagnostic dump.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
