// registry.rs — Operator alias-spec registry
//
// Holds the alias contract of every registered operator: one annotation per
// input operand and one per output, in signature order. Populated once by
// the schema parser at registration time; read-only for analysis afterward.
// Registration is insert-once — contracts are never updated or removed.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::annot::AliasAnnotation;

// ── Data types ──────────────────────────────────────────────────────────────

/// Alias contract of one operator signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorAliasSpec {
    pub name: String,
    /// One annotation per input operand, in signature order.
    pub inputs: Vec<AliasAnnotation>,
    /// One annotation per output, in signature order.
    pub outputs: Vec<AliasAnnotation>,
}

/// Errors that can occur during registration.
#[derive(Debug)]
pub enum RegistryError {
    DuplicateOperator { name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateOperator { name } => {
                write!(
                    f,
                    "duplicate operator '{}': an alias contract is already registered",
                    name
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

// ── Registry ────────────────────────────────────────────────────────────────

/// Operator alias-spec registry.
#[derive(Debug, Default)]
pub struct AliasSpecRegistry {
    ops: HashMap<String, OperatorAliasSpec>,
}

impl AliasSpecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one operator's alias contract. Duplicate names are rejected:
    /// the first registration wins and the registry is left unchanged.
    pub fn register(&mut self, spec: OperatorAliasSpec) -> Result<(), RegistryError> {
        if self.ops.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateOperator { name: spec.name });
        }
        self.ops.insert(spec.name.clone(), spec);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&OperatorAliasSpec> {
        self.ops.get(name)
    }

    pub fn operators(&self) -> impl Iterator<Item = &OperatorAliasSpec> {
        self.ops.values()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Canonical compact JSON of every registered contract, sorted by
    /// operator name for deterministic output.
    pub fn canonical_json(&self) -> String {
        let mut specs: Vec<&OperatorAliasSpec> = self.ops.values().collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        serde_json::to_string(&specs).expect("alias specs serialize to JSON")
    }

    /// SHA-256 of [`canonical_json`](Self::canonical_json) as lowercase hex.
    /// Stable across runs for equal contents; suitable as a cache key for
    /// downstream analysis artifacts.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        let hash = hasher.finalize();
        let mut hex = String::with_capacity(64);
        for byte in hash {
            let _ = write!(hex, "{:02x}", byte);
        }
        hex
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
