//! Canonical tuples and the small rendering helpers shared by every node kind.
//!
//! A `CanonicalTuple` is the structural identity of a node or variant: nodes
//! hash and compare through it, so any two nodes with equal tuples are the
//! same graph vertex.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::fmt;

/// Heterogeneous nested tuple with a total order.
///
/// Ordering compares the discriminant first (`Int < Str < Tuple`) and then
/// the payload, which gives a deterministic sort over mixed members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalTuple {
    Int(i64),
    Str(String),
    Tuple(Vec<CanonicalTuple>),
}

impl CanonicalTuple {
    pub fn tuple(items: Vec<CanonicalTuple>) -> Self {
        CanonicalTuple::Tuple(items)
    }

    /// Tuple of the given items after sorting them.
    pub fn sorted(mut items: Vec<CanonicalTuple>) -> Self {
        items.sort();
        CanonicalTuple::Tuple(items)
    }

    pub fn len(&self) -> usize {
        match self {
            CanonicalTuple::Tuple(items) => items.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CanonicalTuple::Tuple(items) if items.is_empty())
    }

    pub fn get(&self, index: usize) -> Option<&CanonicalTuple> {
        match self {
            CanonicalTuple::Tuple(items) => items.get(index),
            _ => None,
        }
    }
}

impl From<&str> for CanonicalTuple {
    fn from(s: &str) -> Self { CanonicalTuple::Str(s.to_string()) }
}

impl From<String> for CanonicalTuple {
    fn from(s: String) -> Self { CanonicalTuple::Str(s) }
}

impl From<i64> for CanonicalTuple {
    fn from(i: i64) -> Self { CanonicalTuple::Int(i) }
}

impl From<u32> for CanonicalTuple {
    fn from(i: u32) -> Self { CanonicalTuple::Int(i64::from(i)) }
}

impl From<Vec<CanonicalTuple>> for CanonicalTuple {
    fn from(items: Vec<CanonicalTuple>) -> Self { CanonicalTuple::Tuple(items) }
}

impl fmt::Display for CanonicalTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalTuple::Int(i) => write!(f, "{i}"),
            CanonicalTuple::Str(s) => write!(f, "'{s}'"),
            CanonicalTuple::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ── Rendering helpers ─────────────────────────────────────────────────────────

/// Quote a string that isn't solely ASCII alphanumeric.
pub fn ensure_quotes(s: &str) -> String {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
        s.to_string()
    } else {
        format!("\"{s}\"")
    }
}

/// Hex-encoded SHA-512 digest.
pub fn sha512_hex(data: &[u8]) -> String {
    let digest = Sha512::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
