//! Per-concept grounding outcomes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundingOutcome {
    /// Namespace normalised and the missing half looked up.
    Grounded,
    /// Replaced from the curated remapping table.
    Remapped,
    /// Free text or a prefix that is deliberately not resolved.
    Skipped,
    /// Prefix or term could not be resolved; left as it was.
    Unresolved,
}

/// Unresolved concept as it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedConcept {
    pub namespace: String,
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingReport {
    pub grounded: usize,
    pub remapped: usize,
    pub skipped: usize,
    pub unresolved: usize,
    pub unresolved_concepts: Vec<UnresolvedConcept>,
}

impl GroundingReport {
    pub fn record(&mut self, outcome: GroundingOutcome, namespace: &str, term: &str) {
        match outcome {
            GroundingOutcome::Grounded => self.grounded += 1,
            GroundingOutcome::Remapped => self.remapped += 1,
            GroundingOutcome::Skipped => self.skipped += 1,
            GroundingOutcome::Unresolved => {
                self.unresolved += 1;
                self.unresolved_concepts.push(UnresolvedConcept {
                    namespace: namespace.to_string(),
                    term: term.to_string(),
                });
            }
        }
    }

    pub fn total(&self) -> usize {
        self.grounded + self.remapped + self.skipped + self.unresolved
    }

    /// No concept was left unresolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved == 0
    }

    pub fn merge(&mut self, other: GroundingReport) {
        self.grounded += other.grounded;
        self.remapped += other.remapped;
        self.skipped += other.skipped;
        self.unresolved += other.unresolved;
        self.unresolved_concepts.extend(other.unresolved_concepts);
    }
}
