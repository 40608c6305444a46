//! Grounding of BEL concepts: namespace normalisation, identifier and name
//! lookup, curated remaps, and the node, edge and graph passes built on them.

pub mod grounder;
pub mod lookup;
pub mod modifications;
pub mod remap;
pub mod report;
pub mod sources;

pub use grounder::Grounder;
pub use lookup::{ChainedOntology, MnemonicResolver, OntologyLookup, PrefixNormaliser};
pub use modifications::ModificationTables;
pub use remap::{RemapTable, RemapTarget};
pub use report::{GroundingOutcome, GroundingReport, UnresolvedConcept};
pub use sources::{HgncOntology, HgncRecord, InMemoryMnemonics, InMemoryOntology, RegistryPrefixes};
