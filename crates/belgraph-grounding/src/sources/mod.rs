//! Concrete grounding collaborators.

pub mod hgnc;
pub mod memory;
pub mod registry;

pub use hgnc::{HgncOntology, HgncRecord};
pub use memory::{InMemoryMnemonics, InMemoryOntology};
pub use registry::RegistryPrefixes;
