//! Collaborator interfaces consulted while grounding.
//!
//! Lookups return `Ok(None)` when the source knows the prefix but not the
//! term, and `Err(BelError::Lookup)` when it cannot answer for the prefix at
//! all. The grounder downgrades both to warnings.

use belgraph_common::{BelError, Result};

/// Raw namespace → canonical prefix.
pub trait PrefixNormaliser {
    fn normalise_prefix(&self, raw: &str) -> Option<String>;
}

/// Identifier ↔ name mapping per prefix.
pub trait OntologyLookup {
    fn get_name(&self, prefix: &str, identifier: &str) -> Result<Option<String>>;
    fn get_identifier(&self, prefix: &str, name: &str) -> Result<Option<String>>;
}

/// UniProt accession ↔ mnemonic (e.g. `P31749` ↔ `AKT1_HUMAN`).
pub trait MnemonicResolver {
    fn get_mnemonic(&self, identifier: &str) -> Result<Option<String>>;
    fn get_id_from_mnemonic(&self, mnemonic: &str) -> Result<Option<String>>;
}

/// Several ontology sources asked in order. The first source that can
/// answer for a prefix decides; a miss there is final.
#[derive(Default)]
pub struct ChainedOntology {
    sources: Vec<Box<dyn OntologyLookup + Send + Sync>>,
}

impl ChainedOntology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl OntologyLookup + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn push(&mut self, source: Box<dyn OntologyLookup + Send + Sync>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn first_answer<F>(&self, prefix: &str, ask: F) -> Result<Option<String>>
    where
        F: Fn(&dyn OntologyLookup) -> Result<Option<String>>,
    {
        for source in &self.sources {
            match ask(source.as_ref()) {
                Ok(answer) => return Ok(answer),
                Err(BelError::Lookup(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(BelError::Lookup(format!("no ontology source for prefix {prefix}")))
    }
}

impl OntologyLookup for ChainedOntology {
    fn get_name(&self, prefix: &str, identifier: &str) -> Result<Option<String>> {
        self.first_answer(prefix, |s| s.get_name(prefix, identifier))
    }

    fn get_identifier(&self, prefix: &str, name: &str) -> Result<Option<String>> {
        self.first_answer(prefix, |s| s.get_identifier(prefix, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::InMemoryOntology;

    #[test]
    fn test_chain_falls_through_unknown_prefixes() {
        let mut mesh = InMemoryOntology::new();
        mesh.insert("mesh", "D009474", "Neurons");
        let mut go = InMemoryOntology::new();
        go.insert("go", "0006468", "protein phosphorylation");
        let chain = ChainedOntology::new().with(mesh).with(go);

        assert_eq!(chain.get_name("go", "0006468").unwrap().as_deref(), Some("protein phosphorylation"));
        assert_eq!(chain.get_identifier("mesh", "Neurons").unwrap().as_deref(), Some("D009474"));
        assert_eq!(chain.get_name("mesh", "D000000").unwrap(), None);
        assert!(matches!(chain.get_name("chebi", "15377"), Err(BelError::Lookup(_))));
    }
}
