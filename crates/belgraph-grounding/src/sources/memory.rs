//! In-memory ontology and UniProt mnemonic tables, filled programmatically
//! or from two-column TSV files.

use ahash::AHashMap;
use anyhow::Context;
use std::path::Path;

use belgraph_common::{BelError, Result};

use crate::lookup::{MnemonicResolver, OntologyLookup};

#[derive(Debug, Default)]
struct Terms {
    id_to_name: AHashMap<String, String>,
    name_to_id: AHashMap<String, String>,
}

/// Per-prefix identifier ↔ name tables.
#[derive(Debug, Default)]
pub struct InMemoryOntology {
    prefixes: AHashMap<String, Terms>,
}

/// Rows of `first<TAB>second`, skipping blanks and `#` comments.
fn two_columns(tsv: &str) -> impl Iterator<Item = (&str, &str)> {
    tsv.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let first = fields.next()?.trim();
            let second = fields.next()?.trim();
            (!first.is_empty() && !second.is_empty()).then_some((first, second))
        })
}

impl InMemoryOntology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, prefix: &str, identifier: &str, name: &str) {
        let terms = self.prefixes.entry(prefix.to_string()).or_default();
        terms.id_to_name.insert(identifier.to_string(), name.to_string());
        terms.name_to_id.entry(name.to_string()).or_insert_with(|| identifier.to_string());
    }

    /// Load `identifier<TAB>name` rows for one prefix. Returns rows loaded.
    pub fn load_tsv(&mut self, prefix: &str, tsv: &str) -> usize {
        let mut n = 0usize;
        for (identifier, name) in two_columns(tsv) {
            self.insert(prefix, identifier, name);
            n += 1;
        }
        tracing::info!(prefix, terms = n, "loaded ontology terms");
        n
    }

    pub fn load_tsv_file(&mut self, prefix: &str, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let tsv = std::fs::read_to_string(path)
            .with_context(|| format!("reading {prefix} terms from {}", path.display()))?;
        Ok(self.load_tsv(prefix, &tsv))
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    fn terms(&self, prefix: &str) -> Result<&Terms> {
        self.prefixes
            .get(prefix)
            .ok_or_else(|| BelError::Lookup(format!("no terms loaded for prefix {prefix}")))
    }
}

impl OntologyLookup for InMemoryOntology {
    fn get_name(&self, prefix: &str, identifier: &str) -> Result<Option<String>> {
        Ok(self.terms(prefix)?.id_to_name.get(identifier).cloned())
    }

    fn get_identifier(&self, prefix: &str, name: &str) -> Result<Option<String>> {
        Ok(self.terms(prefix)?.name_to_id.get(name).cloned())
    }
}

/// UniProt accession ↔ mnemonic table.
#[derive(Debug, Default)]
pub struct InMemoryMnemonics {
    id_to_mnemonic: AHashMap<String, String>,
    mnemonic_to_id: AHashMap<String, String>,
}

impl InMemoryMnemonics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: &str, mnemonic: &str) {
        self.id_to_mnemonic.insert(identifier.to_string(), mnemonic.to_string());
        self.mnemonic_to_id.insert(mnemonic.to_string(), identifier.to_string());
    }

    /// Load `accession<TAB>mnemonic` rows.
    pub fn from_tsv(tsv: &str) -> Self {
        let mut table = Self::new();
        for (identifier, mnemonic) in two_columns(tsv) {
            table.insert(identifier, mnemonic);
        }
        tracing::info!(entries = table.len(), "loaded UniProt mnemonics");
        table
    }

    pub fn len(&self) -> usize {
        self.id_to_mnemonic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_mnemonic.is_empty()
    }
}

impl MnemonicResolver for InMemoryMnemonics {
    fn get_mnemonic(&self, identifier: &str) -> Result<Option<String>> {
        Ok(self.id_to_mnemonic.get(identifier).cloned())
    }

    fn get_id_from_mnemonic(&self, mnemonic: &str) -> Result<Option<String>> {
        Ok(self.mnemonic_to_id.get(mnemonic).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ontology_tsv() {
        let mut o = InMemoryOntology::new();
        let n = o.load_tsv("mesh", "# mesh terms\nD009474\tNeurons\n\nD001921\tBrain\nbroken-row\n");
        assert_eq!(n, 2);
        assert_eq!(o.get_name("mesh", "D001921").unwrap().as_deref(), Some("Brain"));
        assert_eq!(o.get_identifier("mesh", "Neurons").unwrap().as_deref(), Some("D009474"));
        assert_eq!(o.get_identifier("mesh", "Liver").unwrap(), None);
        assert!(o.get_name("chebi", "15377").is_err());
    }

    #[test]
    fn test_ontology_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chebi.tsv");
        std::fs::write(&path, "15377\twater\n").unwrap();
        let mut o = InMemoryOntology::new();
        assert_eq!(o.load_tsv_file("chebi", &path).unwrap(), 1);
        assert!(o.has_prefix("chebi"));
        assert!(o.load_tsv_file("chebi", dir.path().join("nope.tsv")).is_err());
    }

    #[test]
    fn test_mnemonics() {
        let m = InMemoryMnemonics::from_tsv("P31749\tAKT1_HUMAN\nP42345\tMTOR_HUMAN\n");
        assert_eq!(m.len(), 2);
        assert_eq!(m.get_mnemonic("P31749").unwrap().as_deref(), Some("AKT1_HUMAN"));
        assert_eq!(m.get_id_from_mnemonic("MTOR_HUMAN").unwrap().as_deref(), Some("P42345"));
    }
}
