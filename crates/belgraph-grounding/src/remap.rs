//! Curated remaps of legacy namespaces onto current ontologies.

use ahash::AHashMap;
use anyhow::Context;
use std::path::Path;

/// Replacement concept for a legacy `(prefix, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTarget {
    pub prefix: String,
    pub identifier: String,
    pub name: String,
}

/// Selventa families and complexes that FamPlex covers.
const SELVENTA_TO_FAMPLEX: &[(&str, &str, &str)] = &[
    ("sfam", "AKT Family", "AKT"),
    ("sfam", "ERK Family", "ERK"),
    ("sfam", "JNK Family", "JNK"),
    ("sfam", "MAPK p38 Family", "p38"),
    ("sfam", "PKC Family", "PKC"),
    ("sfam", "RAS Family", "RAS"),
    ("sfam", "RAF Family", "RAF"),
    ("sfam", "TAP Family", "TAP"),
    ("sfam", "Histone H3 Family", "Histone_H3"),
    ("sfam", "Histone H4 Family", "Histone_H4"),
    ("sfam", "IKK Family", "IKK_family"),
    ("sfam", "PI3K Class IA Family", "PI3K"),
    ("scomp", "AP-1 Complex", "AP1"),
    ("scomp", "NFkB Complex", "NFkappaB"),
    ("scomp", "Calcineurin Complex", "Calcineurin"),
    ("scomp", "IKK Complex", "IKK_complex"),
    ("scomp", "Integrin Complex", "Integrins"),
    ("scomp", "Proteasome Complex", "Proteasome"),
];

/// Lookup keyed on the lower-cased prefix and the exact name.
#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    entries: AHashMap<(String, String), RemapTarget>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The curated Selventa → FamPlex remaps.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (prefix, name, famplex) in SELVENTA_TO_FAMPLEX {
            table.insert(prefix, name, "fplx", famplex, famplex);
        }
        table
    }

    pub fn insert(&mut self, prefix: &str, name: &str, new_prefix: &str, new_identifier: &str, new_name: &str) {
        self.entries.insert(
            (prefix.to_lowercase(), name.to_string()),
            RemapTarget {
                prefix: new_prefix.to_string(),
                identifier: new_identifier.to_string(),
                name: new_name.to_string(),
            },
        );
    }

    pub fn get(&self, prefix: &str, name: &str) -> Option<&RemapTarget> {
        self.entries.get(&(prefix.to_lowercase(), name.to_string()))
    }

    /// Load `prefix<TAB>name<TAB>new_prefix<TAB>new_identifier<TAB>new_name`
    /// rows. Short rows are skipped. Returns rows loaded.
    pub fn load_tsv(&mut self, tsv: &str) -> usize {
        let mut n = 0usize;
        for line in tsv.lines().filter(|l| !l.trim().is_empty() && !l.starts_with('#')) {
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if let [prefix, name, new_prefix, new_identifier, new_name, ..] = fields[..] {
                self.insert(prefix, name, new_prefix, new_identifier, new_name);
                n += 1;
            }
        }
        tracing::info!(entries = n, "loaded remapping rows");
        n
    }

    pub fn load_tsv_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let tsv = std::fs::read_to_string(path)
            .with_context(|| format!("reading remapping table from {}", path.display()))?;
        Ok(self.load_tsv(&tsv))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = RemapTable::with_defaults();
        let target = t.get("SFAM", "TAP Family").unwrap();
        assert_eq!(target.prefix, "fplx");
        assert_eq!(target.identifier, "TAP");
        assert_eq!(target.name, "TAP");
        assert!(t.get("sfam", "tap family").is_none());
    }

    #[test]
    fn test_tsv_rows() {
        let mut t = RemapTable::new();
        let n = t.load_tsv("# legacy\nSCOMP\tgamma Secretase Complex\tfplx\tGamma_secretase\tGamma_secretase\nshort\trow\n");
        assert_eq!(n, 1);
        assert_eq!(t.get("scomp", "gamma Secretase Complex").unwrap().identifier, "Gamma_secretase");
    }
}
