//! Namespace → prefix normalisation from a built-in synonym registry.

use ahash::AHashMap;

use belgraph_common::GroundingConfig;

use crate::lookup::PrefixNormaliser;

/// Canonical prefixes and the namespace spellings seen in BEL documents.
const REGISTRY: &[(&str, &[&str])] = &[
    ("bel", &[]),
    ("chebi", &["CHEBIID"]),
    ("dbsnp", &["SNP"]),
    ("doid", &["DO"]),
    ("eccode", &["EC", "ec-code"]),
    ("efo", &[]),
    ("fplx", &["FPLX", "famplex"]),
    ("go", &["GOBP", "GOBPID", "GOCC", "GOCCID", "GOMF"]),
    ("hgnc", &["HGNCID"]),
    ("hgnc.genegroup", &["HGNC_GENE_FAMILY", "HGNCGF"]),
    ("hp", &["HPO"]),
    ("mesh", &["MESHD", "MESHPP", "MESHCS", "MESHC", "MESHPP_ID", "MESHD_ID"]),
    ("mgi", &["MGIID"]),
    ("mirbase", &[]),
    ("mod", &["PSI-MOD", "PSIMOD"]),
    ("ncbigene", &["EGID", "ENTREZ", "EG"]),
    ("ncbitaxon", &["TAXONOMY", "NCBITAXON_ID"]),
    ("pubchem.compound", &["PUBCHEM", "CID"]),
    ("rgd", &["RGDID"]),
    ("scomp", &["SCOMP"]),
    ("sdis", &[]),
    ("sfam", &["SFAM"]),
    ("uniprot", &["UP", "SP", "SPID", "SPAC", "SWISSPROT"]),
];

/// Case-insensitive synonym table; config synonyms layer over the built-ins.
pub struct RegistryPrefixes {
    synonyms: AHashMap<String, String>,
}

impl RegistryPrefixes {
    pub fn new() -> Self {
        let mut synonyms = AHashMap::new();
        for (prefix, spellings) in REGISTRY {
            synonyms.insert(prefix.to_lowercase(), prefix.to_string());
            for spelling in *spellings {
                synonyms.insert(spelling.to_lowercase(), prefix.to_string());
            }
        }
        Self { synonyms }
    }

    pub fn from_config(config: &GroundingConfig) -> Self {
        let mut registry = Self::new();
        for (raw, prefix) in &config.prefix_synonyms {
            registry.add_synonym(raw, prefix);
        }
        registry
    }

    /// Map `raw` (any case) to `prefix`. The prefix itself also becomes known.
    pub fn add_synonym(&mut self, raw: &str, prefix: &str) {
        self.synonyms.insert(raw.to_lowercase(), prefix.to_string());
        self.synonyms.entry(prefix.to_lowercase()).or_insert_with(|| prefix.to_string());
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl Default for RegistryPrefixes {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixNormaliser for RegistryPrefixes {
    fn normalise_prefix(&self, raw: &str) -> Option<String> {
        self.synonyms.get(&raw.trim().to_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_spellings() {
        let r = RegistryPrefixes::new();
        assert_eq!(r.normalise_prefix("MESH").as_deref(), Some("mesh"));
        assert_eq!(r.normalise_prefix("MESHD").as_deref(), Some("mesh"));
        assert_eq!(r.normalise_prefix("EGID").as_deref(), Some("ncbigene"));
        assert_eq!(r.normalise_prefix("SFAM").as_deref(), Some("sfam"));
        assert_eq!(r.normalise_prefix("GOBP").as_deref(), Some("go"));
        assert_eq!(r.normalise_prefix("bel").as_deref(), Some("bel"));
    }

    #[test]
    fn test_unknown_namespace() {
        assert!(RegistryPrefixes::new().normalise_prefix("NOT_A_NAMESPACE").is_none());
    }

    #[test]
    fn test_config_synonyms() {
        let mut config = GroundingConfig::default();
        config.prefix_synonyms.insert("MyLab".into(), "mylab".into());
        let r = RegistryPrefixes::from_config(&config);
        assert_eq!(r.normalise_prefix("MYLAB").as_deref(), Some("mylab"));
        assert_eq!(r.normalise_prefix("mylab").as_deref(), Some("mylab"));
    }
}
