//! Grounding configuration.
//!
//! Holds the namespace sets the grounding pass consults. Defaults cover the
//! usual BEL corpora; a TOML or YAML file can extend or replace them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::constants::BEL_DEFAULT_NAMESPACE;
use crate::error::{BelError, Result};

/// Complete grounding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConfig {
    /// Namespaces holding free text; never grounded.
    #[serde(default = "default_free_text")]
    pub free_text_namespaces: BTreeSet<String>,

    /// Prefixes that cannot be resolved right now; left name-only.
    #[serde(default = "default_skip")]
    pub skip_namespaces: BTreeSet<String>,

    /// Prefixes whose names double as identifiers.
    #[serde(default = "default_no_names")]
    pub no_name_namespaces: BTreeSet<String>,

    /// Namespace of the built-in modification vocabulary.
    #[serde(default = "default_bel_namespace")]
    pub default_namespace: String,

    /// Prefix handled by the UniProt mnemonic resolver.
    #[serde(default = "default_uniprot")]
    pub uniprot_prefix: String,

    /// Extra raw-namespace → prefix synonyms layered over the built-in registry.
    #[serde(default)]
    pub prefix_synonyms: BTreeMap<String, String>,

    /// Optional TSV of curated `(prefix, name) -> (prefix, identifier, name)` remaps.
    #[serde(default)]
    pub remapping_path: Option<String>,

    /// Optional per-prefix TSVs of `identifier<TAB>name` rows.
    #[serde(default)]
    pub ontology_paths: BTreeMap<String, String>,
}

fn default_free_text() -> BTreeSet<String> { set(&["text", "fixme"]) }
fn default_skip() -> BTreeSet<String> { set(&["ncbigene", "pubchem.compound"]) }
fn default_no_names() -> BTreeSet<String> { set(&["fplx", "eccode", "dbsnp"]) }
fn default_bel_namespace() -> String { BEL_DEFAULT_NAMESPACE.to_string() }
fn default_uniprot() -> String { "uniprot".to_string() }

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            free_text_namespaces: default_free_text(),
            skip_namespaces: default_skip(),
            no_name_namespaces: default_no_names(),
            default_namespace: default_bel_namespace(),
            uniprot_prefix: default_uniprot(),
            prefix_synonyms: BTreeMap::new(),
            remapping_path: None,
            ontology_paths: BTreeMap::new(),
        }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl GroundingConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BelError::Config(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading grounding config");
        Self::from_toml_str(&content)
    }

    /// Load from a YAML file.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading grounding config");
        serde_yaml::from_str(&content).map_err(|e| BelError::Config(e.to_string()))
    }

    /// Save to a YAML file.
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| BelError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Free-text sentinels are matched case-insensitively.
    pub fn is_free_text(&self, namespace: &str) -> bool {
        self.free_text_namespaces.contains(&namespace.to_lowercase())
    }

    pub fn is_skipped(&self, prefix: &str) -> bool {
        self.skip_namespaces.contains(prefix)
    }

    pub fn has_no_names(&self, prefix: &str) -> bool {
        self.no_name_namespaces.contains(prefix)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
