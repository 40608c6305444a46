//! HGNC gene symbols as an ontology source.
//!
//! Reads the HGNC complete set TSV (~7 MB) and answers `hgnc` lookups in
//! both directions. Name lookups accept approved, alias and previous
//! symbols, case-insensitively, and always return the approved record.
//!
//! Usage:
//! ```ignore
//! let hgnc = HgncOntology::from_download()?;
//! hgnc.get_identifier("hgnc", "K-RAS")?;  // Some("6407")
//! ```

use ahash::AHashMap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use belgraph_common::BelError;

use crate::lookup::OntologyLookup;

const PREFIX: &str = "hgnc";

/// A canonical HGNC gene record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HgncRecord {
    /// Numeric part of the HGNC accession, e.g. "6407"
    pub identifier: String,
    /// Approved symbol, e.g. "KRAS"
    pub symbol: String,
    /// Full gene name
    pub name: String,
    /// NCBI Gene ID (Entrez)
    pub entrez_id: Option<String>,
}

/// HGNC bulk download URL (approved complete set, TSV).
const HGNC_COMPLETE_SET_URL: &str =
    "https://storage.googleapis.com/public-download-files/hgnc/tsv/tsv/hgnc_complete_set.txt";

pub struct HgncOntology {
    by_identifier: AHashMap<String, HgncRecord>,
    /// Any known symbol/alias/prev symbol (upper-cased) → identifier.
    by_symbol: AHashMap<String, String>,
}

impl HgncOntology {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Build from the HGNC complete set downloaded at runtime.
    pub fn from_download() -> Result<Self> {
        tracing::info!("Downloading HGNC complete set from {}", HGNC_COMPLETE_SET_URL);
        let resp = reqwest::blocking::get(HGNC_COMPLETE_SET_URL)
            .context("HGNC download failed")?
            .text()
            .context("HGNC response read failed")?;
        Self::from_tsv(&resp)
    }

    /// Build from a pre-downloaded TSV file.
    pub fn from_tsv_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let tsv = std::fs::read_to_string(path)
            .with_context(|| format!("reading HGNC complete set from {}", path.display()))?;
        Self::from_tsv(&tsv)
    }

    /// Build from a pre-downloaded TSV string.
    pub fn from_tsv(tsv: &str) -> Result<Self> {
        let mut by_identifier = AHashMap::new();
        let mut by_symbol: AHashMap<String, String> = AHashMap::new();

        for (line_no, line) in tsv.lines().enumerate() {
            if line_no == 0 { continue; }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 { continue; }

            // 0 hgnc_id, 1 symbol, 2 name, 5 status,
            // 8 alias_symbol (pipe-separated), 10 prev_symbol (pipe-separated), 18 entrez_id
            let get = |i: usize| fields.get(i).copied().unwrap_or("").trim();

            let identifier = get(0).trim_start_matches("HGNC:").to_string();
            let symbol = get(1).to_string();
            if !get(5).contains("Approved") { continue; }
            if symbol.is_empty() || identifier.is_empty() { continue; }

            by_symbol.insert(symbol.to_uppercase(), identifier.clone());
            for alias in get(8).split('|').chain(get(10).split('|')).filter(|s| !s.is_empty()) {
                by_symbol.entry(alias.trim().to_uppercase()).or_insert_with(|| identifier.clone());
            }

            let entrez = get(18);
            let record = HgncRecord {
                identifier: identifier.clone(),
                symbol,
                name: get(2).to_string(),
                entrez_id: (!entrez.is_empty()).then(|| entrez.to_string()),
            };
            by_identifier.insert(identifier, record);
        }

        tracing::info!("HGNC ontology built: {} records, {} lookup entries", by_identifier.len(), by_symbol.len());
        Ok(Self { by_identifier, by_symbol })
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    /// Record for any known symbol, alias or previous symbol.
    pub fn lookup(&self, symbol: &str) -> Option<&HgncRecord> {
        let identifier = self.by_symbol.get(&symbol.trim().to_uppercase())?;
        self.by_identifier.get(identifier)
    }

    pub fn record(&self, identifier: &str) -> Option<&HgncRecord> {
        self.by_identifier.get(identifier.trim_start_matches("HGNC:"))
    }

    pub fn n_records(&self) -> usize { self.by_identifier.len() }

    fn check_prefix(prefix: &str) -> belgraph_common::Result<()> {
        if prefix == PREFIX {
            Ok(())
        } else {
            Err(BelError::Lookup(format!("HGNC cannot answer for prefix {prefix}")))
        }
    }
}

impl OntologyLookup for HgncOntology {
    fn get_name(&self, prefix: &str, identifier: &str) -> belgraph_common::Result<Option<String>> {
        Self::check_prefix(prefix)?;
        Ok(self.record(identifier).map(|r| r.symbol.clone()))
    }

    fn get_identifier(&self, prefix: &str, name: &str) -> belgraph_common::Result<Option<String>> {
        Self::check_prefix(prefix)?;
        Ok(self.lookup(name).map(|r| r.identifier.clone()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
