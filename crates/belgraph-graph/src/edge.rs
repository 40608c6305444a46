//! Edge data: relation, provenance and modifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use belgraph_common::Result;
use belgraph_dsl::canonical::sha512_hex;
use belgraph_dsl::{Entity, Modifier};

/// BEL relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Increases,
    Decreases,
    DirectlyIncreases,
    DirectlyDecreases,
    Regulates,
    CausesNoChange,
    PositiveCorrelation,
    NegativeCorrelation,
    Correlation,
    NoCorrelation,
    Association,
    Binds,
    PartOf,
    HasVariant,
    HasReactant,
    HasProduct,
    TranscribedTo,
    TranslatedTo,
    IsA,
    EquivalentTo,
    Orthologous,
    BiomarkerFor,
    PrognosticBiomarkerFor,
    RateLimitingStepOf,
    SubProcessOf,
    AnalogousTo,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Increases => "increases",
            Relation::Decreases => "decreases",
            Relation::DirectlyIncreases => "directlyIncreases",
            Relation::DirectlyDecreases => "directlyDecreases",
            Relation::Regulates => "regulates",
            Relation::CausesNoChange => "causesNoChange",
            Relation::PositiveCorrelation => "positiveCorrelation",
            Relation::NegativeCorrelation => "negativeCorrelation",
            Relation::Correlation => "correlation",
            Relation::NoCorrelation => "noCorrelation",
            Relation::Association => "association",
            Relation::Binds => "binds",
            Relation::PartOf => "partOf",
            Relation::HasVariant => "hasVariant",
            Relation::HasReactant => "hasReactant",
            Relation::HasProduct => "hasProduct",
            Relation::TranscribedTo => "transcribedTo",
            Relation::TranslatedTo => "translatedTo",
            Relation::IsA => "isA",
            Relation::EquivalentTo => "equivalentTo",
            Relation::Orthologous => "orthologous",
            Relation::BiomarkerFor => "biomarkerFor",
            Relation::PrognosticBiomarkerFor => "prognosticBiomarkerFor",
            Relation::RateLimitingStepOf => "rateLimitingStepOf",
            Relation::SubProcessOf => "subProcessOf",
            Relation::AnalogousTo => "analogousTo",
        }
    }

    /// Increases, decreases and their direct forms.
    pub fn is_causal(&self) -> bool {
        matches!(
            self,
            Relation::Increases
                | Relation::Decreases
                | Relation::DirectlyIncreases
                | Relation::DirectlyDecreases
                | Relation::Regulates
        )
    }

    /// Structural relations implied by node shape or the central dogma.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Relation::PartOf
                | Relation::HasVariant
                | Relation::HasReactant
                | Relation::HasProduct
                | Relation::TranscribedTo
                | Relation::TranslatedTo
        )
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of a statement, e.g. `pubmed:12928037`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Citation {
    pub namespace: String,
    pub identifier: String,
}

impl Citation {
    pub fn new(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), identifier: identifier.into() }
    }

    pub fn pubmed(identifier: impl Into<String>) -> Self {
        Self::new("pubmed", identifier)
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.identifier)
    }
}

/// Attributes of one edge. Older dumps name the modifiers
/// `subject`/`object`; both spellings are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub relation: Relation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, Vec<Entity>>,
    #[serde(
        default,
        alias = "subject",
        alias = "subject_modifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_modifier: Option<Modifier>,
    #[serde(
        default,
        alias = "object",
        alias = "object_modifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_modifier: Option<Modifier>,
}

impl EdgeData {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation,
            citation: None,
            evidence: None,
            annotations: BTreeMap::new(),
            source_modifier: None,
            target_modifier: None,
        }
    }

    pub fn citation(mut self, citation: Citation) -> Self {
        self.citation = Some(citation);
        self
    }

    pub fn evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    /// Add one annotation value; values per key stay sorted and unique.
    pub fn annotation(mut self, key: impl Into<String>, value: Entity) -> Self {
        let values = self.annotations.entry(key.into()).or_default();
        if let Err(pos) = values.binary_search(&value) {
            values.insert(pos, value);
        }
        self
    }

    /// Restore the sorted, unique order of every annotation list.
    pub fn normalise_annotations(&mut self) {
        for values in self.annotations.values_mut() {
            values.sort();
            values.dedup();
        }
    }

    pub fn source_modifier(mut self, modifier: Modifier) -> Self {
        self.source_modifier = Some(modifier).filter(|m| !m.is_empty());
        self
    }

    pub fn target_modifier(mut self, modifier: Modifier) -> Self {
        self.target_modifier = Some(modifier).filter(|m| !m.is_empty());
        self
    }

    /// Qualified edges carry provenance; structural edges do not.
    pub fn is_qualified(&self) -> bool {
        self.citation.is_some() && self.evidence.is_some()
    }

    /// Whether any annotation under `key` matches one of `values` by name or identifier.
    pub fn has_annotation_value(&self, key: &str, values: &[&str]) -> bool {
        self.annotations.get(key).is_some_and(|entities| {
            entities.iter().any(|e| {
                values.iter().any(|v| e.name.as_deref() == Some(*v) || e.identifier.as_deref() == Some(*v))
            })
        })
    }

    /// Multigraph key: the relation name for unqualified edges, otherwise
    /// the SHA-512 of the canonical JSON of the data.
    pub fn key(&self) -> Result<String> {
        if !self.is_qualified() {
            return Ok(self.relation.as_str().to_string());
        }
        let canonical = serde_json::to_string(self)?;
        Ok(sha512_hex(canonical.as_bytes()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_names() {
        assert_eq!(Relation::DirectlyIncreases.as_str(), "directlyIncreases");
        assert_eq!(serde_json::to_string(&Relation::IsA).unwrap(), "\"isA\"");
        let r: Relation = serde_json::from_str("\"prognosticBiomarkerFor\"").unwrap();
        assert_eq!(r, Relation::PrognosticBiomarkerFor);
        assert!(Relation::HasVariant.is_structural());
        assert!(!Relation::Association.is_causal());
    }

    #[test]
    fn test_legacy_modifier_keys() {
        let legacy = serde_json::json!({
            "relation": "increases",
            "subject": {"modifier": "Degradation"},
            "object_modifier": {"location": {"namespace": "GO", "name": "nucleus"}}
        });
        let data: EdgeData = serde_json::from_value(legacy).unwrap();
        assert!(data.source_modifier.is_some());
        assert!(data.target_modifier.unwrap().location.is_some());
    }

    #[test]
    fn test_serialises_new_modifier_keys() {
        let data = EdgeData::new(Relation::Increases).source_modifier(Modifier::degradation());
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("source_modifier").is_some());
        assert!(value.get("subject").is_none());
    }

    #[test]
    fn test_annotation_values_sorted_and_unique() {
        let data = EdgeData::new(Relation::Increases)
            .annotation("Species", Entity::with_identifier("ncbitaxon", "9606", "Homo sapiens"))
            .annotation("Species", Entity::with_identifier("ncbitaxon", "10090", "Mus musculus"))
            .annotation("Species", Entity::with_identifier("ncbitaxon", "9606", "Homo sapiens"));
        assert_eq!(data.annotations["Species"].len(), 2);
        assert_eq!(data.annotations["Species"][0].identifier.as_deref(), Some("9606"));
        assert_eq!(data.annotations["Species"][1].identifier.as_deref(), Some("10090"));
        assert!(data.has_annotation_value("Species", &["9606"]));
        assert!(!data.has_annotation_value("Species", &["7227"]));
    }

    #[test]
    fn test_keys() {
        let structural = EdgeData::new(Relation::HasVariant);
        assert_eq!(structural.key().unwrap(), "hasVariant");

        let a = EdgeData::new(Relation::Increases).citation(Citation::pubmed("123")).evidence("text");
        let b = EdgeData::new(Relation::Increases).citation(Citation::pubmed("123")).evidence("text");
        let c = EdgeData::new(Relation::Increases).citation(Citation::pubmed("456")).evidence("text");
        assert_eq!(a.key().unwrap(), b.key().unwrap());
        assert_ne!(a.key().unwrap(), c.key().unwrap());
        assert_eq!(a.key().unwrap().len(), 128);
    }

    #[test]
    fn test_empty_modifier_dropped() {
        let data = EdgeData::new(Relation::Increases).source_modifier(Modifier::default());
        assert!(data.source_modifier.is_none());
    }
}
