//! Grounding of node and edge dictionaries.
//!
//! Every concept `{namespace, name, identifier}` found in a node (its own
//! concept, variant concepts, members, reactants, products, fusion partners)
//! or an edge (annotations, modifier locations and effects) is resolved in
//! this order:
//!
//! 1. free-text namespaces are left alone;
//! 2. the namespace is normalised to a prefix and written back;
//! 3. with an identifier, the name is looked up from it and overwritten;
//! 4. with only a name: curated remap, skip set, name-as-identifier set,
//!    UniProt mnemonics, default-namespace modification codes, and finally
//!    a name → identifier lookup.
//!
//! Lookup failures are logged and leave the concept as it was. Inputs are
//! never mutated; each entry point returns a grounded copy.

use serde_json::{Map, Value};

use belgraph_common::constants::{
    ANNOTATIONS, CONCEPT, EFFECT, FROM_LOC, FUSION, IDENTIFIER, KIND, LEGACY_SOURCE_MODIFIER_KEYS,
    LEGACY_TARGET_MODIFIER_KEYS, LOCATION, MEMBERS, NAME, NAMESPACE, PARTNER_3P, PARTNER_5P, PRODUCTS,
    REACTANTS, SOURCE_MODIFIER, TARGET_MODIFIER, TO_LOC, VARIANTS,
};
use belgraph_common::{GroundingConfig, Result};
use belgraph_dsl::Node;
use belgraph_graph::nodelink::{from_nodelink, to_nodelink};
use belgraph_graph::{BELGraph, EdgeData};

use crate::lookup::{ChainedOntology, MnemonicResolver, OntologyLookup, PrefixNormaliser};
use crate::modifications::ModificationTables;
use crate::remap::RemapTable;
use crate::report::{GroundingOutcome, GroundingReport};
use crate::sources::{InMemoryMnemonics, InMemoryOntology, RegistryPrefixes};

type Outcome = GroundingOutcome;

/// Grounds concepts against injected collaborators.
pub struct Grounder {
    config: GroundingConfig,
    prefixes: Box<dyn PrefixNormaliser + Send + Sync>,
    ontology: Box<dyn OntologyLookup + Send + Sync>,
    mnemonics: Box<dyn MnemonicResolver + Send + Sync>,
    remap: RemapTable,
    modifications: ModificationTables,
}

impl Grounder {
    /// Grounder with the default remaps and modification tables and no
    /// UniProt mnemonics.
    pub fn new(
        config: GroundingConfig,
        prefixes: impl PrefixNormaliser + Send + Sync + 'static,
        ontology: impl OntologyLookup + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            prefixes: Box::new(prefixes),
            ontology: Box::new(ontology),
            mnemonics: Box::new(InMemoryMnemonics::new()),
            remap: RemapTable::with_defaults(),
            modifications: ModificationTables::default(),
        }
    }

    /// Build every collaborator from the configuration: registry prefixes
    /// with the configured synonyms, ontology TSVs, and the remapping TSV on
    /// top of the curated defaults.
    pub fn from_config(config: GroundingConfig) -> anyhow::Result<Self> {
        let prefixes = RegistryPrefixes::from_config(&config);
        let mut ontology = InMemoryOntology::new();
        for (prefix, path) in &config.ontology_paths {
            ontology.load_tsv_file(prefix, path)?;
        }
        let mut remap = RemapTable::with_defaults();
        if let Some(path) = &config.remapping_path {
            remap.load_tsv_file(path)?;
        }
        Ok(Self::new(config, prefixes, ChainedOntology::new().with(ontology)).with_remapping(remap))
    }

    pub fn with_mnemonics(mut self, mnemonics: impl MnemonicResolver + Send + Sync + 'static) -> Self {
        self.mnemonics = Box::new(mnemonics);
        self
    }

    pub fn with_remapping(mut self, remap: RemapTable) -> Self {
        self.remap = remap;
        self
    }

    pub fn with_modifications(mut self, modifications: ModificationTables) -> Self {
        self.modifications = modifications;
        self
    }

    pub fn config(&self) -> &GroundingConfig {
        &self.config
    }

    // ── Entry points ──────────────────────────────────────────────────────────

    /// Grounded copy of a node dictionary.
    pub fn ground_node(&self, node: &Value) -> Value {
        self.ground_node_with_report(node).0
    }

    pub fn ground_node_with_report(&self, node: &Value) -> (Value, GroundingReport) {
        let mut report = GroundingReport::default();
        let mut grounded = node.clone();
        self.node_in_place(&mut grounded, &mut report);
        (grounded, report)
    }

    /// Grounded copy of an edge dictionary.
    pub fn ground_edge(&self, edge: &Value) -> Value {
        let mut report = GroundingReport::default();
        let mut grounded = edge.clone();
        self.edge_in_place(&mut grounded, &mut report);
        grounded
    }

    /// Grounded copy of a node-link document: every node and every link.
    /// Node `id` tuples and qualified edge keys are recomputed.
    pub fn ground_nodelink(&self, nodelink: &Value) -> Value {
        self.ground_nodelink_with_report(nodelink).0
    }

    pub fn ground_nodelink_with_report(&self, nodelink: &Value) -> (Value, GroundingReport) {
        let mut report = GroundingReport::default();
        let mut grounded = nodelink.clone();
        if let Some(nodes) = grounded.get_mut("nodes").and_then(Value::as_array_mut) {
            for node in nodes {
                self.node_in_place(node, &mut report);
                refresh_node_id(node);
            }
        }
        if let Some(links) = grounded.get_mut("links").and_then(Value::as_array_mut) {
            for link in links {
                self.edge_in_place(link, &mut report);
                refresh_edge_key(link);
            }
        }
        tracing::info!(
            grounded = report.grounded,
            remapped = report.remapped,
            skipped = report.skipped,
            unresolved = report.unresolved,
            "grounded node-link graph"
        );
        (grounded, report)
    }

    /// Grounded copy of a graph, round-tripped through node-link JSON.
    pub fn ground_graph(&self, graph: &BELGraph) -> Result<BELGraph> {
        Ok(self.ground_graph_with_report(graph)?.0)
    }

    pub fn ground_graph_with_report(&self, graph: &BELGraph) -> Result<(BELGraph, GroundingReport)> {
        let nodelink = to_nodelink(graph)?;
        let (grounded, report) = self.ground_nodelink_with_report(&nodelink);
        Ok((from_nodelink(&grounded)?, report))
    }

    // ── Traversal ─────────────────────────────────────────────────────────────

    fn node_in_place(&self, node: &mut Value, report: &mut GroundingReport) {
        let Some(obj) = node.as_object_mut() else { return };

        if let Some(concept) = obj.get_mut(CONCEPT) {
            self.concept_in_place(concept, None, report);
        }
        if let Some(variants) = obj.get_mut(VARIANTS).and_then(Value::as_array_mut) {
            for variant in variants {
                let Some(variant) = variant.as_object_mut() else { continue };
                let kind = variant.get(KIND).and_then(Value::as_str).map(str::to_string);
                if let Some(concept) = variant.get_mut(CONCEPT) {
                    self.concept_in_place(concept, kind.as_deref(), report);
                }
            }
        }
        for key in [MEMBERS, REACTANTS, PRODUCTS] {
            if let Some(children) = obj.get_mut(key).and_then(Value::as_array_mut) {
                for child in children {
                    self.node_in_place(child, report);
                }
            }
        }
        if let Some(fusion) = obj.get_mut(FUSION).and_then(Value::as_object_mut) {
            for key in [PARTNER_5P, PARTNER_3P] {
                if let Some(partner) = fusion.get_mut(key) {
                    self.node_in_place(partner, report);
                }
            }
        }
    }

    fn edge_in_place(&self, edge: &mut Value, report: &mut GroundingReport) {
        let Some(obj) = edge.as_object_mut() else { return };

        if let Some(annotations) = obj.get_mut(ANNOTATIONS).and_then(Value::as_object_mut) {
            for values in annotations.values_mut() {
                if let Some(values) = values.as_array_mut() {
                    for value in values {
                        self.concept_in_place(value, None, report);
                    }
                }
            }
        }
        let modifier_keys = [SOURCE_MODIFIER, TARGET_MODIFIER]
            .into_iter()
            .chain(LEGACY_SOURCE_MODIFIER_KEYS.iter().copied())
            .chain(LEGACY_TARGET_MODIFIER_KEYS.iter().copied());
        for key in modifier_keys {
            if let Some(modifier) = obj.get_mut(key).and_then(Value::as_object_mut) {
                self.modifier_in_place(modifier, report);
            }
        }
    }

    fn modifier_in_place(&self, modifier: &mut Map<String, Value>, report: &mut GroundingReport) {
        if let Some(location) = modifier.get_mut(LOCATION) {
            self.concept_in_place(location, None, report);
        }
        let Some(effect) = modifier.get_mut(EFFECT) else { return };
        if effect.get(NAMESPACE).is_some() {
            self.concept_in_place(effect, None, report);
            return;
        }
        if let Some(effect) = effect.as_object_mut() {
            for key in [FROM_LOC, TO_LOC] {
                if let Some(location) = effect.get_mut(key) {
                    self.concept_in_place(location, None, report);
                }
            }
        }
    }

    // ── Concepts ──────────────────────────────────────────────────────────────

    fn concept_in_place(&self, concept: &mut Value, kind: Option<&str>, report: &mut GroundingReport) {
        let Some(obj) = concept.as_object_mut() else { return };
        let Some(namespace) = text(obj, NAMESPACE) else { return };
        let name = text(obj, NAME);
        let identifier = text(obj, IDENTIFIER);
        let term = identifier.clone().or_else(|| name.clone()).unwrap_or_default();

        if self.config.is_free_text(&namespace) {
            report.record(Outcome::Skipped, &namespace, &term);
            return;
        }

        let Some(prefix) = self.prefixes.normalise_prefix(&namespace) else {
            tracing::warn!(namespace = %namespace, name = ?name, identifier = ?identifier, "could not normalise namespace");
            report.record(Outcome::Unresolved, &namespace, &term);
            return;
        };
        obj.insert(NAMESPACE.to_string(), Value::String(prefix.clone()));

        let outcome = match (&identifier, &name) {
            (Some(identifier), _) => self.ground_identifier(obj, &prefix, identifier),
            (None, Some(name)) => self.ground_name(obj, &prefix, name, kind),
            (None, None) => Outcome::Unresolved,
        };
        report.record(outcome, &namespace, &term);
    }

    /// Identifier wins over whatever name is present.
    fn ground_identifier(&self, obj: &mut Map<String, Value>, prefix: &str, identifier: &str) -> Outcome {
        if self.config.is_skipped(prefix) {
            return Outcome::Skipped;
        }
        if self.config.has_no_names(prefix) {
            set(obj, NAME, identifier);
            return Outcome::Grounded;
        }
        let looked_up = if prefix == self.config.uniprot_prefix {
            self.mnemonics.get_mnemonic(identifier)
        } else {
            self.ontology.get_name(prefix, identifier)
        };
        match looked_up {
            Ok(Some(name)) => {
                set(obj, NAME, &name);
                Outcome::Grounded
            }
            Ok(None) => {
                tracing::warn!(prefix, identifier, "could not look up name");
                Outcome::Unresolved
            }
            Err(e) => {
                tracing::warn!(prefix, identifier, error = %e, "name lookup failed");
                Outcome::Unresolved
            }
        }
    }

    fn ground_name(&self, obj: &mut Map<String, Value>, prefix: &str, name: &str, kind: Option<&str>) -> Outcome {
        if let Some(target) = self.remap.get(prefix, name) {
            set(obj, NAMESPACE, &target.prefix);
            set(obj, IDENTIFIER, &target.identifier);
            set(obj, NAME, &target.name);
            return Outcome::Remapped;
        }
        if self.config.is_skipped(prefix) {
            return Outcome::Skipped;
        }
        if self.config.has_no_names(prefix) {
            set(obj, IDENTIFIER, name);
            return Outcome::Grounded;
        }
        if prefix == self.config.uniprot_prefix {
            return self.ground_uniprot_name(obj, name);
        }
        if prefix == self.config.default_namespace {
            if let Some(kind) = kind {
                return match self.modifications.preferred_xref(kind, name) {
                    Some(xref) => {
                        set(obj, NAMESPACE, xref.namespace);
                        set(obj, IDENTIFIER, xref.identifier);
                        set(obj, NAME, xref.name);
                        Outcome::Grounded
                    }
                    None => {
                        tracing::warn!(prefix, name, kind, "unknown modification code");
                        Outcome::Unresolved
                    }
                };
            }
        }
        match self.ontology.get_identifier(prefix, name) {
            Ok(Some(identifier)) => {
                // Aliases resolve to the canonical name so a second pass is a no-op.
                if let Ok(Some(canonical)) = self.ontology.get_name(prefix, &identifier) {
                    set(obj, NAME, &canonical);
                }
                set(obj, IDENTIFIER, &identifier);
                Outcome::Grounded
            }
            Ok(None) => {
                tracing::warn!(prefix, name, "could not look up identifier");
                Outcome::Unresolved
            }
            Err(e) => {
                tracing::warn!(prefix, name, error = %e, "identifier lookup failed");
                Outcome::Unresolved
            }
        }
    }

    /// A UniProt name is either a mnemonic or an accession written as a name.
    fn ground_uniprot_name(&self, obj: &mut Map<String, Value>, name: &str) -> Outcome {
        if let Ok(Some(identifier)) = self.mnemonics.get_id_from_mnemonic(name) {
            set(obj, IDENTIFIER, &identifier);
            return Outcome::Grounded;
        }
        match self.mnemonics.get_mnemonic(name) {
            Ok(Some(mnemonic)) => {
                set(obj, IDENTIFIER, name);
                set(obj, NAME, &mnemonic);
                Outcome::Grounded
            }
            Ok(None) => {
                tracing::warn!(prefix = %self.config.uniprot_prefix, name, "could not resolve UniProt name");
                Outcome::Unresolved
            }
            Err(e) => {
                tracing::warn!(prefix = %self.config.uniprot_prefix, name, error = %e, "UniProt lookup failed");
                Outcome::Unresolved
            }
        }
    }
}

/// Non-empty string field.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

fn set(obj: &mut Map<String, Value>, key: &str, value: &str) {
    obj.insert(key.to_string(), Value::String(value.to_string()));
}

fn refresh_node_id(node: &mut Value) {
    let Ok(parsed) = Node::from_mapping(node) else { return };
    let Ok(id) = serde_json::to_value(parsed.as_tuple()) else { return };
    if let Some(obj) = node.as_object_mut() {
        obj.insert("id".to_string(), id);
    }
}

/// Grounding can rename annotation values, so lists are re-sorted and
/// deduplicated before the key is derived from them.
fn refresh_edge_key(link: &mut Value) {
    let Ok(mut data) = serde_json::from_value::<EdgeData>(link.clone()) else { return };
    data.normalise_annotations();
    let Ok(key) = data.key() else { return };
    let Ok(annotations) = serde_json::to_value(&data.annotations) else { return };
    if let Some(obj) = link.as_object_mut() {
        if obj.contains_key(ANNOTATIONS) {
            obj.insert(ANNOTATIONS.to_string(), annotations);
        }
        obj.insert("key".to_string(), Value::String(key));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
