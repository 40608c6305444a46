//! The BEL multigraph.
//!
//! Nodes are canonical [`Node`] values; the graph keeps a `Node → NodeIndex`
//! map so that structurally equal nodes always land on the same vertex.
//! Parallel edges are distinguished by a string key stored with the edge
//! data: the relation name for unqualified edges, a SHA-512 digest for
//! qualified ones.

use petgraph::stable_graph::{EdgeIndex, EdgeReference, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use belgraph_common::{BelError, Result};
use belgraph_dsl::{Function, Node};

use crate::edge::{Citation, EdgeData, Relation};

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

/// Namespace and annotation definitions declared by the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definitions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub namespace_url: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub namespace_pattern: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotation_url: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotation_pattern: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotation_list: BTreeMap<String, BTreeSet<String>>,
}

/// Weight of one petgraph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedEdge {
    pub key: String,
    pub data: EdgeData,
}

/// An edge as seen from outside the graph.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub source: &'a Node,
    pub target: &'a Node,
    pub key: &'a str,
    pub data: &'a EdgeData,
}

#[derive(Debug, Clone, Default)]
pub struct BELGraph {
    graph: StableDiGraph<Node, KeyedEdge>,
    index: HashMap<Node, NodeIndex>,
    pub metadata: GraphMetadata,
    pub definitions: Definitions,
}

impl BELGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(name: impl Into<String>, version: impl Into<String>) -> Self {
        let mut graph = Self::new();
        graph.metadata.name = Some(name.into());
        graph.metadata.version = Some(version.into());
        graph
    }

    /// Same metadata and definitions, no nodes or edges.
    pub fn empty_like(&self) -> Self {
        Self { metadata: self.metadata.clone(), definitions: self.definitions.clone(), ..Self::default() }
    }

    // ── Nodes ─────────────────────────────────────────────────────────────────

    /// Add a node without any implied edges. Returns the existing vertex
    /// when an equal node is already present.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.index.insert(node, idx);
        idx
    }

    /// Add a node together with the edges its shape implies: `hasVariant`
    /// from the parent of a variant-bearing node, `partOf` from each member
    /// of a complex or composite, `hasReactant`/`hasProduct` from a reaction.
    pub fn add_node_from_data(&mut self, node: Node) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.add_node(node.clone());

        if let Some(parent) = node.get_parent() {
            self.add_node_from_data(parent.clone());
            self.add_unqualified_edge(&parent, &node, Relation::HasVariant);
        }
        if let Some(list) = node.as_list() {
            for member in list.members() {
                self.add_node_from_data(member.clone());
                self.add_unqualified_edge(member, &node, Relation::PartOf);
            }
        }
        if let Some(reaction) = node.as_reaction() {
            for reactant in reaction.reactants() {
                self.add_node_from_data(reactant.clone());
                self.add_unqualified_edge(&node, reactant, Relation::HasReactant);
            }
            for product in reaction.products() {
                self.add_node_from_data(product.clone());
                self.add_unqualified_edge(&node, product, Relation::HasProduct);
            }
        }
        tracing::debug!(node = %node, "added node");
        idx
    }

    pub fn has_node(&self, node: &Node) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_index(&self, node: &Node) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    pub fn number_of_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().filter_map(|idx| self.graph.node_weight(idx))
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, node: &Node) -> bool {
        match self.index.remove(node) {
            Some(idx) => {
                self.graph.remove_node(idx);
                true
            }
            None => false,
        }
    }

    /// Number of nodes per function.
    pub fn count_functions(&self) -> BTreeMap<Function, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes() {
            *counts.entry(node.function()).or_insert(0) += 1;
        }
        counts
    }

    // ── Edges ─────────────────────────────────────────────────────────────────

    fn find_edge_key(&self, u: NodeIndex, v: NodeIndex, key: &str) -> Option<EdgeIndex> {
        self.graph
            .edges_directed(u, Direction::Outgoing)
            .find(|e| e.target() == v && e.weight().key == key)
            .map(|e| e.id())
    }

    /// Insert an edge under `key`; an existing edge with the same key is kept.
    pub fn add_keyed_edge(&mut self, u: &Node, v: &Node, key: String, data: EdgeData) -> String {
        let ui = self.add_node(u.clone());
        let vi = self.add_node(v.clone());
        if self.find_edge_key(ui, vi, &key).is_none() {
            self.graph.add_edge(ui, vi, KeyedEdge { key: key.clone(), data });
        }
        key
    }

    /// Structural edge with no provenance; at most one per relation per pair.
    pub fn add_unqualified_edge(&mut self, u: &Node, v: &Node, relation: Relation) -> String {
        let data = EdgeData::new(relation);
        let key = relation.as_str().to_string();
        self.add_keyed_edge(u, v, key, data)
    }

    /// Edge with citation and evidence, keyed by the digest of its data.
    /// Both nodes are added with their implied edges.
    pub fn add_qualified_edge(&mut self, u: &Node, v: &Node, data: EdgeData) -> Result<String> {
        if !data.is_qualified() {
            return Err(BelError::MalformedEdge(format!(
                "{} edge from {u} to {v} needs a citation and evidence",
                data.relation
            )));
        }
        self.add_node_from_data(u.clone());
        self.add_node_from_data(v.clone());
        let key = data.key()?;
        Ok(self.add_keyed_edge(u, v, key, data))
    }

    /// `g(X) transcribedTo r(X)`
    pub fn add_transcription(&mut self, gene: &Node, rna: &Node) -> String {
        self.add_unqualified_edge(gene, rna, Relation::TranscribedTo)
    }

    /// `r(X) translatedTo p(X)`
    pub fn add_translation(&mut self, rna: &Node, protein: &Node) -> String {
        self.add_unqualified_edge(rna, protein, Relation::TranslatedTo)
    }

    fn add_simple(
        &mut self,
        u: &Node,
        v: &Node,
        relation: Relation,
        citation: Citation,
        evidence: &str,
    ) -> Result<String> {
        let data = EdgeData::new(relation).citation(citation).evidence(evidence);
        self.add_qualified_edge(u, v, data)
    }

    pub fn add_increases(&mut self, u: &Node, v: &Node, citation: Citation, evidence: &str) -> Result<String> {
        self.add_simple(u, v, Relation::Increases, citation, evidence)
    }

    pub fn add_decreases(&mut self, u: &Node, v: &Node, citation: Citation, evidence: &str) -> Result<String> {
        self.add_simple(u, v, Relation::Decreases, citation, evidence)
    }

    pub fn add_directly_increases(&mut self, u: &Node, v: &Node, citation: Citation, evidence: &str) -> Result<String> {
        self.add_simple(u, v, Relation::DirectlyIncreases, citation, evidence)
    }

    pub fn add_association(&mut self, u: &Node, v: &Node, citation: Citation, evidence: &str) -> Result<String> {
        self.add_simple(u, v, Relation::Association, citation, evidence)
    }

    pub fn number_of_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_edge(&self, u: &Node, v: &Node) -> bool {
        match (self.node_index(u), self.node_index(v)) {
            (Some(ui), Some(vi)) => self.graph.find_edge(ui, vi).is_some(),
            _ => false,
        }
    }

    pub fn has_edge_key(&self, u: &Node, v: &Node, key: &str) -> bool {
        match (self.node_index(u), self.node_index(v)) {
            (Some(ui), Some(vi)) => self.find_edge_key(ui, vi, key).is_some(),
            _ => false,
        }
    }

    /// All `(key, data)` pairs between `u` and `v`.
    pub fn get_edge_data(&self, u: &Node, v: &Node) -> Vec<(&str, &EdgeData)> {
        match (self.node_index(u), self.node_index(v)) {
            (Some(ui), Some(vi)) => self
                .graph
                .edges_directed(ui, Direction::Outgoing)
                .filter(|e| e.target() == vi)
                .map(|e| (e.weight().key.as_str(), &e.weight().data))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn view<'a>(&'a self, edge: EdgeReference<'a, KeyedEdge>) -> Option<EdgeView<'a>> {
        Some(EdgeView {
            source: self.graph.node_weight(edge.source())?,
            target: self.graph.node_weight(edge.target())?,
            key: &edge.weight().key,
            data: &edge.weight().data,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        (&self.graph).edge_references().filter_map(|e| self.view(e))
    }

    fn directed_edges(&self, node: &Node, direction: Direction) -> Vec<EdgeView<'_>> {
        match self.node_index(node) {
            Some(idx) => self.graph.edges_directed(idx, direction).filter_map(|e| self.view(e)).collect(),
            None => Vec::new(),
        }
    }

    pub fn out_edges(&self, node: &Node) -> Vec<EdgeView<'_>> {
        self.directed_edges(node, Direction::Outgoing)
    }

    pub fn in_edges(&self, node: &Node) -> Vec<EdgeView<'_>> {
        self.directed_edges(node, Direction::Incoming)
    }

    /// Nodes adjacent to `node` in either direction.
    pub fn neighbors(&self, node: &Node) -> Vec<&Node> {
        match self.node_index(node) {
            Some(idx) => self
                .graph
                .neighbors_undirected(idx)
                .filter_map(|n| self.graph.node_weight(n))
                .collect(),
            None => Vec::new(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
