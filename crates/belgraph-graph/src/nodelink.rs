//! Node-link JSON.
//!
//! ```json
//! {"directed": true, "multigraph": true, "graph": {...},
//!  "nodes": [{"id": [...], "function": ..., "concept": ...}],
//!  "links": [{"source": 0, "target": 1, "key": "...", "relation": ...}]}
//! ```
//!
//! Each node's `id` is its canonical tuple as nested lists. It is written for
//! consumers and ignored on read: nodes are rehydrated from their mapping.
//! Links refer to nodes by position in the `nodes` list.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::Path;

use belgraph_common::{BelError, Result};
use belgraph_dsl::Node;

use crate::edge::EdgeData;
use crate::graph::{BELGraph, Definitions, GraphMetadata};

#[derive(Debug, Default, Serialize, Deserialize)]
struct GraphHeader {
    #[serde(default)]
    document_metadata: GraphMetadata,
    #[serde(flatten)]
    definitions: Definitions,
}

/// Serialise a graph to node-link JSON. Nodes are listed in canonical order.
pub fn to_nodelink(graph: &BELGraph) -> Result<Value> {
    let mut nodes: Vec<&Node> = graph.nodes().collect();
    nodes.sort();
    let position: HashMap<&Node, usize> = nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();

    let mut node_values = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let mut mapping = node.to_mapping()?;
        if let Value::Object(map) = &mut mapping {
            map.insert("id".to_string(), serde_json::to_value(node.as_tuple())?);
        }
        node_values.push(mapping);
    }

    let mut links = Vec::with_capacity(graph.number_of_edges());
    for edge in graph.edges() {
        let (Some(&source), Some(&target)) = (position.get(edge.source), position.get(edge.target)) else {
            continue;
        };
        let mut link = match serde_json::to_value(edge.data)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        link.insert("source".to_string(), json!(source));
        link.insert("target".to_string(), json!(target));
        link.insert("key".to_string(), json!(edge.key));
        links.push((source, target, edge.key.to_string(), Value::Object(link)));
    }
    links.sort_by(|a, b| (a.0, a.1, &a.2).cmp(&(b.0, b.1, &b.2)));

    let header = GraphHeader { document_metadata: graph.metadata.clone(), definitions: graph.definitions.clone() };
    Ok(json!({
        "directed": true,
        "multigraph": true,
        "graph": serde_json::to_value(header)?,
        "nodes": node_values,
        "links": links.into_iter().map(|l| l.3).collect::<Vec<_>>(),
    }))
}

fn link_index(link: &Value, field: &str, n_nodes: usize) -> Result<usize> {
    let idx = link
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| BelError::MalformedEdge(format!("link without integer {field}")))? as usize;
    if idx >= n_nodes {
        return Err(BelError::MalformedEdge(format!("link {field} {idx} out of range")));
    }
    Ok(idx)
}

/// Rebuild a graph from node-link JSON.
pub fn from_nodelink(value: &Value) -> Result<BELGraph> {
    let header: GraphHeader = match value.get("graph") {
        Some(g) => serde_json::from_value(g.clone())?,
        None => GraphHeader::default(),
    };
    let mut graph = BELGraph::new();
    graph.metadata = header.document_metadata;
    graph.definitions = header.definitions;

    let empty = Vec::new();
    let node_values = value.get("nodes").and_then(Value::as_array).unwrap_or(&empty);
    let mut nodes = Vec::with_capacity(node_values.len());
    for node_value in node_values {
        let node = Node::from_mapping(node_value)?;
        graph.add_node(node.clone());
        nodes.push(node);
    }

    let links = value.get("links").and_then(Value::as_array).unwrap_or(&empty);
    for link in links {
        let source = &nodes[link_index(link, "source", nodes.len())?];
        let target = &nodes[link_index(link, "target", nodes.len())?];
        let data: EdgeData =
            serde_json::from_value(link.clone()).map_err(|e| BelError::MalformedEdge(e.to_string()))?;
        let key = match link.get("key").and_then(Value::as_str) {
            Some(key) => key.to_string(),
            None => data.key()?,
        };
        graph.add_keyed_edge(source, target, key, data);
    }

    tracing::info!(
        nodes = graph.number_of_nodes(),
        edges = graph.number_of_edges(),
        "loaded node-link graph"
    );
    Ok(graph)
}

pub fn to_nodelink_string(graph: &BELGraph) -> Result<String> {
    Ok(serde_json::to_string(&to_nodelink(graph)?)?)
}

pub fn from_nodelink_str(s: &str) -> Result<BELGraph> {
    let value: Value = serde_json::from_str(s)?;
    from_nodelink(&value)
}

pub fn to_nodelink_file(graph: &BELGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(&to_nodelink(graph)?)?;
    std::fs::write(path, content)
        .with_context(|| format!("writing node-link JSON to {}", path.display()))?;
    Ok(())
}

pub fn from_nodelink_file(path: impl AsRef<Path>) -> Result<BELGraph> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading node-link JSON from {}", path.display()))?;
    from_nodelink_str(&content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Citation, Relation};
    use belgraph_dsl::{Entity, Modifier, ProteinModification};

    fn protein(name: &str) -> Node {
        Node::protein("HGNC", Some(name), None, vec![]).unwrap()
    }

    fn sample() -> BELGraph {
        let mut g = BELGraph::with_metadata("test", "1.0.0");
        g.definitions.namespace_url.insert("HGNC".into(), "https://example.org/hgnc.belns".into());
        let akt = protein("AKT1");
        let ph = akt.with_variants(vec![ProteinModification::new("Ph").code("Ser").position(473).into()]).unwrap();
        let data = EdgeData::new(Relation::Increases)
            .citation(Citation::pubmed("12928037"))
            .evidence("AKT phosphorylation activates mTOR")
            .annotation("Species", Entity::with_identifier("ncbitaxon", "9606", "Homo sapiens"))
            .source_modifier(Modifier::activity(Some(Entity::named("bel", "kin"))));
        g.add_qualified_edge(&ph, &protein("MTOR"), data).unwrap();
        g.add_node_from_data(Node::complex(vec![protein("FOS"), protein("JUN")]));
        g
    }

    #[test]
    fn test_roundtrip() {
        let g = sample();
        let value = to_nodelink(&g).unwrap();
        let back = from_nodelink(&value).unwrap();
        assert_eq!(back.number_of_nodes(), g.number_of_nodes());
        assert_eq!(back.number_of_edges(), g.number_of_edges());
        assert_eq!(back.metadata, g.metadata);
        assert_eq!(back.definitions, g.definitions);
        for edge in g.edges() {
            assert!(back.has_edge_key(edge.source, edge.target, edge.key));
        }
        assert_eq!(to_nodelink(&back).unwrap(), value);
    }

    #[test]
    fn test_ids_are_tuples() {
        let value = to_nodelink(&sample()).unwrap();
        let first = &value["nodes"][0];
        assert!(first["id"].is_array());
        assert_eq!(value["graph"]["document_metadata"]["name"], "test");
    }

    #[test]
    fn test_bad_link_index() {
        let value = json!({"nodes": [], "links": [{"source": 0, "target": 1, "relation": "increases"}]});
        assert!(matches!(from_nodelink(&value), Err(BelError::MalformedEdge(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let g = sample();
        to_nodelink_file(&g, &path).unwrap();
        let back = from_nodelink_file(&path).unwrap();
        assert_eq!(back.number_of_edges(), g.number_of_edges());
        assert!(from_nodelink_file(dir.path().join("missing.json")).is_err());
    }
}
