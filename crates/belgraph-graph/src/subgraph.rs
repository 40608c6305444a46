//! Subgraph extraction.

use std::collections::HashSet;

use belgraph_dsl::Node;

use crate::edge::EdgeData;
use crate::graph::BELGraph;

/// The given nodes (those present in the graph) and every edge between them.
pub fn induced_subgraph<'a>(graph: &BELGraph, nodes: impl IntoIterator<Item = &'a Node>) -> BELGraph {
    let keep: HashSet<&Node> = nodes.into_iter().filter(|n| graph.has_node(n)).collect();
    let mut result = graph.empty_like();
    for node in &keep {
        result.add_node((*node).clone());
    }
    for edge in graph.edges() {
        if keep.contains(edge.source) && keep.contains(edge.target) {
            result.add_keyed_edge(edge.source, edge.target, edge.key.to_string(), edge.data.clone());
        }
    }
    result
}

/// Every edge in or out of the given nodes, with its endpoints.
/// `None` when none of the nodes is in the graph.
pub fn neighborhood<'a>(graph: &BELGraph, nodes: impl IntoIterator<Item = &'a Node>) -> Option<BELGraph> {
    let seeds: Vec<&Node> = nodes.into_iter().filter(|n| graph.has_node(n)).collect();
    if seeds.is_empty() {
        return None;
    }
    let mut result = graph.empty_like();
    for seed in seeds {
        result.add_node(seed.clone());
        for edge in graph.in_edges(seed).into_iter().chain(graph.out_edges(seed)) {
            result.add_keyed_edge(edge.source, edge.target, edge.key.to_string(), edge.data.clone());
        }
    }
    Some(result)
}

/// Edges for which `keep` holds, with their endpoints.
pub fn filter_edges<F>(graph: &BELGraph, keep: F) -> BELGraph
where
    F: Fn(&Node, &Node, &EdgeData) -> bool,
{
    let mut result = graph.empty_like();
    for edge in graph.edges() {
        if keep(edge.source, edge.target, edge.data) {
            result.add_keyed_edge(edge.source, edge.target, edge.key.to_string(), edge.data.clone());
        }
    }
    result
}

/// Edges annotated under `annotation` with any of `values`, matched by name
/// or identifier.
pub fn subgraph_by_annotation_value(graph: &BELGraph, annotation: &str, values: &[&str]) -> BELGraph {
    filter_edges(graph, |_, _, data| data.has_annotation_value(annotation, values))
}

/// Weakly connected components as node sets.
pub fn weakly_connected_components(graph: &BELGraph) -> Vec<HashSet<Node>> {
    let mut seen: HashSet<&Node> = HashSet::new();
    let mut components = Vec::new();
    for start in graph.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut component = HashSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            component.insert(node.clone());
            for neighbor in graph.neighbors(node) {
                if seen.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        components.push(component);
    }
    components
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Citation, Relation};
    use belgraph_dsl::Entity;

    fn protein(name: &str) -> Node {
        Node::protein("HGNC", Some(name), None, vec![]).unwrap()
    }

    fn chain() -> BELGraph {
        let mut g = BELGraph::with_metadata("chain", "0.1.0");
        let human = Entity::with_identifier("ncbitaxon", "9606", "Homo sapiens");
        let mouse = Entity::with_identifier("ncbitaxon", "10090", "Mus musculus");
        let e1 = EdgeData::new(Relation::Increases)
            .citation(Citation::pubmed("1"))
            .evidence("a->b")
            .annotation("Species", human);
        let e2 = EdgeData::new(Relation::Decreases)
            .citation(Citation::pubmed("2"))
            .evidence("b->c")
            .annotation("Species", mouse);
        g.add_qualified_edge(&protein("A"), &protein("B"), e1).unwrap();
        g.add_qualified_edge(&protein("B"), &protein("C"), e2).unwrap();
        g.add_node(protein("Z"));
        g
    }

    #[test]
    fn test_induced() {
        let g = chain();
        let sub = induced_subgraph(&g, &[protein("A"), protein("B"), protein("Q")]);
        assert_eq!(sub.number_of_nodes(), 2);
        assert_eq!(sub.number_of_edges(), 1);
        assert_eq!(sub.metadata.name.as_deref(), Some("chain"));
    }

    #[test]
    fn test_neighborhood() {
        let g = chain();
        let sub = neighborhood(&g, &[protein("B")]).unwrap();
        assert_eq!(sub.number_of_nodes(), 3);
        assert_eq!(sub.number_of_edges(), 2);
        assert!(neighborhood(&g, &[protein("Q")]).is_none());
    }

    #[test]
    fn test_filter_by_relation() {
        let g = chain();
        let sub = filter_edges(&g, |_, _, d| d.relation == Relation::Decreases);
        assert_eq!(sub.number_of_edges(), 1);
        assert!(sub.has_node(&protein("C")));
        assert!(!sub.has_node(&protein("A")));
    }

    #[test]
    fn test_annotation_filter() {
        let g = chain();
        let sub = subgraph_by_annotation_value(&g, "Species", &["Homo sapiens"]);
        assert_eq!(sub.number_of_edges(), 1);
        assert!(sub.has_edge(&protein("A"), &protein("B")));
        let by_id = subgraph_by_annotation_value(&g, "Species", &["10090"]);
        assert!(by_id.has_edge(&protein("B"), &protein("C")));
    }

    #[test]
    fn test_components() {
        let components = weakly_connected_components(&chain());
        let mut sizes: Vec<usize> = components.iter().map(HashSet::len).collect();
        sizes.sort();
        assert_eq!(sizes, vec![1, 3]);
    }
}
