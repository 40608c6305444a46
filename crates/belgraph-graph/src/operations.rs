//! Graph algebra: joins, union and node intersection.

use std::collections::HashSet;

use belgraph_dsl::Node;

use crate::graph::BELGraph;
use crate::subgraph::{induced_subgraph, weakly_connected_components};

/// Add every node and edge of `h` into `g`. Edges already in `g` under the
/// same key are kept as they are.
pub fn left_full_join(g: &mut BELGraph, h: &BELGraph) {
    for node in h.nodes() {
        g.add_node(node.clone());
    }
    for edge in h.edges() {
        g.add_keyed_edge(edge.source, edge.target, edge.key.to_string(), edge.data.clone());
    }
}

/// Join only the weakly connected components of `h` that share at least one
/// node with `g`.
pub fn left_outer_join(g: &mut BELGraph, h: &BELGraph) {
    let touching: Vec<HashSet<Node>> = weakly_connected_components(h)
        .into_iter()
        .filter(|component| component.iter().any(|n| g.has_node(n)))
        .collect();
    tracing::debug!(components = touching.len(), "left outer join");
    for component in touching {
        let sub = induced_subgraph(h, component.iter());
        left_full_join(g, &sub);
    }
}

/// Union of all graphs. Metadata comes from the first one.
pub fn union<'a>(graphs: impl IntoIterator<Item = &'a BELGraph>) -> BELGraph {
    let mut iter = graphs.into_iter();
    let Some(first) = iter.next() else {
        return BELGraph::new();
    };
    let mut result = first.clone();
    for h in iter {
        left_full_join(&mut result, h);
    }
    result
}

/// Nodes present in every graph, with every edge any graph has between them.
pub fn node_intersection(graphs: &[&BELGraph]) -> BELGraph {
    let Some((first, rest)) = graphs.split_first() else {
        return BELGraph::new();
    };
    let shared: Vec<&Node> = first.nodes().filter(|n| rest.iter().all(|h| h.has_node(n))).collect();
    let mut result = first.empty_like();
    for graph in graphs {
        let sub = induced_subgraph(graph, shared.iter().copied());
        left_full_join(&mut result, &sub);
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Citation;

    fn protein(name: &str) -> Node {
        Node::protein("HGNC", Some(name), None, vec![]).unwrap()
    }

    fn edge(g: &mut BELGraph, a: &str, b: &str, pmid: &str) {
        g.add_increases(&protein(a), &protein(b), Citation::pubmed(pmid), "evidence").unwrap();
    }

    #[test]
    fn test_left_full_join() {
        let mut g = BELGraph::new();
        edge(&mut g, "A", "B", "1");
        let mut h = BELGraph::new();
        edge(&mut h, "A", "B", "1");
        edge(&mut h, "X", "Y", "2");
        left_full_join(&mut g, &h);
        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.number_of_edges(), 2);
    }

    #[test]
    fn test_left_outer_join_skips_disconnected() {
        let mut g = BELGraph::new();
        edge(&mut g, "A", "B", "1");
        let mut h = BELGraph::new();
        edge(&mut h, "B", "C", "2");
        edge(&mut h, "X", "Y", "3");
        left_outer_join(&mut g, &h);
        assert!(g.has_node(&protein("C")));
        assert!(!g.has_node(&protein("X")));
        assert_eq!(g.number_of_edges(), 2);
    }

    #[test]
    fn test_union() {
        let mut a = BELGraph::with_metadata("a", "1");
        edge(&mut a, "A", "B", "1");
        let mut b = BELGraph::new();
        edge(&mut b, "B", "C", "2");
        let mut c = BELGraph::new();
        edge(&mut c, "A", "B", "1");
        let u = union([&a, &b, &c]);
        assert_eq!(u.number_of_nodes(), 3);
        assert_eq!(u.number_of_edges(), 2);
        assert_eq!(u.metadata.name.as_deref(), Some("a"));
        assert_eq!(union(Vec::<&BELGraph>::new()).number_of_nodes(), 0);
    }

    #[test]
    fn test_node_intersection() {
        let mut a = BELGraph::new();
        edge(&mut a, "A", "B", "1");
        edge(&mut a, "B", "C", "2");
        let mut b = BELGraph::new();
        edge(&mut b, "A", "B", "3");
        edge(&mut b, "B", "D", "4");
        let i = node_intersection(&[&a, &b]);
        assert_eq!(i.number_of_nodes(), 2);
        // Both A->B edges survive, one from each graph.
        assert_eq!(i.number_of_edges(), 2);
    }
}
