//! BEL statement rendering for whole edges.

use belgraph_dsl::Node;

use crate::edge::EdgeData;
use crate::graph::BELGraph;

fn side(node: &Node, modifier: Option<&belgraph_dsl::Modifier>) -> String {
    let bel = node.as_bel();
    match modifier {
        Some(m) => m.wrap_bel(&bel),
        None => bel,
    }
}

/// `source relation target`, with modifiers wrapped around each side.
pub fn edge_to_bel(u: &Node, v: &Node, data: &EdgeData) -> String {
    format!(
        "{} {} {}",
        side(u, data.source_modifier.as_ref()),
        data.relation,
        side(v, data.target_modifier.as_ref())
    )
}

/// Every edge of the graph as a BEL statement, sorted.
pub fn graph_to_bel_lines(graph: &BELGraph) -> Vec<String> {
    let mut lines: Vec<String> = graph.edges().map(|e| edge_to_bel(e.source, e.target, e.data)).collect();
    lines.sort();
    lines
}
