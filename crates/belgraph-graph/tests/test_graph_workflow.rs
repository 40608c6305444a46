//! Build, serialise, combine and slice graphs through the public API.

use belgraph_dsl::{Entity, Function, Node, ProteinModification};
use belgraph_graph::nodelink::{from_nodelink_str, to_nodelink_string};
use belgraph_graph::operations::{left_outer_join, node_intersection, union};
use belgraph_graph::subgraph::{neighborhood, subgraph_by_annotation_value};
use belgraph_graph::{BELGraph, Citation, EdgeData, Relation};

fn protein(name: &str) -> Node {
    Node::protein("hgnc", Some(name), None, vec![]).unwrap()
}

fn signalling() -> BELGraph {
    let akt1 = protein("AKT1");
    let pakt1 = Node::protein("hgnc", Some("AKT1"), None, vec![ProteinModification::new("Ph").code("S").position(473).into()])
        .unwrap();
    let ap1 = Node::complex(vec![protein("FOS"), protein("JUN")]);
    let water = Node::abundance("chebi", Some("water"), Some("15377")).unwrap();
    let glucose = Node::abundance("chebi", Some("glucose"), Some("17234")).unwrap();
    let rxn = Node::reaction(vec![glucose], vec![water.clone()]);

    let mut g = BELGraph::with_metadata("signalling", "1.0.0");
    let human = Entity::with_identifier("ncbitaxon", "9606", "Homo sapiens");
    g.add_qualified_edge(
        &akt1,
        &pakt1,
        EdgeData::new(Relation::Increases)
            .citation(Citation::pubmed("1"))
            .evidence("autophosphorylation")
            .annotation("Species", human.clone()),
    )
    .unwrap();
    g.add_qualified_edge(
        &pakt1,
        &ap1,
        EdgeData::new(Relation::DirectlyIncreases)
            .citation(Citation::pubmed("2"))
            .evidence("AP-1 activation"),
    )
    .unwrap();
    g.add_qualified_edge(
        &ap1,
        &rxn,
        EdgeData::new(Relation::Association)
            .citation(Citation::pubmed("3"))
            .evidence("metabolism")
            .annotation("Species", human),
    )
    .unwrap();
    g
}

#[test]
fn test_implied_edges_and_counts() {
    let g = signalling();
    let counts = g.count_functions();
    assert_eq!(counts[&Function::Protein], 4);
    assert_eq!(counts[&Function::Complex], 1);
    assert_eq!(counts[&Function::Reaction], 1);
    assert_eq!(counts[&Function::Abundance], 2);
    // 3 statements, hasVariant, 2 partOf, hasReactant, hasProduct
    assert_eq!(g.number_of_edges(), 8);
    assert!(g.has_edge_key(&protein("FOS"), &Node::complex(vec![protein("JUN"), protein("FOS")]), "partOf"));
}

#[test]
fn test_nodelink_string_roundtrip() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let g = signalling();
    let text = to_nodelink_string(&g).unwrap();
    let back = from_nodelink_str(&text).unwrap();
    assert_eq!(back.number_of_nodes(), g.number_of_nodes());
    assert_eq!(back.number_of_edges(), g.number_of_edges());
    assert_eq!(back.metadata, g.metadata);
    for node in g.nodes() {
        assert!(back.has_node(node), "missing {node}");
    }
    assert_eq!(to_nodelink_string(&back).unwrap(), text);
}

#[test]
fn test_annotation_slice_and_neighborhood() {
    let g = signalling();
    let human = subgraph_by_annotation_value(&g, "Species", &["9606"]);
    assert_eq!(human.number_of_edges(), 2);
    assert_eq!(human.metadata.name.as_deref(), Some("signalling"));

    let around = neighborhood(&g, [&protein("AKT1")]).unwrap();
    assert_eq!(around.number_of_edges(), 2);
    assert!(neighborhood(&g, [&protein("TP53")]).is_none());
}

#[test]
fn test_algebra() {
    let g = signalling();
    let mut small = BELGraph::new();
    small
        .add_increases(&protein("AKT1"), &protein("MTOR"), Citation::pubmed("4"), "mTOR activation")
        .unwrap();
    let mut island = BELGraph::new();
    island
        .add_decreases(&protein("TP53"), &protein("MDM2"), Citation::pubmed("5"), "feedback")
        .unwrap();

    let all = union([&g, &small, &island]);
    assert_eq!(all.number_of_nodes(), g.number_of_nodes() + 3);
    assert_eq!(all.number_of_edges(), g.number_of_edges() + 2);

    let mut joined = g.clone();
    left_outer_join(&mut joined, &union([&small, &island]));
    assert!(joined.has_node(&protein("MTOR")));
    assert!(!joined.has_node(&protein("TP53")));

    let shared = node_intersection(&[&g, &small]);
    assert_eq!(shared.number_of_nodes(), 1);
    assert_eq!(shared.number_of_edges(), 0);
}
