//! End-to-end grounding of a small graph against HGNC and in-memory terms.

use belgraph_common::GroundingConfig;
use belgraph_dsl::{Entity, Modifier, Node, ProteinModification};
use belgraph_graph::{BELGraph, Citation, EdgeData, Relation};
use belgraph_grounding::{ChainedOntology, Grounder, HgncOntology, InMemoryOntology, RegistryPrefixes};

const HGNC_TSV: &str = "hgnc_id\tsymbol\tname\tlocus_group\tlocus_type\tstatus\n\
HGNC:391\tAKT1\tAKT serine/threonine kinase 1\tprotein-coding gene\tgene with protein product\tApproved\n\
HGNC:6407\tKRAS\tKRAS proto-oncogene, GTPase\tprotein-coding gene\tgene with protein product\tApproved\t12p12.1\t\tK-RAS|KRAS2\n";

fn grounder() -> Grounder {
    let hgnc = HgncOntology::from_tsv(HGNC_TSV).unwrap();
    let mut terms = InMemoryOntology::new();
    terms.insert("chebi", "15377", "water");
    terms.insert("ncbitaxon", "9606", "Homo sapiens");
    terms.insert("go", "0005634", "nucleus");
    let ontology = ChainedOntology::new().with(hgnc).with(terms);
    Grounder::new(GroundingConfig::default(), RegistryPrefixes::new(), ontology)
}

fn raw_graph() -> BELGraph {
    let akt1 = Node::protein("HGNC", Some("AKT1"), None, vec![ProteinModification::new("Ph").into()]).unwrap();
    let water = Node::abundance("CHEBI", Some("water"), None).unwrap();
    let data = EdgeData::new(Relation::Increases)
        .citation(Citation::pubmed("12345"))
        .evidence("AKT1 phosphorylation increases water")
        .annotation("Species", Entity::named("TAXONOMY", "Homo sapiens"))
        .source_modifier(Modifier::activity(None).at(Entity::named("GOCC", "nucleus")));

    let mut graph = BELGraph::with_metadata("grounding test", "1.0.0");
    graph.add_qualified_edge(&akt1, &water, data).unwrap();
    graph
}

#[test]
fn test_ground_graph_resolves_every_concept() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let raw = raw_graph();
    let (grounded, report) = grounder().ground_graph_with_report(&raw).unwrap();

    assert!(report.is_complete(), "unresolved: {:?}", report.unresolved_concepts);
    assert_eq!(grounded.number_of_nodes(), raw.number_of_nodes());
    assert_eq!(grounded.number_of_edges(), raw.number_of_edges());
    assert_eq!(grounded.metadata.name.as_deref(), Some("grounding test"));

    let akt1 = Node::protein(
        "hgnc",
        Some("AKT1"),
        Some("391"),
        vec![ProteinModification::from_entity(Entity::with_identifier("go", "0006468", "protein phosphorylation")).into()],
    )
    .unwrap();
    let water = Node::abundance("chebi", Some("water"), Some("15377")).unwrap();
    assert!(grounded.has_node(&akt1));
    assert!(grounded.has_node(&water));
    assert!(grounded.has_node(&akt1.get_parent().unwrap()));

    let edges = grounded.get_edge_data(&akt1, &water);
    assert_eq!(edges.len(), 1);
    let (key, data) = edges[0];
    assert_eq!(key, data.key().unwrap());
    assert_eq!(data.annotations["Species"][0].identifier.as_deref(), Some("9606"));
    let location = data.source_modifier.as_ref().and_then(|m| m.location.as_ref()).unwrap();
    assert_eq!(location.namespace, "go");
    assert_eq!(location.identifier.as_deref(), Some("0005634"));
}

#[test]
fn test_alias_grounding_is_idempotent() {
    let g = grounder();
    let node = serde_json::json!({"function": "Protein", "concept": {"namespace": "HGNC", "name": "K-RAS"}});
    let once = g.ground_node(&node);
    assert_eq!(once["concept"]["name"], "KRAS");
    assert_eq!(once["concept"]["identifier"], "6407");
    assert_eq!(g.ground_node(&once), once);

    let kras = Node::protein("HGNC", Some("KRAS2"), None, vec![]).unwrap();
    let mut graph = BELGraph::new();
    graph.add_node(kras);
    let grounded = g.ground_graph(&graph).unwrap();
    assert!(grounded.has_node(&Node::protein("hgnc", Some("KRAS"), Some("6407"), vec![]).unwrap()));
    let again = g.ground_graph(&grounded).unwrap();
    assert_eq!(
        belgraph_graph::to_nodelink(&grounded).unwrap(),
        belgraph_graph::to_nodelink(&again).unwrap()
    );
}

#[test]
fn test_grounding_is_idempotent() {
    let g = grounder();
    let once = g.ground_graph(&raw_graph()).unwrap();
    let twice = g.ground_graph(&once).unwrap();
    assert_eq!(
        belgraph_graph::to_nodelink(&once).unwrap(),
        belgraph_graph::to_nodelink(&twice).unwrap()
    );
}

#[test]
fn test_unknown_namespace_is_reported_not_fatal() {
    let mut graph = BELGraph::new();
    let odd = Node::abundance("NOT_A_NAMESPACE", Some("thing"), None).unwrap();
    graph.add_node_from_data(odd.clone());

    let (grounded, report) = grounder().ground_graph_with_report(&graph).unwrap();
    assert!(grounded.has_node(&odd));
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.unresolved_concepts[0].namespace, "NOT_A_NAMESPACE");
}

#[test]
fn test_from_config_loads_ontology_and_remaps() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("mesh.tsv");
    let remap = dir.path().join("remap.tsv");
    std::fs::write(&mesh, "D009474\tNeurons\n").unwrap();
    std::fs::write(&remap, "SCOMP\tgamma Secretase Complex\tfplx\tGamma_secretase\tGamma_secretase\n").unwrap();

    let mut config = GroundingConfig::default();
    config.ontology_paths.insert("mesh".into(), mesh.display().to_string());
    config.remapping_path = Some(remap.display().to_string());
    let g = Grounder::from_config(config).unwrap();

    let neurons = g.ground_node(&serde_json::json!({
        "function": "Abundance",
        "concept": {"namespace": "MESHD", "name": "Neurons"}
    }));
    assert_eq!(neurons["concept"]["identifier"], "D009474");

    let secretase = g.ground_node(&serde_json::json!({
        "function": "Complex",
        "concept": {"namespace": "SCOMP", "name": "gamma Secretase Complex"}
    }));
    assert_eq!(secretase["concept"]["namespace"], "fplx");
    assert_eq!(secretase["concept"]["identifier"], "Gamma_secretase");
}
