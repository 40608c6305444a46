//! BEL graph container, node-link JSON, graph algebra and subgraphs.

pub mod bel;
pub mod edge;
pub mod graph;
pub mod nodelink;
pub mod operations;
pub mod subgraph;

pub use bel::edge_to_bel;
pub use edge::{Citation, EdgeData, Relation};
pub use graph::{BELGraph, Definitions, EdgeView, GraphMetadata};
pub use nodelink::{from_nodelink, to_nodelink};
