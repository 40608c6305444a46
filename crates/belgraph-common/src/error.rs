use thiserror::Error;

#[derive(Debug, Error)]
pub enum BelError {
    /// A node-construction site got neither a name nor an identifier.
    #[error("Cannot uniquely identify {function} node: missing name or identifier")]
    MissingNodeIdentity { function: String },

    #[error("Cannot infer central dogma relative of variant-bearing node: {0}")]
    InferCentralDogma(String),

    #[error("Malformed node data: {0}")]
    MalformedNode(String),

    #[error("Malformed edge data: {0}")]
    MalformedEdge(String),

    #[error("Ontology lookup error: {0}")]
    Lookup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BelError>;
