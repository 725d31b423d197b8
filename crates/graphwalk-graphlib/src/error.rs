use crate::graph::{EdgeKey, VertexId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("No identifiers left for new vertices (A-Z are all in use)")]
    IdentifierSpaceExhausted,

    #[error("Vertex {0} already exists")]
    DuplicateIdentifier(VertexId),

    #[error("Vertex {0} does not exist")]
    UnknownVertex(VertexId),

    #[error("No edge connects {0}")]
    UnknownEdge(EdgeKey),

    #[error("Invalid vertex identifier: {0:?} (expected a single letter A-Z)")]
    InvalidIdentifier(String),
}
