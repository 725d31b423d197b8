#![forbid(unsafe_code)]

//! Graph container used by the graphwalk editor.
//!
//! Vertices are identified by one of 26 fixed symbols (`A`..`Z`). The store owns the vertex
//! set, the edge set and the designated start vertex; everything derived from it (adjacency,
//! traversal traces) lives in `graphwalk-core` and is rebuilt from a snapshot on demand.

pub mod error;
pub mod geom;
pub mod graph;

pub use error::GraphError;
pub use graph::{ALPHABET_LEN, Color, Edge, EdgeKey, GraphStore, Vertex, VertexId};
