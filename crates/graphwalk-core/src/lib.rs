#![forbid(unsafe_code)]

//! Traversal engine and editor session for graphwalk (headless).
//!
//! Pipeline: a [`GraphStore`] snapshot → [`AdjacencyMap`] → [`traverse`] → a [`Trace`] of
//! visit / backtrack / jump steps → [`TracePlayer`] frames for highlighting and logging.
//! [`matrix`] offers the adjacency-matrix text view onto the same store, and [`Session`]
//! ties everything to the user actions of the editor.
//!
//! Design goals:
//! - deterministic output: neighbour order is alphabetical and drives every tie-break
//! - full coverage: every vertex is visited once, whatever the connectivity
//! - no ambient state: all state lives in an explicitly owned [`Session`]

pub mod adjacency;
pub mod config;
pub mod connect;
pub mod error;
pub mod matrix;
mod placement;
pub mod player;
pub mod session;
pub mod traversal;

pub use adjacency::AdjacencyMap;
pub use config::{CanvasConfig, PlaybackConfig, SessionConfig};
pub use connect::{ConnectMode, connect};
pub use error::{Error, Result};
pub use matrix::{EncodedMatrix, decode, encode};
pub use player::{PlaybackFrame, PlaybackSource, PlaybackToken, Tick, TracePlayer, frame_at};
pub use session::{Deletion, Selection, Session, TraversalRun};
pub use traversal::{Trace, TraceStep, Traversal, format_sequence, traverse};

pub use graphwalk_graphlib::{
    ALPHABET_LEN, Color, Edge, EdgeKey, GraphError, GraphStore, Vertex, VertexId, geom,
};

#[cfg(test)]
mod tests;
