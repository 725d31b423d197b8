//! Bulk edge creation over a vertex selection.

use crate::error::{Error, Result};
use graphwalk_graphlib::{GraphError, GraphStore, VertexId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMode {
    /// Every pair of selected vertices.
    #[default]
    Complete,
    /// Consecutive selected vertices: `A-B`, `B-C`, ...
    Chain,
}

impl ConnectMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Complete => Self::Chain,
            Self::Chain => Self::Complete,
        }
    }

    /// Vertex pairs this mode connects, in selection order.
    pub fn pairs(self, selection: &[VertexId]) -> Vec<(VertexId, VertexId)> {
        let pairs: Vec<(VertexId, VertexId)> = match self {
            Self::Chain => selection.windows(2).map(|w| (w[0], w[1])).collect(),
            Self::Complete => selection
                .iter()
                .enumerate()
                .flat_map(|(i, &a)| selection[i + 1..].iter().map(move |&b| (a, b)))
                .collect(),
        };
        pairs.into_iter().filter(|(a, b)| a != b).collect()
    }
}

impl FromStr for ConnectMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complete" => Ok(Self::Complete),
            "chain" | "consecutive" => Ok(Self::Chain),
            _ => Err(()),
        }
    }
}

/// Connects the selection with undirected edges according to `mode`.
///
/// Pairs that are already connected (in either direction) are skipped. Every selected vertex
/// is checked before anything is inserted, so a failure leaves the store untouched. Returns
/// the number of edges added.
pub fn connect(store: &mut GraphStore, selection: &[VertexId], mode: ConnectMode) -> Result<usize> {
    if selection.len() < 2 {
        return Err(Error::InsufficientSelection {
            required: 2,
            selected: selection.len(),
        });
    }
    if let Some(&missing) = selection.iter().find(|id| !store.has_vertex(**id)) {
        return Err(GraphError::UnknownVertex(missing).into());
    }

    let mut added = 0;
    for (a, b) in mode.pairs(selection) {
        if store.add_edge(a, b, false)? {
            added += 1;
        }
    }
    tracing::debug!(?mode, selected = selection.len(), added, "connected selection");
    Ok(added)
}
