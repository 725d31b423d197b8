//! Neighbour lists derived from a graph snapshot.
//!
//! The mapping is rebuilt from scratch for every traversal request; nothing here is cached
//! or updated incrementally.

use graphwalk_graphlib::{Edge, GraphStore, Vertex, VertexId};
use indexmap::IndexMap;
use serde::Serialize;

/// Vertex → neighbours, keyed in vertex creation order, neighbours sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdjacencyMap(IndexMap<VertexId, Vec<VertexId>>);

impl AdjacencyMap {
    /// Builds the mapping for `vertices`; every vertex gets an entry, possibly empty.
    ///
    /// Undirected edges are listed on both endpoints, directed edges only on `from`. Edges
    /// with an endpoint outside `vertices` are skipped.
    pub fn build(edges: &[Edge], vertices: &[Vertex]) -> Self {
        let mut map: IndexMap<VertexId, Vec<VertexId>> = vertices
            .iter()
            .map(|v| (v.id(), Vec::new()))
            .collect();

        for e in edges {
            if !(map.contains_key(&e.from) && map.contains_key(&e.to)) {
                continue;
            }
            if let Some(out) = map.get_mut(&e.from) {
                out.push(e.to);
            }
            if !e.directed && e.from != e.to {
                if let Some(back) = map.get_mut(&e.to) {
                    back.push(e.from);
                }
            }
        }

        for neighbors in map.values_mut() {
            neighbors.sort_unstable();
        }
        Self(map)
    }

    pub fn from_store(store: &GraphStore) -> Self {
        Self::build(store.edges(), store.vertices())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.0.contains_key(&id)
    }

    /// Neighbours of `id`; empty for unknown vertices.
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.0.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &[VertexId])> {
        self.0.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

/// Takes neighbour lists verbatim (no sorting), mostly useful for hand-written fixtures.
impl FromIterator<(VertexId, Vec<VertexId>)> for AdjacencyMap {
    fn from_iter<T: IntoIterator<Item = (VertexId, Vec<VertexId>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
