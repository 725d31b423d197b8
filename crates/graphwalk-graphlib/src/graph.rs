//! The vertex/edge store.
//!
//! Vertices are kept in creation order (the order later used for component coverage) with a
//! hash index on their identifier. Edges are kept in insertion order and indexed by their
//! unordered endpoint pair, which is what enforces "one edge per pair".

mod edge_key;
mod vertex;

pub use edge_key::EdgeKey;
pub use vertex::{ALPHABET_LEN, Color, Vertex, VertexId};

use crate::error::GraphError;
use crate::geom::Point;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub directed: bool,
}

impl Edge {
    pub fn undirected(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            directed: false,
        }
    }

    pub fn directed(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            directed: true,
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    vertices: Vec<Vertex>,
    vertex_index: HashMap<VertexId, usize>,

    edges: Vec<Edge>,
    edge_index: HashMap<EdgeKey, usize>,

    start: Option<VertexId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the store holds neither vertices nor edges.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertices in creation order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(Vertex::id)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertex_index.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertex_index.get(&id).map(|&idx| &self.vertices[idx])
    }

    /// Mutable access to a vertex's display attributes; its identifier stays fixed.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        let idx = *self.vertex_index.get(&id)?;
        Some(&mut self.vertices[idx])
    }

    /// Moves a vertex. Returns `false` when the vertex does not exist.
    pub fn move_vertex(&mut self, id: VertexId, position: Point) -> bool {
        let Some(v) = self.vertex_mut(id) else {
            return false;
        };
        v.position = position;
        true
    }

    /// Lowest identifier not currently in use.
    pub fn next_free_id(&self) -> Option<VertexId> {
        VertexId::all().find(|id| !self.has_vertex(*id))
    }

    /// Creates a vertex with the lowest free identifier.
    pub fn add_vertex(&mut self, position: Point, color: Color) -> Result<&Vertex, GraphError> {
        let id = self
            .next_free_id()
            .ok_or(GraphError::IdentifierSpaceExhausted)?;
        self.insert_vertex(Vertex::new(id).with_position(position).with_color(color))
    }

    /// Inserts a fully built vertex, keeping its identifier.
    pub fn insert_vertex(&mut self, vertex: Vertex) -> Result<&Vertex, GraphError> {
        let id = vertex.id();
        if self.has_vertex(id) {
            return Err(GraphError::DuplicateIdentifier(id));
        }
        let idx = self.vertices.len();
        self.vertices.push(vertex);
        self.vertex_index.insert(id, idx);
        Ok(&self.vertices[idx])
    }

    /// Removes the given vertices together with every edge touching them.
    ///
    /// Clears the start vertex when it is among the removed ones. Unknown identifiers are
    /// ignored. Returns the number of vertices actually removed.
    pub fn remove_vertices<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = VertexId>,
    {
        let doomed: HashSet<VertexId> = ids
            .into_iter()
            .filter(|id| self.has_vertex(*id))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        self.vertices.retain(|v| !doomed.contains(&v.id()));
        self.reindex_vertices();

        let before = self.edges.len();
        self.edges
            .retain(|e| !(doomed.contains(&e.from) || doomed.contains(&e.to)));
        if self.edges.len() != before {
            self.reindex_edges();
        }

        if self.start.is_some_and(|s| doomed.contains(&s)) {
            self.start = None;
        }
        doomed.len()
    }

    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(a, b))
    }

    /// The edge connecting `a` and `b` in either direction.
    pub fn edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edge_index
            .get(&EdgeKey::new(a, b))
            .map(|&idx| &self.edges[idx])
    }

    /// Connects `from` and `to`.
    ///
    /// Returns `Ok(false)` without touching the store when the pair is already connected,
    /// regardless of the existing edge's direction.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        directed: bool,
    ) -> Result<bool, GraphError> {
        for id in [from, to] {
            if !self.has_vertex(id) {
                return Err(GraphError::UnknownVertex(id));
            }
        }
        let key = EdgeKey::new(from, to);
        if self.edge_index.contains_key(&key) {
            return Ok(false);
        }
        let idx = self.edges.len();
        self.edges.push(Edge { from, to, directed });
        self.edge_index.insert(key, idx);
        Ok(true)
    }

    /// Removes the edges with the given keys. Returns the number actually removed.
    pub fn remove_edges<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = EdgeKey>,
    {
        let doomed: HashSet<EdgeKey> = keys
            .into_iter()
            .filter(|k| self.edge_index.contains_key(k))
            .collect();
        if doomed.is_empty() {
            return 0;
        }
        self.edges.retain(|e| !doomed.contains(&e.key()));
        self.reindex_edges();
        doomed.len()
    }

    pub fn start_vertex(&self) -> Option<VertexId> {
        self.start
    }

    /// Designates (or clears, with `None`) the traversal start vertex.
    pub fn set_start_vertex(&mut self, id: Option<VertexId>) -> Result<(), GraphError> {
        if let Some(id) = id {
            if !self.has_vertex(id) {
                return Err(GraphError::UnknownVertex(id));
            }
        }
        self.start = id;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.vertex_index.clear();
        self.edges.clear();
        self.edge_index.clear();
        self.start = None;
    }

    fn reindex_vertices(&mut self) {
        self.vertex_index.clear();
        for (idx, v) in self.vertices.iter().enumerate() {
            self.vertex_index.insert(v.id(), idx);
        }
    }

    fn reindex_edges(&mut self) {
        self.edge_index.clear();
        for (idx, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key(), idx);
        }
    }
}
