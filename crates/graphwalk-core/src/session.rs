//! The editor session: graph, selection, start vertex and playback state in one owned object.
//!
//! Hosts keep one `Session` and call into it for every user action. Every operation either
//! completes or fails with an [`Error`] before mutating anything that would leave the session
//! inconsistent, so callers can report the error and carry on.

use crate::adjacency::AdjacencyMap;
use crate::config::SessionConfig;
use crate::connect::{self, ConnectMode};
use crate::error::{Error, Result};
use crate::matrix::{self, EncodedMatrix};
use crate::placement::Placer;
use crate::player::{PlaybackToken, Tick, TracePlayer};
use crate::traversal::{self, Traversal};
use graphwalk_graphlib::geom::Point;
use graphwalk_graphlib::{EdgeKey, GraphError, GraphStore, Vertex, VertexId};

/// Ordered vertex selection plus a set of selected edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    vertices: Vec<VertexId>,
    edges: Vec<EdgeKey>,
}

impl Selection {
    /// Vertices in the order they were selected.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    fn toggle_vertex(&mut self, id: VertexId) -> bool {
        toggle(&mut self.vertices, id)
    }

    fn toggle_edge(&mut self, key: EdgeKey) -> bool {
        toggle(&mut self.edges, key)
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    match items.iter().position(|x| *x == item) {
        Some(ix) => {
            items.remove(ix);
            false
        }
        None => {
            items.push(item);
            true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deletion {
    pub vertices: usize,
    pub edges: usize,
}

#[derive(Debug, Clone)]
pub struct TraversalRun {
    pub traversal: Traversal,
    pub token: PlaybackToken,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    store: GraphStore,
    selection: Selection,
    connect_mode: ConnectMode,
    show_colors: bool,
    placer: Placer,
    player: TracePlayer,
    last_order: Option<Vec<VertexId>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: GraphStore::new(),
            selection: Selection::default(),
            connect_mode: config.connect_mode,
            show_colors: config.show_colors,
            placer: Placer::new(config.canvas.clone(), config.seed),
            player: TracePlayer::new(),
            last_order: None,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn player(&self) -> &TracePlayer {
        &self.player
    }

    pub fn connect_mode(&self) -> ConnectMode {
        self.connect_mode
    }

    pub fn show_colors(&self) -> bool {
        self.show_colors
    }

    pub fn last_order(&self) -> Option<&[VertexId]> {
        self.last_order.as_deref()
    }

    /// Creates a vertex with the next free letter at a random spot with a random colour.
    pub fn add_vertex(&mut self) -> Result<&Vertex> {
        let position = self.placer.position();
        let color = self.placer.color();
        let vertex = self.store.add_vertex(position, color)?;
        tracing::debug!(id = %vertex.id(), "vertex added");
        Ok(vertex)
    }

    pub fn move_vertex(&mut self, id: VertexId, position: Point) -> bool {
        self.store.move_vertex(id, position)
    }

    /// Toggles `id` in the vertex selection. Returns whether it is selected afterwards.
    pub fn toggle_vertex_selection(&mut self, id: VertexId) -> Result<bool> {
        if !self.store.has_vertex(id) {
            return Err(GraphError::UnknownVertex(id).into());
        }
        Ok(self.selection.toggle_vertex(id))
    }

    /// Toggles the edge between `a` and `b` in the edge selection.
    pub fn toggle_edge_selection(&mut self, a: VertexId, b: VertexId) -> Result<bool> {
        let key = EdgeKey::new(a, b);
        if !self.store.has_edge(a, b) {
            return Err(GraphError::UnknownEdge(key).into());
        }
        Ok(self.selection.toggle_edge(key))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_connect_mode(&mut self, mode: ConnectMode) {
        self.connect_mode = mode;
    }

    pub fn toggle_connect_mode(&mut self) -> ConnectMode {
        self.connect_mode = self.connect_mode.toggled();
        self.connect_mode
    }

    pub fn toggle_colors(&mut self) -> bool {
        self.show_colors = !self.show_colors;
        self.show_colors
    }

    /// Connects the selected vertices using the current connect mode, then clears the
    /// selection. The selection is kept when the operation fails.
    pub fn connect_selected(&mut self) -> Result<usize> {
        let added = connect::connect(
            &mut self.store,
            self.selection.vertices(),
            self.connect_mode,
        )?;
        self.selection.clear();
        Ok(added)
    }

    /// Makes the first selected vertex the traversal start.
    pub fn set_start_from_selection(&mut self) -> Result<VertexId> {
        let Some(&id) = self.selection.vertices().first() else {
            return Err(Error::NothingSelected);
        };
        self.store.set_start_vertex(Some(id))?;
        tracing::debug!(start = %id, "start vertex set");
        Ok(id)
    }

    pub fn set_start_vertex(&mut self, id: Option<VertexId>) -> Result<()> {
        self.store.set_start_vertex(id)?;
        Ok(())
    }

    /// Removes the selected edges, then the selected vertices and their edges.
    pub fn delete_selected(&mut self) -> Result<Deletion> {
        if self.store.is_empty() {
            return Err(Error::EmptyGraph);
        }
        if self.selection.is_empty() {
            return Err(Error::NothingSelected);
        }

        let edges_before = self.store.edge_count();
        self.store.remove_edges(self.selection.edges().iter().copied());
        let vertices = self
            .store
            .remove_vertices(self.selection.vertices().iter().copied());
        let deletion = Deletion {
            vertices,
            edges: edges_before - self.store.edge_count(),
        };
        self.selection.clear();
        tracing::debug!(?deletion, "selection deleted");
        Ok(deletion)
    }

    /// Start used by [`Session::run_traversal`]: the designated start vertex, else the first
    /// selected vertex, else the first vertex created.
    pub fn traversal_start(&self) -> Option<VertexId> {
        self.store
            .start_vertex()
            .or_else(|| self.selection.vertices().first().copied())
            .or_else(|| self.store.vertex_ids().next())
    }

    /// Traverses the current graph and starts playing the resulting trace.
    pub fn run_traversal(&mut self) -> Result<TraversalRun> {
        if self.store.vertex_count() == 0 {
            return Err(Error::EmptyGraph);
        }
        let adj = AdjacencyMap::from_store(&self.store);
        let start = self.traversal_start();
        let traversal = traversal::traverse(&adj, start);
        if traversal.is_empty() {
            return Err(Error::EmptyGraph);
        }

        self.last_order = Some(traversal.order.clone());
        let token = self.player.play(traversal.trace.clone());
        tracing::info!(
            start = ?start,
            sequence = %traversal.sequence_text(),
            "traversal ready"
        );
        Ok(TraversalRun { traversal, token })
    }

    /// Replays the trace of the last traversal from its first step.
    pub fn repeat(&mut self) -> Result<PlaybackToken> {
        self.player.repeat()
    }

    pub fn tick(&mut self, token: &PlaybackToken) -> Tick {
        self.player.tick(token)
    }

    /// Vertex highlighted by the running playback.
    pub fn highlighted(&self) -> Option<VertexId> {
        self.player.current()
    }

    pub fn cancel_playback(&mut self) {
        self.player.cancel();
    }

    /// Stops playback and drops the graph, selections, start vertex and recorded traversal.
    pub fn clear_all(&mut self) {
        self.player.reset();
        self.store.clear();
        self.selection.clear();
        self.last_order = None;
        tracing::info!("session cleared");
    }

    /// Replaces the graph with the decoded matrix. On error the session is left unchanged.
    pub fn load_matrix(&mut self, text: &str) -> Result<()> {
        let mut store = matrix::decode(text)?;
        let ids: Vec<VertexId> = store.vertex_ids().collect();
        for id in ids {
            let position = self.placer.position();
            let color = self.placer.color();
            if let Some(v) = store.vertex_mut(id) {
                v.position = position;
                v.color = color;
            }
        }

        self.player.reset();
        self.selection.clear();
        self.last_order = None;
        self.store = store;
        tracing::info!(
            vertices = self.store.vertex_count(),
            edges = self.store.edge_count(),
            "graph replaced from matrix"
        );
        Ok(())
    }

    pub fn matrix(&self) -> EncodedMatrix {
        matrix::encode(&self.store)
    }
}
