//! Depth-first traversal with a replayable step trace.
//!
//! The traversal covers every vertex of the adjacency mapping: it first explores from the
//! requested start, then walks the mapping keys in order and starts a new tree (recorded as a
//! `Jump`) at each vertex that is still unvisited.
//!
//! The walk uses an explicit stack but emits exactly the trace of the textbook recursive
//! formulation: `Visit(u)` on entry, and `Backtrack(v, u)` each time the subtree rooted at
//! child `v` of `u` is finished.

use crate::adjacency::AdjacencyMap;
use graphwalk_graphlib::VertexId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceStep {
    /// First visit of `node`.
    Visit { node: VertexId },
    /// Return from the finished subtree rooted at `from` to its parent `to`.
    Backtrack { from: VertexId, to: VertexId },
    /// The current component is exhausted; a new tree starts at `to`.
    Jump { to: VertexId },
}

/// Ordered record of one traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace(Vec<TraceStep>);

impl Trace {
    pub fn new(steps: Vec<TraceStep>) -> Self {
        Self(steps)
    }

    /// Reinterprets a bare visit order as a trace of `Visit` steps.
    pub fn from_order(order: &[VertexId]) -> Self {
        Self(
            order
                .iter()
                .map(|&node| TraceStep::Visit { node })
                .collect(),
        )
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&TraceStep> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Projection onto `Visit` steps.
    pub fn visit_order(&self) -> Vec<VertexId> {
        self.0
            .iter()
            .filter_map(|step| match step {
                TraceStep::Visit { node } => Some(*node),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, step: TraceStep) {
        self.0.push(step);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Traversal {
    pub order: Vec<VertexId>,
    pub trace: Trace,
}

impl Traversal {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of depth-first trees, i.e. components reached.
    pub fn tree_count(&self) -> usize {
        if self.order.is_empty() {
            return 0;
        }
        let jumps = self
            .trace
            .steps()
            .iter()
            .filter(|s| matches!(s, TraceStep::Jump { .. }))
            .count();
        match self.trace.steps().first() {
            Some(TraceStep::Jump { .. }) => jumps,
            _ => jumps + 1,
        }
    }

    /// `A -> B -> C`
    pub fn sequence_text(&self) -> String {
        format_sequence(&self.order)
    }
}

pub fn format_sequence(order: &[VertexId]) -> String {
    order
        .iter()
        .map(VertexId::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Runs the full-coverage depth-first traversal.
///
/// A `start` that is absent from the mapping is ignored; coverage of the remaining keys still
/// happens, beginning with a `Jump` to the first key.
pub fn traverse(adj: &AdjacencyMap, start: Option<VertexId>) -> Traversal {
    let mut walk = Walk {
        adj,
        visited: BTreeSet::new(),
        out: Traversal::default(),
    };

    if let Some(start) = start.filter(|s| adj.contains(*s)) {
        walk.explore(start);
    }
    for id in adj.keys() {
        if !walk.visited.contains(&id) {
            walk.out.trace.push(TraceStep::Jump { to: id });
            walk.explore(id);
        }
    }

    tracing::debug!(
        start = ?start,
        visited = walk.out.order.len(),
        steps = walk.out.trace.len(),
        "dfs finished"
    );
    walk.out
}

struct Walk<'a> {
    adj: &'a AdjacencyMap,
    visited: BTreeSet<VertexId>,
    out: Traversal,
}

struct Frame {
    node: VertexId,
    next: usize,
}

impl Walk<'_> {
    fn visit(&mut self, node: VertexId) {
        self.visited.insert(node);
        self.out.order.push(node);
        self.out.trace.push(TraceStep::Visit { node });
    }

    fn explore(&mut self, root: VertexId) {
        let adj = self.adj;
        self.visit(root);
        let mut stack = vec![Frame { node: root, next: 0 }];

        while let Some(top) = stack.last_mut() {
            let neighbors = adj.neighbors(top.node);
            let mut child = None;
            while let Some(&w) = neighbors.get(top.next) {
                top.next += 1;
                if !self.visited.contains(&w) {
                    child = Some(w);
                    break;
                }
            }

            match child {
                Some(w) => {
                    self.visit(w);
                    stack.push(Frame { node: w, next: 0 });
                }
                None => {
                    let Some(done) = stack.pop() else {
                        break;
                    };
                    if let Some(parent) = stack.last() {
                        self.out.trace.push(TraceStep::Backtrack {
                            from: done.node,
                            to: parent.node,
                        });
                    }
                }
            }
        }
    }
}
