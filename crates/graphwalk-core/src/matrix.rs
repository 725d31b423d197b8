//! Adjacency-matrix text codec.
//!
//! Text form: one row per line, entries separated by whitespace and/or commas. Any non-zero
//! number marks an edge; tokens that do not parse as a finite number count as zero.
//!
//! A fully symmetric matrix decodes to undirected edges (upper triangle only, so the diagonal
//! is ignored). Otherwise each non-zero entry becomes a directed edge, except that a pair
//! with both `[i][j]` and `[j][i]` set becomes a single undirected edge, which is how
//! [`encode`] writes undirected edges of a mixed graph.

use crate::error::{Error, Result};
use graphwalk_graphlib::{ALPHABET_LEN, GraphStore, Vertex, VertexId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedMatrix {
    pub labels: Vec<VertexId>,
    pub matrix: Vec<Vec<u8>>,
}

impl EncodedMatrix {
    /// Same as `to_string()`, preceded by a line with the row labels.
    pub fn to_labeled_text(&self) -> String {
        let header = self
            .labels
            .iter()
            .map(VertexId::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        if self.matrix.is_empty() {
            return header;
        }
        format!("{header}\n{self}")
    }
}

impl std::fmt::Display for EncodedMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.matrix.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedMatrix {
        message: message.into(),
    }
}

fn token_value(token: &str) -> f64 {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn parse_rows(text: &str) -> Vec<Vec<f64>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(token_value)
                .collect()
        })
        .collect()
}

/// Decodes matrix text into a fresh store with vertices `A`, `B`, ... in row order.
///
/// Decoded vertices sit at the origin with the default colour; placing them is up to the
/// caller.
pub fn decode(text: &str) -> Result<GraphStore> {
    let rows = parse_rows(text);
    let n = rows.len();
    if n == 0 {
        return Err(malformed("the matrix has no rows"));
    }
    if n > ALPHABET_LEN {
        return Err(malformed(format!(
            "{n} rows exceed the {ALPHABET_LEN} available vertex identifiers"
        )));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(malformed(format!(
                "row {} has {} entries, expected {n} (the matrix must be square)",
                i + 1,
                row.len()
            )));
        }
    }

    let symmetric = (0..n).all(|i| (0..i).all(|j| rows[i][j] == rows[j][i]));
    let ids: Vec<VertexId> = (0..n).filter_map(VertexId::from_index).collect();

    let mut store = GraphStore::new();
    for &id in &ids {
        store.insert_vertex(Vertex::new(id))?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if value == 0.0 {
                continue;
            }
            if symmetric {
                if i < j {
                    store.add_edge(ids[i], ids[j], false)?;
                }
            } else {
                // Mutual entries become one undirected edge; the mirrored entry is a no-op.
                let mutual = i != j && rows[j][i] != 0.0;
                store.add_edge(ids[i], ids[j], !mutual)?;
            }
        }
    }

    tracing::debug!(
        size = n,
        symmetric,
        edges = store.edge_count(),
        "decoded adjacency matrix"
    );
    Ok(store)
}

/// Encodes the store as a matrix over its vertices sorted by identifier.
///
/// Undirected edges are mirrored; edges with a missing endpoint are left out.
pub fn encode(store: &GraphStore) -> EncodedMatrix {
    let mut labels: Vec<VertexId> = store.vertex_ids().collect();
    labels.sort_unstable();

    let mut position: [Option<usize>; ALPHABET_LEN] = [None; ALPHABET_LEN];
    for (i, id) in labels.iter().enumerate() {
        position[id.index()] = Some(i);
    }

    let mut matrix = vec![vec![0u8; labels.len()]; labels.len()];
    for e in store.edges() {
        let (Some(i), Some(j)) = (position[e.from.index()], position[e.to.index()]) else {
            continue;
        };
        matrix[i][j] = 1;
        if !e.directed {
            matrix[j][i] = 1;
        }
    }

    EncodedMatrix { labels, matrix }
}
