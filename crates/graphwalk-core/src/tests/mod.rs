mod session;
mod traversal;

use crate::VertexId;

fn id(c: char) -> VertexId {
    VertexId::from_char(c).unwrap()
}

fn ids(s: &str) -> Vec<VertexId> {
    s.chars().map(id).collect()
}
