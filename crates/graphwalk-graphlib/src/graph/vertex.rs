//! Vertex identifiers, colours and vertex records.

use crate::error::GraphError;
use crate::geom::{self, Point};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Size of the identifier space (`A`..`Z`).
pub const ALPHABET_LEN: usize = 26;

/// One of the 26 fixed vertex symbols. Ordering is alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u8);

impl VertexId {
    pub const FIRST: VertexId = VertexId(b'A');

    pub fn from_index(index: usize) -> Option<Self> {
        if index < ALPHABET_LEN {
            Some(Self(b'A' + index as u8))
        } else {
            None
        }
    }

    /// Accepts `A`..`Z`, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        if c.is_ascii_uppercase() {
            Some(Self(c as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// All identifiers in allocation order.
    pub fn all() -> impl Iterator<Item = VertexId> {
        (0..ALPHABET_LEN).filter_map(Self::from_index)
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for VertexId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| GraphError::InvalidIdentifier(s.to_string()))
            }
            _ => Err(GraphError::InvalidIdentifier(s.to_string())),
        }
    }
}

impl Serialize for VertexId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VertexId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 24-bit RGB display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const DEFAULT: Color = Color(0x4a90d9);

    pub fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    pub fn rgb(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vertex {
    id: VertexId,
    pub position: Point,
    pub color: Color,
    pub label: String,
}

impl Vertex {
    /// A vertex at the origin with the default colour, labelled with its identifier.
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            position: geom::point(0.0, 0.0),
            color: Color::default(),
            label: id.to_string(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> VertexId {
        self.id
    }
}
