use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::limits;

pub type NodeId = u32;
pub type EdgeId = u32;

/// Planar position on the floor-plan overlay, in the map's `[lat, lng]`
/// order. The overlay is a flat image, so both axes are plain metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Position { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Within the coordinate range a stored graph may hold.
    pub fn in_bounds(&self) -> bool {
        limits::in_coord_bounds(self.lat) && limits::in_coord_bounds(self.lng)
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        crate::geometry::math::distance(self.lat, self.lng, other.lat, other.lng)
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            lat: 0.5 * (self.lat + other.lat),
            lng: 0.5 * (self.lng + other.lng),
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from(v: [f64; 2]) -> Self {
        Position { lat: v[0], lng: v[1] }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.lat, p.lng]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(deserialize_with = "id_from_int_or_str")]
    pub id: NodeId,
    pub position: Position,
    #[serde(default, alias = "hasCode")]
    pub is_waypoint: bool,
    // Older documents omit the tag list entirely.
    #[serde(default)]
    pub search_tags: Vec<String>,
}

impl Node {
    pub fn new(id: NodeId, position: Position) -> Self {
        Node {
            id,
            position,
            is_waypoint: false,
            search_tags: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.search_tags.iter().any(|t| t == tag)
    }
}

/// Passability class of an edge, `0..=3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Clearance(u8);

impl Clearance {
    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Clearance(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Clearance {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Clearance::new(level)
            .ok_or_else(|| format!("clearance {} outside 0..={}", level, Clearance::MAX))
    }
}

impl From<Clearance> for u8 {
    fn from(c: Clearance) -> Self {
        c.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    #[serde(alias = "from")]
    pub node_a: NodeId,
    #[serde(alias = "to")]
    pub node_b: NodeId,
    // Derived; recomputed from endpoint positions whenever a graph is loaded.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub is_obstructed: bool,
    #[serde(default)]
    pub clearance: Clearance,
}

impl Edge {
    /// Fresh unobstructed edge at clearance 0. `distance` is left for the
    /// store to fill in.
    pub fn new(id: EdgeId, node_a: NodeId, node_b: NodeId) -> Self {
        Edge {
            id,
            node_a,
            node_b,
            distance: 0.0,
            is_obstructed: false,
            clearance: Clearance::default(),
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.node_a == node || self.node_b == node
    }

    pub fn pair_key(&self) -> (NodeId, NodeId) {
        pair_key(self.node_a, self.node_b)
    }
}

/// Order-independent key for an undirected node pair.
#[inline]
pub fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Wire document exchanged with the persistence backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

// Some stored documents carry node ids as decimal strings.
fn id_from_int_or_str<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(u32),
        Str(String),
    }
    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Str(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid node id '{}'", s))),
    }
}
