// Centralized ingestion limits to harden against untrusted documents

// Graph size caps
pub const MAX_NODES: usize = 100_000;
pub const MAX_EDGES: usize = 300_000;

// Loaded ids above this are rejected so the id allocator's free pool stays bounded.
pub const MAX_ID: u32 = 1_000_000;

// Search tags
pub const MAX_TAGS_PER_NODE: usize = 64;
pub const MAX_TAG_LEN: usize = 128; // characters, after trimming

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
