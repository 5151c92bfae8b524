//! Plain row types for the two output files.
//!
//! Field names double as the CSV header names, which downstream consumers
//! rely on; do not rename them.

use serde::{Deserialize, Serialize};

/// Header of the adjacency file, in column order.
pub const ADJACENCY_HEADER: &[&str] = &["src", "dst", "length"];

/// Header of the mapping file, in column order.
pub const MAPPING_HEADER: &[&str] = &["building_name", "node_id"];

/// One directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyRow {
    pub src:    u64,
    pub dst:    u64,
    /// Metres.
    pub length: f64,
}

/// One building → anchor node association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub building_name: String,
    pub node_id:       u64,
}
