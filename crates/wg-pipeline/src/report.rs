//! Summary of one pipeline run.

use wg_graph::{SanitizeStats, SplitStats};

use crate::observer::StageReport;

/// Counters collected while the pipeline runs.
#[derive(Clone, Debug, Default)]
pub struct PipelineReport {
    /// Size of the graph as loaded.
    pub raw_nodes:          usize,
    pub raw_edges:          usize,
    pub split:              SplitStats,
    pub sanitize:           SanitizeStats,
    /// Anchors inserted; equals the mapping row count.
    pub anchors:            usize,
    /// Edges the adjacency builder had to weigh from coordinates.
    pub recomputed_weights: usize,
    pub final_nodes:        usize,
    pub final_edges:        usize,
    /// One entry per completed stage, in order.
    pub stages:             Vec<StageReport>,
}
