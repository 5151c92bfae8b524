//! The `OutputWriter` trait implemented by output backends.

use wg_graph::{Adjacency, AnchorMapping};

use crate::OutputResult;

/// Sink for a finished graph.
///
/// Nothing is visible at the final location until [`finish`](Self::finish)
/// succeeds.
pub trait OutputWriter {
    /// Write every directed edge of `adjacency`.
    fn write_adjacency(&mut self, adjacency: &Adjacency) -> OutputResult<()>;

    /// Write every name → anchor association of `mapping`.
    fn write_mapping(&mut self, mapping: &AnchorMapping) -> OutputResult<()>;

    /// Flush and publish the output.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
