//! Self-loop removal and dense node relabelling.

use crate::graph::Graph;
use crate::GraphResult;

/// Counters from one [`sanitize`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    pub self_loops_removed: usize,
    /// `N`: ids are now exactly `0..N`.
    pub node_count:         usize,
}

/// Drop every edge whose endpoints coincide and relabel nodes to the dense
/// range `0..N` in first-seen (insertion) order.
///
/// Relabelling runs first: it is the step that can fail, and it fails
/// without touching the graph.
///
/// After this call the graph's allocator hands out `N` next, which is where
/// anchor ids begin.
pub fn sanitize(graph: &mut Graph) -> GraphResult<SanitizeStats> {
    graph.relabel_dense()?;
    let self_loops_removed = graph.retain_edges(|e| !e.is_self_loop());
    Ok(SanitizeStats { self_loops_removed, node_count: graph.node_count() })
}
