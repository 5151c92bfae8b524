//! Nearest-edge locators.
//!
//! Anchor insertion asks "which edge is closest to this point?" once per
//! point of interest, against a graph it mutates between queries.  An
//! [`EdgeLocator`] answers the query and is told about every edge the
//! inserter adds or removes so it can keep auxiliary structures in sync.
//!
//! Both implementations return the same edge: minimum planar distance,
//! ties going to the lowest [`EdgeId`] (earliest in storage order).

use rstar::primitives::{GeomWithData, Line};
use rstar::RTree;

use wg_core::{EdgeId, GeoPoint};

use crate::graph::Graph;
use crate::project::{match_edge, nearest_edge, EdgeMatch};
use crate::{GraphError, GraphResult};

/// Strategy for the nearest-edge query.
pub trait EdgeLocator {
    /// Nearest stored edge to `query`, or `None` if the graph has no edges.
    fn nearest(&self, graph: &Graph, query: GeoPoint) -> GraphResult<Option<EdgeMatch>>;

    /// Called after `id` (segment `a`–`b`) was stored in the graph.
    fn edge_added(&mut self, _id: EdgeId, _a: GeoPoint, _b: GeoPoint) {}

    /// Called after `id` (segment `a`–`b`) was removed from the graph.
    fn edge_removed(&mut self, _id: EdgeId, _a: GeoPoint, _b: GeoPoint) {}
}

// ── Linear scan ───────────────────────────────────────────────────────────────

/// O(E) scan over the graph's edges.  Stateless.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearLocator;

impl EdgeLocator for LinearLocator {
    fn nearest(&self, graph: &Graph, query: GeoPoint) -> GraphResult<Option<EdgeMatch>> {
        nearest_edge(graph, query)
    }
}

// ── R-tree ────────────────────────────────────────────────────────────────────

type SegmentEntry = GeomWithData<Line<[f64; 2]>, EdgeId>;

/// Relative slack when collecting near-tied candidates from the R-tree.
///
/// The tree ranks by squared distance; the final pick re-scores candidates
/// exactly like [`LinearLocator`] so rounding differences cannot change the
/// winner.
const TIE_SLACK: f64 = 1e-9;

/// R-tree of edge segments (via `rstar`), kept in sync through the
/// [`EdgeLocator`] callbacks.
pub struct RTreeLocator {
    tree: RTree<SegmentEntry>,
}

fn entry(id: EdgeId, a: GeoPoint, b: GeoPoint) -> SegmentEntry {
    GeomWithData::new(Line::new(a.to_xy(), b.to_xy()), id)
}

impl RTreeLocator {
    /// Bulk-load every edge currently in `graph`.
    pub fn build(graph: &Graph) -> GraphResult<Self> {
        let entries = graph
            .edges()
            .map(|(id, edge)| {
                let (a, b) = graph.segment(edge)?;
                Ok(entry(id, a, b))
            })
            .collect::<GraphResult<Vec<_>>>()?;
        Ok(Self { tree: RTree::bulk_load(entries) })
    }

    /// Number of indexed segments.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl EdgeLocator for RTreeLocator {
    fn nearest(&self, graph: &Graph, query: GeoPoint) -> GraphResult<Option<EdgeMatch>> {
        let q = query.to_xy();
        let mut hits = self.tree.nearest_neighbor_iter_with_distance_2(&q);
        let Some((first, first_d2)) = hits.next() else {
            return Ok(None);
        };

        let cutoff = first_d2 * (1.0 + TIE_SLACK) + f64::MIN_POSITIVE;
        let mut candidates = vec![first.data];
        candidates.extend(hits.take_while(|(_, d2)| *d2 <= cutoff).map(|(e, _)| e.data));
        candidates.sort_unstable();

        let mut best: Option<EdgeMatch> = None;
        for id in candidates {
            let edge = graph.edge(id).ok_or(GraphError::EdgeNotFound(id))?;
            let candidate = match_edge(graph, id, edge, query)?;
            if best.is_none_or(|b| candidate.distance < b.distance) {
                best = Some(candidate);
            }
        }
        Ok(best)
    }

    fn edge_added(&mut self, id: EdgeId, a: GeoPoint, b: GeoPoint) {
        self.tree.insert(entry(id, a, b));
    }

    fn edge_removed(&mut self, id: EdgeId, a: GeoPoint, b: GeoPoint) {
        self.tree.remove(&entry(id, a, b));
    }
}
