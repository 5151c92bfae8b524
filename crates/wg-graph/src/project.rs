//! Point-to-segment projection.
//!
//! Longitude/latitude are treated as a locally planar `(x, y)` frame.  At
//! campus scale the distortion is far below the spacing between roads, and
//! only the *ranking* of candidates depends on it; reported edge lengths are
//! always haversine metres.

use wg_core::{EdgeId, GeoPoint, NodeId};

use crate::graph::{Edge, Graph};
use crate::GraphResult;

/// Closest point on a segment to a query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub point: GeoPoint,
    /// Clamped projection parameter in `[0, 1]`.
    pub t: f64,
}

/// Project `p` onto the closed segment `a`–`b`.
///
/// `t = ((p - a)·(b - a)) / |b - a|²`, clamped to `[0, 1]`.  A zero-length
/// segment returns `a` with `t = 0`.
pub fn project_onto_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> Projection {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    let len_2 = dx * dx + dy * dy;
    if len_2 == 0.0 {
        return Projection { point: a, t: 0.0 };
    }

    let t = (((p.x() - a.x()) * dx + (p.y() - a.y()) * dy) / len_2).clamp(0.0, 1.0);
    Projection {
        point: GeoPoint::from_xy(a.x() + t * dx, a.y() + t * dy),
        t,
    }
}

/// Result of a nearest-edge query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeMatch {
    pub edge:  EdgeId,
    pub from:  NodeId,
    pub to:    NodeId,
    /// Projected point on the edge.
    pub point: GeoPoint,
    /// Planar distance (degrees) from the query to `point`.
    pub distance: f64,
}

/// Score one stored edge against `query`.
pub fn match_edge(graph: &Graph, id: EdgeId, edge: &Edge, query: GeoPoint) -> GraphResult<EdgeMatch> {
    let (a, b) = graph.segment(edge)?;
    let proj = project_onto_segment(a, b, query);
    Ok(EdgeMatch {
        edge: id,
        from: edge.from,
        to: edge.to,
        point: proj.point,
        distance: query.planar_distance(proj.point),
    })
}

/// Linear scan over every edge in storage order.
///
/// O(E) per query.  The first edge reaching the minimum distance wins, so
/// the answer is deterministic for a given storage order.  Returns
/// `Ok(None)` for an edgeless graph.
pub fn nearest_edge(graph: &Graph, query: GeoPoint) -> GraphResult<Option<EdgeMatch>> {
    let mut best: Option<EdgeMatch> = None;
    for (id, edge) in graph.edges() {
        let candidate = match_edge(graph, id, edge, query)?;
        if best.is_none_or(|b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
    }
    Ok(best)
}
