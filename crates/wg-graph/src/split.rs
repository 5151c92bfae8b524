//! Polyline splitting: curved edges become chains of straight edges.

use log::debug;

use wg_core::{EdgeId, GeoPoint, NodeId};

use crate::graph::{Edge, Graph, NodeKind};
use crate::GraphResult;

/// Counters from one [`split_polylines`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Multi-vertex edges replaced.
    pub edges_split:   usize,
    /// Straight edges created in their place.
    pub edges_created: usize,
    /// Interior vertices promoted to road nodes.
    pub nodes_created: usize,
}

/// Replace every edge whose geometry has more than two vertices with one
/// straight edge per consecutive vertex pair.
///
/// Interior vertices become new [`NodeKind::Road`] nodes with ids from the
/// graph's allocator (`max id + 1`, increasing across the whole pass).  Each
/// sub-edge is weighted by the haversine distance between its endpoint nodes.
/// Removals and insertions are applied after the scan, so replacement edges
/// keep the relative order of the edges they replace and land after every
/// untouched edge.
pub fn split_polylines(graph: &mut Graph) -> GraphResult<SplitStats> {
    let curved: Vec<(EdgeId, NodeId, NodeId, Vec<GeoPoint>)> = graph
        .edges()
        .filter(|(_, e)| e.is_polyline())
        .filter_map(|(id, e)| e.geometry.clone().map(|g| (id, e.from, e.to, g)))
        .collect();

    let mut stats = SplitStats::default();
    let mut replacements: Vec<Edge> = Vec::new();

    for (id, from, to, coords) in &curved {
        let mut prev = *from;
        let mut prev_pos = graph.pos(prev)?;

        for &vertex in &coords[1..coords.len() - 1] {
            let node = graph.push_node(vertex, NodeKind::Road)?;
            replacements.push(Edge::straight(prev, node, prev_pos.distance_m(vertex)));
            stats.nodes_created += 1;
            prev = node;
            prev_pos = vertex;
        }

        let end_pos = graph.pos(*to)?;
        replacements.push(Edge::straight(prev, *to, prev_pos.distance_m(end_pos)));

        debug!("split edge {id} ({from} -> {to}) into {} segments", coords.len() - 1);
        stats.edges_split += 1;
    }

    for (id, ..) in &curved {
        graph.remove_edge(*id);
    }
    stats.edges_created = replacements.len();
    for edge in replacements {
        graph.add_edge(edge)?;
    }

    Ok(stats)
}
