//! Anchor insertion: attaching points of interest to the road graph.
//!
//! Each point of interest is snapped, in input order, to the edge nearest
//! its location *in the graph as it stands at that moment*.  The edge is cut
//! at the projected point by a new anchor node, so later points of interest
//! may snap to the sub-edges an earlier one created.  Reordering the input
//! can therefore change the result; the order is part of the contract.

use log::debug;
use rustc_hash::FxHashMap;

use wg_core::{GeoPoint, NodeId};

use crate::graph::{Edge, Graph, NodeKind};
use crate::locator::EdgeLocator;
use crate::{GraphError, GraphResult};

/// A named location to make reachable through the graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    pub name:     String,
    pub location: GeoPoint,
}

impl PointOfInterest {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self { name: name.into(), location }
    }
}

// ── AnchorMapping ─────────────────────────────────────────────────────────────

/// One-to-one map from point-of-interest name to its anchor node, iterated
/// in insertion order.
#[derive(Clone, Debug, Default)]
pub struct AnchorMapping {
    entries: Vec<(String, NodeId)>,
    by_name: FxHashMap<String, usize>,
}

impl AnchorMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name → node`.  Names are case-sensitive and must be unique.
    pub fn insert(&mut self, name: &str, node: NodeId) -> GraphResult<()> {
        if self.by_name.contains_key(name) {
            return Err(GraphError::DuplicateName(name.to_owned()));
        }
        self.by_name.insert(name.to_owned(), self.entries.len());
        self.entries.push((name.to_owned(), node));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, anchor)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.entries.iter().map(|(n, id)| (n.as_str(), *id))
    }
}

// ── AnchorInserter ────────────────────────────────────────────────────────────

/// Snaps points of interest onto a sanitized graph using locator `L`.
pub struct AnchorInserter<L: EdgeLocator> {
    locator: L,
}

impl<L: EdgeLocator> AnchorInserter<L> {
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    /// Give back the locator, e.g. to inspect an index after insertion.
    pub fn into_locator(self) -> L {
        self.locator
    }

    /// Insert one anchor per point of interest, strictly in slice order.
    ///
    /// Anchor ids continue from the graph's allocator, so on a sanitized
    /// graph with `N` nodes they are `N, N + 1, …`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoEdges`] if the graph has no edge to attach to;
    /// [`GraphError::DuplicateName`] if a name repeats.  Either aborts the
    /// whole pass.
    pub fn insert_all(&mut self, graph: &mut Graph, pois: &[PointOfInterest]) -> GraphResult<AnchorMapping> {
        let mut mapping = AnchorMapping::new();
        for poi in pois {
            if mapping.get(&poi.name).is_some() {
                return Err(GraphError::DuplicateName(poi.name.clone()));
            }
            let anchor = self.insert(graph, poi)?;
            mapping.insert(&poi.name, anchor)?;
        }
        Ok(mapping)
    }

    /// Attach a single point of interest and return its anchor node.
    pub fn insert(&mut self, graph: &mut Graph, poi: &PointOfInterest) -> GraphResult<NodeId> {
        let hit = self
            .locator
            .nearest(graph, poi.location)?
            .ok_or_else(|| GraphError::NoEdges { name: poi.name.clone() })?;

        let a_pos = graph.pos(hit.from)?;
        let b_pos = graph.pos(hit.to)?;

        // Only the matched edge is cut; a reverse or parallel edge between
        // the same endpoints stays.
        graph.remove_edge(hit.edge).ok_or(GraphError::EdgeNotFound(hit.edge))?;
        self.locator.edge_removed(hit.edge, a_pos, b_pos);

        let anchor = graph.push_node(hit.point, NodeKind::Anchor)?;

        let d_a = a_pos.distance_m(hit.point);
        let d_b = b_pos.distance_m(hit.point);
        let wiring = [
            (hit.from, anchor, d_a, a_pos, hit.point),
            (anchor, hit.from, d_a, hit.point, a_pos),
            (hit.to, anchor, d_b, b_pos, hit.point),
            (anchor, hit.to, d_b, hit.point, b_pos),
        ];
        for (from, to, len, from_pos, to_pos) in wiring {
            let id = graph.add_edge(Edge::straight(from, to, len))?;
            self.locator.edge_added(id, from_pos, to_pos);
        }

        debug!(
            "anchored {:?} as {anchor} on {} -> {} at {} ({:.1} m / {:.1} m)",
            poi.name, hit.from, hit.to, hit.point, d_a, d_b
        );
        Ok(anchor)
    }
}
