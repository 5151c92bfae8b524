//! Mutable road graph used by every construction stage.
//!
//! # Data layout
//!
//! Nodes live in a `Vec` in insertion order (the "first-seen" order the
//! sanitizer relabels by) with a hash index from [`NodeId`] to slot.  Edges
//! live in a `BTreeMap` keyed by [`EdgeId`]; edge ids come from a monotonic
//! counter, so iterating the map is iterating edges in the order they were
//! stored.  Removing an edge never reorders the survivors, and a new edge
//! always sorts last.
//!
//! The graph also owns the node-id allocator.  Every explicitly added node
//! bumps it past its id, so [`Graph::push_node`] always mints
//! `max(existing id) + 1`.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use wg_core::{EdgeId, GeoPoint, IdAllocator, NodeId};

use crate::{GraphError, GraphResult};

// ── Node / Edge ───────────────────────────────────────────────────────────────

/// What a node represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A road vertex, original or created by polyline splitting.
    Road,
    /// A road vertex created to attach a point of interest.
    Anchor,
}

impl NodeKind {
    /// Anchors are ordinary road vertices once inserted.
    #[inline]
    pub fn is_road(self) -> bool {
        matches!(self, NodeKind::Road | NodeKind::Anchor)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:   NodeId,
    pub pos:  GeoPoint,
    pub kind: NodeKind,
}

/// A directed edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to:   NodeId,
    /// Length in metres; `None` when the provider supplied none.
    pub length_m: Option<f64>,
    /// Full line geometry including both endpoints, if the edge is curved.
    pub geometry: Option<Vec<GeoPoint>>,
}

impl Edge {
    /// A straight edge with a known length.
    pub fn straight(from: NodeId, to: NodeId, length_m: f64) -> Self {
        Self { from, to, length_m: Some(length_m), geometry: None }
    }

    /// `true` when the geometry has interior vertices and must be split.
    #[inline]
    pub fn is_polyline(&self) -> bool {
        self.geometry.as_ref().is_some_and(|g| g.len() > 2)
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Owned road graph threaded through the construction pipeline.
///
/// Invariant: every stored edge's endpoints exist in the node set
/// ([`add_edge`](Self::add_edge) enforces it; nodes are never removed).
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes:      Vec<Node>,
    node_slot:  FxHashMap<NodeId, usize>,
    edges:      BTreeMap<EdgeId, Edge>,
    node_ids:   IdAllocator,
    edge_ids:   IdAllocator,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate node storage for bulk loading.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            node_slot: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            ..Self::default()
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The id [`push_node`](Self::push_node) will assign next.
    pub fn next_node_id(&self) -> NodeId {
        NodeId(self.node_ids.peek())
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Add a node with a caller-chosen id (raw ingestion).
    pub fn add_node(&mut self, id: NodeId, pos: GeoPoint, kind: NodeKind) -> GraphResult<()> {
        if self.node_slot.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.node_ids.observe(id.0)?;
        self.node_slot.insert(id, self.nodes.len());
        self.nodes.push(Node { id, pos, kind });
        Ok(())
    }

    /// Add a node with a freshly allocated id and return it.
    pub fn push_node(&mut self, pos: GeoPoint, kind: NodeKind) -> GraphResult<NodeId> {
        let id = NodeId(self.node_ids.allocate()?);
        self.node_slot.insert(id, self.nodes.len());
        self.nodes.push(Node { id, pos, kind });
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_slot.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_slot.contains_key(&id)
    }

    /// Position of `id`, or [`GraphError::NodeNotFound`].
    pub fn pos(&self, id: NodeId) -> GraphResult<GeoPoint> {
        self.node(id).map(|n| n.pos).ok_or(GraphError::NodeNotFound(id))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Store a directed edge after its endpoints; returns its storage key.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<EdgeId> {
        for end in [edge.from, edge.to] {
            if !self.contains_node(end) {
                return Err(GraphError::NodeNotFound(end));
            }
        }
        let id = EdgeId(self.edge_ids.allocate()?);
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Convenience: add a straight directed edge with a known length.
    pub fn connect(&mut self, from: NodeId, to: NodeId, length_m: f64) -> GraphResult<EdgeId> {
        self.add_edge(Edge::straight(from, to, length_m))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Store an edge without checking its endpoints.
    #[cfg(test)]
    pub(crate) fn insert_edge_unchecked(&mut self, edge: Edge) -> GraphResult<EdgeId> {
        let id = EdgeId(self.edge_ids.allocate()?);
        self.edges.insert(id, edge);
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.remove(&id)
    }

    /// Edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().map(|(&id, e)| (id, e))
    }

    /// Endpoint positions of `edge` as a straight segment.
    pub fn segment(&self, edge: &Edge) -> GraphResult<(GeoPoint, GeoPoint)> {
        Ok((self.pos(edge.from)?, self.pos(edge.to)?))
    }

    /// Keep only the edges for which `keep` returns `true`.  Returns the
    /// number removed.
    pub fn retain_edges(&mut self, mut keep: impl FnMut(&Edge) -> bool) -> usize {
        let before = self.edges.len();
        self.edges.retain(|_, e| keep(e));
        before - self.edges.len()
    }

    // ── Relabelling (sanitizer only) ──────────────────────────────────────

    /// Replace every node id with `NodeId(slot)`, where slot is the node's
    /// insertion position, and reset the allocator to `node_count`.
    ///
    /// Edge storage order is preserved.  Every edge endpoint is resolved
    /// before anything is rewritten, so on error the graph is unchanged.
    pub(crate) fn relabel_dense(&mut self) -> GraphResult<()> {
        let dense = |id: NodeId| {
            self.node_slot
                .get(&id)
                .map(|&slot| NodeId(slot as u64))
                .ok_or(GraphError::NodeNotFound(id))
        };
        let endpoints = self
            .edges
            .values()
            .map(|e| -> GraphResult<(NodeId, NodeId)> { Ok((dense(e.from)?, dense(e.to)?)) })
            .collect::<GraphResult<Vec<_>>>()?;

        for (edge, (from, to)) in self.edges.values_mut().zip(endpoints) {
            edge.from = from;
            edge.to = to;
        }
        for (slot, node) in self.nodes.iter_mut().enumerate() {
            node.id = NodeId(slot as u64);
        }
        self.node_slot = self
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, n)| (n.id, slot))
            .collect();
        self.node_ids = IdAllocator::starting_at(self.nodes.len() as u64);
        Ok(())
    }
}
