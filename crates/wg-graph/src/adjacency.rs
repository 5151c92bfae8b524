//! Directed adjacency built from the finished graph.
//!
//! # Data layout
//!
//! **Compressed Sparse Row (CSR)** over the graph's node order.  The
//! outgoing edges of the node in slot `s` occupy
//!
//! ```text
//! edge_to[ out_start[s] .. out_start[s+1] ]
//! ```
//!
//! Within one node, edges keep the graph's storage order.

use rustc_hash::FxHashMap;

use wg_core::NodeId;

use crate::graph::Graph;
use crate::{GraphError, GraphResult};

/// Frozen `(source, destination, weight)` view of a graph.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    /// Node ids in graph insertion order.  Slot `s` is `node_ids[s]`.
    pub node_ids:      Vec<NodeId>,
    /// CSR row pointer.  Length = `node_count + 1`.
    pub out_start:     Vec<usize>,
    pub edge_to:       Vec<NodeId>,
    /// Edge weights, metres.
    pub edge_length_m: Vec<f64>,
    /// How many weights were missing and recomputed from coordinates.
    pub recomputed:    usize,
    slot_of:           FxHashMap<NodeId, usize>,
}

impl Adjacency {
    /// Flatten `graph`.  Edges without a stored length get the haversine
    /// distance between their endpoints.
    ///
    /// Time complexity: O(E log E) for the stable sort by source.
    pub fn build(graph: &Graph) -> GraphResult<Self> {
        let node_ids: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
        let slot_of: FxHashMap<NodeId, usize> =
            node_ids.iter().enumerate().map(|(s, &id)| (id, s)).collect();
        let node_count = node_ids.len();

        let mut recomputed = 0;
        let mut raw: Vec<(usize, NodeId, f64)> = Vec::with_capacity(graph.edge_count());
        for (_, edge) in graph.edges() {
            let slot = *slot_of.get(&edge.from).ok_or(GraphError::NodeNotFound(edge.from))?;
            let length = match edge.length_m {
                Some(len) => len,
                None => {
                    recomputed += 1;
                    let (a, b) = graph.segment(edge)?;
                    a.distance_m(b)
                }
            };
            raw.push((slot, edge.to, length));
        }

        // Stable: preserves storage order among a node's edges.
        raw.sort_by_key(|&(slot, ..)| slot);

        let mut out_start = vec![0usize; node_count + 1];
        for &(slot, ..) in &raw {
            out_start[slot + 1] += 1;
        }
        for i in 1..=node_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[node_count], raw.len());

        Ok(Self {
            node_ids,
            out_start,
            edge_to: raw.iter().map(|&(_, to, _)| to).collect(),
            edge_length_m: raw.iter().map(|&(.., len)| len).collect(),
            recomputed,
            slot_of,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.slot_of.contains_key(&node)
    }

    /// `(destination, weight)` pairs leaving `node`; empty if unknown.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let range = self
            .slot_of
            .get(&node)
            .map(|&s| self.out_start[s]..self.out_start[s + 1])
            .unwrap_or(0..0);
        range.map(|i| (self.edge_to[i], self.edge_length_m[i]))
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.slot_of
            .get(&node)
            .map_or(0, |&s| self.out_start[s + 1] - self.out_start[s])
    }

    /// Every `(source, destination, weight)` triple, grouped by source in
    /// node order.
    pub fn triples(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.node_ids.iter().enumerate().flat_map(move |(s, &src)| {
            (self.out_start[s]..self.out_start[s + 1])
                .map(move |i| (src, self.edge_to[i], self.edge_length_m[i]))
        })
    }
}
