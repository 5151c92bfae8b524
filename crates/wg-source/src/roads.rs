//! Raw road graph loader.
//!
//! # GeoJSON layout
//!
//! One FeatureCollection holding both nodes and edges:
//!
//! | Feature                         | Meaning                                      |
//! |---------------------------------|----------------------------------------------|
//! | `Point` + `id`                  | road node (x = longitude, y = latitude)      |
//! | `u`, `v` (+ optional `length`)  | directed edge `u → v`; a `LineString`        |
//! |                                 | geometry, if present, is its line geometry   |
//!
//! Anything else is skipped with a warning.  Node order and edge order follow
//! feature order; nodes may appear after the edges that reference them.

use std::path::Path;

use geojson::{Feature, FeatureCollection, Value};
use log::{info, warn};

use wg_core::{GeoPoint, NodeId};
use wg_graph::{Edge, Graph, NodeKind};

use crate::loader::{id_property, length_property, read_collection};
use crate::{SourceError, SourceResult};

/// Load the raw road graph from a GeoJSON file.
pub fn load_roads(path: &Path) -> SourceResult<Graph> {
    let graph = roads_from_collection(read_collection(path)?)?;
    info!(
        "loaded {} road nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// Build the raw road graph from an already-parsed collection.
pub fn roads_from_collection(collection: FeatureCollection) -> SourceResult<Graph> {
    let mut nodes: Vec<(NodeId, GeoPoint)> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for (index, feature) in collection.features.iter().enumerate() {
        let u = id_property(feature, index, "u")?;
        let v = id_property(feature, index, "v")?;
        match (u, v) {
            (Some(u), Some(v)) => edges.push(Edge {
                from: NodeId(u),
                to: NodeId(v),
                length_m: length_property(feature, index, "length")?,
                geometry: line_geometry(feature, index)?,
            }),
            _ => match id_property(feature, index, "id")? {
                Some(id) => nodes.push((NodeId(id), point_geometry(feature, index)?)),
                None => warn!("feature {index}: neither a road node nor an edge; skipped"),
            },
        }
    }

    let mut graph = Graph::with_capacity(nodes.len());
    for (id, pos) in nodes {
        graph.add_node(id, pos, NodeKind::Road)?;
    }
    for edge in edges {
        graph.add_edge(edge)?;
    }
    Ok(graph)
}

fn point_geometry(feature: &Feature, index: usize) -> SourceResult<GeoPoint> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(pos)) => position(pos, index),
        _ => Err(SourceError::InvalidGeometry {
            index,
            reason: "road node must have Point geometry".to_owned(),
        }),
    }
}

fn line_geometry(feature: &Feature, index: usize) -> SourceResult<Option<Vec<GeoPoint>>> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        None => Ok(None),
        Some(Value::LineString(coords)) => coords
            .iter()
            .map(|pos| position(pos, index))
            .collect::<SourceResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(SourceError::InvalidGeometry {
            index,
            reason: "road edge geometry must be a LineString".to_owned(),
        }),
    }
}

fn position(pos: &[f64], index: usize) -> SourceResult<GeoPoint> {
    match pos {
        [x, y, ..] => GeoPoint::checked(*y, *x)
            .map_err(|source| SourceError::Coordinate { index, source }),
        _ => Err(SourceError::InvalidGeometry {
            index,
            reason: "position needs at least two coordinates".to_owned(),
        }),
    }
}
