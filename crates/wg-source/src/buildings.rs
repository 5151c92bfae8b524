//! Building loader: named footprints → deduplicated points of interest.
//!
//! Each feature's `name` property names the building and its geometry (any
//! type) yields the centroid it is snapped from.  Records are dropped when:
//!
//! - `name` is missing, null, or blank;
//! - the geometry is missing or has no centroid (e.g. an empty polygon);
//! - an earlier record already used the same (case-sensitive) name.
//!
//! Survivors keep input order; anchor ids are assigned in that order.

use std::path::Path;

use geo::Centroid;
use geojson::FeatureCollection;
use log::{info, warn};
use rustc_hash::FxHashSet;

use wg_core::GeoPoint;
use wg_graph::PointOfInterest;

use crate::loader::{name_property, read_collection};
use crate::SourceResult;

/// Deduplicated points of interest plus counts of what was dropped.
#[derive(Clone, Debug, Default)]
pub struct BuildingSet {
    pub pois:        Vec<PointOfInterest>,
    pub unnamed:     usize,
    pub no_centroid: usize,
    pub duplicates:  usize,
}

impl BuildingSet {
    /// Keep the first occurrence of each name, preserving order.
    pub fn from_points(points: impl IntoIterator<Item = PointOfInterest>) -> Self {
        let mut set = BuildingSet::default();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for poi in points {
            if seen.insert(poi.name.clone()) {
                set.pois.push(poi);
            } else {
                set.duplicates += 1;
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}

/// Load buildings from a GeoJSON file.
pub fn load_buildings(path: &Path) -> SourceResult<BuildingSet> {
    let set = buildings_from_collection(read_collection(path)?);
    info!(
        "loaded {} buildings from {} ({} unnamed, {} without centroid, {} duplicate names dropped)",
        set.len(),
        path.display(),
        set.unnamed,
        set.no_centroid,
        set.duplicates
    );
    Ok(set)
}

/// Filter, locate, and deduplicate an already-parsed collection.
pub fn buildings_from_collection(collection: FeatureCollection) -> BuildingSet {
    let mut unnamed = 0;
    let mut no_centroid = 0;
    let mut named: Vec<PointOfInterest> = Vec::new();

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(name) = name_property(&feature, "name") else {
            unnamed += 1;
            continue;
        };

        let centroid = feature
            .geometry
            .and_then(|g| geo::Geometry::<f64>::try_from(g).ok())
            .and_then(|g| g.centroid());
        match centroid {
            Some(c) => named.push(PointOfInterest::new(name, GeoPoint::from_xy(c.x(), c.y()))),
            None => {
                warn!("feature {index}: building {name:?} has no usable geometry; skipped");
                no_centroid += 1;
            }
        }
    }

    BuildingSet { unnamed, no_centroid, ..BuildingSet::from_points(named) }
}
