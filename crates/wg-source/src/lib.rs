//! `wg-source` — ingestion of the raw inputs the pipeline starts from.
//!
//! The road graph and building footprints are fetched by an external
//! geospatial provider and handed over as GeoJSON.  This crate turns them
//! into a raw [`wg_graph::Graph`] and a deduplicated list of
//! [`wg_graph::PointOfInterest`]s; it performs no geometry processing beyond
//! centroid extraction.
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`roads`]     | `load_roads`, `roads_from_collection`                 |
//! | [`buildings`] | `load_buildings`, `BuildingSet`                       |
//! | [`loader`]    | `read_collection` and property helpers                |
//! | [`error`]     | `SourceError`, `SourceResult<T>`                      |

pub mod buildings;
pub mod error;
pub mod loader;
pub mod roads;


pub use buildings::{buildings_from_collection, load_buildings, BuildingSet};
pub use error::{SourceError, SourceResult};
pub use loader::{read_collection, read_collection_from};
pub use roads::{load_roads, roads_from_collection};
