//! Ingestion error type.

use thiserror::Error;

use wg_core::CoreError;
use wg_graph::GraphError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    #[error("feature {index}: property {key:?} {reason}")]
    InvalidProperty {
        index:  usize,
        key:    &'static str,
        reason: String,
    },

    #[error("feature {index}: {reason}")]
    InvalidGeometry { index: usize, reason: String },

    #[error("feature {index}: {source}")]
    Coordinate {
        index:  usize,
        #[source]
        source: CoreError,
    },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SourceResult<T> = Result<T, SourceError>;
