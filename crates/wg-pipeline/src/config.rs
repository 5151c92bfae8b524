//! Pipeline configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use wg_output::{DEFAULT_ADJACENCY_FILE, DEFAULT_MAPPING_FILE};

/// Which [`EdgeLocator`](wg_graph::EdgeLocator) answers nearest-edge queries.
///
/// Both pick the same edge; `Rtree` is faster on large graphs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    #[default]
    Linear,
    Rtree,
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LocatorKind::Linear => "linear",
            LocatorKind::Rtree => "rtree",
        })
    }
}

/// Settings for one pipeline run.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```json
/// { "out_dir": "build", "locator": "rtree" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory receiving both output files.  Created if missing.
    pub out_dir:        PathBuf,
    pub adjacency_file: String,
    pub mapping_file:   String,
    pub locator:        LocatorKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            out_dir:        PathBuf::from("."),
            adjacency_file: DEFAULT_ADJACENCY_FILE.to_owned(),
            mapping_file:   DEFAULT_MAPPING_FILE.to_owned(),
            locator:        LocatorKind::Linear,
        }
    }
}

impl PipelineConfig {
    pub fn adjacency_path(&self) -> PathBuf {
        self.out_dir.join(&self.adjacency_file)
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.out_dir.join(&self.mapping_file)
    }
}
