//! Graph-subsystem error type.

use thiserror::Error;

use wg_core::{CoreError, EdgeId, NodeId};

/// Errors produced by `wg-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// There is no edge to project a point of interest onto.  Fatal: every
    /// point of interest must receive exactly one anchor.
    #[error("graph has no edges; cannot attach point of interest {name:?}")]
    NoEdges { name: String },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found in graph")]
    EdgeNotFound(EdgeId),

    #[error("node {0} already exists in graph")]
    DuplicateNode(NodeId),

    #[error("point of interest {0:?} was supplied more than once")]
    DuplicateName(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GraphResult<T> = Result<T, GraphError>;
