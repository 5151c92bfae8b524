use thiserror::Error;

use wg_graph::GraphError;
use wg_output::OutputError;
use wg_source::SourceError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input error: {0}")]
    Source(#[from] SourceError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
