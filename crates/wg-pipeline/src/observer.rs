//! Pipeline observer trait for progress reporting.

use std::fmt;
use std::time::Duration;

use log::{debug, info};

use wg_core::NodeId;

use crate::report::PipelineReport;

/// The stages of one run, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Split,
    Sanitize,
    Anchor,
    Adjacency,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Stage::Split => "split",
            Stage::Sanitize => "sanitize",
            Stage::Anchor => "anchor",
            Stage::Adjacency => "adjacency",
            Stage::Export => "export",
        })
    }
}

/// Graph size right after a stage finished.
#[derive(Copy, Clone, Debug)]
pub struct StageReport {
    pub stage:   Stage,
    pub nodes:   usize,
    /// Directed edges.
    pub edges:   usize,
    pub elapsed: Duration,
}

/// Callbacks invoked by [`Pipeline`](crate::Pipeline) at key points of a run.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait PipelineObserver {
    /// Called before a stage starts.
    fn on_stage_start(&mut self, _stage: Stage) {}

    /// Called after a stage completed successfully.
    fn on_stage_end(&mut self, _report: &StageReport) {}

    /// Called for each point of interest once its anchor is in the graph.
    fn on_anchor(&mut self, _name: &str, _node: NodeId) {}

    /// Called once after the last stage.
    fn on_finish(&mut self, _report: &PipelineReport) {}
}

/// A [`PipelineObserver`] that does nothing.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// A [`PipelineObserver`] that reports progress through the `log` facade.
#[derive(Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_stage_end(&mut self, r: &StageReport) {
        info!(
            "{:<9} done: {} nodes, {} edges ({:.1?})",
            r.stage, r.nodes, r.edges, r.elapsed
        );
    }

    fn on_anchor(&mut self, name: &str, node: NodeId) {
        debug!("{name:?} -> {node}");
    }

    fn on_finish(&mut self, r: &PipelineReport) {
        info!(
            "pipeline finished: {} polylines split into {} edges, {} self-loops dropped, \
             {} anchors, {} weights recomputed; final graph {} nodes / {} edges",
            r.split.edges_split,
            r.split.edges_created,
            r.sanitize.self_loops_removed,
            r.anchors,
            r.recomputed_weights,
            r.final_nodes,
            r.final_edges
        );
    }
}
