//! The `Pipeline` runner.

use std::path::Path;
use std::time::Instant;

use log::info;

use wg_graph::{
    sanitize, split_polylines, Adjacency, AnchorInserter, AnchorMapping, Graph, LinearLocator,
    PointOfInterest, RTreeLocator,
};
use wg_output::{CsvWriter, OutputWriter};
use wg_source::{load_buildings, load_roads};

use crate::config::{LocatorKind, PipelineConfig};
use crate::observer::{PipelineObserver, Stage, StageReport};
use crate::report::PipelineReport;
use crate::PipelineResult;

/// Everything the pipeline produced, before export.
#[derive(Debug)]
pub struct BuiltGraph {
    pub graph:     Graph,
    pub adjacency: Adjacency,
    pub mapping:   AnchorMapping,
    pub report:    PipelineReport,
}

/// Runs the construction stages over one owned [`Graph`].
///
/// ```text
/// raw graph ─▶ ① split ─▶ ② sanitize ─▶ ③ anchor ─▶ ④ adjacency ─▶ ⑤ export
/// ```
///
/// Stages run strictly in sequence; anchors are inserted one point of
/// interest at a time, each seeing the graph left by the previous one.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load both GeoJSON inputs, build, and write the CSV files described by
    /// the configuration.
    ///
    /// Previous output files are removed before the graph is built; if any
    /// later stage fails, neither file exists afterwards.
    pub fn run<O: PipelineObserver>(
        &self,
        roads:     &Path,
        buildings: &Path,
        observer:  &mut O,
    ) -> PipelineResult<PipelineReport> {
        let graph = load_roads(roads)?;
        let buildings = load_buildings(buildings)?;

        let mut writer = CsvWriter::with_names(
            &self.config.out_dir,
            &self.config.adjacency_file,
            &self.config.mapping_file,
        )?;
        let mut built = self.build(graph, &buildings.pois, observer)?;
        self.export(&mut built, &mut writer, observer)?;

        observer.on_finish(&built.report);
        Ok(built.report)
    }

    /// Run stages ① – ④.
    ///
    /// `pois` must already be deduplicated; a repeated name is an error.
    pub fn build<O: PipelineObserver>(
        &self,
        mut graph: Graph,
        pois:      &[PointOfInterest],
        observer:  &mut O,
    ) -> PipelineResult<BuiltGraph> {
        let mut report = PipelineReport {
            raw_nodes: graph.node_count(),
            raw_edges: graph.edge_count(),
            ..PipelineReport::default()
        };

        // ── ① Split polylines ─────────────────────────────────────────────
        let started = begin(observer, Stage::Split);
        report.split = split_polylines(&mut graph)?;
        end(observer, &mut report, Stage::Split, started, &graph);

        // ── ② Sanitize ────────────────────────────────────────────────────
        let started = begin(observer, Stage::Sanitize);
        report.sanitize = sanitize(&mut graph)?;
        end(observer, &mut report, Stage::Sanitize, started, &graph);

        // ── ③ Anchors ─────────────────────────────────────────────────────
        let started = begin(observer, Stage::Anchor);
        let mapping = match self.config.locator {
            LocatorKind::Linear => AnchorInserter::new(LinearLocator).insert_all(&mut graph, pois)?,
            LocatorKind::Rtree => {
                let locator = RTreeLocator::build(&graph)?;
                AnchorInserter::new(locator).insert_all(&mut graph, pois)?
            }
        };
        for (name, node) in mapping.iter() {
            observer.on_anchor(name, node);
        }
        report.anchors = mapping.len();
        end(observer, &mut report, Stage::Anchor, started, &graph);

        // ── ④ Adjacency ───────────────────────────────────────────────────
        let started = begin(observer, Stage::Adjacency);
        let adjacency = Adjacency::build(&graph)?;
        report.recomputed_weights = adjacency.recomputed;
        report.final_nodes = adjacency.node_count();
        report.final_edges = adjacency.edge_count();
        end(observer, &mut report, Stage::Adjacency, started, &graph);

        Ok(BuiltGraph { graph, adjacency, mapping, report })
    }

    /// Stage ⑤: write `built` through `writer` and publish it.
    pub fn export<W: OutputWriter, O: PipelineObserver>(
        &self,
        built:    &mut BuiltGraph,
        writer:   &mut W,
        observer: &mut O,
    ) -> PipelineResult<()> {
        let started = begin(observer, Stage::Export);
        writer.write_adjacency(&built.adjacency)?;
        writer.write_mapping(&built.mapping)?;
        writer.finish()?;
        info!(
            "wrote {} adjacency rows and {} mapping rows",
            built.adjacency.edge_count(),
            built.mapping.len()
        );
        end(observer, &mut built.report, Stage::Export, started, &built.graph);
        Ok(())
    }
}

fn begin<O: PipelineObserver>(observer: &mut O, stage: Stage) -> Instant {
    observer.on_stage_start(stage);
    Instant::now()
}

fn end<O: PipelineObserver>(
    observer: &mut O,
    report:   &mut PipelineReport,
    stage:    Stage,
    started:  Instant,
    graph:    &Graph,
) {
    let stage_report = StageReport {
        stage,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        elapsed: started.elapsed(),
    };
    observer.on_stage_end(&stage_report);
    report.stages.push(stage_report);
}
