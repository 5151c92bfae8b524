//! `wg-pipeline` — stage runner for the waygraph build.
//!
//! # Stages
//!
//! ```text
//! ① Split      — curved edges become chains of straight edges
//! ② Sanitize   — self-loops dropped, node ids relabelled to 0..N
//! ③ Anchor     — one anchor node per point of interest, in input order
//! ④ Adjacency  — frozen (src, dst, length) view, missing weights filled in
//! ⑤ Export     — adjacency + mapping CSV files, replaced atomically
//! ```
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`pipeline`] | `Pipeline`, `BuiltGraph`                                |
//! | [`config`]   | `PipelineConfig`, `LocatorKind`                         |
//! | [`observer`] | `PipelineObserver`, `NoopObserver`, `LogObserver`       |
//! | [`report`]   | `PipelineReport`                                        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wg_pipeline::{LogObserver, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig { out_dir: "out".into(), ..Default::default() });
//! let report = pipeline.run(Path::new("roads.geojson"), Path::new("buildings.geojson"), &mut LogObserver)?;
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod tests;

pub use config::{LocatorKind, PipelineConfig};
pub use error::{PipelineError, PipelineResult};
pub use observer::{LogObserver, NoopObserver, PipelineObserver, Stage, StageReport};
pub use pipeline::{BuiltGraph, Pipeline};
pub use report::PipelineReport;
