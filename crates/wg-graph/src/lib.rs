//! `wg-graph` — road graph construction.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`graph`]     | `Graph`, `Node`, `NodeKind`, `Edge`                       |
//! | [`project`]   | `project_onto_segment`, `nearest_edge`, `EdgeMatch`       |
//! | [`locator`]   | `EdgeLocator` trait, `LinearLocator`, `RTreeLocator`      |
//! | [`split`]     | `split_polylines` (curved edges → straight chains)        |
//! | [`sanitize`]  | `sanitize` (self-loop removal, dense relabelling)         |
//! | [`anchor`]    | `AnchorInserter`, `AnchorMapping`, `PointOfInterest`      |
//! | [`adjacency`] | `Adjacency` (CSR export view)                             |
//! | [`error`]     | `GraphError`, `GraphResult<T>`                            |
//!
//! Stages run in the order split → sanitize → anchor → adjacency, each
//! mutating one owned [`Graph`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod adjacency;
pub mod anchor;
pub mod error;
pub mod graph;
pub mod locator;
pub mod project;
pub mod sanitize;
pub mod split;


pub use adjacency::Adjacency;
pub use anchor::{AnchorInserter, AnchorMapping, PointOfInterest};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Node, NodeKind};
pub use locator::{EdgeLocator, LinearLocator, RTreeLocator};
pub use project::{nearest_edge, project_onto_segment, EdgeMatch, Projection};
pub use sanitize::{sanitize, SanitizeStats};
pub use split::{split_polylines, SplitStats};
