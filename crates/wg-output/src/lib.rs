//! `wg-output` — export of the finished graph.
//!
//! Two CSV files are produced in the output directory:
//!
//! | File                   | Header                  | One row per             |
//! |------------------------|-------------------------|-------------------------|
//! | `adj_list.csv`         | `src,dst,length`        | directed edge           |
//! | `building_mapping.csv` | `building_name,node_id` | inserted anchor         |
//!
//! Writers implement [`OutputWriter`]; [`CsvWriter`] stages both files and
//! only publishes them on [`finish`](OutputWriter::finish), so an aborted
//! export never leaves one file without the other.  [`read_adjacency`] and
//! [`read_mapping`] load the files back.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wg_output::{CsvWriter, OutputWriter};
//!
//! let mut w = CsvWriter::new(Path::new("./out"))?;
//! w.write_adjacency(&adjacency)?;
//! w.write_mapping(&mapping)?;
//! w.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod reader;
pub mod row;
pub mod writer;


pub use self::csv::{CsvWriter, DEFAULT_ADJACENCY_FILE, DEFAULT_MAPPING_FILE};
pub use error::{OutputError, OutputResult};
pub use reader::{read_adjacency, read_mapping, MappingTable};
pub use row::{AdjacencyRow, MappingRow, ADJACENCY_HEADER, MAPPING_HEADER};
pub use writer::OutputWriter;
