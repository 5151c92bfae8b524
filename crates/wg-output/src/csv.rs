//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `adj_list.csv` — `src,dst,length`, one row per directed edge
//! - `building_mapping.csv` — `building_name,node_id`, one row per anchor
//!
//! Any previous copy of either file is deleted before anything is written.
//! Rows go to `<name>.partial` siblings which are renamed into place by
//! [`finish`](OutputWriter::finish); a writer dropped before finishing
//! deletes its partial files, so a failed run leaves neither file behind.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use log::info;

use wg_graph::{Adjacency, AnchorMapping};

use crate::row::{AdjacencyRow, MappingRow, ADJACENCY_HEADER, MAPPING_HEADER};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

pub const DEFAULT_ADJACENCY_FILE: &str = "adj_list.csv";
pub const DEFAULT_MAPPING_FILE: &str = "building_mapping.csv";

/// One output file being written under a temporary name.
struct Staged {
    target:  PathBuf,
    partial: PathBuf,
    writer:  Writer<File>,
    rows:    usize,
}

impl Staged {
    fn open(target: PathBuf, header: &[&str]) -> OutputResult<Self> {
        remove_if_exists(&target)?;
        let mut partial = target.clone().into_os_string();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        let mut writer = WriterBuilder::new().has_headers(false).from_path(&partial)?;
        writer.write_record(header)?;
        Ok(Self { target, partial, writer, rows: 0 })
    }
}

/// Writes the adjacency and mapping CSV files.
pub struct CsvWriter {
    adjacency: Staged,
    mapping:   Staged,
    finished:  bool,
}

impl CsvWriter {
    /// Stage both files in `dir` under their default names.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Self::with_names(dir, DEFAULT_ADJACENCY_FILE, DEFAULT_MAPPING_FILE)
    }

    /// Stage both files in `dir` (created if missing) and write the header
    /// rows.  Existing files at the final paths are removed first.
    pub fn with_names(dir: &Path, adjacency_file: &str, mapping_file: &str) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let adjacency = Staged::open(dir.join(adjacency_file), ADJACENCY_HEADER)?;
        let mapping = match Staged::open(dir.join(mapping_file), MAPPING_HEADER) {
            Ok(m) => m,
            Err(e) => {
                let _ = fs::remove_file(&adjacency.partial);
                return Err(e);
            }
        };
        Ok(Self { adjacency, mapping, finished: false })
    }

    pub fn adjacency_path(&self) -> &Path {
        &self.adjacency.target
    }

    pub fn mapping_path(&self) -> &Path {
        &self.mapping.target
    }

    fn check_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl OutputWriter for CsvWriter {
    fn write_adjacency(&mut self, adjacency: &Adjacency) -> OutputResult<()> {
        self.check_open()?;
        for (src, dst, length) in adjacency.triples() {
            self.adjacency.writer.serialize(AdjacencyRow { src: src.0, dst: dst.0, length })?;
            self.adjacency.rows += 1;
        }
        Ok(())
    }

    fn write_mapping(&mut self, mapping: &AnchorMapping) -> OutputResult<()> {
        self.check_open()?;
        for (name, node) in mapping.iter() {
            self.mapping.writer.serialize(MappingRow {
                building_name: name.to_owned(),
                node_id:       node.0,
            })?;
            self.mapping.rows += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.adjacency.writer.flush()?;
        self.mapping.writer.flush()?;

        fs::rename(&self.adjacency.partial, &self.adjacency.target)?;
        if let Err(e) = fs::rename(&self.mapping.partial, &self.mapping.target) {
            let _ = fs::remove_file(&self.adjacency.target);
            return Err(e.into());
        }
        self.finished = true;

        info!(
            "exported {} edges to {} and {} building mappings to {}",
            self.adjacency.rows,
            self.adjacency.target.display(),
            self.mapping.rows,
            self.mapping.target.display()
        );
        Ok(())
    }
}

impl Drop for CsvWriter {
    fn drop(&mut self) {
        if !self.finished {
            let _ = fs::remove_file(&self.adjacency.partial);
            let _ = fs::remove_file(&self.mapping.partial);
        }
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("old file {} removed", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
