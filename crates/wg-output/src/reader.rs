//! Readers for previously exported files.
//!
//! Downstream tooling (and the `lookup` command) reads the two CSV files back
//! to translate building names into graph nodes.  The header row is checked
//! exactly; a file with different columns is rejected rather than guessed at.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder};
use rustc_hash::FxHashMap;

use wg_core::NodeId;

use crate::row::{AdjacencyRow, MappingRow, ADJACENCY_HEADER, MAPPING_HEADER};
use crate::{OutputError, OutputResult};

/// Building name → anchor node, in file order.
#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    rows:  Vec<MappingRow>,
    index: FxHashMap<String, usize>,
}

impl MappingTable {
    /// Anchor node for `name`.  Names are matched exactly (case-sensitive).
    pub fn node_for(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).map(|&i| NodeId(self.rows[i].node_id))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }
}

/// Read an adjacency file written by [`CsvWriter`](crate::CsvWriter).
pub fn read_adjacency(path: &Path) -> OutputResult<Vec<AdjacencyRow>> {
    let mut rdr = open(path, ADJACENCY_HEADER)?;
    let rows = rdr.deserialize().collect::<Result<Vec<AdjacencyRow>, _>>()?;
    Ok(rows)
}

/// Read a mapping file written by [`CsvWriter`](crate::CsvWriter).
///
/// A name listed twice is an error: the table would be ambiguous.
pub fn read_mapping(path: &Path) -> OutputResult<MappingTable> {
    let mut rdr = open(path, MAPPING_HEADER)?;
    let mut table = MappingTable::default();
    for row in rdr.deserialize() {
        let row: MappingRow = row?;
        if table.index.contains_key(&row.building_name) {
            return Err(OutputError::DuplicateName {
                path: path.to_path_buf(),
                name: row.building_name,
            });
        }
        table.index.insert(row.building_name.clone(), table.rows.len());
        table.rows.push(row);
    }
    Ok(table)
}

fn open(path: &Path, expected: &'static [&'static str]) -> OutputResult<Reader<File>> {
    let mut rdr = ReaderBuilder::new().from_path(path)?;
    check_header(&mut rdr, path, expected)?;
    Ok(rdr)
}

fn check_header<R: Read>(
    rdr:      &mut Reader<R>,
    path:     &Path,
    expected: &'static [&'static str],
) -> OutputResult<()> {
    let found = rdr.headers()?;
    if found.iter().ne(expected.iter().copied()) {
        return Err(OutputError::Header {
            path: path.to_path_buf(),
            expected,
            found: found.iter().map(str::to_owned).collect(),
        });
    }
    Ok(())
}
