//! In-process provider fixture: metadata rows and byte blobs served from
//! memory, with injectable failures.
//!
//! Stands in for the platform storage abstraction when resolving outside a
//! device: the CLI loads one from a TOML file, tests build one in code.

mod load;

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read};
use std::path::Path;

use crate::provider::{ContentSource, MetadataRow, RowFilter};
use crate::uri::ContentUri;

#[derive(Debug, Clone)]
struct FixtureRow {
    uri: String,
    row: MetadataRow,
}

/// A `ContentSource` answering from fixed tables and blobs.
///
/// Queries match on the exact raw URI string; rows are consulted in insert
/// order and the first match wins. The default fixture is empty: every
/// query answers no rows and every stream open fails.
#[derive(Debug, Default)]
pub struct FixtureSource {
    rows: Vec<FixtureRow>,
    blobs: HashMap<String, Vec<u8>>,
    query_errors: HashSet<String>,
    open_errors: HashSet<String>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture from a TOML file (`[[row]]` and `[[blob]]` entries;
    /// blob `path`s are read relative to the fixture file).
    pub fn from_path(path: &Path) -> Result<Self> {
        load::load(path)
    }

    /// Add a metadata row answering queries for `uri`.
    pub fn insert_row(&mut self, uri: &str, row: MetadataRow) {
        self.rows.push(FixtureRow {
            uri: uri.to_string(),
            row,
        });
    }

    /// Serve `bytes` for stream opens of `uri`.
    pub fn insert_blob(&mut self, uri: &str, bytes: Vec<u8>) {
        self.blobs.insert(uri.to_string(), bytes);
    }

    /// Make every query for `uri` fail.
    pub fn fail_query(&mut self, uri: &str) {
        self.query_errors.insert(uri.to_string());
    }

    /// Make every stream open for `uri` fail.
    pub fn fail_open(&mut self, uri: &str) {
        self.open_errors.insert(uri.to_string());
    }
}

impl ContentSource for FixtureSource {
    fn query_first(
        &self,
        uri: &ContentUri,
        projection: Option<&[&str]>,
        filter: Option<&RowFilter>,
    ) -> Result<Option<MetadataRow>> {
        if self.query_errors.contains(uri.raw()) {
            anyhow::bail!("fixture query failure for {}", uri);
        }

        let hit = self
            .rows
            .iter()
            .filter(|r| r.uri == uri.raw())
            .find(|r| match filter {
                Some(f) => r.row.get(&f.column) == Some(f.value.as_str()),
                None => true,
            });

        Ok(hit.map(|r| match projection {
            Some(columns) => r.row.project(columns),
            None => r.row.clone(),
        }))
    }

    fn open_read(&self, uri: &ContentUri) -> Result<Box<dyn Read>> {
        if self.open_errors.contains(uri.raw()) {
            anyhow::bail!("fixture stream failure for {}", uri);
        }
        match self.blobs.get(uri.raw()) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => anyhow::bail!("no stream for {}", uri),
        }
    }
}
