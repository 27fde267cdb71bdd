//! Capability seams over the platform's storage abstraction.
//!
//! The resolver only depends on `ContentSource` and does not know whether
//! queries hit a real provider, a fixture, or a test double.

use anyhow::Result;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::uri::ContentUri;

/// Conventional column holding a direct filesystem path.
pub const COLUMN_DATA: &str = "_data";

/// Conventional column holding a human-readable display name.
pub const COLUMN_DISPLAY_NAME: &str = "_display_name";

/// Conventional row id column.
pub const COLUMN_ID: &str = "_id";

/// Default buffer size for the fallback cache copy.
pub const DEFAULT_COPY_BUFFER_BYTES: usize = 64 * 1024;

/// One row of provider metadata. Absent columns and SQL-null values are
/// both represented by a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRow {
    columns: HashMap<String, String>,
}

impl MetadataRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insert.
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: &str) {
        self.columns.insert(column.to_string(), value.to_string());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Restrict the row to the given columns.
    pub fn project(&self, columns: &[&str]) -> MetadataRow {
        let mut out = MetadataRow::new();
        for column in columns {
            if let Some(value) = self.get(column) {
                out.set(column, value);
            }
        }
        out
    }
}

/// Single equality filter on a metadata query (`column = value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    pub value: String,
}

impl RowFilter {
    pub fn new(column: &str, value: &str) -> Self {
        RowFilter {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Filter on the conventional row id column.
    pub fn id_equals(id: &str) -> Self {
        RowFilter::new(COLUMN_ID, id)
    }
}

/// Query and byte-stream capabilities of the platform storage abstraction.
///
/// Both operations are synchronous and blocking. Errors are the backend's
/// own; the resolver never propagates them past its boundary.
pub trait ContentSource {
    /// First row matching `uri` (and `filter`, when given), restricted to
    /// `projection` when given. `Ok(None)` when nothing matches. The
    /// returned row owns its data; there is no cursor to release.
    fn query_first(
        &self,
        uri: &ContentUri,
        projection: Option<&[&str]>,
        filter: Option<&RowFilter>,
    ) -> Result<Option<MetadataRow>>;

    /// Readable byte stream for the referenced content.
    fn open_read(&self, uri: &ContentUri) -> Result<Box<dyn Read>>;
}

/// Ambient directories the resolver needs: the shared storage root for
/// `primary:` document ids and the private cache dir for fallback copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEnv {
    pub external_storage_root: PathBuf,
    pub cache_dir: PathBuf,
    pub copy_buffer_bytes: usize,
}

impl StorageEnv {
    pub fn new(external_storage_root: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        StorageEnv {
            external_storage_root: external_storage_root.into(),
            cache_dir: cache_dir.into(),
            copy_buffer_bytes: DEFAULT_COPY_BUFFER_BYTES,
        }
    }

    pub fn with_copy_buffer(mut self, bytes: usize) -> Self {
        self.copy_buffer_bytes = bytes;
        self
    }

    pub fn cache_path(&self, file_name: &str) -> PathBuf {
        self.cache_dir.join(file_name)
    }
}

/// Join a relative document path under a storage root. A leading `/` on the
/// relative part would otherwise replace the root entirely.
pub(crate) fn join_under_root(root: &Path, relative: &str) -> PathBuf {
    root.join(relative.trim_start_matches('/'))
}
