//! TOML fixture loading.
//!
//! Schema:
//!
//! ```toml
//! [[row]]
//! uri = "content://media/external/images/media"
//! [row.columns]
//! _id = "42"
//! _data = "/storage/emulated/0/DCIM/img.jpg"
//!
//! [[blob]]
//! uri = "content://com.example.provider/item/7"
//! data = "inline bytes"        # or: path = "blobs/item7.bin"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::FixtureSource;
use crate::provider::MetadataRow;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    row: Vec<RowEntry>,
    #[serde(default)]
    blob: Vec<BlobEntry>,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    uri: String,
    #[serde(default)]
    columns: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct BlobEntry {
    uri: String,
    data: Option<String>,
    path: Option<PathBuf>,
}

pub(super) fn load(path: &Path) -> Result<FixtureSource> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read fixture file: {}", path.display()))?;
    let parsed: FixtureFile = toml::from_str(&text)
        .with_context(|| format!("parse fixture TOML: {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut fixture = FixtureSource::new();
    for entry in parsed.row {
        let mut row = MetadataRow::new();
        for (column, value) in &entry.columns {
            row.set(column, value);
        }
        fixture.insert_row(&entry.uri, row);
    }

    for entry in parsed.blob {
        let bytes = match (entry.data, entry.path) {
            (Some(data), None) => data.into_bytes(),
            (None, Some(rel)) => {
                let blob_path = base.join(rel);
                fs::read(&blob_path)
                    .with_context(|| format!("read fixture blob: {}", blob_path.display()))?
            }
            _ => anyhow::bail!(
                "fixture blob {} needs exactly one of `data` or `path`",
                entry.uri
            ),
        };
        fixture.insert_blob(&entry.uri, bytes);
    }

    Ok(fixture)
}
