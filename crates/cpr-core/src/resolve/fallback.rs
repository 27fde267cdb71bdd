//! Cache-copy fallback for references with no direct filesystem path.
//!
//! Opens the reference's byte stream, names the destination after the
//! provider-reported display name, and copies into the private cache dir.
//! All failures stay local: they emit a warning or collapse to
//! `Unresolved`, never an error.

use anyhow::Result;
use std::fs::File;
use std::io::{Read, Write};

use super::Resolution;
use crate::events::WarningSink;
use crate::filename::sanitize_display_name;
use crate::provider::{ContentSource, StorageEnv, COLUMN_DISPLAY_NAME};
use crate::uri::ContentUri;

/// Copy the referenced bytes into a cache file named after the display
/// name, returning the new file's path.
///
/// An unopenable stream or an undeterminable display name yields
/// `Unresolved`. An I/O failure mid-copy emits a warning on the sink but
/// still returns the path; the warning is the only record of the short
/// file. A pre-existing cache file with the same name is truncated.
pub fn download_to_cache(
    source: &dyn ContentSource,
    env: &StorageEnv,
    warnings: &dyn WarningSink,
    uri: &ContentUri,
) -> Resolution {
    let mut stream = match source.open_read(uri) {
        Ok(stream) => stream,
        Err(err) => {
            warnings.emit_warning(&format!("open stream for {}: {:#}", uri, err));
            return Resolution::Unresolved;
        }
    };

    let name = match display_name(source, uri) {
        Ok(Some(name)) => name,
        Ok(None) => {
            tracing::debug!("no display name for {}", uri);
            return Resolution::Unresolved;
        }
        Err(err) => {
            warnings.emit_warning(&format!("display name query for {}: {:#}", uri, err));
            return Resolution::Unresolved;
        }
    };

    let file_name = match sanitize_display_name(&name) {
        Some(file_name) => file_name,
        None => {
            tracing::debug!("display name {:?} for {} sanitizes to nothing", name, uri);
            return Resolution::Unresolved;
        }
    };

    let dest = env.cache_path(&file_name);
    let file = match File::create(&dest) {
        Ok(file) => file,
        Err(err) => {
            warnings.emit_warning(&format!("create cache file {}: {}", dest.display(), err));
            return Resolution::Unresolved;
        }
    };

    if let Err(err) = copy_stream(stream.as_mut(), file, env.copy_buffer_bytes) {
        warnings.emit_warning(&format!("cache copy for {}: {}", uri, err));
    }

    Resolution::Local(dest)
}

/// Display name from an unprojected metadata query.
fn display_name(source: &dyn ContentSource, uri: &ContentUri) -> Result<Option<String>> {
    let row = source.query_first(uri, None, None)?;
    Ok(row.and_then(|r| r.get(COLUMN_DISPLAY_NAME).map(str::to_string)))
}

/// Fixed-buffer copy; both handles close via RAII on every exit path.
fn copy_stream(reader: &mut dyn Read, mut dest: File, buffer_bytes: usize) -> std::io::Result<()> {
    let mut buffer = vec![0u8; buffer_bytes.max(1)];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            return Ok(());
        }
        dest.write_all(&buffer[..n])?;
    }
}
