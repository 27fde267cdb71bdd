//! Integration test: full resolution paths against a TOML provider fixture,
//! including the cache-copy fallback and a mid-copy stream failure.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use cpr_core::events::CollectedWarnings;
use cpr_core::fixture::FixtureSource;
use cpr_core::provider::{ContentSource, MetadataRow, RowFilter, StorageEnv};
use cpr_core::resolve::{resolve, Resolution};
use cpr_core::uri::ContentUri;
use tempfile::tempdir;

const FIXTURE_TOML: &str = r#"
[[row]]
uri = "content://media/external/images/media"
[row.columns]
_id = "42"
_data = "/storage/emulated/0/DCIM/Camera/IMG_0042.jpg"

[[row]]
uri = "content://downloads/public_downloads/1337"
[row.columns]
_id = "1337"
_data = "/storage/emulated/0/Download/debian-12.iso"

[[row]]
uri = "content://com.example.mail/document/att%3A9"
[row.columns]
_display_name = "Quarterly Report.pdf"

[[blob]]
uri = "content://com.example.mail/document/att%3A9"
data = "attachment payload"
"#;

fn uri(s: &str) -> ContentUri {
    ContentUri::parse(s).unwrap()
}

fn load_fixture(dir: &std::path::Path) -> FixtureSource {
    let path = dir.join("providers.toml");
    fs::write(&path, FIXTURE_TOML).unwrap();
    FixtureSource::from_path(&path).unwrap()
}

#[test]
fn resolves_media_downloads_and_file_schemes_end_to_end() {
    let dir = tempdir().unwrap();
    let fx = load_fixture(dir.path());
    let env = StorageEnv::new("/storage/emulated/0", dir.path().join("cache"));
    let warnings = CollectedWarnings::new();

    let media = resolve(
        &fx,
        &env,
        &warnings,
        &uri("content://com.android.providers.media.documents/document/image%3A42"),
    );
    assert_eq!(
        media,
        Resolution::Local(PathBuf::from("/storage/emulated/0/DCIM/Camera/IMG_0042.jpg"))
    );

    let download = resolve(
        &fx,
        &env,
        &warnings,
        &uri("content://com.android.providers.downloads.documents/document/1337"),
    );
    assert_eq!(
        download,
        Resolution::Local(PathBuf::from("/storage/emulated/0/Download/debian-12.iso"))
    );

    let file = resolve(&fx, &env, &warnings, &uri("file:///tmp/direct%20path.bin"));
    assert_eq!(file, Resolution::Local(PathBuf::from("/tmp/direct path.bin")));

    assert!(warnings.is_empty());
}

#[test]
fn fallback_copies_attachment_into_cache_dir() {
    let dir = tempdir().unwrap();
    let fx = load_fixture(dir.path());
    let cache = dir.path().join("cache");
    fs::create_dir_all(&cache).unwrap();
    let env = StorageEnv::new("/storage/emulated/0", &cache);
    let warnings = CollectedWarnings::new();

    // Unknown document authority with no _data row: the bytes are copied
    // under the sanitized display name.
    let got = resolve(
        &fx,
        &env,
        &warnings,
        &uri("content://com.example.mail/document/att%3A9"),
    );

    let expected = cache.join("Quarterly_Report.pdf");
    assert_eq!(got, Resolution::Local(expected.clone()));
    assert_eq!(fs::read_to_string(expected).unwrap(), "attachment payload");
    assert!(warnings.is_empty());
}

/// Source whose streams fail after a few bytes, wrapping an inner fixture.
struct ShortStreamSource {
    inner: FixtureSource,
    limit: usize,
}

struct ShortRead {
    inner: Box<dyn Read>,
    remaining: usize,
}

impl Read for ShortRead {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.remaining == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "stream closed early",
            ));
        }
        let cap = self.remaining.min(buf.len());
        let n = self.inner.read(&mut buf[..cap])?;
        self.remaining -= n;
        Ok(n)
    }
}

impl ContentSource for ShortStreamSource {
    fn query_first(
        &self,
        uri: &ContentUri,
        projection: Option<&[&str]>,
        filter: Option<&RowFilter>,
    ) -> anyhow::Result<Option<MetadataRow>> {
        self.inner.query_first(uri, projection, filter)
    }

    fn open_read(&self, uri: &ContentUri) -> anyhow::Result<Box<dyn Read>> {
        let inner = self.inner.open_read(uri)?;
        Ok(Box::new(ShortRead {
            inner,
            remaining: self.limit,
        }))
    }
}

#[test]
fn mid_copy_failure_warns_but_still_returns_cache_path() {
    let dir = tempdir().unwrap();
    let cache = dir.path().join("cache");
    fs::create_dir_all(&cache).unwrap();
    let env = StorageEnv::new("/storage/emulated/0", &cache).with_copy_buffer(4);

    let fx = ShortStreamSource {
        inner: load_fixture(dir.path()),
        limit: 10,
    };
    let warnings = CollectedWarnings::new();

    let got = resolve(
        &fx,
        &env,
        &warnings,
        &uri("content://com.example.mail/document/att%3A9"),
    );

    let expected = cache.join("Quarterly_Report.pdf");
    assert_eq!(got, Resolution::Local(expected.clone()));

    let drained = warnings.drain();
    assert_eq!(drained.len(), 1);
    assert!(drained[0].contains("cache copy"), "got: {}", drained[0]);

    // The short file holds whatever arrived before the failure.
    assert_eq!(fs::read_to_string(expected).unwrap(), "attachment");
}

#[test]
fn unresolved_never_panics_or_errors_across_schemes() {
    let dir = tempdir().unwrap();
    let fx = FixtureSource::new();
    let env = StorageEnv::new("/storage/emulated/0", dir.path());
    let warnings = CollectedWarnings::new();

    for candidate in [
        "content://com.android.providers.downloads.documents/document/msf%3A42",
        "content://com.android.externalstorage.documents/document/1A2B-3C4D%3Ax",
        "content://com.android.providers.media.documents/document/image%3A999",
        "content://media/external/images/media/404",
        "mailto://someone@example.com",
    ] {
        assert_eq!(
            resolve(&fx, &env, &warnings, &uri(candidate)),
            Resolution::Unresolved,
            "candidate: {}",
            candidate
        );
    }
}
