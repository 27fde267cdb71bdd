//! Content reference resolution.
//!
//! Ordered authority checks over a parsed URI: document providers first,
//! then plain `content` references, then `file` paths. Every branch is
//! best-effort; failures collapse to [`Resolution::Unresolved`] instead of
//! propagating (the caller's last resort is the raw reference itself).

mod data_column;
mod fallback;

pub use data_column::query_data_column;
pub use fallback::download_to_cache;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::authority::{self, MediaCollection};
use crate::document;
use crate::events::WarningSink;
use crate::provider::{join_under_root, ContentSource, RowFilter, StorageEnv};
use crate::uri::ContentUri;

/// Outcome of resolving a content reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// Direct path on the local filesystem.
    Local(PathBuf),
    /// Remote address; the bytes live behind a gallery/cloud provider.
    Remote(String),
    /// No path could be derived. Distinct from an error: resolution is
    /// total and the caller falls back to the original reference.
    Unresolved,
}

impl Resolution {
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Resolution::Local(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolution::Unresolved)
    }
}

/// Resolve `uri` to a local path, a remote address, or nothing.
///
/// Ordered, first match wins:
/// 1. document references, routed by provider authority
/// 2. plain `content` references via the data column
/// 3. `file` references verbatim
///
/// Never returns an error; the fallback copy path reports its failures on
/// `warnings`.
pub fn resolve(
    source: &dyn ContentSource,
    env: &StorageEnv,
    warnings: &dyn WarningSink,
    uri: &ContentUri,
) -> Resolution {
    if document::is_document_uri(uri) {
        return resolve_document(source, env, warnings, uri);
    }

    match uri.scheme() {
        "content" => resolve_general_content(source, uri),
        "file" => Resolution::Local(PathBuf::from(uri.path())),
        other => {
            tracing::debug!("unsupported scheme {:?} for {}", other, uri);
            Resolution::Unresolved
        }
    }
}

fn resolve_document(
    source: &dyn ContentSource,
    env: &StorageEnv,
    warnings: &dyn WarningSink,
    uri: &ContentUri,
) -> Resolution {
    if authority::is_external_storage_document(uri) {
        return resolve_external_storage(env, uri);
    }
    if authority::is_downloads_document(uri) {
        return resolve_downloads(source, uri);
    }
    if authority::is_media_document(uri) {
        return resolve_media(source, uri);
    }

    // Unknown document provider: try the data column, then the bytes.
    if authority::is_photos_content(uri) {
        return photos_remote(uri);
    }
    if let Some(path) = query_data_column(source, uri, None) {
        return Resolution::Local(PathBuf::from(path));
    }
    download_to_cache(source, env, warnings, uri)
}

/// `primary:relative/path` under the external storage root. Other volume
/// types are unhandled.
fn resolve_external_storage(env: &StorageEnv, uri: &ContentUri) -> Resolution {
    let Some(doc_id) = document::document_id(uri) else {
        return Resolution::Unresolved;
    };
    let (volume, relative) = document::split_doc_id(doc_id);
    if volume.eq_ignore_ascii_case("primary") {
        return Resolution::Local(join_under_root(&env.external_storage_root, relative));
    }
    tracing::debug!("unhandled storage volume {:?} for {}", volume, uri);
    Resolution::Unresolved
}

/// Downloads ids are either `raw:<path>` or a numeric row id into the
/// public downloads table.
fn resolve_downloads(source: &dyn ContentSource, uri: &ContentUri) -> Resolution {
    let Some(doc_id) = document::document_id(uri) else {
        return Resolution::Unresolved;
    };

    if let Some(path) = doc_id.strip_prefix("raw:") {
        return Resolution::Local(PathBuf::from(path));
    }

    let row_id: i64 = match doc_id.parse() {
        Ok(row_id) => row_id,
        Err(_) => {
            tracing::debug!("downloads id {:?} is neither raw nor numeric", doc_id);
            return Resolution::Unresolved;
        }
    };

    let row_uri = authority::public_downloads_uri().with_appended_id(row_id);
    match query_data_column(source, &row_uri, None) {
        Some(path) => Resolution::Local(PathBuf::from(path)),
        None => Resolution::Unresolved,
    }
}

/// `type:rowId` into the matching media collection, filtered by row id.
fn resolve_media(source: &dyn ContentSource, uri: &ContentUri) -> Resolution {
    let Some(doc_id) = document::document_id(uri) else {
        return Resolution::Unresolved;
    };
    let (kind, row_id) = document::split_doc_id(doc_id);
    let Some(collection) = MediaCollection::from_doc_type(kind) else {
        tracing::debug!("unknown media document type {:?} for {}", kind, uri);
        return Resolution::Unresolved;
    };

    let filter = RowFilter::id_equals(row_id);
    match query_data_column(source, &collection.content_uri(), Some(&filter)) {
        Some(path) => Resolution::Local(PathBuf::from(path)),
        None => Resolution::Unresolved,
    }
}

fn resolve_general_content(source: &dyn ContentSource, uri: &ContentUri) -> Resolution {
    if authority::is_photos_content(uri) {
        return photos_remote(uri);
    }
    match query_data_column(source, uri, None) {
        Some(path) => Resolution::Local(PathBuf::from(path)),
        None => Resolution::Unresolved,
    }
}

/// Photos-gallery references carry the remote address as their last
/// segment; no query can improve on it.
fn photos_remote(uri: &ContentUri) -> Resolution {
    match uri.last_segment() {
        Some(segment) => Resolution::Remote(segment.to_string()),
        None => Resolution::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectedWarnings;
    use crate::fixture::FixtureSource;
    use crate::provider::{MetadataRow, COLUMN_DATA, COLUMN_ID};

    fn uri(s: &str) -> ContentUri {
        ContentUri::parse(s).unwrap()
    }

    fn env() -> StorageEnv {
        StorageEnv::new("/storage/emulated/0", "/tmp/cpr-cache")
    }

    fn resolve_empty(u: &str) -> Resolution {
        let fx = FixtureSource::new();
        let warnings = CollectedWarnings::new();
        resolve(&fx, &env(), &warnings, &uri(u))
    }

    #[test]
    fn file_scheme_path_verbatim() {
        assert_eq!(
            resolve_empty("file:///sdcard/My%20Docs/a.pdf"),
            Resolution::Local(PathBuf::from("/sdcard/My Docs/a.pdf"))
        );
    }

    #[test]
    fn external_storage_primary_joins_root() {
        assert_eq!(
            resolve_empty(
                "content://com.android.externalstorage.documents/document/primary%3APictures%2Fx.jpg"
            ),
            Resolution::Local(PathBuf::from("/storage/emulated/0/Pictures/x.jpg"))
        );
    }

    #[test]
    fn external_storage_primary_is_case_insensitive() {
        assert_eq!(
            resolve_empty(
                "content://com.android.externalstorage.documents/document/Primary%3ADCIM%2Fa.jpg"
            ),
            Resolution::Local(PathBuf::from("/storage/emulated/0/DCIM/a.jpg"))
        );
    }

    #[test]
    fn external_storage_other_volume_is_unresolved() {
        assert_eq!(
            resolve_empty(
                "content://com.android.externalstorage.documents/document/1A2B-3C4D%3Ax.jpg"
            ),
            Resolution::Unresolved
        );
    }

    #[test]
    fn downloads_raw_id_bypasses_query() {
        // The empty fixture answers no query, so Local proves the raw
        // branch never consulted the table.
        assert_eq!(
            resolve_empty(
                "content://com.android.providers.downloads.documents/document/raw%3A%2Fa%2Fb%2Fc"
            ),
            Resolution::Local(PathBuf::from("/a/b/c"))
        );
    }

    #[test]
    fn downloads_numeric_id_resolves_through_table() {
        let mut fx = FixtureSource::new();
        fx.insert_row(
            "content://downloads/public_downloads/1337",
            MetadataRow::new().with(COLUMN_DATA, "/data/downloads/file.deb"),
        );
        let warnings = CollectedWarnings::new();
        let got = resolve(
            &fx,
            &env(),
            &warnings,
            &uri("content://com.android.providers.downloads.documents/document/1337"),
        );
        assert_eq!(got, Resolution::Local(PathBuf::from("/data/downloads/file.deb")));
    }

    #[test]
    fn downloads_non_numeric_id_is_unresolved() {
        assert_eq!(
            resolve_empty("content://com.android.providers.downloads.documents/document/msf%3A42"),
            Resolution::Unresolved
        );
    }

    #[test]
    fn media_document_queries_collection_by_row_id() {
        let mut fx = FixtureSource::new();
        fx.insert_row(
            "content://media/external/images/media",
            MetadataRow::new().with(COLUMN_ID, "41").with(COLUMN_DATA, "/dcim/other.jpg"),
        );
        fx.insert_row(
            "content://media/external/images/media",
            MetadataRow::new().with(COLUMN_ID, "42").with(COLUMN_DATA, "/dcim/img.jpg"),
        );
        let warnings = CollectedWarnings::new();
        let got = resolve(
            &fx,
            &env(),
            &warnings,
            &uri("content://com.android.providers.media.documents/document/image%3A42"),
        );
        assert_eq!(got, Resolution::Local(PathBuf::from("/dcim/img.jpg")));
    }

    #[test]
    fn media_unknown_type_is_unresolved() {
        assert_eq!(
            resolve_empty("content://com.android.providers.media.documents/document/font%3A42"),
            Resolution::Unresolved
        );
    }

    #[test]
    fn photos_document_returns_remote_last_segment() {
        assert_eq!(
            resolve_empty("content://com.google.android.apps.photos.content/document/IMG_1.jpg"),
            Resolution::Remote("IMG_1.jpg".to_string())
        );
    }

    #[test]
    fn photos_plain_content_returns_remote_regardless_of_rows() {
        let mut fx = FixtureSource::new();
        fx.fail_query("content://com.google.android.apps.photos.content/media/IMG_1.jpg");
        let warnings = CollectedWarnings::new();
        let got = resolve(
            &fx,
            &env(),
            &warnings,
            &uri("content://com.google.android.apps.photos.content/media/IMG_1.jpg"),
        );
        assert_eq!(got, Resolution::Remote("IMG_1.jpg".to_string()));
    }

    #[test]
    fn plain_content_uses_data_column() {
        let mut fx = FixtureSource::new();
        fx.insert_row(
            "content://media/external/images/media/7",
            MetadataRow::new().with(COLUMN_DATA, "/dcim/7.jpg"),
        );
        let warnings = CollectedWarnings::new();
        let got = resolve(
            &fx,
            &env(),
            &warnings,
            &uri("content://media/external/images/media/7"),
        );
        assert_eq!(got, Resolution::Local(PathBuf::from("/dcim/7.jpg")));
    }

    #[test]
    fn plain_content_without_row_has_no_fallback() {
        let mut fx = FixtureSource::new();
        // A blob alone must not trigger a cache copy outside document form.
        fx.insert_blob("content://com.example.provider/item/1", b"x".to_vec());
        let warnings = CollectedWarnings::new();
        let got = resolve(
            &fx,
            &env(),
            &warnings,
            &uri("content://com.example.provider/item/1"),
        );
        assert_eq!(got, Resolution::Unresolved);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_scheme_is_unresolved() {
        assert_eq!(resolve_empty("ftp://host/file.bin"), Resolution::Unresolved);
    }

    #[test]
    fn unknown_document_authority_prefers_data_column_over_fallback() {
        let item = "content://com.example.provider/document/55";
        let mut fx = FixtureSource::new();
        fx.insert_row(item, MetadataRow::new().with(COLUMN_DATA, "/direct/path.bin"));
        fx.insert_blob(item, b"never copied".to_vec());
        let warnings = CollectedWarnings::new();
        let got = resolve(&fx, &env(), &warnings, &uri(item));
        assert_eq!(got, Resolution::Local(PathBuf::from("/direct/path.bin")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn non_fallback_resolution_is_idempotent() {
        let u = "content://com.android.externalstorage.documents/document/primary%3ADCIM%2Fa.jpg";
        assert_eq!(resolve_empty(u), resolve_empty(u));
    }

    #[test]
    fn local_path_accessor() {
        let r = Resolution::Local(PathBuf::from("/a"));
        assert_eq!(r.local_path(), Some(Path::new("/a")));
        assert!(Resolution::Unresolved.is_unresolved());
        assert_eq!(Resolution::Remote("x".into()).local_path(), None);
    }
}
