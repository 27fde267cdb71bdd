//! Known provider authorities and their fixed collection references.
//!
//! These identity strings are platform constants; resolution routes on
//! exact authority equality.

use crate::uri::ContentUri;

/// External-storage document provider.
pub const EXTERNAL_STORAGE_DOCUMENTS: &str = "com.android.externalstorage.documents";

/// Downloads document provider.
pub const DOWNLOADS_DOCUMENTS: &str = "com.android.providers.downloads.documents";

/// Media document provider.
pub const MEDIA_DOCUMENTS: &str = "com.android.providers.media.documents";

/// Photos gallery provider. References under it point at remote content.
pub const PHOTOS_CONTENT: &str = "com.google.android.apps.photos.content";

/// Base reference of the public downloads table; row ids are appended to it.
pub const PUBLIC_DOWNLOADS: &str = "content://downloads/public_downloads";

pub fn is_external_storage_document(uri: &ContentUri) -> bool {
    uri.authority() == EXTERNAL_STORAGE_DOCUMENTS
}

pub fn is_downloads_document(uri: &ContentUri) -> bool {
    uri.authority() == DOWNLOADS_DOCUMENTS
}

pub fn is_media_document(uri: &ContentUri) -> bool {
    uri.authority() == MEDIA_DOCUMENTS
}

pub fn is_photos_content(uri: &ContentUri) -> bool {
    uri.authority() == PHOTOS_CONTENT
}

/// The public downloads table reference.
pub fn public_downloads_uri() -> ContentUri {
    ContentUri::from_static("content", "downloads", &["public_downloads"])
}

/// External media collections addressed by media document ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCollection {
    Image,
    Video,
    Audio,
}

impl MediaCollection {
    /// Map a media document id type (`image:…`, `video:…`, `audio:…`) to
    /// its collection. Unknown types have no collection.
    pub fn from_doc_type(kind: &str) -> Option<Self> {
        match kind {
            "image" => Some(MediaCollection::Image),
            "video" => Some(MediaCollection::Video),
            "audio" => Some(MediaCollection::Audio),
            _ => None,
        }
    }

    /// The collection's table reference.
    pub fn content_uri(self) -> ContentUri {
        let table = match self {
            MediaCollection::Image => "images",
            MediaCollection::Video => "video",
            MediaCollection::Audio => "audio",
        };
        ContentUri::from_static("content", "media", &["external", table, "media"])
    }
}
