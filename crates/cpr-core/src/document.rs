//! Document-provider references and their composite ids.
//!
//! A document reference is a `content` URI whose path follows the document
//! provider convention: `document/<id>` or `tree/<tree-id>/document/<id>`.
//! The `<id>` is an opaque string; several providers pack a composite
//! `type:rest` value into it.

use crate::uri::ContentUri;

/// Whether `uri` follows the document provider convention.
pub fn is_document_uri(uri: &ContentUri) -> bool {
    uri.scheme() == "content" && document_id(uri).is_some()
}

/// The document id carried by a document reference, decoded.
pub fn document_id(uri: &ContentUri) -> Option<&str> {
    let segs = uri.segments();
    match segs.len() {
        2 if segs[0] == "document" => Some(segs[1].as_str()),
        4 if segs[0] == "tree" && segs[2] == "document" => Some(segs[3].as_str()),
        _ => None,
    }
}

/// Split a composite document id on its first `:`.
///
/// `"primary:Pictures/x.jpg"` → `("primary", "Pictures/x.jpg")`. An id with
/// no `:` yields an empty rest. The rest may itself contain `:`.
pub fn split_doc_id(doc_id: &str) -> (&str, &str) {
    match doc_id.split_once(':') {
        Some((kind, rest)) => (kind, rest),
        None => (doc_id, ""),
    }
}
