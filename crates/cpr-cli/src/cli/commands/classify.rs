//! `cpr classify` – show how a URI would be routed, without resolving it.

use anyhow::Result;

use cpr_core::authority;
use cpr_core::document;
use cpr_core::uri::ContentUri;

pub fn run_classify(raw_uri: &str) -> Result<()> {
    let uri = ContentUri::parse(raw_uri)?;

    print_field("scheme", uri.scheme());
    print_field(
        "authority",
        if uri.authority().is_empty() {
            "-"
        } else {
            uri.authority()
        },
    );
    print_field("provider", provider_label(&uri));

    let is_document = document::is_document_uri(&uri);
    print_field("document", if is_document { "yes" } else { "no" });

    if let Some(doc_id) = document::document_id(&uri) {
        print_field("document id", doc_id);
        let (kind, rest) = document::split_doc_id(doc_id);
        if !rest.is_empty() {
            print_field("id type", kind);
            print_field("id rest", rest);
        }
    }

    if let Some(segment) = uri.last_segment() {
        print_field("last segment", segment);
    }
    Ok(())
}

fn print_field(name: &str, value: &str) {
    println!("{:<14} {}", name, value);
}

fn provider_label(uri: &ContentUri) -> &'static str {
    if authority::is_external_storage_document(uri) {
        "external storage documents"
    } else if authority::is_downloads_document(uri) {
        "downloads documents"
    } else if authority::is_media_document(uri) {
        "media documents"
    } else if authority::is_photos_content(uri) {
        "photos gallery"
    } else {
        "unknown"
    }
}
