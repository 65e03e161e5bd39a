// src/extract/pdf.rs
// =============================================================================
// Extracts link annotations from a PDF.
//
// For every page (1-based, document order) we walk
//
//   /Annots [ ... ]  ->  annotation  ->  /A << /S /URI /URI (target) >>
//
// and record the URI target with the page number. Only the annotation target
// counts, not visible text, so a link labelled "click here" is found too.
// Entries may be inline objects or indirect references at every step.
// =============================================================================

use super::is_http_link;
use crate::error::Result;
use crate::links::LinkRecord;
use lopdf::{Dictionary, Document, Object};

pub fn extract_pdf_links(bytes: &[u8]) -> Result<Vec<LinkRecord>> {
    let document = Document::load_mem(bytes)?;
    let mut links = Vec::new();

    for (page, page_id) in document.get_pages() {
        let page_dict = match document.get_object(page_id).and_then(Object::as_dict) {
            Ok(dict) => dict,
            Err(e) => {
                tracing::warn!(page, "unreadable page object: {}", e);
                continue;
            }
        };

        for uri in page_uris(&document, page_dict) {
            if is_http_link(&uri) {
                links.push(LinkRecord::pending(uri, page));
            }
        }
    }

    Ok(links)
}

// URI targets of a page's link annotations, in annotation order.
fn page_uris(document: &Document, page: &Dictionary) -> Vec<String> {
    let annots = match page.get(b"Annots").ok().and_then(|obj| resolve(document, obj)) {
        Some(Object::Array(annots)) => annots,
        _ => return Vec::new(),
    };

    annots
        .iter()
        .filter_map(|annot| match resolve(document, annot) {
            Some(Object::Dictionary(dict)) => annotation_uri(document, dict),
            _ => None,
        })
        .collect()
}

fn annotation_uri(document: &Document, annot: &Dictionary) -> Option<String> {
    let action = match annot.get(b"A").ok().and_then(|obj| resolve(document, obj)) {
        Some(Object::Dictionary(action)) => action,
        _ => return None,
    };

    match action.get(b"S").ok().and_then(|obj| resolve(document, obj)) {
        Some(Object::Name(kind)) if kind.as_slice() == b"URI" => {}
        _ => return None,
    }

    match action.get(b"URI").ok().and_then(|obj| resolve(document, obj)) {
        Some(Object::String(bytes, _format)) => {
            Some(String::from_utf8_lossy(bytes).trim().to_string())
        }
        _ => None,
    }
}

// Follows an indirect reference; a dangling reference resolves to None.
fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}
