use std::fs;
use std::path::Path;

use scraper::{Html, Node, Selector};
use thiserror::Error;
use tracing::debug;

use crate::bookmark::Bookmark;
use crate::error::MergeError;

/// Why a document could not be treated as a bookmark export
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseIssue {
    #[error("not a Netscape bookmark file (no bookmark DOCTYPE and no <DL> list)")]
    NotBookmarkFile,
}

/// Read one export file and flatten every link in it, in document order.
///
/// Invalid UTF-8 is replaced rather than rejected, matching how browsers
/// import these files.
pub fn parse_file(path: &Path) -> Result<Vec<Bookmark>, MergeError> {
    let bytes = fs::read(path).map_err(|source| MergeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);

    let bookmarks = parse_str(&html).map_err(|issue| MergeError::Parse {
        path: path.to_path_buf(),
        reason: issue.to_string(),
    })?;

    debug!("Parsed {} bookmarks from {:?}", bookmarks.len(), path);
    Ok(bookmarks)
}

/// Parse an in-memory export. Folders are ignored; only `<A HREF>` leaves are kept.
pub fn parse_str(html: &str) -> Result<Vec<Bookmark>, ParseIssue> {
    let document = Html::parse_document(html);

    if !has_netscape_doctype(&document) && !has_list(&document) {
        return Err(ParseIssue::NotBookmarkFile);
    }

    let link_selector = Selector::parse("a[href]").expect("static selector");
    let mut bookmarks = Vec::new();

    for element in document.select(&link_selector) {
        let attrs = element.value();
        let url = match attrs.attr("href").map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => continue,
        };

        let title = element.text().collect::<String>();
        let mut bookmark = Bookmark::new(title.trim(), url);

        if let Some(raw) = attrs.attr("add_date").map(str::trim).filter(|s| !s.is_empty()) {
            match raw.parse::<i64>() {
                Ok(secs) => bookmark = bookmark.with_add_date(secs),
                Err(_) => debug!("Ignoring non-numeric ADD_DATE {:?} on {}", raw, url),
            }
        }
        if let Some(icon) = attrs.attr("icon").filter(|s| !s.is_empty()) {
            bookmark = bookmark.with_icon(icon);
        }

        bookmarks.push(bookmark);
    }

    Ok(bookmarks)
}

fn has_netscape_doctype(document: &Html) -> bool {
    document.tree.root().children().any(|node| match node.value() {
        Node::Doctype(doctype) => doctype
            .name()
            .to_ascii_lowercase()
            .starts_with("netscape-bookmark-file"),
        _ => false,
    })
}

fn has_list(document: &Html) -> bool {
    let list_selector = Selector::parse("dl").expect("static selector");
    document.select(&list_selector).next().is_some()
}
