use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dedupe::normalize_url;

/// A single link bookmark, as found in (or written to) a Netscape export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
    /// Seconds since the Unix epoch (`ADD_DATE`)
    pub add_date: Option<i64>,
    /// Favicon, usually a `data:` URI (`ICON`)
    pub icon: Option<String>,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            add_date: None,
            icon: None,
        }
    }

    pub fn with_add_date(mut self, add_date: i64) -> Self {
        self.add_date = Some(add_date);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Key used to detect duplicates across files
    pub fn dedup_key(&self) -> String {
        normalize_url(&self.url)
    }

    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.add_date.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_at() {
        let bookmark = Bookmark::new("Rust", "https://www.rust-lang.org/").with_add_date(1_700_000_000);
        let added = bookmark.added_at().unwrap();
        assert_eq!(added.format("%Y-%m-%d").to_string(), "2023-11-14");

        assert!(Bookmark::new("Rust", "https://www.rust-lang.org/").added_at().is_none());
    }

    #[test]
    fn test_dedup_key_ignores_case_of_host() {
        let a = Bookmark::new("a", "https://Example.com/Path");
        let b = Bookmark::new("b", "  https://example.COM/Path ");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
