//! Duplicate removal across bookmark collections.
//!
//! Records are visited in file order, then document order. The first record
//! seen for a dedup key is kept; later ones are dropped and counted.

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::bookmark::Bookmark;

/// Result of merging several collections
#[derive(Debug, Default)]
pub struct DedupOutcome {
    pub bookmarks: Vec<Bookmark>,
    pub duplicates: usize,
}

/// Merge collections in order, keeping the first record for each dedup key.
pub fn dedupe(collections: Vec<Vec<Bookmark>>) -> DedupOutcome {
    let mut outcome = DedupOutcome::default();
    let mut seen_keys = HashSet::new();

    for bookmark in collections.into_iter().flatten() {
        if seen_keys.insert(bookmark.dedup_key()) {
            outcome.bookmarks.push(bookmark);
        } else {
            debug!("Skipping duplicate URL: {}", bookmark.url);
            outcome.duplicates += 1;
        }
    }

    outcome
}

/// Concatenate collections without dropping anything.
pub fn concatenate(collections: Vec<Vec<Bookmark>>) -> DedupOutcome {
    DedupOutcome {
        bookmarks: collections.into_iter().flatten().collect(),
        duplicates: 0,
    }
}

/// Normalize a URL into its dedup key.
///
/// Absolute URLs go through the WHATWG parser: scheme and host are lowercased,
/// default ports are dropped and an empty path becomes `/`. Path, query order
/// and fragment are kept. Anything the parser rejects only has its scheme
/// lowercased.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            // Opaque hosts of non-special schemes keep their case in the parser
            if let Some(host) = parsed.host_str() {
                let lower = host.to_lowercase();
                if lower != host {
                    let _ = parsed.set_host(Some(&lower));
                }
            }
            parsed.into()
        }
        Err(_) => lowercase_scheme(trimmed),
    }
}

fn lowercase_scheme(url: &str) -> String {
    match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => {
            format!("{}:{}", scheme.to_ascii_lowercase(), rest)
        }
        _ => url.to_string(),
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(bookmarks: &[Bookmark]) -> Vec<&str> {
        bookmarks.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com/");
        assert_eq!(normalize_url("HTTPS://EXAMPLE.COM/"), "https://example.com/");
        assert_eq!(normalize_url("  http://example.com:80/a  "), "http://example.com/a");
        assert_eq!(normalize_url("https://example.com/a?b=1&a=2"), "https://example.com/a?b=1&a=2");
        assert_eq!(normalize_url("https://example.com/Docs#Intro"), "https://example.com/Docs#Intro");
    }

    #[test]
    fn test_normalize_url_keeps_path_case_and_trailing_slash() {
        assert_ne!(normalize_url("https://example.com/Docs"), normalize_url("https://example.com/docs"));
        assert_ne!(normalize_url("https://example.com/a/"), normalize_url("https://example.com/a"));
    }

    #[test]
    fn test_normalize_unparsable_url() {
        assert_eq!(normalize_url("HTTP://bad host/"), "http://bad host/");
        assert_eq!(normalize_url("example.com/page"), "example.com/page");
        assert_eq!(normalize_url(" JavaScript:alert(1) "), "javascript:alert(1)");
    }

    #[test]
    fn test_dedupe_first_seen_wins() {
        let a = vec![
            Bookmark::new("X from A", "https://x.com"),
            Bookmark::new("Y from A", "https://y.com"),
        ];
        let b = vec![
            Bookmark::new("Y from B", "https://Y.com/"),
            Bookmark::new("Z from B", "https://z.com"),
        ];

        let outcome = dedupe(vec![a, b]);

        assert_eq!(titles(&outcome.bookmarks), vec!["X from A", "Y from A", "Z from B"]);
        assert_eq!(outcome.duplicates, 1);
    }

    #[test]
    fn test_dedupe_within_one_file() {
        let a = vec![
            Bookmark::new("first", "https://x.com/page"),
            Bookmark::new("second", "https://x.com/page"),
        ];
        let outcome = dedupe(vec![a]);
        assert_eq!(titles(&outcome.bookmarks), vec!["first"]);
        assert_eq!(outcome.duplicates, 1);
    }

    #[test]
    fn test_concatenate_keeps_everything() {
        let a = vec![Bookmark::new("a", "https://x.com")];
        let b = vec![Bookmark::new("b", "https://x.com")];
        let outcome = concatenate(vec![a, b]);
        assert_eq!(titles(&outcome.bookmarks), vec!["a", "b"]);
        assert_eq!(outcome.duplicates, 0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn any_bookmark() -> impl Strategy<Value = Bookmark> {
        // Small host/path pools so duplicates actually occur
        (
            "[a-z]{1,6}",
            prop_oneof![Just("a.com"), Just("B.com"), Just("c.org"), Just("b.COM")],
            prop_oneof![Just(""), Just("/"), Just("/x"), Just("/y?q=1")],
        )
            .prop_map(|(title, host, path)| Bookmark::new(title, format!("https://{}{}", host, path)))
    }

    fn any_collections() -> impl Strategy<Value = Vec<Vec<Bookmark>>> {
        prop::collection::vec(prop::collection::vec(any_bookmark(), 0..12), 0..5)
    }

    proptest! {
        #[test]
        fn prop_output_keys_are_unique(collections in any_collections()) {
            let outcome = dedupe(collections);
            let mut seen = HashSet::new();
            for bookmark in &outcome.bookmarks {
                prop_assert!(seen.insert(bookmark.dedup_key()));
            }
        }

        #[test]
        fn prop_every_input_key_survives(collections in any_collections()) {
            let input_keys: HashSet<String> = collections
                .iter()
                .flatten()
                .map(Bookmark::dedup_key)
                .collect();
            let outcome = dedupe(collections);
            let output_keys: HashSet<String> = outcome.bookmarks.iter().map(Bookmark::dedup_key).collect();
            prop_assert_eq!(input_keys, output_keys);
        }

        #[test]
        fn prop_first_seen_wins(collections in any_collections()) {
            let mut first: HashMap<String, Bookmark> = HashMap::new();
            for bookmark in collections.iter().flatten() {
                first.entry(bookmark.dedup_key()).or_insert_with(|| bookmark.clone());
            }
            let total: usize = collections.iter().map(Vec::len).sum();

            let outcome = dedupe(collections);
            for bookmark in &outcome.bookmarks {
                prop_assert_eq!(Some(bookmark), first.get(&bookmark.dedup_key()));
            }
            prop_assert_eq!(outcome.bookmarks.len() + outcome.duplicates, total);
        }

        #[test]
        fn prop_concatenate_keeps_length(collections in any_collections()) {
            let total: usize = collections.iter().map(Vec::len).sum();
            prop_assert_eq!(concatenate(collections).bookmarks.len(), total);
        }
    }
}
