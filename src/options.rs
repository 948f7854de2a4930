use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::warn;

pub const DEFAULT_DOCUMENT_TITLE: &str = "Bookmarks";

/// Settings for one merge run
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Drop later bookmarks whose URL was already seen
    pub deduplicate: bool,

    /// Parse and dedupe, but do not write the output
    pub dry_run: bool,

    /// `<TITLE>` and `<H1>` of the generated file
    pub document_title: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            deduplicate: true,
            dry_run: false,
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }
}

impl MergeOptions {
    /// Check the options against the files of a run.
    pub fn validate(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        if inputs.is_empty() {
            return Err(anyhow!("❌ No input files given. Select at least one bookmark HTML file."));
        }

        if self.document_title.trim().is_empty() {
            return Err(anyhow!("❌ The output document title must not be empty"));
        }

        // Inputs are fully read before the output is written, so this is allowed
        if !self.dry_run && inputs.iter().any(|input| same_file(input, output)) {
            warn!("⚠️  Output {:?} is also an input; it will be overwritten with the merge result", output);
        }

        Ok(())
    }

    pub fn description(&self) -> String {
        let mut parts = vec![if self.deduplicate {
            "remove duplicates"
        } else {
            "keep duplicates"
        }];
        if self.dry_run {
            parts.push("dry run");
        }
        parts.join(", ")
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MergeOptions::default();
        assert!(options.deduplicate);
        assert!(!options.dry_run);
        assert_eq!(options.document_title, "Bookmarks");
        assert_eq!(options.description(), "remove duplicates");
    }

    #[test]
    fn test_validate_requires_inputs() {
        let options = MergeOptions::default();
        assert!(options.validate(&[], Path::new("out.html")).is_err());
        assert!(options.validate(&[PathBuf::from("a.html")], Path::new("out.html")).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let options = MergeOptions {
            document_title: "   ".to_string(),
            ..Default::default()
        };
        assert!(options.validate(&[PathBuf::from("a.html")], Path::new("out.html")).is_err());
    }

    #[test]
    fn test_output_may_be_an_input() {
        let options = MergeOptions::default();
        let input = PathBuf::from("a.html");
        assert!(options.validate(&[input.clone()], &input).is_ok());
    }

    #[test]
    fn test_description() {
        let options = MergeOptions {
            deduplicate: false,
            dry_run: true,
            ..Default::default()
        };
        assert_eq!(options.description(), "keep duplicates, dry run");
    }
}
