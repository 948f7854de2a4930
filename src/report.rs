use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub bookmarks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one merge run
#[derive(Debug, Default, Serialize)]
pub struct MergeReport {
    pub files_read: Vec<FileSummary>,
    pub failures: Vec<FileFailure>,
    pub merged: usize,
    pub duplicates_skipped: usize,
    /// Absent on dry runs
    pub output: Option<PathBuf>,
}

impl MergeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file_read(&mut self, path: &Path, bookmarks: usize) {
        self.files_read.push(FileSummary {
            path: path.to_path_buf(),
            bookmarks,
        });
    }

    pub fn add_failure(&mut self, path: &Path, error: &str) {
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            error: error.to_string(),
        });
    }

    pub fn total_read(&self) -> usize {
        self.files_read.iter().map(|f| f.bookmarks).sum()
    }

    pub fn format(&self, detailed: bool) -> String {
        let mut output = String::new();

        output.push_str("\n📚 Bookmark Merge Report\n");
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

        output.push_str("📖 Files Read:\n");
        for file in &self.files_read {
            output.push_str(&format!("  • {}: {} bookmarks\n", file.path.display(), file.bookmarks));
        }
        output.push('\n');

        if !self.failures.is_empty() {
            output.push_str("⚠️  Skipped Files:\n");
            for failure in &self.failures {
                output.push_str(&format!("  • {}\n", failure.path.display()));
                if detailed {
                    output.push_str(&format!("    Error: {}\n", failure.error));
                }
            }
            output.push('\n');
        }

        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        output.push_str(&format!(
            "\n📊 Summary: {} read, {} merged, {} duplicates ignored\n",
            self.total_read(),
            self.merged,
            self.duplicates_skipped
        ));
        match &self.output {
            Some(path) => output.push_str(&format!("💾 Saved to: {}\n\n", path.display())),
            None => output.push_str("🏃 Dry run - nothing written\n\n"),
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let mut report = MergeReport::new();
        report.add_file_read(Path::new("a.html"), 3);
        report.add_file_read(Path::new("b.html"), 2);
        report.add_failure(Path::new("c.html"), "Failed to read c.html: not found");
        report.merged = 4;
        report.duplicates_skipped = 1;
        report.output = Some(PathBuf::from("merged.html"));

        assert_eq!(report.total_read(), 5);

        let text = report.format(true);
        assert!(text.contains("a.html: 3 bookmarks"));
        assert!(text.contains("Skipped Files"));
        assert!(text.contains("Error: Failed to read c.html: not found"));
        assert!(text.contains("5 read, 4 merged, 1 duplicates ignored"));
        assert!(text.contains("Saved to: merged.html"));

        assert!(!report.format(false).contains("Error:"));
    }

    #[test]
    fn test_format_dry_run() {
        let report = MergeReport::new();
        assert!(report.format(false).contains("Dry run"));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut report = MergeReport::new();
        report.add_file_read(Path::new("a.html"), 1);
        report.merged = 1;

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["merged"], 1);
        assert_eq!(value["files_read"][0]["bookmarks"], 1);
        assert!(value["output"].is_null());
    }
}
