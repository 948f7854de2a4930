use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{error, info, warn};

use crate::bookmark::Bookmark;
use crate::dedupe::{concatenate, dedupe};
use crate::error::MergeError;
use crate::netscape;
use crate::options::MergeOptions;
use crate::progress;
use crate::report::MergeReport;

/// Runs select → parse → dedupe → write for one set of files.
pub struct MergeEngine {
    options: MergeOptions,
    show_progress: bool,
}

impl MergeEngine {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            show_progress: false,
        }
    }

    /// Draw a progress bar on the terminal while reading inputs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run(&self, inputs: &[PathBuf], output: &Path) -> Result<MergeReport, MergeError> {
        let mut report = MergeReport::new();

        info!("📖 Phase 1: Reading {} bookmark files", inputs.len());
        let collections = self.read_inputs(inputs, &mut report);

        if collections.is_empty() {
            error!("❌ No bookmarks could be read from any file");
            return Err(MergeError::NoUsableInput {
                failures: report.failures,
            });
        }

        info!("🔄 Phase 2: Merging bookmarks ({})", self.options.description());
        let outcome = if self.options.deduplicate {
            dedupe(collections)
        } else {
            concatenate(collections)
        };
        report.merged = outcome.bookmarks.len();
        report.duplicates_skipped = outcome.duplicates;
        info!(
            "📊 Merged result: {} bookmarks, {} duplicates ignored",
            report.merged, report.duplicates_skipped
        );

        if self.options.dry_run {
            info!("🏃 Dry run mode - no file will be written");
            return Ok(report);
        }

        info!("✍️  Phase 3: Writing {:?}", output);
        netscape::write_file(output, &outcome.bookmarks, &self.options.document_title).map_err(|e| {
            error!("❌ {}", e);
            e
        })?;
        report.output = Some(output.to_path_buf());

        info!("✅ Merge complete");
        Ok(report)
    }

    /// Parse every input in order. Failed files are recorded and skipped.
    fn read_inputs(&self, inputs: &[PathBuf], report: &mut MergeReport) -> Vec<Vec<Bookmark>> {
        let pb = if self.show_progress {
            progress::create_file_progress_bar(inputs.len() as u64, "Reading bookmark files")
        } else {
            ProgressBar::hidden()
        };

        let mut collections = Vec::with_capacity(inputs.len());
        for path in inputs {
            match netscape::parse_file(path) {
                Ok(bookmarks) => {
                    info!("✅ Read {} bookmarks from {:?}", bookmarks.len(), path);
                    report.add_file_read(path, bookmarks.len());
                    collections.push(bookmarks);
                }
                Err(e) => {
                    warn!("⚠️  {}", e);
                    report.add_failure(path, &e.to_string());
                }
            }
            pb.inc(1);
        }

        if report.failures.is_empty() {
            progress::finish_with_success(&pb, "All files read");
        } else {
            progress::finish_with_error(&pb, &format!("{} files skipped", report.failures.len()));
        }

        collections
    }
}
