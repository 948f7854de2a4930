//! Dialog-driven front end.
//!
//! The user picks input files (as many rounds as they like), may drop some of
//! them again, chooses whether to drop duplicates and where to save, and gets
//! a summary box at the end.
//! Everything runs on the calling thread; the merge itself happens between
//! two dialogs.

mod native;
mod selection;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::MergeError;
use crate::merge::MergeEngine;
use crate::options::MergeOptions;
use crate::report::{FileFailure, MergeReport};

pub use native::NativeDialogs;
pub use selection::FileSelection;

/// Reply to a Yes/No/Cancel question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warning,
    Error,
}

/// The dialogs the merger needs from a windowing system
pub trait Dialogs {
    /// Multi-select open dialog; `None` when cancelled
    fn pick_inputs(&self) -> Option<Vec<PathBuf>>;
    /// Save dialog; `None` when cancelled
    fn pick_output(&self) -> Option<PathBuf>;
    fn ask(&self, title: &str, question: &str) -> Answer;
    fn confirm(&self, title: &str, question: &str) -> bool;
    fn notify(&self, notice: Notice, title: &str, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Merged,
    Failed,
    /// Backed out after picking files; another round is still offered
    Skipped,
    /// Cancelled the open dialog with nothing selected
    Quit,
}

pub struct MergerApp<D: Dialogs> {
    dialogs: D,
    selection: FileSelection,
    options: MergeOptions,
}

impl<D: Dialogs> MergerApp<D> {
    pub fn new(dialogs: D, options: MergeOptions) -> Self {
        Self {
            dialogs,
            selection: FileSelection::new(),
            options,
        }
    }

    /// Pre-populate the selection, e.g. with files given on the command line
    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.selection.add(files);
        self
    }

    /// Run merges until the user cancels the open dialog or declines another round.
    /// Returns the number of files written.
    pub fn run(&mut self) -> usize {
        let mut merged = 0;

        loop {
            let outcome = self.merge_once();
            self.selection.clear();

            match outcome {
                Outcome::Quit => break,
                Outcome::Merged => merged += 1,
                Outcome::Failed | Outcome::Skipped => {}
            }

            if !self.dialogs.confirm("Bookmark Merger", "Merge another set of bookmark files?") {
                break;
            }
        }

        info!("👋 Leaving bookmark merger after {} merges", merged);
        merged
    }

    fn merge_once(&mut self) -> Outcome {
        if let Some(outcome) = self.collect_inputs() {
            info!("Selection cancelled");
            return outcome;
        }

        let mut options = self.options.clone();
        options.deduplicate = self.dialogs.confirm(
            "Remove Duplicates",
            "Remove duplicate bookmarks?\n\nWhen the same URL appears more than once, only the first one is kept.",
        );

        let output = match self.dialogs.pick_output() {
            Some(path) => path,
            None => {
                info!("Save dialog cancelled");
                return Outcome::Skipped;
            }
        };

        let inputs = self.selection.files().to_vec();
        if let Err(e) = options.validate(&inputs, &output) {
            self.dialogs.notify(Notice::Error, "Error", &e.to_string());
            return Outcome::Failed;
        }

        match MergeEngine::new(options).run(&inputs, &output) {
            Ok(report) => {
                self.report_success(&report);
                Outcome::Merged
            }
            Err(e) => {
                warn!("⚠️  Merge failed: {}", e);
                let message = match &e {
                    MergeError::NoUsableInput { failures } => {
                        format!("Merge failed: {}\n\n{}", e, list_failures(failures))
                    }
                    _ => format!("Merge failed: {}", e),
                };
                self.dialogs.notify(Notice::Error, "Error", &message);
                Outcome::Failed
            }
        }
    }

    /// Let the user build the input list. Returns how the round ends when
    /// they back out, `None` once the selection is ready to merge.
    fn collect_inputs(&mut self) -> Option<Outcome> {
        loop {
            if self.selection.is_empty() {
                if let Some(files) = self.dialogs.pick_inputs() {
                    self.selection.add(files);
                }
                if self.selection.is_empty() {
                    return Some(Outcome::Quit);
                }
            }

            let question = format!(
                "{} files selected:\n\n{}\n\nAdd more files?",
                self.selection.len(),
                self.selection.describe()
            );
            match self.dialogs.ask("Select Bookmark Files", &question) {
                Answer::Yes => {
                    if let Some(files) = self.dialogs.pick_inputs() {
                        let added = self.selection.add(files);
                        info!("Added {} files, {} selected", added, self.selection.len());
                    }
                }
                Answer::No => {
                    if !self
                        .dialogs
                        .confirm("Review Selection", "Remove any of these files before merging?")
                    {
                        return None;
                    }
                    self.remove_chosen();
                }
                Answer::Cancel => return Some(Outcome::Skipped),
            }
        }
    }

    /// Ask about each selected file in turn and drop the ones the user picks
    fn remove_chosen(&mut self) {
        let chosen: Vec<PathBuf> = self
            .selection
            .files()
            .iter()
            .filter(|path| {
                self.dialogs.confirm(
                    "Remove File",
                    &format!("Remove {} from the selection?", path.display()),
                )
            })
            .cloned()
            .collect();

        let removed = self.selection.remove(&chosen);
        info!("Removed {} files, {} selected", removed, self.selection.len());
    }

    fn report_success(&self, report: &MergeReport) {
        if !report.failures.is_empty() {
            self.dialogs.notify(
                Notice::Warning,
                "Some Files Were Skipped",
                &format!("These files could not be merged:\n\n{}", list_failures(&report.failures)),
            );
        }

        let saved_to = report
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.dialogs.notify(
            Notice::Info,
            "Success",
            &format!(
                "Successfully merged {} bookmarks.\nIgnored {} duplicates.\nSaved to: {}",
                report.merged, report.duplicates_skipped, saved_to
            ),
        );
    }
}

/// One bullet per skipped file, each carrying its path and reason
fn list_failures(failures: &[FileFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("• {}", f.error))
        .collect::<Vec<_>>()
        .join("\n")
}
