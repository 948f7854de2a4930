use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use super::{Answer, Dialogs, Notice};

/// System file pickers and message boxes
pub struct NativeDialogs {
    start_dir: Option<PathBuf>,
}

impl Default for NativeDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeDialogs {
    pub fn new() -> Self {
        Self {
            start_dir: dirs::download_dir().or_else(dirs::home_dir),
        }
    }

    fn file_dialog(&self, title: &str) -> FileDialog {
        let dialog = FileDialog::new()
            .set_title(title)
            .add_filter("HTML Files", &["html", "htm"]);
        match &self.start_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn message(&self, level: MessageLevel, title: &str, text: &str, buttons: MessageButtons) -> MessageDialogResult {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(text)
            .set_buttons(buttons)
            .show()
    }
}

impl Dialogs for NativeDialogs {
    fn pick_inputs(&self) -> Option<Vec<PathBuf>> {
        self.file_dialog("Select Bookmark Files").pick_files()
    }

    fn pick_output(&self) -> Option<PathBuf> {
        self.file_dialog("Save Merged Bookmarks")
            .set_file_name("merged_bookmarks.html")
            .save_file()
    }

    fn ask(&self, title: &str, question: &str) -> Answer {
        match self.message(MessageLevel::Info, title, question, MessageButtons::YesNoCancel) {
            MessageDialogResult::Yes => Answer::Yes,
            MessageDialogResult::No => Answer::No,
            _ => Answer::Cancel,
        }
    }

    fn confirm(&self, title: &str, question: &str) -> bool {
        matches!(
            self.message(MessageLevel::Info, title, question, MessageButtons::YesNo),
            MessageDialogResult::Yes
        )
    }

    fn notify(&self, notice: Notice, title: &str, message: &str) {
        let level = match notice {
            Notice::Info => MessageLevel::Info,
            Notice::Warning => MessageLevel::Warning,
            Notice::Error => MessageLevel::Error,
        };
        let _ = self.message(level, title, message, MessageButtons::Ok);
    }
}
