use std::path::PathBuf;

/// Ordered list of input files picked by the user
#[derive(Debug, Default)]
pub struct FileSelection {
    files: Vec<PathBuf>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append paths in order, skipping ones already selected. Returns how many were new.
    pub fn add<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let before = self.files.len();
        for path in paths {
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }
        self.files.len() - before
    }

    /// Drop the given paths from the selection. Returns how many were removed.
    pub fn remove(&mut self, paths: &[PathBuf]) -> usize {
        let before = self.files.len();
        self.files.retain(|path| !paths.contains(path));
        before - self.files.len()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// One line per file, numbered in merge order
    pub fn describe(&self) -> String {
        self.files
            .iter()
            .enumerate()
            .map(|(i, path)| format!("{}. {}", i + 1, path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
