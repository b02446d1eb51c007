use std::path::{Path, PathBuf};

/// One task, parsed from a single file in the storage directory.
///
/// `file_path` is the identity key: two tasks loaded in the same pass never
/// share a path, and a task held across a reload is re-resolved by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// First line of the file, verbatim
    pub title: String,
    /// Second line of the file, verbatim and opaque
    pub tags: String,
    /// Lines 4 and onward, each terminated by `\n`
    pub details: String,
    /// Absolute path of the backing file
    pub file_path: PathBuf,
}

impl Task {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Task {
            title: String::new(),
            tags: String::new(),
            details: String::new(),
            file_path: file_path.into(),
        }
    }

    /// File name of the backing file, for display and logging
    pub fn file_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }

    pub fn is_backed_by(&self, path: &Path) -> bool {
        self.file_path == path
    }
}
