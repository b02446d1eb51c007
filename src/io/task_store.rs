use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use sha2::{Digest, Sha256};

use crate::model::task::Task;
use crate::parse::parse_task;

/// Subdirectory holding completed task files
pub const COMPLETED_DIR: &str = "completed";
/// Subdirectory holding diagnostic logs
pub const LOGS_DIR: &str = "logs";
/// Extension given to every file the store creates
pub const TASK_EXTENSION: &str = "todo";

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("task file name {name:?} looks numeric but is not a valid task number")]
    InvalidNumber { name: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A directory of task files, one task per file.
///
/// The store never caches tasks; every `load` reads the directory from
/// scratch, so callers holding a `Task` across a reload must look it up again
/// by path.
#[derive(Debug, Clone)]
pub struct TaskStore {
    root: PathBuf,
}

impl TaskStore {
    /// Open the store rooted at `root`, creating it and its `completed/`
    /// subdirectory if they are missing. `logs/` is left to the logger.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        for dir in [root.to_path_buf(), root.join(COMPLETED_DIR)] {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
                path: dir.clone(),
                source,
            })?;
        }
        // Task identity is the absolute path, so pin the root down once
        let root = fs::canonicalize(root).map_err(|source| StoreError::Read {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(TaskStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn completed_dir(&self) -> PathBuf {
        self.root.join(COMPLETED_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Load every regular file in the storage root as a task.
    ///
    /// Tasks are ordered by numeric file stem, with non-numeric names after
    /// them in file name order.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks = Vec::new();
        for path in self.task_files()? {
            let bytes = fs::read(&path).map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;
            tasks.push(parse_task(&String::from_utf8_lossy(&bytes), &path));
        }
        tasks.sort_by(|a, b| display_order(&a.file_path, &b.file_path));
        tracing::debug!(count = tasks.len(), root = %self.root.display(), "loaded tasks");
        Ok(tasks)
    }

    /// Path for a new task: one past the highest numbered file, or `1.todo`
    /// in a directory without numbered files.
    pub fn next_task_path(&self) -> Result<PathBuf, StoreError> {
        let mut highest: u64 = 0;
        for path in self.task_files()? {
            if let Some(n) = numeric_stem(&path)? {
                highest = highest.max(n);
            }
        }
        let next = highest
            .checked_add(1)
            .ok_or_else(|| StoreError::InvalidNumber {
                name: highest.to_string(),
            })?;
        Ok(self.root.join(format!("{next}.{TASK_EXTENSION}")))
    }

    /// Move a task's file into `completed/`, named after today's date.
    pub fn complete(&self, task: &Task) -> Result<PathBuf, StoreError> {
        self.complete_on(task, Local::now().date_naive())
    }

    /// Move a task's file into `completed/` under a name derived from `date`
    /// and a digest of its path. Returns the new location.
    pub fn complete_on(&self, task: &Task, date: NaiveDate) -> Result<PathBuf, StoreError> {
        let completed = self.completed_dir();
        fs::create_dir_all(&completed).map_err(|source| StoreError::Write {
            path: completed.clone(),
            source,
        })?;

        let target = completed.join(completed_file_name(&task.file_path, date));
        fs::rename(&task.file_path, &target).map_err(|source| StoreError::Rename {
            from: task.file_path.clone(),
            to: target.clone(),
            source,
        })?;
        tracing::info!(
            from = %task.file_path.display(),
            to = %target.display(),
            "completed task"
        );
        Ok(target)
    }

    /// Regular files directly under the root, in directory order
    fn task_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Read {
            path: self.root.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

/// `{YYYY-MM-DD}-{sha256 hex of the path}.todo`
pub fn completed_file_name(path: &Path, date: NaiveDate) -> String {
    let digest = Sha256::digest(path.as_os_str().as_encoded_bytes());
    format!("{}-{:x}.{TASK_EXTENSION}", date.format("%Y-%m-%d"), digest)
}

/// The task number encoded in a file stem, if the stem is all digits.
///
/// A digit-only stem that does not fit a `u64` is an error rather than being
/// skipped, so numbering never silently restarts below an existing file.
fn numeric_stem(path: &Path) -> Result<Option<u64>, StoreError> {
    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s,
        _ => return Ok(None),
    };
    stem.parse::<u64>()
        .map(Some)
        .map_err(|_| StoreError::InvalidNumber {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })
}

fn display_order(a: &Path, b: &Path) -> Ordering {
    let key = |p: &Path| numeric_stem(p).ok().flatten();
    match (key(a), key(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.file_name().cmp(&b.file_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::serialize_task;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, TaskStore) {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::open(tmp.path()).unwrap();
        for (name, content) in files {
            fs::write(store.root().join(name), content).unwrap();
        }
        (tmp, store)
    }

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.file_name()).collect()
    }

    #[test]
    fn open_creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("nested/todo");
        let store = TaskStore::open(&root).unwrap();
        assert!(store.root().is_dir());
        assert!(store.completed_dir().is_dir());
        assert!(store.root().is_absolute());
    }

    #[test]
    fn open_ignores_an_unusable_logs_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(LOGS_DIR), "not a directory").unwrap();
        let store = TaskStore::open(tmp.path()).unwrap();
        assert!(store.logs_dir().is_file());
        // The stray file is loaded like any other
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn load_parses_each_file() {
        let (_tmp, store) = store_with(&[("1.todo", "Title\ntag\n\nbody\n")]);
        let tasks = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Title");
        assert_eq!(tasks[0].tags, "tag");
        assert_eq!(tasks[0].details, "body\n");
        assert_eq!(tasks[0].file_path, store.root().join("1.todo"));
    }

    #[test]
    fn load_skips_subdirectories() {
        let (_tmp, store) = store_with(&[("1.todo", "One\n")]);
        fs::write(store.completed_dir().join("2026-01-01-abc.todo"), "Done\n").unwrap();
        fs::create_dir(store.root().join("stray")).unwrap();
        let tasks = store.load().unwrap();
        assert_eq!(names(&tasks), vec!["1.todo"]);
    }

    #[test]
    fn load_orders_numerically_then_by_name() {
        let (_tmp, store) = store_with(&[
            ("10.todo", "ten"),
            ("notes.txt", "notes"),
            ("2.todo", "two"),
            ("1.todo", "one"),
            ("a.todo", "a"),
        ]);
        let tasks = store.load().unwrap();
        assert_eq!(
            names(&tasks),
            vec!["1.todo", "2.todo", "10.todo", "a.todo", "notes.txt"]
        );
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let (_tmp, store) = store_with(&[("2.todo", "Fine\n")]);
        fs::write(store.root().join("1.todo"), b"Caf\xe9\ntags\n").unwrap();
        let tasks = store.load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Caf\u{FFFD}");
        assert_eq!(tasks[0].tags, "tags");
        assert_eq!(tasks[1].title, "Fine");
    }

    #[test]
    fn next_path_in_empty_directory() {
        let (_tmp, store) = store_with(&[]);
        assert_eq!(store.next_task_path().unwrap(), store.root().join("1.todo"));
    }

    #[test]
    fn next_path_is_max_plus_one() {
        let (_tmp, store) = store_with(&[("1.todo", ""), ("2.todo", ""), ("5.todo", "")]);
        assert_eq!(store.next_task_path().unwrap(), store.root().join("6.todo"));
    }

    #[test]
    fn next_path_ignores_non_numeric_names() {
        let (_tmp, store) = store_with(&[("3.todo", ""), ("shopping.todo", ""), ("4b.todo", "")]);
        assert_eq!(store.next_task_path().unwrap(), store.root().join("4.todo"));
    }

    #[test]
    fn next_path_fails_on_overflowing_number() {
        let (_tmp, store) = store_with(&[("99999999999999999999999.todo", "")]);
        assert!(matches!(
            store.next_task_path(),
            Err(StoreError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn completed_name_uses_date_and_path_digest() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let name = completed_file_name(Path::new("/data/todo/1.todo"), date);
        let digest = Sha256::digest(b"/data/todo/1.todo");
        assert_eq!(name, format!("2026-03-09-{:x}.todo", digest));
        assert_eq!(name.len(), "2026-03-09-".len() + 64 + ".todo".len());
    }

    #[test]
    fn complete_moves_file_into_completed() {
        let (_tmp, store) = store_with(&[("1.todo", "One\n"), ("2.todo", "Two\n")]);
        let tasks = store.load().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let target = store.complete_on(&tasks[0], date).unwrap();

        assert!(!tasks[0].file_path.exists());
        assert_eq!(target.parent().unwrap(), store.completed_dir());
        assert_eq!(fs::read_to_string(&target).unwrap(), "One\n");
        assert_eq!(names(&store.load().unwrap()), vec!["2.todo"]);
    }

    #[test]
    fn complete_missing_file_is_a_rename_error() {
        let (_tmp, store) = store_with(&[]);
        let ghost = Task::new(store.root().join("9.todo"));
        assert!(matches!(
            store.complete(&ghost),
            Err(StoreError::Rename { .. })
        ));
    }

    #[test]
    fn serialized_task_loads_back_equal() {
        let (_tmp, store) = store_with(&[]);
        let task = Task {
            title: "Water plants".into(),
            tags: "home".into(),
            details: "the ferns too\n".into(),
            file_path: store.root().join("1.todo"),
        };
        fs::write(&task.file_path, serialize_task(&task)).unwrap();
        assert_eq!(store.load().unwrap(), vec![task]);
    }
}
