//! On-disk reflection log.
//!
//! The log is a single pretty-printed JSON document at
//! `<git-dir>/git-reflect/log.json`. Reads never fail: a missing file yields
//! an empty log and a corrupted one is reported through `tracing` and
//! replaced by an empty log. Writes always surface their errors, because a
//! failed write means a reflection was lost.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::models::{LogEntry, ReflectionLog, LOG_VERSION};
use crate::error::ReflectError;
use crate::git;

/// Directory under the git metadata directory that holds git-reflect state.
pub const REFLECT_DIR_NAME: &str = "git-reflect";

/// Filename of the log inside [`REFLECT_DIR_NAME`].
pub const LOG_FILE_NAME: &str = "log.json";

/// Access to the reflection log of one repository.
///
/// Not safe against concurrent writers: `add_entry` is a plain
/// read-modify-write, which is fine for one commit at a time.
#[derive(Debug, Clone)]
pub struct ReflectionStore {
    dir: PathBuf,
}

impl ReflectionStore {
    /// Creates a store for the repository whose metadata lives at `git_dir`.
    pub fn new(git_dir: &Path) -> Self {
        Self {
            dir: git_dir.join(REFLECT_DIR_NAME),
        }
    }

    /// Creates a store for the repository enclosing `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::NotARepository`] when `start` is not inside a
    /// git repository.
    pub fn discover(start: &Path) -> Result<Self, ReflectError> {
        let git_dir = git::require_repo_root(start)?;
        Ok(Self::new(&git_dir))
    }

    /// Directory holding git-reflect state.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `log.json`.
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    /// Creates the state directory (and parents) if it is missing.
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Reads the log, substituting an empty log when it is missing or unreadable.
    pub fn read_log(&self) -> ReflectionLog {
        if let Err(e) = self.ensure_dir() {
            warn!("Could not create {}: {e}", self.dir.display());
        }

        let path = self.log_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No log at {}, starting fresh", path.display());
                return ReflectionLog::new();
            }
            Err(e) => {
                warn!("Failed to read {}, starting fresh: {e}", path.display());
                return ReflectionLog::new();
            }
        };

        match parse_log(&content) {
            Ok(log) => log,
            Err(e) => {
                warn!("{e} ({}), starting fresh", path.display());
                ReflectionLog::new()
            }
        }
    }

    /// Overwrites `log.json` with `log`.
    ///
    /// The document is written to a sibling temporary file and renamed into
    /// place, so readers see either the old or the new log.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::WriteFailure`] if the directory cannot be
    /// created or the file cannot be written.
    pub fn write_log(&self, log: &ReflectionLog) -> Result<(), ReflectError> {
        self.ensure_dir().map_err(ReflectError::WriteFailure)?;

        let mut json = serde_json::to_string_pretty(log)
            .map_err(|e| ReflectError::WriteFailure(e.into()))?;
        json.push('\n');

        let path = self.log_path();
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(ReflectError::WriteFailure)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ReflectError::WriteFailure(e));
        }

        debug!(entries = log.entries.len(), "Wrote {}", path.display());
        Ok(())
    }

    /// Appends `entry` to the log and writes it back.
    ///
    /// Returns the new entry count.
    pub fn add_entry(&self, entry: LogEntry) -> Result<usize, ReflectError> {
        let mut log = self.read_log();
        log.push(entry);
        self.write_log(&log)?;
        Ok(log.stats.total_commits)
    }

    /// The most recently appended entry, if any.
    pub fn latest_entry(&self) -> Option<LogEntry> {
        self.read_log().entries.pop()
    }
}

/// Parses a log document, checking it has the expected shape.
pub fn parse_log(content: &str) -> Result<ReflectionLog, ReflectError> {
    let log: ReflectionLog = serde_json::from_str(content).map_err(ReflectError::Corruption)?;
    if log.version != LOG_VERSION {
        debug!("Reading log with version {} as {LOG_VERSION}", log.version);
    }
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Answers;
    use tempfile::TempDir;

    fn create_test_store() -> (ReflectionStore, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let git_dir = dir.path().join(".git");
        fs::create_dir(&git_dir).expect("Failed to create .git");
        (ReflectionStore::new(&git_dir), dir)
    }

    fn answers(intent: &str) -> Answers {
        Answers {
            intent: intent.to_string(),
            problem_solved: "Test".to_string(),
            learned: "Test".to_string(),
            would_do_differently: "Test".to_string(),
            confidence: "Test".to_string(),
            testing: "Test".to_string(),
            technical_debt: "Test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_paths() {
        let (store, dir) = create_test_store();
        assert_eq!(store.dir(), dir.path().join(".git").join("git-reflect"));
        assert_eq!(
            store.log_path(),
            dir.path().join(".git").join("git-reflect").join("log.json")
        );
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        store.ensure_dir().unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_read_log_without_file_returns_default() {
        let (store, _dir) = create_test_store();

        let log = store.read_log();

        assert_eq!(log.version, "1.0");
        assert!(log.entries.is_empty());
        assert_eq!(log.stats.total_commits, 0);
        assert!(store.dir().is_dir(), "read_log should create the directory");
        assert!(!store.log_path().exists(), "read_log should not create the file");
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (store, _dir) = create_test_store();
        let mut log = ReflectionLog::new();
        log.push(LogEntry::new("main", "First", answers("one")));
        log.push(LogEntry::new("dev", "Second", answers("two")));

        store.write_log(&log).unwrap();

        assert_eq!(store.read_log(), log);
    }

    #[test]
    fn test_write_log_uses_two_space_indent() {
        let (store, _dir) = create_test_store();
        store.write_log(&ReflectionLog::new()).unwrap();

        let content = fs::read_to_string(store.log_path()).unwrap();
        assert!(content.starts_with("{\n  \"version\": \"1.0\""));
        assert!(content.contains("\n  \"stats\": {\n    \"totalCommits\": 0"));
        assert!(!store.dir().join("log.json.tmp").exists());
    }

    #[test]
    fn test_read_log_recovers_from_invalid_json() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::write(store.log_path(), "invalid json {").unwrap();

        let log = store.read_log();

        assert_eq!(log.version, "1.0");
        assert!(log.entries.is_empty());
        assert_eq!(log.stats.total_commits, 0);
    }

    #[test]
    fn test_read_log_recovers_from_wrong_shape() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::write(store.log_path(), r#"{"version": "1.0", "entries": "nope"}"#).unwrap();

        assert!(store.read_log().entries.is_empty());
    }

    #[test]
    fn test_parse_log_reports_corruption() {
        let err = parse_log("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ReflectError::Corruption(_)));
    }

    #[test]
    fn test_read_log_keeps_inconsistent_stats() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::write(
            store.log_path(),
            r#"{"version":"1.0","entries":[],"stats":{"totalCommits":7,"projectStartDate":"2025-01-01"}}"#,
        )
        .unwrap();

        let log = store.read_log();

        assert!(log.entries.is_empty());
        assert_eq!(log.stats.total_commits, 7);
    }

    #[test]
    fn test_add_entry_after_corruption_starts_fresh() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::write(store.log_path(), "not json").unwrap();

        let total = store.add_entry(LogEntry::new("main", "fix", answers("x"))).unwrap();

        assert_eq!(total, 1);
        assert_eq!(store.read_log().entries.len(), 1);
    }

    #[test]
    fn test_add_entry_counts_every_append() {
        let (store, _dir) = create_test_store();

        for i in 1..=5 {
            let entry = LogEntry::new("main", format!("commit {i}"), answers("x"));
            let total = store.add_entry(entry.clone()).unwrap();
            assert_eq!(total, i);

            let log = store.read_log();
            assert_eq!(log.stats.total_commits, i);
            assert_eq!(log.entries.last(), Some(&entry));
        }
    }

    #[test]
    fn test_add_entry_into_existing_log() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::write(
            store.log_path(),
            r#"{"version":"1.0","entries":[],"stats":{"totalCommits":0,"projectStartDate":"2025-01-01"}}"#,
        )
        .unwrap();
        let entry = LogEntry::new("main", "fix bug", answers("Test"));

        store.add_entry(entry.clone()).unwrap();

        let log = store.read_log();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.stats.total_commits, 1);
        assert_eq!(log.entries[0], entry);
        assert_eq!(log.stats.project_start_date.to_string(), "2025-01-01");
    }

    #[test]
    fn test_add_entry_keeps_unknown_keys_of_existing_entries() {
        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::write(
            store.log_path(),
            r#"{
              "version": "1.0",
              "owner": "team",
              "entries": [{
                "timestamp": "2025-01-15T10:00:00.000Z",
                "date": "2025-01-15",
                "branchName": "main",
                "commitMessage": "First",
                "answers": {
                  "intent": "a", "problemSolved": "b", "learned": "c",
                  "wouldDoDifferently": "d", "confidence": "e", "testing": "f",
                  "technicalDebt": "g"
                },
                "mood": "happy"
              }],
              "stats": { "totalCommits": 1, "projectStartDate": "2025-01-01", "streak": 3 }
            }"#,
        )
        .unwrap();

        store.add_entry(LogEntry::new("main", "Second", answers("x"))).unwrap();

        let raw = fs::read_to_string(store.log_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["owner"], "team");
        assert_eq!(value["entries"][0]["mood"], "happy");
        assert_eq!(value["entries"][0]["commitMessage"], "First");
        assert_eq!(value["stats"]["streak"], 3);
        assert_eq!(value["stats"]["totalCommits"], 2);
        assert!(value["entries"][1].get("mood").is_none());
    }

    #[test]
    fn test_latest_entry() {
        let (store, _dir) = create_test_store();
        assert!(store.latest_entry().is_none());

        store.add_entry(LogEntry::new("main", "First", answers("Test 1"))).unwrap();
        store.add_entry(LogEntry::new("main", "Second", answers("Test 2"))).unwrap();

        let latest = store.latest_entry().unwrap();
        assert_eq!(latest.commit_message, "Second");
        assert_eq!(latest.answers.intent, "Test 2");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_log_failure_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _dir) = create_test_store();
        store.ensure_dir().unwrap();
        fs::set_permissions(store.dir(), fs::Permissions::from_mode(0o555)).unwrap();

        let result = store.write_log(&ReflectionLog::new());

        fs::set_permissions(store.dir(), fs::Permissions::from_mode(0o755)).unwrap();
        // Root ignores directory permissions, so only check the error shape.
        if let Err(err) = result {
            assert!(matches!(err, ReflectError::WriteFailure(_)));
        }
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (_store, dir) = create_test_store();
        let nested = dir.path().join("src").join("bin");
        fs::create_dir_all(&nested).unwrap();

        let store = ReflectionStore::discover(&nested).unwrap();

        assert_eq!(store.dir(), dir.path().join(".git").join("git-reflect"));
    }
}
