//! Pre-commit hook management.
//!
//! Installs, removes and checks the `pre-commit` script that makes git run
//! the reflection prompt before each commit. The script itself is a fixed
//! constant; `verify` only looks at existence and the executable bits, so
//! the script text can change between versions without breaking old installs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use tracing::debug;

use crate::error::ReflectError;
use crate::git;
use crate::storage::ReflectionStore;

/// Marker comment to identify git-reflect-managed hooks.
pub const HOOK_MARKER: &str = "# git-reflect hook - managed by git-reflect install";

/// Pre-commit hook script content. Bump the version line when the
/// invocation changes.
pub const PRE_COMMIT_HOOK: &str = r#"#!/bin/sh
# git-reflect pre-commit hook - prompt for a reflection before each commit
# git-reflect hook - managed by git-reflect install
# hook version: 1

# git runs hooks with stdin detached; the prompt needs the terminal.
exec < /dev/tty

git-reflect --hook
exit $?
"#;

/// Filename of the managed hook inside the hooks directory.
pub const HOOK_NAME: &str = "pre-commit";

/// Outcome of an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    /// No hook existed; a fresh one was written.
    Installed,
    /// An existing hook was copied to `backup` and replaced.
    Replaced { backup: PathBuf },
}

/// Outcome of an uninstall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallStatus {
    /// The hook file was deleted.
    Removed,
    /// There was no hook to delete.
    NotInstalled,
}

/// Manages the pre-commit hook of one repository.
#[derive(Debug, Clone)]
pub struct HookManager {
    git_dir: PathBuf,
}

impl HookManager {
    /// Creates a manager for the repository whose metadata lives at `git_dir`.
    pub fn new(git_dir: &Path) -> Self {
        Self {
            git_dir: git_dir.to_path_buf(),
        }
    }

    /// Creates a manager for the repository enclosing `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::NotARepository`] outside a git repository.
    pub fn discover(start: &Path) -> Result<Self, ReflectError> {
        let git_dir = git::require_repo_root(start)?;
        Ok(Self::new(&git_dir))
    }

    /// `<git-dir>/hooks`
    pub fn hooks_dir(&self) -> PathBuf {
        self.git_dir.join("hooks")
    }

    /// `<git-dir>/hooks/pre-commit`
    pub fn hook_path(&self) -> PathBuf {
        self.hooks_dir().join(HOOK_NAME)
    }

    /// Where a pre-existing hook is copied before being replaced.
    pub fn backup_path(&self) -> PathBuf {
        self.hook_path().with_extension("backup")
    }

    /// Whether any file occupies the hook path. I/O errors read as `false`.
    pub fn hook_exists(&self) -> bool {
        self.hook_path().try_exists().unwrap_or(false)
    }

    /// Whether the hook at the hook path carries the git-reflect marker.
    pub fn is_managed(&self) -> bool {
        fs::read_to_string(self.hook_path())
            .map(|content| content.contains(HOOK_MARKER))
            .unwrap_or(false)
    }

    /// Installs the pre-commit hook.
    ///
    /// Any existing hook, managed or not, is copied to [`Self::backup_path`]
    /// before being overwritten. Also creates the log directory so the first
    /// commit has somewhere to write.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::InstallFailure`] on any I/O error. Steps that
    /// already ran are not rolled back; running install again is safe.
    pub fn install(&self) -> Result<InstallStatus, ReflectError> {
        fs::create_dir_all(self.hooks_dir()).map_err(ReflectError::InstallFailure)?;

        let hook_path = self.hook_path();
        let status = if self.hook_exists() {
            let backup = self.backup_path();
            fs::copy(&hook_path, &backup).map_err(ReflectError::InstallFailure)?;
            debug!("Backed up existing hook to {}", backup.display());
            InstallStatus::Replaced { backup }
        } else {
            InstallStatus::Installed
        };

        write_hook(&hook_path).map_err(ReflectError::InstallFailure)?;

        ReflectionStore::new(&self.git_dir)
            .ensure_dir()
            .map_err(ReflectError::InstallFailure)?;

        debug!("Installed hook at {}", hook_path.display());
        Ok(status)
    }

    /// Removes the pre-commit hook. A backup, if any, is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::UninstallFailure`] if the file exists but
    /// cannot be removed.
    pub fn uninstall(&self) -> Result<UninstallStatus, ReflectError> {
        match fs::remove_file(self.hook_path()) {
            Ok(()) => Ok(UninstallStatus::Removed),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(UninstallStatus::NotInstalled),
            Err(e) => Err(ReflectError::UninstallFailure(e)),
        }
    }

    /// True if the hook exists and has at least one executable bit set.
    pub fn verify(&self) -> bool {
        fs::metadata(self.hook_path())
            .map(|metadata| metadata.is_file() && is_executable(&metadata))
            .unwrap_or(false)
    }
}

/// Writes the hook script and marks it executable (0o755 on Unix).
fn write_hook(hook_path: &Path) -> io::Result<()> {
    fs::write(hook_path, PRE_COMMIT_HOOK)?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(hook_path, perms)?;
    }

    Ok(())
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Creates a temporary git repository for testing.
    fn create_test_repo() -> (TempDir, HookManager) {
        let temp_dir = TempDir::new().unwrap();
        git2::Repository::init(temp_dir.path()).unwrap();
        let manager = HookManager::new(&temp_dir.path().join(".git"));
        (temp_dir, manager)
    }

    #[test]
    fn test_hook_content_is_valid_shell_script() {
        assert!(PRE_COMMIT_HOOK.starts_with("#!/bin/sh"));
        assert!(PRE_COMMIT_HOOK.contains(HOOK_MARKER));
    }

    #[test]
    fn test_hook_content_reattaches_terminal_and_forwards_status() {
        assert!(PRE_COMMIT_HOOK.contains("exec < /dev/tty"));
        assert!(PRE_COMMIT_HOOK.contains("git-reflect --hook"));
        assert!(PRE_COMMIT_HOOK.contains("exit $?"));
    }

    #[test]
    fn test_paths() {
        let (temp_dir, manager) = create_test_repo();
        let hooks = temp_dir.path().join(".git").join("hooks");
        assert_eq!(manager.hook_path(), hooks.join("pre-commit"));
        assert_eq!(manager.backup_path(), hooks.join("pre-commit.backup"));
    }

    #[test]
    fn test_install_fresh() {
        let (temp_dir, manager) = create_test_repo();

        let status = manager.install().unwrap();

        assert_eq!(status, InstallStatus::Installed);
        assert_eq!(fs::read_to_string(manager.hook_path()).unwrap(), PRE_COMMIT_HOOK);
        assert!(!manager.backup_path().exists());
        assert!(temp_dir.path().join(".git").join("git-reflect").is_dir());
    }

    #[test]
    fn test_install_creates_missing_hooks_dir() {
        let temp_dir = TempDir::new().unwrap();
        let git_dir = temp_dir.path().join(".git");
        fs::create_dir(&git_dir).unwrap();
        let manager = HookManager::new(&git_dir);

        manager.install().unwrap();

        assert!(manager.verify());
    }

    #[test]
    fn test_install_backs_up_existing_hook() {
        let (_temp_dir, manager) = create_test_repo();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        fs::write(manager.hook_path(), "#!/bin/sh\necho 'existing hook'\n").unwrap();

        let status = manager.install().unwrap();

        assert_eq!(
            status,
            InstallStatus::Replaced {
                backup: manager.backup_path()
            }
        );
        let backup = fs::read_to_string(manager.backup_path()).unwrap();
        assert_eq!(backup, "#!/bin/sh\necho 'existing hook'\n");
        assert!(manager.is_managed());
    }

    #[test]
    fn test_install_twice_backs_up_managed_hook() {
        let (_temp_dir, manager) = create_test_repo();

        manager.install().unwrap();
        let status = manager.install().unwrap();

        assert!(matches!(status, InstallStatus::Replaced { .. }));
        assert_eq!(fs::read_to_string(manager.backup_path()).unwrap(), PRE_COMMIT_HOOK);
        assert!(manager.verify());
    }

    #[test]
    fn test_verify_without_hook() {
        let (_temp_dir, manager) = create_test_repo();
        assert!(!manager.verify());
        assert!(!manager.hook_exists());
    }

    #[test]
    fn test_install_then_verify_then_uninstall() {
        let (_temp_dir, manager) = create_test_repo();

        manager.install().unwrap();
        assert!(manager.verify());
        assert!(manager.hook_exists());

        assert_eq!(manager.uninstall().unwrap(), UninstallStatus::Removed);
        assert!(!manager.verify());
        assert!(!manager.hook_exists());
    }

    #[test]
    fn test_uninstall_without_hook_is_noop() {
        let (_temp_dir, manager) = create_test_repo();
        assert_eq!(manager.uninstall().unwrap(), UninstallStatus::NotInstalled);
    }

    #[test]
    fn test_uninstall_keeps_backup_and_log() {
        let (temp_dir, manager) = create_test_repo();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        fs::write(manager.hook_path(), "#!/bin/sh\nexit 0\n").unwrap();
        manager.install().unwrap();
        let store = ReflectionStore::new(&temp_dir.path().join(".git"));
        store.write_log(&crate::storage::ReflectionLog::new()).unwrap();

        manager.uninstall().unwrap();

        assert!(!manager.hook_path().exists());
        assert!(manager.backup_path().exists());
        assert!(store.log_path().exists());
    }

    #[test]
    fn test_is_managed_detects_foreign_hook() {
        let (_temp_dir, manager) = create_test_repo();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        fs::write(manager.hook_path(), "#!/bin/sh\necho 'other hook'\n").unwrap();

        assert!(!manager.is_managed());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_sets_executable_bits() {
        let (_temp_dir, manager) = create_test_repo();

        manager.install().unwrap();

        let mode = fs::metadata(manager.hook_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_verify_rejects_non_executable_hook() {
        let (_temp_dir, manager) = create_test_repo();
        manager.install().unwrap();
        fs::set_permissions(manager.hook_path(), fs::Permissions::from_mode(0o644)).unwrap();

        assert!(!manager.verify());
        assert!(manager.hook_exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_verify_accepts_any_executable_bit() {
        let (_temp_dir, manager) = create_test_repo();
        manager.install().unwrap();
        fs::set_permissions(manager.hook_path(), fs::Permissions::from_mode(0o601)).unwrap();

        assert!(manager.verify());
    }
}
