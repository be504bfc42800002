//! Safe writer: optional `.bak` rotation, then a same-directory temp file
//! atomically renamed over the target.
//!
//! The temp file must live beside the target so the final rename never
//! crosses a filesystem boundary. There is no copy fallback.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::TextError;

/// Suffix appended to the full file name of a backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Caller-selected write behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Snapshot the current target to `<target>.bak` before replacing it
    pub backup: bool,
}

impl WriteOptions {
    pub const BACKUP: Self = Self { backup: true };
    pub const NO_BACKUP: Self = Self { backup: false };
}

/// Outcome of a successful write.
#[derive(Debug, Clone)]
pub struct WriteReport {
    pub target: PathBuf,
    pub backup: Option<PathBuf>,
    pub bytes_written: usize,
}

/// `notes.txt` → `notes.txt.bak`, `README` → `README.bak`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Persist `text` as UTF-8 to `path` with all-or-nothing semantics.
#[instrument(skip(text), fields(len = text.len()))]
pub fn safe_write(path: &Path, text: &str, opts: WriteOptions) -> Result<WriteReport, TextError> {
    // Phase 0: backup must land before the target is touched
    let backup = if opts.backup && path.exists() {
        let bak = backup_path_for(path);
        fs::copy(path, &bak).map_err(|e| TextError::from_io("backup", &bak, e))?;
        debug!(backup = %bak.display(), "rotated backup");
        Some(bak)
    } else {
        None
    };

    write_atomic(path, text.as_bytes())?;

    Ok(WriteReport {
        target: path.to_path_buf(),
        backup,
        bytes_written: text.len(),
    })
}

/// Stage then commit `data` onto `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), TextError> {
    StagedWrite::stage(path, data)?.commit()
}

/// First phase of an atomic replace: content fully written and synced to a
/// temp file beside the target. Dropping without `commit` deletes the temp
/// file and leaves the target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl StagedWrite {
    pub fn stage(path: &Path, data: &[u8]) -> Result<Self, TextError> {
        let dir = parent_dir(path);

        // Preserve original permissions; new files get 0644
        #[cfg(unix)]
        let perms = fs::metadata(path)
            .map(|m| m.permissions())
            .unwrap_or_else(|_| std::os::unix::fs::PermissionsExt::from_mode(0o644));
        #[cfg(not(unix))]
        let perms = fs::metadata(path).map(|m| m.permissions()).ok();

        let tmp = NamedTempFile::new_in(dir).map_err(|e| TextError::from_io("create temp file in", dir, e))?;

        let mut file = tmp.as_file();
        file.write_all(data)
            .and_then(|_| file.sync_all())
            .map_err(|e| TextError::from_io("write", tmp.path(), e))?;

        #[cfg(unix)]
        fs::set_permissions(tmp.path(), perms).map_err(|e| TextError::from_io("set permissions on", tmp.path(), e))?;
        #[cfg(not(unix))]
        if let Some(perms) = perms {
            fs::set_permissions(tmp.path(), perms)
                .map_err(|e| TextError::from_io("set permissions on", tmp.path(), e))?;
        }

        debug!(tmp = %tmp.path().display(), target = %path.display(), "staged write");
        Ok(Self {
            target: path.to_path_buf(),
            tmp,
        })
    }

    /// Path of the staged temp file.
    pub fn temp_path(&self) -> &Path {
        self.tmp.path()
    }

    /// Second phase: rename the temp file over the target.
    pub fn commit(self) -> Result<(), TextError> {
        let target = self.target;
        self.tmp
            .persist(&target)
            .map_err(|e| TextError::from_io("replace", &target, e.error))?;

        // Durably record the rename
        let _ = sync_dir(parent_dir(&target));
        debug!(target = %target.display(), "committed write");
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Cross-platform directory fsync helper.
#[cfg(unix)]
fn sync_dir(p: &Path) -> std::io::Result<()> {
    use std::{fs::OpenOptions, os::unix::fs::OpenOptionsExt};
    let f = OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_DIRECTORY)
        .open(p)?;
    f.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_p: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut v: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(backup_path_for(Path::new("a/notes.txt")), Path::new("a/notes.txt.bak"));
        assert_eq!(backup_path_for(Path::new("README")), Path::new("README.bak"));
    }

    #[test]
    fn failed_backup_leaves_target_untouched() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, "orig").unwrap();
        // A directory where the backup should go makes the copy fail
        fs::create_dir(backup_path_for(&p)).unwrap();

        let err = safe_write(&p, "new", WriteOptions::BACKUP).unwrap_err();
        assert!(err.to_string().starts_with("backup "));
        assert_eq!(fs::read_to_string(&p).unwrap(), "orig");
        assert_eq!(dir_entries(tmp.path()), vec!["f.txt", "f.txt.bak"]);
    }

    #[test]
    fn new_file_gets_no_backup() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("new.txt");

        let report = safe_write(&p, "hello\n", WriteOptions::BACKUP).unwrap();
        assert!(report.backup.is_none());
        assert_eq!(report.bytes_written, 6);
        assert_eq!(fs::read_to_string(&p).unwrap(), "hello\n");
        assert_eq!(dir_entries(tmp.path()), vec!["new.txt"]);
    }

    #[test]
    fn second_write_backs_up_first_content() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, "v0").unwrap();

        safe_write(&p, "v1", WriteOptions::BACKUP).unwrap();
        safe_write(&p, "v2", WriteOptions::BACKUP).unwrap();

        assert_eq!(fs::read_to_string(&p).unwrap(), "v2");
        assert_eq!(fs::read_to_string(backup_path_for(&p)).unwrap(), "v1");
    }

    #[test]
    fn no_backup_leaves_existing_bak_alone() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, "v0").unwrap();
        fs::write(backup_path_for(&p), "older").unwrap();

        safe_write(&p, "v1", WriteOptions::NO_BACKUP).unwrap();
        assert_eq!(fs::read_to_string(backup_path_for(&p)).unwrap(), "older");
    }

    #[test]
    fn uncommitted_stage_leaves_target_untouched() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, b"original bytes").unwrap();

        let staged = StagedWrite::stage(&p, b"replacement").unwrap();
        assert!(staged.temp_path().starts_with(tmp.path()));
        assert_eq!(fs::read(&p).unwrap(), b"original bytes");
        drop(staged);

        assert_eq!(fs::read(&p).unwrap(), b"original bytes");
        assert_eq!(dir_entries(tmp.path()), vec!["f.txt"]);
    }

    #[test]
    fn missing_directory_fails_without_side_effects() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("no/such/dir/f.txt");
        let err = safe_write(&p, "x", WriteOptions::BACKUP).unwrap_err();
        assert!(matches!(err, TextError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn permissions_survive_replace() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("script.sh");
        fs::write(&p, "echo hi\n").unwrap();
        fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();

        safe_write(&p, "echo bye\n", WriteOptions::NO_BACKUP).unwrap();
        let mode = fs::metadata(&p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }
}
