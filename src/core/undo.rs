//! Restore a file from its `.bak` sibling.
//!
//! The restore goes through the same staged temp-file + rename as every
//! other write but never rotates a new backup, so the `.bak` survives.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::cli::{AppContext, PathArgs};
use crate::error::TextError;
use crate::infra::write::{backup_path_for, write_atomic};

/// Paths involved in a successful restore, resolved for display.
#[derive(Debug, Clone)]
pub struct UndoReport {
    pub backup: PathBuf,
    pub target: PathBuf,
    pub bytes_restored: usize,
}

#[instrument]
pub fn undo_last_write(path: &Path) -> Result<UndoReport, TextError> {
    let bak = backup_path_for(path);
    if !bak.is_file() {
        return Err(TextError::NoBackup(bak));
    }

    let bytes = fs::read(&bak).map_err(|e| TextError::from_io("read", &bak, e))?;
    write_atomic(path, &bytes)?;
    info!(backup = %bak.display(), "restored from backup");

    Ok(UndoReport {
        backup: resolve(&bak),
        target: resolve(path),
        bytes_restored: bytes.len(),
    })
}

fn resolve(p: &Path) -> PathBuf {
    dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}

#[instrument(skip(ctx))]
pub fn run(args: PathArgs, ctx: &AppContext) -> Result<()> {
    let report = undo_last_write(&args.path)
        .with_context(|| format!("cannot undo {}", args.path.display()))?;

    println!(
        "{} Restored from {} -> {}",
        ctx.ok("✓"),
        report.backup.display(),
        report.target.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::write::{WriteOptions, safe_write};
    use tempfile::TempDir;

    #[test]
    fn undo_restores_pre_write_bytes() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, b"before\r\n\xFE").unwrap();

        safe_write(&p, "after\n", WriteOptions::BACKUP).unwrap();
        let report = undo_last_write(&p).unwrap();

        assert_eq!(fs::read(&p).unwrap(), b"before\r\n\xFE");
        assert_eq!(report.bytes_restored, 9);
        assert!(report.backup.ends_with("f.txt.bak"));
        // The backup itself is kept
        assert!(backup_path_for(&p).exists());
    }

    #[test]
    fn undo_without_backup_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, "current").unwrap();

        let err = undo_last_write(&p).unwrap_err();
        assert!(matches!(err, TextError::NoBackup(_)));
        assert!(err.to_string().starts_with("no backup available"));
        assert_eq!(fs::read_to_string(&p).unwrap(), "current");
    }

    #[test]
    fn undo_recreates_deleted_target() {
        let tmp = TempDir::new().unwrap();
        let p = tmp.path().join("f.txt");
        fs::write(&p, "v1").unwrap();
        safe_write(&p, "v2", WriteOptions::BACKUP).unwrap();
        fs::remove_file(&p).unwrap();

        undo_last_write(&p).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "v1");
    }
}
