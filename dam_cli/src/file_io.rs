//! # Design File I/O
//!
//! `.dam` files hold a [`DamProject`] as pretty-printed JSON. Writes go
//! through a temporary file that is synced and renamed over the target, so a
//! crash mid-save leaves the previous file intact.
//!
//! A `.dam.lock` file next to the design file records who is editing it.
//! The lock is held both as an OS-level exclusive lock (fs2) and as readable
//! JSON metadata for other users on a shared drive.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{CliError, CliResult};
use crate::project::{DamProject, SCHEMA_VERSION};

/// Locks older than this are taken over regardless of owner.
const STALE_LOCK_HOURS: i64 = 24;

/// Metadata written into `.dam.lock` files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Owner description used in lock errors
    fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }

    /// True when the owning process is gone or the lock has expired.
    fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        hostname().is_some_and(|m| m == self.machine) && !process_alive(self.pid)
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").or_else(|_| std::env::var("HOST")).ok()
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive edit lock on a design file; released on drop.
pub struct FileLock {
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`, failing with [`CliError::FileLocked`]
    /// when a live lock held by someone else exists.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CliResult<Self> {
        if let Some(existing) = FileLock::check(path) {
            return Err(CliError::file_locked(
                path.display().to_string(),
                existing.holder(),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_path = lock_path_for(path);
        let lock_err = |op: &str, e: std::io::Error| CliError::file_error(op, lock_path.display().to_string(), e.to_string());

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| lock_err("create lock", e))?;

        // Only the holder of the OS lock may rewrite the metadata.
        handle
            .try_lock_exclusive()
            .map_err(|_| CliError::file_locked(path.display().to_string(), "another process", "unknown"))?;
        handle.set_len(0).map_err(|e| lock_err("truncate lock", e))?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_vec_pretty(&info).map_err(|e| CliError::serialization(e.to_string()))?;
        handle.write_all(&json).map_err(|e| lock_err("write lock", e))?;
        handle.sync_all().map_err(|e| lock_err("sync lock", e))?;

        debug!("acquired lock {} for {}", lock_path.display(), info.user_id);
        Ok(FileLock {
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Current live lock on `path`, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        match read_lock_info(&lock_path) {
            Ok(info) if info.is_stale() => {
                warn!("ignoring stale lock on {} held by {}", path.display(), info.holder());
                None
            }
            Ok(info) => Some(info),
            Err(_) => None,
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `design.dam` -> `design.dam.lock`
fn lock_path_for(design_path: &Path) -> PathBuf {
    let extension = design_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    design_path.with_extension(extension)
}

fn read_lock_info(lock_path: &Path) -> CliResult<LockInfo> {
    let contents = fs::read_to_string(lock_path)
        .map_err(|e| CliError::file_error("read lock", lock_path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| CliError::serialization(e.to_string()))
}

/// Write `project` to `path` atomically (temp file, fsync, rename).
pub fn save_project(project: &DamProject, path: &Path) -> CliResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CliError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("dam.tmp");
    let tmp_err = |op: &str, e: std::io::Error| CliError::file_error(op, tmp_path.display().to_string(), e.to_string());

    let mut tmp = File::create(&tmp_path).map_err(|e| tmp_err("create temp file", e))?;
    tmp.write_all(json.as_bytes()).map_err(|e| tmp_err("write temp file", e))?;
    tmp.sync_all().map_err(|e| tmp_err("sync temp file", e))?;
    drop(tmp);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CliError::file_error("rename to final", path.display().to_string(), e.to_string()));
    }

    info!("saved {} design(s) to {}", project.design_count(), path.display());
    Ok(())
}

/// Read and version-check a `.dam` file.
///
/// Fails with `FileError` on I/O problems, `SerializationError` on malformed
/// JSON and `VersionMismatch` when the schema is incompatible. Designs are
/// not analyzed here.
pub fn load_project(path: &Path) -> CliResult<DamProject> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: DamProject = serde_json::from_str(&contents)
        .map_err(|e| CliError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&project.meta.version)?;

    debug!("loaded {} design(s) from {}", project.design_count(), path.display());
    Ok(project)
}

/// Load a project along with the live lock on it, if another user holds one.
pub fn load_project_with_lock_check(path: &Path) -> CliResult<(DamProject, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Major versions must match; within 0.x a newer minor is rejected.
fn validate_version(file_version: &str) -> CliResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    let compatible = match (file.as_slice(), current.as_slice()) {
        ([f_major, rest @ ..], [c_major, c_rest @ ..]) if f_major == c_major => {
            *c_major != 0 || match (rest.first(), c_rest.first()) {
                (Some(f_minor), Some(c_minor)) => f_minor <= c_minor,
                _ => true,
            }
        }
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(CliError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}
