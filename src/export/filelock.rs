use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::error::HubError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const STALE_AFTER: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Advisory per-path lock, cross-process safe: a `<path>.lock` sidecar file
/// created with `create_new` and holding the acquisition time in unix
/// milliseconds. A holder that crashed is recovered after the stale timeout.
#[derive(Debug)]
pub struct PathLock {
    lock_path: PathBuf,
}

impl PathLock {
    pub fn acquire(target: &Path) -> Result<PathLock, HubError> {
        Self::acquire_with(target, ACQUIRE_TIMEOUT, STALE_AFTER)
    }

    fn acquire_with(
        target: &Path,
        acquire_timeout: Duration,
        stale_after: Duration,
    ) -> Result<PathLock, HubError> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let lock_path = lock_path_for(target);
        let deadline = Instant::now() + acquire_timeout;
        loop {
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&lock_path)
            {
                Ok(mut file) => {
                    let _ = write!(file, "{}", now_millis());
                    return Ok(PathLock { lock_path });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    if is_stale(&lock_path, stale_after) {
                        warn!("removing stale lock {}", lock_path.display());
                        let _ = fs::remove_file(&lock_path);
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return Err(HubError::FileOperation(format!(
                            "cannot acquire lock for {}",
                            target.display()
                        )));
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Drop for PathLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Write `content` to `target` under the path lock, via a sibling temp file
/// and rename so a failed write never leaves a torn final artifact.
pub fn locked_write(target: &Path, content: &str) -> Result<(), HubError> {
    let _lock = PathLock::acquire(target)?;
    let tmp = tmp_path_for(target);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, target)?;
    Ok(())
}

/// Read `target` under the path lock; absent files are not an error.
pub fn locked_read(target: &Path) -> Result<Option<String>, HubError> {
    if !target.exists() {
        return Ok(None);
    }
    let _lock = PathLock::acquire(target)?;
    Ok(Some(fs::read_to_string(target)?))
}

fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

fn tmp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// A lock with an unreadable or ancient timestamp belongs to a crashed holder.
fn is_stale(lock_path: &Path, stale_after: Duration) -> bool {
    match fs::read_to_string(lock_path) {
        Ok(raw) => match raw.trim().parse::<u128>() {
            Ok(held_since) => now_millis().saturating_sub(held_since) > stale_after.as_millis(),
            Err(_) => true,
        },
        // Raced with the holder's release; let the acquire loop retry.
        Err(_) => false,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.txt");
        locked_write(&target, "hello").unwrap();
        assert_eq!(locked_read(&target).unwrap(), Some("hello".to_string()));
        // No lock or temp residue
        assert!(!lock_path_for(&target).exists());
        assert!(!tmp_path_for(&target).exists());
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(locked_read(&dir.path().join("absent.txt")).unwrap(), None);
    }

    #[test]
    fn held_lock_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("busy.txt");
        fs::write(lock_path_for(&target), now_millis().to_string()).unwrap();
        let err = PathLock::acquire_with(
            &target,
            Duration::from_millis(250),
            Duration::from_secs(30),
        )
        .unwrap_err();
        assert_eq!(err.category(), "file");
    }

    #[test]
    fn stale_lock_is_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("stale.txt");
        let long_ago = now_millis() - 60_000;
        fs::write(lock_path_for(&target), long_ago.to_string()).unwrap();
        let lock = PathLock::acquire_with(
            &target,
            Duration::from_millis(250),
            Duration::from_secs(30),
        );
        assert!(lock.is_ok());
    }

    #[test]
    fn garbage_lock_content_counts_as_stale() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("garbage.txt");
        fs::write(lock_path_for(&target), "not-a-number").unwrap();
        assert!(PathLock::acquire_with(
            &target,
            Duration::from_millis(250),
            Duration::from_secs(30)
        )
        .is_ok());
    }
}
