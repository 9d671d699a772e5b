//! Per-unit locks.
//!
//! Two runs gating the same unit id serialize on an exclusive advisory lock
//! over `<locks_dir>/<id>.lock`. Different ids never contend.
//!
//! The OS owns the lock: it is released when the guard's file handle closes,
//! including when the holding process dies, so a crashed run never leaves a
//! lock behind. Lock files are never deleted; unlinking a file another run
//! has open would let a third run lock a fresh inode alongside it.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use fs4::fs_std::FileExt;
use quill_config::LockConfig;

/// Holds the lock until dropped.
#[derive(Debug)]
pub struct UnitLockGuard {
    _file: File,
}

/// Wait for the lock on `id`, retrying until `config.wait_timeout_secs` elapses.
///
/// `id` must already be a validated unit id; it is used as a file name.
pub async fn acquire(
    locks_dir: &Path,
    id: &str,
    config: &LockConfig,
) -> anyhow::Result<UnitLockGuard> {
    std::fs::create_dir_all(locks_dir)
        .with_context(|| format!("failed to create {}", locks_dir.display()))?;
    let lock_path = locks_dir.join(format!("{id}.lock"));
    let timeout = Duration::from_secs(config.wait_timeout_secs);
    let retry_delay = Duration::from_millis(config.retry_delay_ms);
    let started = Instant::now();

    loop {
        if let Some(guard) = try_acquire(&lock_path)? {
            return Ok(guard);
        }
        if started.elapsed() >= timeout {
            return Err(match holder_pid(&lock_path) {
                Some(pid) => anyhow::anyhow!("unit '{id}' is locked by another run (pid {pid})"),
                None => anyhow::anyhow!("unit '{id}' is locked by another run"),
            });
        }
        tracing::debug!(id, "unit lock busy, retrying");
        tokio::time::sleep(retry_delay).await;
    }
}

/// `Ok(None)` when another handle holds the lock.
fn try_acquire(lock_path: &Path) -> anyhow::Result<Option<UnitLockGuard>> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path)
        .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;

    let locked = FileExt::try_lock_exclusive(&file)
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;
    if !locked {
        return Ok(None);
    }

    // The pid is informational only; contenders quote it in their error.
    file.set_len(0)?;
    file.rewind()?;
    writeln!(file, "{}", std::process::id())?;
    file.flush()?;

    Ok(Some(UnitLockGuard { _file: file }))
}

fn holder_pid(lock_path: &Path) -> Option<u32> {
    let mut contents = String::new();
    File::open(lock_path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .ok()?;
    contents.trim().parse().ok()
}
