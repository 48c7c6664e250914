use crate::Result;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

const LOG_TARGET: &str = "     store";

/// Guard that releases the store lock when dropped
#[derive(Debug)]
pub struct StoreLockGuard(File);

impl Drop for StoreLockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.unlock() {
            log::warn!(target: LOG_TARGET, "Could not unlock store: {e:#}");
        }
    }
}

/// Acquire the exclusive store lock in `store_dir`, waiting for other writers to finish
pub async fn acquire_store_lock(store_dir: &Path) -> Result<StoreLockGuard> {
    let lock_path = store_dir.join("store.lock");

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening store lock file at '{}'", lock_path.display()))?;

    // May block for as long as another writer holds the lock
    let file = tokio::task::spawn_blocking(move || {
        file.lock_exclusive()
            .into_app_err_with(|| format!("acquiring exclusive lock on store at '{}'", lock_path.display()))?;
        log::debug!(target: LOG_TARGET, "Acquired store lock at '{}'", lock_path.display());
        Ok::<_, ohno::AppError>(file)
    })
    .await
    .into_app_err("lock task panicked")??;

    Ok(StoreLockGuard(file))
}
