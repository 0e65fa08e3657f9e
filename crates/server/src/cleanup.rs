use std::path::Path;
use std::time::{Duration, SystemTime};

/// Removes artifacts left behind by earlier runs.
///
/// Session state lives in memory, so every per-job directory under the temp
/// base is stale after a restart and gets removed. Archives stay downloadable
/// until they age past `max_age`.
pub fn purge_stale(temp_base: &Path, max_age: Duration) -> std::io::Result<()> {
    if !temp_base.exists() {
        return Ok(());
    }

    for entry in std::fs::read_dir(temp_base)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();

        if path.is_dir() {
            if let Err(err) = std::fs::remove_dir_all(&path) {
                log::debug!("startup cleanup skipped {}: {err}", path.display());
            }
            continue;
        }

        if !path.extension().is_some_and(|ext| ext == "zip") {
            continue;
        }
        let expired = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .is_some_and(|age| age > max_age);
        if expired {
            if let Err(err) = std::fs::remove_file(&path) {
                log::debug!("startup cleanup skipped {}: {err}", path.display());
            }
        }
    }

    Ok(())
}
