use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;

/// Allocates a fresh, uniquely named working directory under `base`.
///
/// Every job gets its own directories, so two concurrent jobs can never
/// write into the same tree.
pub fn create_temp_dir(base: &Path) -> Result<PathBuf> {
    let dir = base.join(format!("repo_{}", Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
