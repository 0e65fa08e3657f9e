use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::classify::{classify, FileAction, LanguageMode};
use crate::error::{PipelineError, Result};

/// Path segments never walked into (version-control metadata, dependency
/// caches).
pub const EXCLUDED_SEGMENTS: &[&str] = &[".git", "node_modules"];

/// A single file awaiting transformation.
///
/// Created by [`walk`], consumed exactly once by the scheduler. The content
/// is held in memory and doubles as the fallback copy if the rewrite fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformObligation {
    /// Path relative to both the source and destination roots.
    pub relative_path: PathBuf,
    /// Full original text of the file.
    pub content: String,
    /// File name only, passed to the rewrite service as context.
    pub filename: String,
}

/// Walks the source tree, mirroring its directory skeleton into the
/// destination and materializing every COPY-classified file immediately.
///
/// Returns the TRANSFORM obligations in deterministic (name-sorted) walk
/// order. Files that cannot be read as UTF-8 text are copied verbatim no
/// matter how they classify. Symlinks are followed, so their target content
/// is materialized like any other file. Directory creation is idempotent.
pub fn walk(
    source_root: &Path,
    dest_root: &Path,
    mode: LanguageMode,
) -> Result<Vec<TransformObligation>> {
    if !source_root.is_dir() {
        return Err(PipelineError::InvalidSourceRoot(
            source_root.display().to_string(),
        ));
    }
    fs::create_dir_all(dest_root)?;

    let mut obligations = Vec::new();
    let walker = WalkDir::new(source_root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.path(), source_root));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source_root)
            .map_err(|_| {
                PipelineError::Other(format!(
                    "walked entry escaped source root: {}",
                    entry.path().display()
                ))
            })?
            .to_path_buf();
        if relative.as_os_str().is_empty() {
            continue;
        }

        let dest_path = dest_root.join(&relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        match read_text(entry.path()) {
            Ok(Some(content)) if classify(&filename, mode) == FileAction::Transform => {
                obligations.push(TransformObligation {
                    relative_path: relative,
                    content,
                    filename,
                });
            }
            Ok(_) => {
                // Text file outside the mode's scope, or binary content.
                fs::copy(entry.path(), &dest_path)?;
            }
            Err(err) => {
                log::debug!(
                    "text read of {} failed ({err}), copying verbatim",
                    entry.path().display()
                );
                fs::copy(entry.path(), &dest_path)?;
            }
        }
    }

    Ok(obligations)
}

/// Reads a file as text, distinguishing "not UTF-8" (`Ok(None)`) from IO
/// failures.
fn read_text(path: &Path) -> std::io::Result<Option<String>> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes).ok())
}

fn is_excluded(path: &Path, root: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    relative.components().any(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            EXCLUDED_SEGMENTS.iter().any(|segment| name == *segment)
        }
        _ => false,
    })
}
