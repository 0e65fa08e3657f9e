use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;
use crate::scheduler::TransformOutcome;

/// Commits one resolved obligation to its destination path.
///
/// Success writes the rewritten text; failure is logged and the original
/// content is written instead, so the destination tree is always complete.
/// Returns `true` when the rewritten text was committed.
pub fn commit(
    dest_root: &Path,
    relative_path: &Path,
    outcome: &TransformOutcome,
    original: &str,
) -> Result<bool> {
    let dest_path = dest_root.join(relative_path);
    match outcome {
        TransformOutcome::Success(text) => {
            write_atomic(&dest_path, text.as_bytes())?;
            Ok(true)
        }
        TransformOutcome::Failure(detail) => {
            log::warn!(
                "rewrite of {} failed: {detail}; keeping original content",
                relative_path.display()
            );
            write_atomic(&dest_path, original.as_bytes())?;
            Ok(false)
        }
    }
}

/// Writes to a uniquely named sibling temp file, then renames into place, so
/// a crash mid-write never leaves a truncated destination file.
fn write_atomic(dest_path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = temp_sibling(dest_path);
    fs::write(&tmp_path, bytes)?;
    if let Err(err) = fs::rename(&tmp_path, dest_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(())
}

fn temp_sibling(dest_path: &Path) -> PathBuf {
    let name = dest_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    dest_path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn success_writes_the_rewritten_text() {
        let dest = TempDir::new().expect("dest");
        fs::create_dir_all(dest.path().join("src")).expect("mkdir");

        let transformed = commit(
            dest.path(),
            Path::new("src/Main.java"),
            &TransformOutcome::Success("class Main { /* modern */ }".to_string()),
            "class Main {}",
        )
        .expect("commit");

        assert!(transformed);
        assert_eq!(
            fs::read_to_string(dest.path().join("src/Main.java")).expect("read"),
            "class Main { /* modern */ }"
        );
    }

    #[test]
    fn failure_falls_back_to_the_original_content() {
        let dest = TempDir::new().expect("dest");

        let transformed = commit(
            dest.path(),
            Path::new("app.js"),
            &TransformOutcome::Failure("remote error".to_string()),
            "const x = 1;",
        )
        .expect("commit");

        assert!(!transformed);
        assert_eq!(
            fs::read_to_string(dest.path().join("app.js")).expect("read"),
            "const x = 1;"
        );
    }

    #[test]
    fn commit_replaces_an_existing_file() {
        let dest = TempDir::new().expect("dest");
        fs::write(dest.path().join("pom.xml"), "placeholder").expect("write");

        commit(
            dest.path(),
            Path::new("pom.xml"),
            &TransformOutcome::Success("<project/>".to_string()),
            "old",
        )
        .expect("commit");

        assert_eq!(
            fs::read_to_string(dest.path().join("pom.xml")).expect("read"),
            "<project/>"
        );
    }

    #[test]
    fn no_temp_files_survive_a_commit() {
        let dest = TempDir::new().expect("dest");
        commit(
            dest.path(),
            Path::new("a.js"),
            &TransformOutcome::Success("done".to_string()),
            "orig",
        )
        .expect("commit");

        let leftovers: Vec<_> = fs::read_dir(dest.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "stray temp files: {leftovers:?}");
    }
}
