use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::process::Command;
use zip::ZipArchive;

use crate::error::{ProjectError, Result};
use crate::github::parse_github_url;

/// Shallow-clones a repository and returns the job's source root, scoped to
/// the URL's subdirectory when one is present.
///
/// Clone failures and missing subdirectories are job-fatal; the caller
/// reports them upward without retrying.
pub async fn clone_repo(github_url: &str, temp_dir: &Path) -> Result<PathBuf> {
    let (repo_url, subdirectory) = parse_github_url(github_url);
    log::info!("cloning {repo_url} into {}", temp_dir.display());

    let output = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg(&repo_url)
        .arg(temp_dir)
        .output()
        .await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ProjectError::CloneFailed(stderr));
    }

    if subdirectory.is_empty() {
        return Ok(temp_dir.to_path_buf());
    }
    let source_root = temp_dir.join(&subdirectory);
    if !source_root.is_dir() {
        return Err(ProjectError::MissingSubdirectory(subdirectory));
    }
    Ok(source_root)
}

/// Extracts an uploaded zip archive into the job's intake directory.
///
/// Entry paths are sanitized before use: absolute paths and parent-directory
/// components are rejected outright, so a crafted archive cannot write
/// outside the target.
pub fn extract_zip(archive: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let entry_path = sanitize_entry_path(entry.name())?;
        let destination = target.join(&entry_path);

        if entry.name().ends_with('/') {
            fs::create_dir_all(&destination)?;
            continue;
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut output = File::create(&destination)?;
        io::copy(&mut entry, &mut output)?;
    }

    Ok(())
}

fn sanitize_entry_path(entry: &str) -> Result<PathBuf> {
    let path = Path::new(entry);
    if path.is_absolute() {
        return Err(ProjectError::UnsafeArchivePath(entry.to_string()));
    }
    let mut sanitized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => sanitized.push(part),
            Component::CurDir => {}
            _ => return Err(ProjectError::UnsafeArchivePath(entry.to_string())),
        }
    }
    Ok(sanitized)
}
