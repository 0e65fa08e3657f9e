use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;

/// Zips a finished destination tree into a uniquely named artifact under
/// `out_dir` and returns the archive path.
///
/// The destination tree must be complete and stable before this is called;
/// the pipeline guarantees that by resolving every obligation first.
pub fn create_zip_archive(source_dir: &Path, out_dir: &Path) -> Result<PathBuf> {
    let zip_name = format!("refactored_{}.zip", Uuid::new_v4().simple());
    let zip_path = out_dir.join(zip_name);

    let file = File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    let mut buffer = Vec::new();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let name = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
            continue;
        }
        zip.start_file(name, options)?;
        buffer.clear();
        File::open(entry.path())?.read_to_end(&mut buffer)?;
        zip.write_all(&buffer)?;
    }

    zip.finish()?;
    Ok(zip_path)
}
