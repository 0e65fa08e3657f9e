use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjectError>;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to clone repository: {0}")]
    CloneFailed(String),

    #[error("Subdirectory '{0}' not found in repository")]
    MissingSubdirectory(String),

    #[error("Unsafe archive entry path: {0}")]
    UnsafeArchivePath(String),
}
