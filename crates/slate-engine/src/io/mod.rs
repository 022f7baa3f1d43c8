use crate::models::{Presentation, ValidationError};
use crate::parsing::parse_str;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension a presentation file must carry
pub const PRESENTATION_EXTENSION: &str = "md";

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File does not exist: {0}")]
    NotFound(PathBuf),
    #[error("Path is a directory, not a file: {0}")]
    NotAFile(PathBuf),
    #[error("File must have .md extension: {0}")]
    WrongExtension(PathBuf),
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures that stop a presentation from being shown
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    File(#[from] FileError),
    #[error("Invalid presentation: {0}")]
    Validation(#[from] ValidationError),
}

/// Check that `path` names an existing regular `.md` file
pub fn validate_file(path: &Path) -> Result<(), FileError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(FileError::Io(e)),
    };

    if !metadata.is_file() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }

    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PRESENTATION_EXTENSION));
    if !has_extension {
        return Err(FileError::WrongExtension(path.to_path_buf()));
    }

    Ok(())
}

/// Read and parse a document. Only an unreadable file is an error; invalid
/// UTF-8 is replaced with U+FFFD.
pub fn parse_file(path: &Path) -> Result<Presentation, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_str(&text, path))
}

/// Startup path: validate the file, parse it and admit the result.
pub fn load_presentation(path: &Path) -> Result<Presentation, LoadError> {
    validate_file(path)?;
    let presentation = parse_file(path)?;
    presentation.validate()?;
    log::info!(
        "Loaded {} with {} slides",
        path.display(),
        presentation.slide_count()
    );
    Ok(presentation)
}

/// Write `content` to a file that must not exist yet
pub fn write_new_file(path: &Path, content: &str) -> Result<(), FileError> {
    if path.exists() {
        return Err(FileError::AlreadyExists(path.to_path_buf()));
    }

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;
    Ok(())
}
