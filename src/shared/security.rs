use crate::shared::error::InspectError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of any file this tool reads (100 MB): manifests,
/// kubeconfigs, certificates and token files.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a file as UTF-8 after refusing symlinks, non-regular files and
/// files larger than [`MAX_FILE_SIZE`].
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Human label used in errors (e.g. "kubeconfig")
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| InspectError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(InspectError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the target file instead of the link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(InspectError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(InspectError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes",
                file_description,
                metadata.len(),
                MAX_FILE_SIZE
            ),
            hint: "Split the file or remove unrelated content".to_string(),
        }
        .into());
    }

    fs::read_to_string(path).map_err(|e| {
        InspectError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Reads a file as raw bytes with the same checks as [`read_regular_file`].
/// Used for PEM material referenced from a kubeconfig.
pub fn read_regular_file_bytes(path: &Path, file_description: &str) -> Result<Vec<u8>> {
    read_regular_file(path, file_description).map(String::into_bytes)
}

/// Checks that `path` is a real directory (not a symlink to one).
pub fn validate_directory(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| InspectError::InvalidManifestDir {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(InspectError::SecurityError {
            path: path.to_path_buf(),
            reason: "Manifest directory is a symbolic link".to_string(),
            hint: "Pass the resolved directory path".to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(InspectError::InvalidManifestDir {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
