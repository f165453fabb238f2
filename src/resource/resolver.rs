//! Sandboxed lookup of files under the static root

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::error::{ResourceError, ResourceResult};
use super::mime::{type_from_file_name, DEFAULT_FILE_EXT};

/// A file loaded for one request
#[derive(Debug, Clone)]
pub struct Resource {
    /// Requested path, as given by the client
    pub title: String,

    /// Full file contents
    pub body: Vec<u8>,

    /// Resolved MIME type
    pub mime_type: &'static str,

    /// Modification time reported by the filesystem
    pub last_modified: SystemTime,
}

/// Maps request paths to files below a fixed root directory
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    root: PathBuf,
}

/// Reject absolute paths and any `..`, before touching the filesystem.
///
/// This is a string check only; symlinks inside the root are followed.
pub fn check_sandbox(title: &str) -> ResourceResult<()> {
    let absolute = title.chars().next().is_some_and(std::path::is_separator);
    if absolute || title.contains("..") {
        return Err(ResourceError::ForbiddenPath(title.to_string()));
    }
    Ok(())
}

/// Name to look up for a title: the title itself, or the title with the
/// default extension when it has no `.` at all.
pub fn file_name_for(title: &str) -> String {
    if title.contains('.') {
        title.to_string()
    } else {
        format!("{title}{DEFAULT_FILE_EXT}")
    }
}

impl ResourceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the resource named by `title`, relative to the root.
    pub async fn resolve(&self, title: &str) -> ResourceResult<Resource> {
        check_sandbox(title)?;

        let name = file_name_for(title);
        let path = self.root.join(&name);

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
            tracing::error!(file = %path.display(), error = %e, "Stat failed");
            ResourceError::ResourceNotFound(title.to_string())
        })?;
        let last_modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let mime_type = type_from_file_name(&name);

        tracing::info!(
            title = %title,
            file = %path.display(),
            mime = %mime_type,
            modified = %format_mod_time(last_modified),
            "Read resource"
        );

        let body = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!(file = %path.display(), error = %e, "Read failed");
            ResourceError::ResourceNotFound(title.to_string())
        })?;

        Ok(Resource {
            title: title.to_string(),
            body,
            mime_type,
            last_modified,
        })
    }
}

fn format_mod_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_rejects_traversal() {
        assert!(check_sandbox("../secret").is_err());
        assert!(check_sandbox("a/../../b").is_err());
        assert!(check_sandbox("notes..txt").is_err());
        assert!(check_sandbox("/etc/passwd").is_err());
    }

    #[test]
    fn test_sandbox_allows_relative_paths() {
        assert!(check_sandbox("schedule").is_ok());
        assert!(check_sandbox("rooms/kitchen.json").is_ok());
        assert!(check_sandbox("").is_ok());
    }

    #[test]
    fn test_default_extension_appended() {
        assert_eq!(file_name_for("schedule"), "schedule.txt");
        assert_eq!(file_name_for("schedule.json"), "schedule.json");
        assert_eq!(file_name_for(""), ".txt");
    }

    #[tokio::test]
    async fn test_forbidden_before_filesystem() {
        let resolver = ResourceResolver::new("/definitely/not/a/dir");
        let err = resolver.resolve("../x").await.unwrap_err();
        assert_eq!(err, ResourceError::ForbiddenPath("../x".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let resolver = ResourceResolver::new("/definitely/not/a/dir");
        let err = resolver.resolve("nothing").await.unwrap_err();
        assert_eq!(err, ResourceError::ResourceNotFound("nothing".to_string()));
    }
}
