//! File-system capabilities exposed to renderer contexts.
//!
//! The message box window only ever reads; the login window also writes the
//! credentials file and checks whether it exists.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Read-only file access.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadFiles;

impl ReadFiles {
    /// Read a UTF-8 text file.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<String> {
        read_text(path.as_ref()).await
    }
}

/// Read, write and existence checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadWriteFiles;

impl ReadWriteFiles {
    /// Read a UTF-8 text file.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<String> {
        read_text(path.as_ref()).await
    }

    /// Replace the contents of `path`, creating the file if needed.
    pub async fn write(&self, path: impl AsRef<Path>, value: impl AsRef<[u8]>) -> Result<()> {
        let path = path.as_ref();
        tokio::fs::write(path, value).await?;
        debug!(path = %path.display(), "Wrote file");
        Ok(())
    }

    /// Whether `path` exists. I/O errors count as "does not exist".
    pub async fn exists(&self, path: impl AsRef<Path>) -> bool {
        tokio::fs::try_exists(path.as_ref()).await.unwrap_or(false)
    }
}

async fn read_text(path: &Path) -> Result<String> {
    let content = tokio::fs::read_to_string(path).await?;
    debug!(path = %path.display(), bytes = content.len(), "Read file");
    Ok(content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn write_then_read_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let files = ReadWriteFiles;

        assert!(!files.exists(&path).await);
        files.write(&path, r#"{"username":"u"}"#).await.unwrap();
        assert!(files.exists(&path).await);
        assert_eq!(files.read(&path).await.unwrap(), r#"{"username":"u"}"#);
        assert_eq!(ReadFiles.read(&path).await.unwrap(), r#"{"username":"u"}"#);
    }

    #[tokio::test]
    async fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReadFiles.read(dir.path().join("missing.txt")).await;
        assert!(matches!(err, Err(Error::Io(_))));
    }
}
