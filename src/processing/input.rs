use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::processing::sniff::guess_mime;

#[derive(Debug, Clone)]
enum Content {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

/// A file handed to the processor
///
/// Name, size, MIME type and modification time are known up front so size
/// and extension checks can run before any content is read. Disk-backed
/// files are only read once those checks pass.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub last_modified: Option<DateTime<Utc>>,
    content: Content,
}

impl InputFile {
    /// Wrap bytes that are already in memory, e.g. an HTTP upload
    ///
    /// An empty `mime_type` is replaced by a guess from the name.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let name = name.into();
        let mut mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            mime_type = guess_mime(&name).to_string();
        }
        Self {
            size: bytes.len() as u64,
            mime_type,
            last_modified: None,
            content: Content::Memory(bytes),
            name,
        }
    }

    /// Describe a file on disk without reading it
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file's metadata cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        Ok(Self {
            size: metadata.len(),
            mime_type: guess_mime(&name).to_string(),
            last_modified,
            content: Content::Disk(path.to_path_buf()),
            name,
        })
    }

    /// Read the content, stopping after `limit` bytes
    ///
    /// The limit bounds disk reads for files that grew after they were
    /// described; callers pass one byte more than they accept to detect that.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a disk-backed file cannot be read.
    pub fn read_bytes(&self, limit: u64) -> std::io::Result<Vec<u8>> {
        match &self.content {
            Content::Memory(bytes) => Ok(bytes.clone()),
            Content::Disk(path) => {
                let mut bytes = Vec::new();
                std::fs::File::open(path)?
                    .take(limit)
                    .read_to_end(&mut bytes)?;
                Ok(bytes)
            }
        }
    }

    /// Read the content without blocking the runtime, stopping after `limit`
    /// bytes
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a disk-backed file cannot be read.
    pub async fn read_bytes_async(&self, limit: u64) -> std::io::Result<Vec<u8>> {
        match &self.content {
            Content::Memory(bytes) => Ok(bytes.clone()),
            Content::Disk(path) => {
                let mut bytes = Vec::new();
                tokio::fs::File::open(path)
                    .await?
                    .take(limit)
                    .read_to_end(&mut bytes)
                    .await?;
                Ok(bytes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_bytes() {
        let file = InputFile::from_bytes("plate.csv", "", b"a,b\n1,2\n".to_vec());
        assert_eq!(file.size, 8);
        assert_eq!(file.mime_type, "text/csv");
        assert_eq!(file.read_bytes(u64::MAX).unwrap(), b"a,b\n1,2\n");

        let file = InputFile::from_bytes("plate.csv", "text/plain", Vec::new());
        assert_eq!(file.mime_type, "text/plain");
    }

    #[test]
    fn test_from_path_reads_metadata_only() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">s\nACGT\n").unwrap();
        temp.flush().unwrap();

        let file = InputFile::from_path(temp.path()).unwrap();
        assert_eq!(file.size, 8);
        assert_eq!(file.mime_type, "text/x-fasta");
        assert!(file.name.ends_with(".fa"));
        assert!(file.last_modified.is_some());
        assert_eq!(file.read_bytes(u64::MAX).unwrap(), b">s\nACGT\n");
    }

    #[test]
    fn test_read_bytes_stops_at_limit() {
        let mut temp = NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b"hello").unwrap();
        temp.flush().unwrap();

        let file = InputFile::from_path(temp.path()).unwrap();
        temp.write_all(b" world").unwrap();
        temp.flush().unwrap();

        assert_eq!(file.size, 5);
        assert_eq!(file.read_bytes(6).unwrap(), b"hello ");
    }

    #[test]
    fn test_from_path_missing() {
        assert!(InputFile::from_path(Path::new("/nonexistent/reads.fq")).is_err());
    }

    #[tokio::test]
    async fn test_read_bytes_async() {
        let mut temp = NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b"hello").unwrap();
        temp.flush().unwrap();

        let file = InputFile::from_path(temp.path()).unwrap();
        assert_eq!(file.read_bytes_async(64).await.unwrap(), b"hello");
        assert_eq!(file.read_bytes_async(3).await.unwrap(), b"hel");
    }
}
