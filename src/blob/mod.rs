//! File-backed byte blobs with optional release-after-read.
//!
//! A [`Blob`] owns exactly one file. Its status is derived from the filesystem on every
//! query: the blob is live while the file exists and released once it is gone. Released
//! is terminal.

/// Blob error types.
pub mod error;


pub use error::{BlobError, BlobResult};

use std::borrow::Cow;
use std::fmt;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::ops::Add;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

/// A stored byte sequence backed by one file.
///
/// Content is written once, at construction. Dropping a live blob releases it; errors on
/// that path are discarded, so call [`Blob::release`] when the outcome matters.
#[derive(Debug)]
pub struct Blob {
    id: Uuid,
    path: PathBuf,
    release_after_read: bool,
}

impl Blob {
    /// Writes `content` to `path` (overwriting) and returns a live blob.
    pub fn new(
        content: &[u8],
        id: Uuid,
        path: PathBuf,
        release_after_read: bool,
    ) -> BlobResult<Self> {
        {
            let mut file = File::create(&path)?;
            file.write_all(content)?;
        }

        debug!(%id, size = content.len(), "Wrote blob");

        Ok(Self {
            id,
            path,
            release_after_read,
        })
    }

    /// Returns the blob identifier (also its file name).
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the backing file path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a successful read also releases the blob.
    #[inline]
    pub fn release_after_read(&self) -> bool {
        self.release_after_read
    }

    /// Returns `true` once the backing file no longer exists.
    #[inline]
    pub fn is_released(&self) -> bool {
        !self.path.exists()
    }

    /// Reads the full content, releasing the blob afterwards if `release_after_read` is set.
    pub fn read(&self) -> BlobResult<Vec<u8>> {
        self.ensure_live()?;

        let content = fs::read(&self.path).map_err(|e| self.map_missing(e))?;

        if self.release_after_read {
            self.release()?;
        }

        Ok(content)
    }

    /// Deletes the backing file. Fails with [`BlobError::AlreadyReleased`] on a second call.
    pub fn release(&self) -> BlobResult<()> {
        self.ensure_live()?;

        fs::remove_file(&self.path).map_err(|e| self.map_missing(e))?;

        debug!(id = %self.id, "Released blob");
        Ok(())
    }

    /// Reads this blob, then `other`, and returns the concatenated bytes.
    ///
    /// Both operands follow their own release semantics. No new blob is written.
    pub fn concat<T: ByteSource + ?Sized>(&self, other: &T) -> BlobResult<Vec<u8>> {
        let mut out = self.read()?;
        out.extend_from_slice(&other.read_bytes()?);
        Ok(out)
    }

    fn ensure_live(&self) -> BlobResult<()> {
        if self.is_released() {
            return Err(BlobError::AlreadyReleased { id: self.id });
        }
        Ok(())
    }

    // The file can vanish between the status check and the syscall.
    fn map_missing(&self, err: std::io::Error) -> BlobError {
        if err.kind() == ErrorKind::NotFound {
            BlobError::AlreadyReleased { id: self.id }
        } else {
            BlobError::Io(err)
        }
    }
}

impl Drop for Blob {
    fn drop(&mut self) {
        if self.is_released() {
            return;
        }
        if let Err(e) = self.release() {
            debug!(id = %self.id, error = %e, "Ignoring release failure on drop");
        }
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Blob uuid=\"{}\"", self.id)?;
        if self.is_released() {
            f.write_str(" released")?;
        }
        f.write_str(">")
    }
}

impl TryFrom<&Blob> for Vec<u8> {
    type Error = BlobError;

    fn try_from(blob: &Blob) -> BlobResult<Self> {
        blob.read()
    }
}

impl<T: ByteSource + ?Sized> Add<&T> for &Blob {
    type Output = BlobResult<Vec<u8>>;

    fn add(self, rhs: &T) -> Self::Output {
        self.concat(rhs)
    }
}

/// Anything that can supply bytes to a blob concatenation.
pub trait ByteSource {
    /// Returns the bytes, consuming a blob's read if it releases after read.
    fn read_bytes(&self) -> BlobResult<Cow<'_, [u8]>>;
}

impl ByteSource for Blob {
    fn read_bytes(&self) -> BlobResult<Cow<'_, [u8]>> {
        self.read().map(Cow::Owned)
    }
}

impl ByteSource for [u8] {
    fn read_bytes(&self) -> BlobResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    fn read_bytes(&self) -> BlobResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl ByteSource for Vec<u8> {
    fn read_bytes(&self) -> BlobResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn read_bytes(&self) -> BlobResult<Cow<'_, [u8]>> {
        (**self).read_bytes()
    }
}
