// File access: resolve the upload path, learn its size and open it.
// The handle lives in `LocalFile` and is closed when that value (or the
// reader it was turned into) is dropped.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// An opened local file together with what the uploader needs to know
/// about it.
#[derive(Debug)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
    file: File,
}

impl LocalFile {
    /// Stat and open `path`. A missing entry, or one that is not a
    /// regular file, is `FileNotFound`; any other failure is `FileOpen`.
    pub fn open(path: &Path) -> Result<Self> {
        let metadata = match std::fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(Error::FileNotFound(path.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(Error::FileOpen {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let name = attachment_name(path);
        debug!(path = %path.display(), name = %name, size = metadata.len(), "Opened file");

        Ok(LocalFile {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name the document will carry on the remote side.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes as reported by the filesystem when opened.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

/// Final segment of `path`, with every directory component stripped.
pub fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
