use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, ScopeError};

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Source text, either mapped or read into memory. UTF-8 is checked once
/// when the file is read.
#[derive(Debug)]
pub enum FileContent {
    Mapped(Mmap),
    Buffered(String),
}

impl AsRef<str> for FileContent {
    fn as_ref(&self) -> &str {
        match self {
            // Validated by `read_source`
            FileContent::Mapped(mmap) => std::str::from_utf8(mmap).unwrap_or(""),
            FileContent::Buffered(s) => s.as_str(),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ScopeError + '_ {
    move |source| ScopeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_source<P: AsRef<Path>>(path: P) -> Result<FileContent> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(io_error(path))?;

    if metadata.len() > MMAP_THRESHOLD {
        // Use memory mapping for large files
        let file = File::open(path).map_err(io_error(path))?;

        // Safety: We're only reading the file, not modifying it
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_error(path))?;

        if std::str::from_utf8(&mmap).is_err() {
            return Err(ScopeError::InvalidUtf8 {
                path: path.to_path_buf(),
            });
        }

        Ok(FileContent::Mapped(mmap))
    } else {
        // Read small files into memory
        let bytes = std::fs::read(path).map_err(io_error(path))?;
        let content = String::from_utf8(bytes).map_err(|_| ScopeError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        Ok(FileContent::Buffered(content))
    }
}
