use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::core::errors::{CreateConfigError, Result};
use crate::core::traits::file_store::{CopyResult, FileStore};

/// File store rooted at a directory on the local filesystem.
///
/// Destinations are opened with `create_new`, so an existing file is
/// reported instead of overwritten even if it appears after `exists`.
/// Only content is copied; the new file gets default permissions.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CreateConfigError::DirectoryNotFound { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn copy_new(&self, from: &Path, to: &Path) -> Result<CopyResult> {
        let from = self.resolve(from);
        let to = self.resolve(to);
        let copy_failed = |source: io::Error| CreateConfigError::CopyFailed {
            from: from.clone(),
            to: to.clone(),
            source,
        };

        let mut reader = File::open(&from).map_err(&copy_failed)?;
        let mut writer = match OpenOptions::new().write(true).create_new(true).open(&to) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(CopyResult::AlreadyExists),
            Err(e) => return Err(copy_failed(e)),
        };

        let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());

        if let Err(e) = copied {
            // Remove the half-written file we created so a re-run retries it.
            drop(writer);
            let _ = fs::remove_file(&to);
            return Err(copy_failed(e));
        }

        Ok(CopyResult::Created)
    }
}
