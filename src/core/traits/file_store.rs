use std::path::Path;

use crate::core::errors::Result;

/// Result of a create-new copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyResult {
    Created,
    /// The destination already existed; nothing was written.
    AlreadyExists,
}

/// Port for the file operations the materializer needs.
///
/// Paths are relative to the store's root directory.
pub trait FileStore {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Copy `from` to `to`, never overwriting an existing `to`.
    fn copy_new(&self, from: &Path, to: &Path) -> Result<CopyResult>;
}
