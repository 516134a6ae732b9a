//! 本地文件系统 Provider

use super::provider::{DirEntry, FileError, FileProvider, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;

#[derive(Debug, Default)]
pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FileProvider for LocalFileProvider {
    fn load_contents(&self, path: &Path) -> Result<Vec<u8>> {
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read(path).map_err(|e| FileError::from_io(path, e))
    }

    fn replace_contents(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::write(path, contents).map_err(|e| FileError::from_io(path, e))
    }

    fn replace_readwrite(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map(drop)
            .map_err(|e| FileError::from_io(path, e))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FileError::NotADirectory(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FileError::from_io(path, e))? {
            let entry = entry?;
            // Follows symlinks so a link to a directory can be entered.
            let is_dir = entry.path().is_dir();
            entries.push(DirEntry::new(entry.path(), is_dir));
        }

        entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/file/local.rs"]
mod tests;
