//! 文件系统 Provider trait
//!
//! 抽象 open/save 流程需要的文件操作，便于测试时替换后端

use std::io;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    NotAFile(PathBuf),
    NotADirectory(PathBuf),
    Decoding { path: PathBuf, source: Utf8Error },
}

impl FileError {
    /// Attaches the path to the common io error kinds.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
            _ => FileError::Io(err),
        }
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::PermissionDenied(p) => write!(f, "Permission denied: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
            FileError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            FileError::Decoding { path, source } => {
                write!(f, "{} is not valid UTF-8: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(e) => Some(e),
            FileError::Decoding { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

/// Decodes loaded file contents as UTF-8.
pub fn decode_utf8(path: &Path, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| FileError::Decoding {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })
}

/// A filesystem location picked in a file chooser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { path, name, is_dir }
    }
}

pub trait FileProvider {
    /// Reads the whole file.
    fn load_contents(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replaces the file's contents, creating it when absent.
    fn replace_contents(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Opens the file read-write, creating or truncating it, and writes nothing.
    fn replace_readwrite(&self, path: &Path) -> Result<()>;

    /// Directory listing, directories first, then by case-insensitive name.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}
