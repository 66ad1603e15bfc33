use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Document store abstraction for reading and writing configuration files
pub trait DocumentStore {
    /// Check if a document exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a document's full text; `None` means the path is absent
    fn read(&self, path: &Path) -> io::Result<Option<String>>;

    /// Write a document's full text, replacing any previous content
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl DocumentStore for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Mock file system for testing
///
/// Interior mutability so one store instance can back several sequential
/// editors, the way a single workspace tree does during a tool run.
pub struct MockFileSystem {
    files: RefCell<HashMap<PathBuf, String>>,
    read_only: Cell<bool>,
    writes: Cell<usize>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: RefCell::new(HashMap::new()),
            read_only: Cell::new(false),
            writes: Cell::new(0),
        }
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Current contents of a stored document, if any
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Number of writes accepted so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// When set, every write fails with `PermissionDenied`
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.read_only.get() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("store is read-only: {}", path.display()),
            ));
        }
        self.writes.set(self.writes.get() + 1);
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
