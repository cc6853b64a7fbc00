use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::io;
#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Arc, RwLock};

/// Trait for filesystem operations to enable testing with mocks
pub trait FileSystem: Send + Sync {
    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read raw file contents, without requiring valid UTF-8
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write string contents to file, replacing it
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Open a file for appending, creating it when missing
    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + '_>>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation using std::fs
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory: {:?}", parent))?;
        }

        std::fs::write(path, contents).with_context(|| format!("Failed to write file: {:?}", path))
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + '_>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open file for appending: {:?}", path))?;

        Ok(Box::new(file))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Mock filesystem implementation for testing (in-memory)
#[cfg(test)]
pub struct MockFileSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    read_only: Arc<RwLock<HashMap<PathBuf, ()>>>,
}

#[cfg(test)]
impl MockFileSystem {
    /// Create new empty mock filesystem
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            read_only: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get captured file contents for testing assertions
    pub fn get_file_contents(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Check if file was written
    pub fn has_file(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    /// Make every later write or append to `path` fail
    pub fn set_read_only(&self, path: &Path) {
        self.read_only
            .write()
            .unwrap()
            .insert(path.to_path_buf(), ());
    }

    fn is_read_only(&self, path: &Path) -> bool {
        self.read_only.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .with_context(|| format!("File not found in mock filesystem: {:?}", path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_to_string(path).map(String::into_bytes)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if self.is_read_only(path) {
            anyhow::bail!("Permission denied in mock filesystem: {:?}", path);
        }

        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + '_>> {
        Ok(Box::new(MockAppendWriter {
            fs: self,
            path: path.to_path_buf(),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}

/// Appends written bytes to a file held by [`MockFileSystem`]
#[cfg(test)]
struct MockAppendWriter<'a> {
    fs: &'a MockFileSystem,
    path: PathBuf,
}

#[cfg(test)]
impl Write for MockAppendWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fs.is_read_only(&self.path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{:?} is read-only", self.path),
            ));
        }

        let mut files = self.fs.files.write().unwrap();
        files
            .entry(self.path.clone())
            .or_default()
            .push_str(&String::from_utf8_lossy(buf));

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
