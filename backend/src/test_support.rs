//! Test utilities for the storefront crate.
//!
//! Shared by unit tests in `src/` and, through the `test-support` feature, by
//! integration tests in `tests/`.

pub mod registration;

pub mod cap_fs {
    //! Capability-safe file helpers for tests that inspect the product file.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from opening the parent directory or reading.
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must include a file name")
        })?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(file_name))
    }

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from opening the parent directory or writing.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must include a file name")
        })?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(file_name), contents)
    }
}
