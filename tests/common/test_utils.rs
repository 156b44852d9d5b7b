//! Test utilities for temporary file handling
//!
//! Provides temporary input files with automatic cleanup and support for
//! environment variables (TMPDIR, TEMP, TMP).

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Get the temporary directory, respecting environment variables
///
/// Checks in order: TMPDIR, TEMP, TMP, then falls back to std::env::temp_dir()
pub fn get_temp_dir() -> PathBuf {
    env::var("TMPDIR")
        .or_else(|_| env::var("TEMP"))
        .or_else(|_| env::var("TMP"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

/// Generate a unique test file path
///
/// Includes the process id so parallel test binaries never collide
pub fn test_temp_path(test_name: &str, extension: &str) -> PathBuf {
    let counter = TEST_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "edars_test_{}_{}_{}.{}",
        test_name,
        std::process::id(),
        counter,
        extension
    );
    get_temp_dir().join(filename)
}

/// RAII wrapper for temporary test files with automatic cleanup
pub struct TempTestFile {
    path: PathBuf,
}

impl TempTestFile {
    pub fn new(test_name: &str, extension: &str) -> Self {
        TempTestFile {
            path: test_temp_path(test_name, extension),
        }
    }

    /// Create the file with the given contents
    pub fn with_contents(test_name: &str, extension: &str, contents: &str) -> Self {
        let temp_file = TempTestFile::new(test_name, extension);
        let mut file = File::create(temp_file.path()).expect("Failed to create test file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write test file");
        temp_file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTestFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Helper to create a test CSV file with given data
pub fn create_test_csv(test_name: &str, headers: &[&str], rows: &[Vec<&str>]) -> TempTestFile {
    let mut contents = String::new();
    contents.push_str(&headers.join(","));
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join(","));
        contents.push('\n');
    }
    TempTestFile::with_contents(test_name, "csv", &contents)
}
