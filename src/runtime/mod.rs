//! Runtime abstraction for system operations.
//!
//! Side effects on the local machine go through the [`Runtime`] trait so the
//! publishing flow can be tested without touching the file system.

mod fs;

use anyhow::Result;
use std::fs::File;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    /// Open a file for reading. The handle is closed when dropped.
    fn open(&self, path: &Path) -> Result<File>;

    fn is_file(&self, path: &Path) -> bool;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn open(&self, path: &Path) -> Result<File> {
        self.open_impl(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }
}
