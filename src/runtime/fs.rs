//! File system operations.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn open_impl(&self, path: &Path) -> Result<File> {
        File::open(path).with_context(|| format!("Failed to open file {}", path.display()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }
}
