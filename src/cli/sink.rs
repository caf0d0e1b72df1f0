//! [`crate::driver::OutputSink`] implementation that writes to the real
//! filesystem, creating parent directories on demand.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::driver::OutputSink;
use crate::error::Result;

/// Writes every output under a fixed root directory, creating the needed
/// subdirectories the first time a path under them is requested.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl OutputSink for FsSink {
    fn create(&mut self, relative_path: &str) -> Result<Box<dyn Write>> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Box::new(File::create(path)?))
    }
}
