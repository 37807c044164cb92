use crate::error::CodegenError;
use crate::generator::GeneratedFile;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to a destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Unchanged,
}

/// Persists rendered artifacts, creating parent directories as needed.
///
/// Existing files are overwritten; there is no merging with earlier output.
pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_if_changed(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<WriteOutcome, CodegenError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let outcome = if path.exists() {
            let existing = fs::read_to_string(path)?;
            if existing == content {
                tracing::debug!(path = %path.display(), "unchanged");
                return Ok(WriteOutcome::Unchanged);
            }
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };

        fs::write(path, content)?;
        tracing::info!(path = %path.display(), ?outcome, "wrote file");
        Ok(outcome)
    }

    /// Write every file in order.
    ///
    /// Stops at the first IO failure; files written before it stay on disk.
    pub fn write_all(
        &self,
        files: &[GeneratedFile],
    ) -> Result<Vec<(PathBuf, WriteOutcome)>, CodegenError> {
        files
            .iter()
            .map(|file| {
                self.write_if_changed(&file.path, &file.content)
                    .map(|outcome| (file.path.clone(), outcome))
            })
            .collect()
    }

    pub fn create_directories<I, P>(&self, dirs: I) -> Result<(), CodegenError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for dir in dirs {
            fs::create_dir_all(dir.as_ref())?;
        }
        Ok(())
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
