//! Input-root to output-root path mapping.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Derives output locations by substituting the input-root prefix with the
/// output root, preserving the filename and any sub-structure.
#[derive(Debug, Clone)]
pub struct PathMapper {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl PathMapper {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Map an input file path to its output location.
    ///
    /// Fails if `input` does not live under the input root.
    pub fn map(&self, input: &Path) -> Result<PathBuf, PipelineError> {
        let relative =
            input
                .strip_prefix(&self.input_root)
                .map_err(|_| PipelineError::OutputPath {
                    path: input.to_path_buf(),
                    message: format!("not under input root {}", self.input_root.display()),
                })?;
        Ok(self.output_root.join(relative))
    }

    /// Map an input path and create the parent directory of the result.
    ///
    /// Discovery can surface nested files, so mapped parents may not exist
    /// under the output root yet.
    pub fn map_and_prepare(&self, input: &Path) -> Result<PathBuf, PipelineError> {
        let output = self.map(input)?;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::OutputPath {
                path: output.clone(),
                message: format!("cannot create parent directory: {e}"),
            })?;
        }
        Ok(output)
    }
}
