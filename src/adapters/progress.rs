use crate::domain::model::Progress;
use crate::domain::ports::ProgressSink;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrites a small JSON file after every shot so another process can
/// follow the run.
#[derive(Debug, Clone)]
pub struct JsonProgressFile {
    path: PathBuf,
}

impl JsonProgressFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Progress> {
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl ProgressSink for JsonProgressFile {
    fn record(&self, progress: &Progress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // write-then-rename so readers never see a half-written file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(progress)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            "Progress saved to {}: taken={}, remaining={}",
            self.path.display(),
            progress.taken,
            progress.remaining
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn record(&self, _progress: &Progress) -> Result<()> {
        Ok(())
    }
}

impl<P: ProgressSink + ?Sized> ProgressSink for Box<P> {
    fn record(&self, progress: &Progress) -> Result<()> {
        (**self).record(progress)
    }
}
