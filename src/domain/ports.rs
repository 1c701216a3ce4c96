use crate::domain::model::{Line, Progress};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Output side of the camera remote: two digital lines.
pub trait TriggerPort: Send {
    fn write(&mut self, line: Line, high: bool) -> Result<()>;

    /// Drives both lines low.
    fn release(&mut self) -> Result<()> {
        self.write(Line::Shutter, false)?;
        self.write(Line::Focus, false)
    }
}

impl<T: TriggerPort + ?Sized> TriggerPort for Box<T> {
    fn write(&mut self, line: Line, high: bool) -> Result<()> {
        (**self).write(line, high)
    }

    fn release(&mut self) -> Result<()> {
        (**self).release()
    }
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub trait ProgressSink: Send + Sync {
    fn record(&self, progress: &Progress) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn shutter_pin(&self) -> u8;
    fn focus_pin(&self) -> u8;
    fn offset(&self) -> Duration;
    fn progress_path(&self) -> Option<&Path>;
}
