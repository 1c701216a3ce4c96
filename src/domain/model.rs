use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The two camera remote lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    Shutter,
    Focus,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Shutter => write!(f, "shutter"),
            Line::Focus => write!(f, "focus"),
        }
    }
}

/// A single level change on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEvent {
    pub line: Line,
    pub high: bool,
}

impl PinEvent {
    pub fn high(line: Line) -> Self {
        Self { line, high: true }
    }

    pub fn low(line: Line) -> Self {
        Self { line, high: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencePlan {
    pub exposure: Duration,
    pub shots: u32,
    pub interval: Duration,
}

impl SequencePlan {
    pub fn new(exposure: Duration, shots: u32, interval: Duration) -> Self {
        Self {
            exposure,
            shots,
            interval,
        }
    }

    /// Wall time of the whole run for a given offset, wake-up pulse included.
    /// Saturates at `Duration::MAX`.
    pub fn estimated_duration(&self, offset: Duration) -> Duration {
        let wake_up = (offset / 2).saturating_add(offset);
        let per_shot = offset
            .saturating_add(self.exposure)
            .saturating_add(self.interval);
        per_shot
            .checked_mul(self.shots)
            .map_or(Duration::MAX, |shots| wake_up.saturating_add(shots))
    }
}

/// Snapshot written after each shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub taken: u32,
    pub remaining: u32,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub fn after_shot(taken: u32, total: u32) -> Self {
        Self {
            taken,
            remaining: total.saturating_sub(taken),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SequenceReport {
    pub shots_taken: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SequenceReport {
    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}
