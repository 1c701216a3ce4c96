#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::sequencer::DEFAULT_OFFSET;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_bcm_pin, validate_distinct_pins, validate_path, Validate};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SHUTTER_PIN: u8 = 21;
pub const DEFAULT_FOCUS_PIN: u8 = 20;

/// Hardware and timing settings after merging defaults, TOML and CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSettings {
    pub shutter_pin: u8,
    pub focus_pin: u8,
    pub offset: Duration,
    pub progress_path: Option<PathBuf>,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            shutter_pin: DEFAULT_SHUTTER_PIN,
            focus_pin: DEFAULT_FOCUS_PIN,
            offset: DEFAULT_OFFSET,
            progress_path: None,
        }
    }
}

impl ConfigProvider for TriggerSettings {
    fn shutter_pin(&self) -> u8 {
        self.shutter_pin
    }

    fn focus_pin(&self) -> u8 {
        self.focus_pin
    }

    fn offset(&self) -> Duration {
        self.offset
    }

    fn progress_path(&self) -> Option<&Path> {
        self.progress_path.as_deref()
    }
}

impl Validate for TriggerSettings {
    fn validate(&self) -> Result<()> {
        validate_bcm_pin("shutter_pin", self.shutter_pin)?;
        validate_bcm_pin("focus_pin", self.focus_pin)?;
        validate_distinct_pins(self.shutter_pin, self.focus_pin)?;

        if let Some(path) = &self.progress_path {
            validate_path("progress.path", path)?;
        }

        Ok(())
    }
}
