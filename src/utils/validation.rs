use crate::utils::error::{Result, TriggerError};
use std::path::Path;

/// Highest BCM line exposed on the 40-pin header.
pub const MAX_BCM_PIN: u8 = 27;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_bcm_pin(field_name: &str, pin: u8) -> Result<()> {
    validate_range(field_name, pin, 0, MAX_BCM_PIN)
}

pub fn validate_distinct_pins(shutter_pin: u8, focus_pin: u8) -> Result<()> {
    if shutter_pin == focus_pin {
        return Err(TriggerError::InvalidConfigValueError {
            field: "focus_pin".to_string(),
            value: focus_pin.to_string(),
            reason: "Shutter and focus must use different pins".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(TriggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.is_dir() {
        return Err(TriggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Path is a directory".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TriggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
