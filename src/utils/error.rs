use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("GPIO setup failed: {message}")]
    GpioInit { message: String },

    #[error("GPIO write failed on {line}: {message}")]
    Gpio { line: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value `{value}` for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[cfg(feature = "rpi")]
impl From<rppal::gpio::Error> for TriggerError {
    fn from(e: rppal::gpio::Error) -> Self {
        TriggerError::GpioInit {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TriggerError>;
