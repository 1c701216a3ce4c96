pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::TomlConfig, TriggerSettings};
pub use core::{
    sequencer::{RunOutcome, Sequencer},
    SequencePlan, SequenceReport,
};
pub use utils::error::{Result, TriggerError};
