use crate::config::toml_config::TomlConfig;
use crate::config::TriggerSettings;
use crate::core::SequencePlan;
use crate::utils::duration::parse_duration_arg;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "shutter-trigger")]
#[command(about = "Timelapse and long-exposure trigger for a camera wired to two GPIO lines")]
pub struct CliConfig {
    /// Exposure per photo: seconds, or a number with an s/ms/us suffix
    #[arg(value_parser = parse_duration_arg)]
    pub exposure: Duration,

    /// Number of photos to take
    pub photo_count: u32,

    /// Wait after each photo: seconds, or a number with an s/ms/us suffix
    #[arg(value_parser = parse_duration_arg)]
    pub delay: Duration,

    /// TOML file with pin, timing and progress settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// BCM number of the shutter line
    #[arg(long)]
    pub shutter_pin: Option<u8>,

    /// BCM number of the focus line
    #[arg(long)]
    pub focus_pin: Option<u8>,

    /// Wake-up / settle time added to each exposure
    #[arg(long, value_parser = parse_duration_arg)]
    pub offset: Option<Duration>,

    /// Rewrite a JSON progress file after each photo
    #[arg(long)]
    pub progress_file: Option<PathBuf>,

    /// Simulate the GPIO lines and skip the waits
    #[arg(long)]
    pub dry_run: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn plan(&self) -> SequencePlan {
        SequencePlan::new(self.exposure, self.photo_count, self.delay)
    }

    pub fn load_toml(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }

    /// Merges CLI overrides over the TOML file (if any) over the defaults.
    pub fn settings(&self, file: Option<&TomlConfig>) -> Result<TriggerSettings> {
        let mut settings = file.map(TomlConfig::settings).unwrap_or_default();

        if let Some(pin) = self.shutter_pin {
            settings.shutter_pin = pin;
        }
        if let Some(pin) = self.focus_pin {
            settings.focus_pin = pin;
        }
        if let Some(offset) = self.offset {
            settings.offset = offset;
        }
        if let Some(path) = &self.progress_file {
            settings.progress_path = Some(path.clone());
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Whether clap rejected the command line because of too few or too many positionals.
pub fn is_argument_count_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument | ErrorKind::TooManyValues
    )
}
