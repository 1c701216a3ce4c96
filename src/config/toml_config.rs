use crate::config::TriggerSettings;
use crate::utils::duration::deserialize_opt_duration;
use crate::utils::error::{Result, TriggerError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    pub progress: Option<ProgressConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardwareConfig {
    pub shutter_pin: Option<u8>,
    pub focus_pin: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default, deserialize_with = "deserialize_opt_duration")]
    pub offset: Option<Duration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub path: PathBuf,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TriggerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TriggerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unknown names as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Settings with every unset field taken from the defaults.
    pub fn settings(&self) -> TriggerSettings {
        let defaults = TriggerSettings::default();
        TriggerSettings {
            shutter_pin: self.hardware.shutter_pin.unwrap_or(defaults.shutter_pin),
            focus_pin: self.hardware.focus_pin.unwrap_or(defaults.focus_pin),
            offset: self.timing.offset.unwrap_or(defaults.offset),
            progress_path: self
                .progress
                .as_ref()
                .filter(|p| p.enabled.unwrap_or(true))
                .map(|p| p.path.clone()),
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[hardware]
shutter_pin = 17
focus_pin = 27

[timing]
offset = "500ms"

[progress]
path = "./tmp/running_parameters.json"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.settings();

        assert_eq!(settings.shutter_pin, 17);
        assert_eq!(settings.focus_pin, 27);
        assert_eq!(settings.offset, Duration::from_millis(500));
        assert_eq!(
            settings.progress_path,
            Some(PathBuf::from("./tmp/running_parameters.json"))
        );
        assert!(config.verbose());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let settings = config.settings();

        assert_eq!(settings.shutter_pin, 21);
        assert_eq!(settings.focus_pin, 20);
        assert_eq!(settings.offset, Duration::from_millis(300));
        assert!(settings.progress_path.is_none());
    }

    #[test]
    fn test_numeric_offset_is_seconds() {
        let config = TomlConfig::from_toml_str("[timing]\noffset = 0.25\n").unwrap();
        assert_eq!(config.settings().offset, Duration::from_millis(250));
    }

    #[test]
    fn test_disabled_progress() {
        let toml_content = r#"
[progress]
path = "./progress.json"
enabled = false
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.settings().progress_path.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHUTTER_TRIGGER_TEST_PROGRESS", "/var/tmp/astro.json");

        let toml_content = r#"
[progress]
path = "${SHUTTER_TRIGGER_TEST_PROGRESS}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.settings().progress_path,
            Some(PathBuf::from("/var/tmp/astro.json"))
        );

        std::env::remove_var("SHUTTER_TRIGGER_TEST_PROGRESS");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[hardware]
shutter_pin = 20
focus_pin = 20
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_offset_is_parse_error() {
        let result = TomlConfig::from_toml_str("[timing]\noffset = \"soon\"\n");
        assert!(matches!(result, Err(TriggerError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[hardware]\nshutter_pin = 5\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.settings().shutter_pin, 5);
        assert_eq!(config.settings().focus_pin, 20);
    }
}
