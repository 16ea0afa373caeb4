use config::{Config, ConfigError, Environment, File, FileFormat};

pub const DEFAULT_API_URL: &str = "https://data.solarnetwork.net";
pub const DEFAULT_EXPIRE_CONFIRM_PATH: &str = "/solaruser/api/v1/sec/expire/datum-delete/confirm";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(serde::Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Settings {
    // Scheme and host of the SolarNetwork API
    pub api_url: String,
    pub expire_confirm_path: String,
    pub log_level: String,
}

impl Settings {
    pub fn expire_confirm_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), self.expire_confirm_path)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait HasFile {
    fn file(&self) -> &str;
}
pub struct SettingsFile {}
impl HasFile for SettingsFile {
    fn file(&self) -> &str {
        "settings.yaml"
    }
}

fn _get_settings(settings: impl HasFile) -> Result<Settings, ConfigError> {
    // Defaults, then the optional settings file, then SOLNET_* environment variables
    let config = Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("expire_confirm_path", DEFAULT_EXPIRE_CONFIRM_PATH)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .add_source(File::new(settings.file(), FileFormat::Yaml).required(false))
        .add_source(Environment::with_prefix("SOLNET"))
        .build()?;
    config.try_deserialize::<Settings>()
}

pub fn get_settings() -> Result<Settings, ConfigError> {
    _get_settings(SettingsFile {})
}
