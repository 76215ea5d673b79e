use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub const KEYS: &[&str] = &[
    "server.bind",
    "session.ttl-minutes",
    "session.cookie-name",
    "log.filter",
];

fn validate_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|_| {
        ConfigError::InvalidConfig(format!(
            "server.bind must be a socket address such as 127.0.0.1:4567, got '{value}'"
        ))
    })
}

fn validate_ttl(value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ConfigError::InvalidConfig(
            "session.ttl-minutes must be a positive integer".to_string(),
        )),
    }
}

fn validate_cookie_name(value: &str) -> Result<(), ConfigError> {
    // RFC 6265 cookie-name is an RFC 2616 token.
    let is_token_char = |c: char| c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c);
    if value.is_empty() || !value.chars().all(is_token_char) {
        return Err(ConfigError::InvalidConfig(format!(
            "session.cookie-name is not a valid cookie name: '{value}'"
        )));
    }
    Ok(())
}

fn validate_log_filter(value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "log.filter cannot be empty".to_string(),
        ));
    }
    EnvFilter::try_new(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidConfig(format!("log.filter is invalid: {e}")))
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_ttl_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Config {
    pub fn with_defaults() -> Self {
        Self {
            bind_addr: Some(default_bind_addr()),
            session_ttl_minutes: Some(default_session_ttl_minutes()),
            cookie_name: Some(default_cookie_name()),
            log_filter: Some(default_log_filter()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref bind) = self.bind_addr {
            validate_bind(bind)?;
        }
        if let Some(minutes) = self.session_ttl_minutes {
            validate_ttl(&minutes.to_string())?;
        }
        if let Some(ref name) = self.cookie_name {
            validate_cookie_name(name)?;
        }
        if let Some(ref filter) = self.log_filter {
            validate_log_filter(filter)?;
        }
        Ok(())
    }

    fn value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(match key {
            "server.bind" => self.bind_addr.clone(),
            "session.ttl-minutes" => self.session_ttl_minutes.map(|v| v.to_string()),
            "session.cookie-name" => self.cookie_name.clone(),
            "log.filter" => self.log_filter.clone(),
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        })
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:4567".to_string()
}

fn default_session_ttl_minutes() -> u32 {
    24 * 60
}

fn default_cookie_name() -> String {
    "trtodo.session".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::InvalidConfig("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".config").join("trtodo-web").join("config.json"))
}

/// Typed view of the configuration used to start the server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub session_ttl: chrono::Duration,
    pub cookie_name: String,
    pub log_filter: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4567)),
            session_ttl: chrono::Duration::minutes(default_session_ttl_minutes().into()),
            cookie_name: default_cookie_name(),
            log_filter: default_log_filter(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Loads the configuration file, defaulting to
    /// `~/.config/trtodo-web/config.json`. A missing file means all defaults.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string()),
            None => default_config_path()?,
        };

        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Config::default()
            } else {
                let config: Config = serde_json::from_str(&contents)?;
                config.validate()?;
                config
            }
        } else {
            Config::default()
        };

        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Effective value of `key`: the configured one, or its default.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match self.config.value(key)? {
            Some(value) => Ok(value),
            None => Config::with_defaults()
                .value(key)?
                .ok_or_else(|| ConfigError::InvalidKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        match key {
            "server.bind" => {
                validate_bind(value)?;
                config.bind_addr = Some(value.to_string());
            }
            "session.ttl-minutes" => {
                config.session_ttl_minutes = Some(validate_ttl(value)?);
            }
            "session.cookie-name" => {
                validate_cookie_name(value)?;
                config.cookie_name = Some(value.to_string());
            }
            "log.filter" => {
                validate_log_filter(value)?;
                config.log_filter = Some(value.to_string());
            }
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        config.validate()?;
        self.config = config;
        self.save()
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        match key {
            "server.bind" => self.config.bind_addr = None,
            "session.ttl-minutes" => self.config.session_ttl_minutes = None,
            "session.cookie-name" => self.config.cookie_name = None,
            "log.filter" => self.config.log_filter = None,
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        self.save()
    }

    /// Every key with its effective value and whether that value is the default.
    pub fn list(&self) -> Vec<(String, String, bool)> {
        let defaults = Config::with_defaults();
        KEYS.iter()
            .filter_map(|key| {
                let custom = self.config.value(key).ok().flatten();
                let is_default = custom.is_none();
                custom
                    .or_else(|| defaults.value(key).ok().flatten())
                    .map(|value| (key.to_string(), value, is_default))
            })
            .collect()
    }

    pub fn settings(&self) -> Result<ServerSettings, ConfigError> {
        Ok(ServerSettings {
            bind_addr: validate_bind(&self.get("server.bind")?)?,
            session_ttl: chrono::Duration::minutes(
                validate_ttl(&self.get("session.ttl-minutes")?)?.into(),
            ),
            cookie_name: self.get("session.cookie-name")?,
            log_filter: self.get("log.filter")?,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = tempfile::Builder::new()
            .prefix("trtodo_test")
            .tempdir()
            .expect("Failed to create temporary directory");
        let path = temp_dir.path().join("nested").join("config.json");
        let manager =
            ConfigManager::new(Some(path.as_path())).expect("Failed to create config manager");
        (manager, temp_dir)
    }

    #[test]
    fn test_config_manager_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        assert_eq!(manager.get("server.bind").unwrap(), "127.0.0.1:4567");
        assert_eq!(manager.get("session.ttl-minutes").unwrap(), "1440");
        assert_eq!(manager.get("session.cookie-name").unwrap(), "trtodo.session");
        assert_eq!(manager.get("log.filter").unwrap(), "info");
        assert!(!manager.path().exists());
    }

    #[test]
    fn test_config_manager_set_persists() {
        let (mut manager, temp_dir) = create_test_config_manager();

        manager.set("server.bind", "0.0.0.0:8080").unwrap();
        manager.set("session.ttl-minutes", "15").unwrap();
        manager.set("log.filter", "trusty_todo_lists=debug").unwrap();

        let path = temp_dir.path().join("nested").join("config.json");
        let reloaded = ConfigManager::new(Some(path.as_path())).unwrap();
        assert_eq!(reloaded.get("server.bind").unwrap(), "0.0.0.0:8080");

        let settings = reloaded.settings().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.session_ttl, chrono::Duration::minutes(15));
        assert_eq!(settings.log_filter, "trusty_todo_lists=debug");
    }

    #[test]
    fn test_config_manager_rejects_invalid_values() {
        let (mut manager, _temp_dir) = create_test_config_manager();

        assert!(matches!(
            manager.set("server.bind", "not an address"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            manager.set("session.ttl-minutes", "0"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            manager.set("session.cookie-name", "bad name;"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            manager.set("colour", "blue"),
            Err(ConfigError::InvalidKey(_))
        ));
        assert_eq!(manager.get("server.bind").unwrap(), "127.0.0.1:4567");
    }

    #[test]
    fn test_config_manager_unset() {
        let (mut manager, _temp_dir) = create_test_config_manager();

        manager.set("session.cookie-name", "sid").unwrap();
        assert_eq!(manager.get("session.cookie-name").unwrap(), "sid");

        manager.unset("session.cookie-name").unwrap();
        assert_eq!(manager.get("session.cookie-name").unwrap(), "trtodo.session");
        assert!(manager.unset("nope").is_err());
    }

    #[test]
    fn test_config_manager_list() {
        let (mut manager, _temp_dir) = create_test_config_manager();
        manager.set("server.bind", "127.0.0.1:9000").unwrap();

        let list = manager.list();
        assert_eq!(list.len(), KEYS.len());
        assert!(list.contains(&(
            "server.bind".to_string(),
            "127.0.0.1:9000".to_string(),
            false
        )));
        assert!(list.contains(&("log.filter".to_string(), "info".to_string(), true)));
    }

    #[test]
    fn test_config_manager_rejects_corrupt_file() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{ not json").unwrap();
        assert!(matches!(
            ConfigManager::new(Some(temp_file.path())),
            Err(ConfigError::Serialization(_))
        ));
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(Some(temp_file.path())).unwrap();
        assert_eq!(manager.config, Config::default());
    }
}
