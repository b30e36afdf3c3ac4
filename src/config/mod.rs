//! Configuration loading for the alarm migrator.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `ALARM_MIGRATOR_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "ALARM_MIGRATOR_";

/// Application configuration derived from `ALARM_MIGRATOR_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Directory receiving one log file per migration attempt
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_source_database_url")]
    pub source_database_url: String,
    #[serde(default = "default_destination_database_url")]
    pub destination_database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_acquire_timeout_ms")]
    pub db_acquire_timeout_ms: u64,
    #[serde(default = "default_db_connect_attempts")]
    pub db_connect_attempts: u32,
    #[serde(default)]
    pub destination: DestinationConfig,
}

/// Constants stamped onto every row written to the destination database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DestinationConfig {
    /// Tenant that owns every migrated row
    ///
    /// Environment variable: `ALARM_MIGRATOR_TARGET_TENANT_ID`
    #[serde(default = "default_target_tenant_id")]
    pub tenant_id: String,

    /// Device recorded as the source entity of migrated camera alarms
    ///
    /// Environment variable: `ALARM_MIGRATOR_TARGET_CAMERA_ID`
    #[serde(default = "default_target_camera_id")]
    pub camera_id: String,

    /// Location assigned to newly created doors
    ///
    /// Environment variable: `ALARM_MIGRATOR_TARGET_LOCATION_ID`
    #[serde(default = "default_target_location_id")]
    pub location_id: String,

    /// Alarm type used when the source type has no destination equivalent
    ///
    /// Environment variable: `ALARM_MIGRATOR_FALLBACK_ALARM_TYPE_ID`
    #[serde(default = "default_fallback_alarm_type_id")]
    pub fallback_alarm_type_id: String,

    /// Type name assumed when the source alarm type id is unknown
    ///
    /// Environment variable: `ALARM_MIGRATOR_FALLBACK_ALARM_TYPE_NAME`
    #[serde(default = "default_fallback_alarm_type_name")]
    pub fallback_alarm_type_name: String,

    /// Lifecycle state of a freshly migrated alarm
    #[serde(default = "default_initial_alarm_state")]
    pub initial_alarm_state: String,

    /// Status string of a freshly migrated alarm
    #[serde(default = "default_initial_alarm_status")]
    pub initial_alarm_status: String,

    /// Partition key written instead of the source one, when set
    ///
    /// Applies to the duplicate check as well as the written record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key_override: Option<i32>,
}

impl DestinationConfig {
    /// Partition key under which an alarm with `source_partition_key` lands.
    pub fn partition_key_for(&self, source_partition_key: i32) -> i32 {
        self.partition_key_override.unwrap_or(source_partition_key)
    }

    /// Validate that every destination constant is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("TARGET_TENANT_ID", &self.tenant_id),
            ("TARGET_CAMERA_ID", &self.camera_id),
            ("TARGET_LOCATION_ID", &self.location_id),
            ("FALLBACK_ALARM_TYPE_ID", &self.fallback_alarm_type_id),
            ("FALLBACK_ALARM_TYPE_NAME", &self.fallback_alarm_type_name),
            ("INITIAL_ALARM_STATE", &self.initial_alarm_state),
            ("INITIAL_ALARM_STATUS", &self.initial_alarm_status),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingDestinationValue {
                    key: key.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            tenant_id: default_target_tenant_id(),
            camera_id: default_target_camera_id(),
            location_id: default_target_location_id(),
            fallback_alarm_type_id: default_fallback_alarm_type_id(),
            fallback_alarm_type_name: default_fallback_alarm_type_name(),
            initial_alarm_state: default_initial_alarm_state(),
            initial_alarm_status: default_initial_alarm_status(),
            partition_key_override: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            log_dir: default_log_dir(),
            source_database_url: default_source_database_url(),
            destination_database_url: default_destination_database_url(),
            db_max_connections: default_db_max_connections(),
            db_acquire_timeout_ms: default_db_acquire_timeout_ms(),
            db_connect_attempts: default_db_connect_attempts(),
            destination: DestinationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Returns a redacted JSON representation (database credentials are masked).
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        let mut config = self.clone();
        config.source_database_url = redact_url_credentials(&config.source_database_url);
        config.destination_database_url =
            redact_url_credentials(&config.destination_database_url);
        serde_json::to_string_pretty(&config)
    }

    /// Validates the configuration, returning an error on unusable settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl {
                role: "source".to_string(),
            });
        }

        if self.destination_database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl {
                role: "destination".to_string(),
            });
        }

        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections {
                value: self.db_max_connections,
            });
        }

        if self.db_connect_attempts == 0 || self.db_connect_attempts > 10 {
            return Err(ConfigError::InvalidConnectAttempts {
                value: self.db_connect_attempts,
            });
        }

        if !matches!(self.log_format.as_str(), "json" | "pretty") {
            return Err(ConfigError::InvalidLogFormat {
                value: self.log_format.clone(),
            });
        }

        self.destination.validate()?;

        Ok(())
    }
}

/// Masks the `user:password@` portion of a database URL.
fn redact_url_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://[REDACTED]@{host}"),
        None => url.to_string(),
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("duplication_logs")
}

fn default_source_database_url() -> String {
    "mysql://root@localhost:3306/alarms_source".to_string()
}

fn default_destination_database_url() -> String {
    "mysql://root@localhost:3306/alarms_destination".to_string()
}

fn default_db_max_connections() -> u32 {
    1 // one connection per database for the duration of a migration
}

fn default_db_acquire_timeout_ms() -> u64 {
    5000
}

fn default_db_connect_attempts() -> u32 {
    3
}

fn default_target_tenant_id() -> String {
    "demo-sales".to_string()
}

fn default_target_camera_id() -> String {
    "259e78d5-6ed1-4853-8b50-ca5413d0e2b4".to_string()
}

fn default_target_location_id() -> String {
    "1375".to_string()
}

fn default_fallback_alarm_type_id() -> String {
    "acf15f45-1c8f-426a-8b78-5dbbfef95c36".to_string()
}

fn default_fallback_alarm_type_name() -> String {
    "Motion Detected".to_string()
}

fn default_initial_alarm_state() -> String {
    "UNPROCESSED".to_string()
}

fn default_initial_alarm_status() -> String {
    "Analyzing".to_string()
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("{role} database URL is missing; set ALARM_MIGRATOR_{}_DATABASE_URL", .role.to_uppercase())]
    MissingDatabaseUrl { role: String },
    #[error("database max connections must be at least 1, got {value}")]
    InvalidMaxConnections { value: u32 },
    #[error("database connect attempts must be between 1 and 10, got {value}")]
    InvalidConnectAttempts { value: u32 },
    #[error("log format must be 'json' or 'pretty', got '{value}'")]
    InvalidLogFormat { value: String },
    #[error("invalid value for ALARM_MIGRATOR_{key}: '{value}'")]
    InvalidValue { key: String, value: String },
    #[error("destination setting is empty; set ALARM_MIGRATOR_{key}")]
    MissingDestinationValue { key: String },
}

/// Loads configuration using layered `.env` files and `ALARM_MIGRATOR_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads and validates configuration.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = take_string(&mut layered, "PROFILE").unwrap_or(profile_hint);
        let log_level = take_string(&mut layered, "LOG_LEVEL").unwrap_or_else(default_log_level);
        let log_format =
            take_string(&mut layered, "LOG_FORMAT").unwrap_or_else(default_log_format);
        let log_dir = take_string(&mut layered, "LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);
        let source_database_url = take_string(&mut layered, "SOURCE_DATABASE_URL")
            .unwrap_or_else(default_source_database_url);
        let destination_database_url = take_string(&mut layered, "DESTINATION_DATABASE_URL")
            .unwrap_or_else(default_destination_database_url);

        let db_max_connections = take_parsed(&mut layered, "DB_MAX_CONNECTIONS")?
            .unwrap_or_else(default_db_max_connections);
        let db_acquire_timeout_ms = take_parsed(&mut layered, "DB_ACQUIRE_TIMEOUT_MS")?
            .unwrap_or_else(default_db_acquire_timeout_ms);
        let db_connect_attempts = take_parsed(&mut layered, "DB_CONNECT_ATTEMPTS")?
            .unwrap_or_else(default_db_connect_attempts);

        let destination = DestinationConfig {
            tenant_id: take_string(&mut layered, "TARGET_TENANT_ID")
                .unwrap_or_else(default_target_tenant_id),
            camera_id: take_string(&mut layered, "TARGET_CAMERA_ID")
                .unwrap_or_else(default_target_camera_id),
            location_id: take_string(&mut layered, "TARGET_LOCATION_ID")
                .unwrap_or_else(default_target_location_id),
            fallback_alarm_type_id: take_string(&mut layered, "FALLBACK_ALARM_TYPE_ID")
                .unwrap_or_else(default_fallback_alarm_type_id),
            fallback_alarm_type_name: take_string(&mut layered, "FALLBACK_ALARM_TYPE_NAME")
                .unwrap_or_else(default_fallback_alarm_type_name),
            initial_alarm_state: take_string(&mut layered, "INITIAL_ALARM_STATE")
                .unwrap_or_else(default_initial_alarm_state),
            initial_alarm_status: take_string(&mut layered, "INITIAL_ALARM_STATUS")
                .unwrap_or_else(default_initial_alarm_status),
            partition_key_override: take_parsed(&mut layered, "PARTITION_KEY_OVERRIDE")?,
        };

        let config = AppConfig {
            profile,
            log_level,
            log_format,
            log_dir,
            source_database_url,
            destination_database_url,
            db_max_connections,
            db_acquire_timeout_ms,
            db_connect_attempts,
            destination,
        };

        config.validate()?;

        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var(format!("{ENV_PREFIX}PROFILE"))
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn take_string(layered: &mut BTreeMap<String, String>, key: &str) -> Option<String> {
    layered
        .remove(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn take_parsed<T: std::str::FromStr>(
    layered: &mut BTreeMap<String, String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match take_string(layered, key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        None => Ok(None),
    }
}
