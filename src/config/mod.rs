//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::store::SortOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings of an [`EventStore`](crate::core::store::EventStore)
///
/// Every field has a default, so a YAML document only needs the keys it
/// changes:
///
/// ```yaml
/// storage_key: eventCollection
/// sort_order: id_asc
/// import_timeout_secs: 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend key the collection blob is stored under
    pub storage_key: String,

    /// Order the collection is kept in
    pub sort_order: SortOrder,

    /// Page size used when a caller asks for page size 0
    pub default_page_size: usize,

    /// Export files are named `<prefix>-<YYYY-MM-DD>.json`
    pub export_file_prefix: String,

    /// Abort an import whose read takes longer than this; unbounded if unset
    pub import_timeout_secs: Option<u64>,

    /// Backend key of the listing's sort choice
    pub sort_preference_key: String,

    /// Backend key of the listing's session state
    pub session_state_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "eventCollection".to_string(),
            sort_order: SortOrder::default(),
            default_page_size: crate::core::query::DEFAULT_TOP,
            export_file_prefix: "events-backup".to_string(),
            import_timeout_secs: None,
            sort_preference_key: "eventSortPreference".to_string(),
            session_state_key: "eventControllerState".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the store cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("storage_key", &self.storage_key),
            ("export_file_prefix", &self.export_file_prefix),
            ("sort_preference_key", &self.sort_preference_key),
            ("session_state_key", &self.session_state_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.storage_key == self.sort_preference_key
            || self.storage_key == self.session_state_key
        {
            return Err(ConfigError::InvalidValue {
                field: "storage_key".to_string(),
                value: self.storage_key.clone(),
                message: "must differ from the preference keys".to_string(),
            });
        }

        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.import_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "import_timeout_secs".to_string(),
                value: "0".to_string(),
                message: "must be at least 1 or left unset".to_string(),
            });
        }

        Ok(())
    }

    pub fn import_timeout(&self) -> Option<Duration> {
        self.import_timeout_secs.map(Duration::from_secs)
    }

    /// Export file name for a backup taken at `now`
    pub fn export_file_name(&self, now: &DateTime<Utc>) -> String {
        format!(
            "{}-{}.json",
            self.export_file_prefix,
            crate::core::timestamp::format_date(now)
        )
    }
}
