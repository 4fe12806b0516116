//! Engine configuration.
//!
//! Settings that control validation policy, unit conversion, centroid method, display
//! precision, and edit history. Configurations serialize to JSON so a host application can
//! store them alongside its own preferences.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AREA_DECIMALS, DEFAULT_COORDINATE_DECIMALS, DEFAULT_HISTORY_LIMIT, square_meters_per,
};
use crate::error::{BoundaryError, Result};
use crate::geometry::{CentroidMethod, ClosePolicy};
use crate::model::{AreaUnit, UnitTable};

/// Log level setting for hosts that install a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Settings for boundary sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Unit selected when a session starts
    #[serde(default)]
    pub default_unit: AreaUnit,

    /// How unclosed rings are treated
    #[serde(default)]
    pub close_policy: ClosePolicy,

    /// How the boundary center is computed
    #[serde(default)]
    pub centroid_method: CentroidMethod,

    /// Square meters in one bigha for the region the farms are in
    #[serde(default = "default_bigha_square_meters")]
    pub bigha_square_meters: f64,

    /// Decimals in formatted areas
    #[serde(default = "default_area_decimals")]
    pub area_decimals: usize,

    /// Decimals in formatted coordinates
    #[serde(default = "default_coordinate_decimals")]
    pub coordinate_decimals: usize,

    /// Maximum number of undoable edits per session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_bigha_square_meters() -> f64 {
    square_meters_per::BIGHA
}

fn default_area_decimals() -> usize {
    DEFAULT_AREA_DECIMALS
}

fn default_coordinate_decimals() -> usize {
    DEFAULT_COORDINATE_DECIMALS
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            default_unit: AreaUnit::default(),
            close_policy: ClosePolicy::default(),
            centroid_method: CentroidMethod::default(),
            bigha_square_meters: default_bigha_square_meters(),
            area_decimals: default_area_decimals(),
            coordinate_decimals: default_coordinate_decimals(),
            history_limit: default_history_limit(),
            log_level: LogLevel::default(),
        }
    }

    /// Set the unit selected when a session starts.
    pub fn with_default_unit(mut self, unit: AreaUnit) -> Self {
        self.default_unit = unit;
        self
    }

    /// Set the ring closing policy.
    pub fn with_close_policy(mut self, policy: ClosePolicy) -> Self {
        self.close_policy = policy;
        self
    }

    /// Set the centroid method.
    pub fn with_centroid_method(mut self, method: CentroidMethod) -> Self {
        self.centroid_method = method;
        self
    }

    /// Set the regional bigha size.
    pub fn with_bigha_square_meters(mut self, square_meters: f64) -> Self {
        self.bigha_square_meters = square_meters;
        self
    }

    /// Set the edit history limit.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Unit table reflecting the configured bigha size.
    pub fn unit_table(&self) -> UnitTable {
        UnitTable::with_bigha(self.bigha_square_meters)
    }

    /// Check values that serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if !self.bigha_square_meters.is_finite() || self.bigha_square_meters <= 0.0 {
            return Err(BoundaryError::invalid_format(format!(
                "bigha_square_meters must be a positive number, got {}",
                self.bigha_square_meters
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(BoundaryError::VersionMismatch {
                expected: CONFIG_VERSION.to_string(),
                found: config.version.to_string(),
            });
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.default_unit, AreaUnit::Acres);
        assert_eq!(config.close_policy, ClosePolicy::AutoClose);
        assert_eq!(config.centroid_method, CentroidMethod::Vertex);
        assert_eq!(config.area_decimals, 2);
        assert_eq!(config.coordinate_decimals, 4);
        assert_eq!(config.unit_table(), UnitTable::standard());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::new()
            .with_default_unit(AreaUnit::Bigha)
            .with_close_policy(ClosePolicy::Reject)
            .with_bigha_square_meters(1_618.7);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"default_unit\": \"bigha\""));
        assert!(json.contains("\"close_policy\": \"reject\""));

        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = EngineConfig::from_json(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }

    #[test]
    fn test_newer_version_rejected() {
        let result = EngineConfig::from_json(r#"{ "version": 99 }"#);
        assert!(matches!(result, Err(BoundaryError::VersionMismatch { .. })));
    }

    #[test]
    fn test_invalid_bigha_rejected() {
        let result = EngineConfig::from_json(r#"{ "version": 1, "bigha_square_meters": 0.0 }"#);
        assert!(matches!(result, Err(BoundaryError::InvalidFormat { .. })));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
    }
}
