use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::filter::WeekStart;
use crate::errors::{LedgerError, Result};
use crate::utils::{
    paths,
    persistence::{ensure_dir, write_atomic},
};

/// Screen configuration; one engine serves both screen variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
    pub week_start: WeekStart,
    /// Whether the category breakdown (analytics) view is offered.
    pub show_analytics: bool,
    pub purchase_units: Vec<String>,
    pub sale_units: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency_symbol: "₹".into(),
            week_start: WeekStart::Sunday,
            show_analytics: true,
            purchase_units: to_strings(&["kg", "g", "pieces", "liters", "ml", "packets", "boxes"]),
            sale_units: to_strings(&[
                "plates", "pieces", "kg", "g", "liters", "ml", "packets", "boxes",
            ]),
            operator: None,
            export_dir: None,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Config {
    /// Updates one setting from its textual key/value form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "locale" => self.locale = value.to_string(),
            "currency_symbol" | "currency" => self.currency_symbol = value.to_string(),
            "week_start" => {
                self.week_start = value.parse().map_err(LedgerError::Config)?;
            }
            "show_analytics" | "analytics" => {
                self.show_analytics = parse_flag(value)?;
            }
            "purchase_units" => self.purchase_units = parse_list(value),
            "sale_units" => self.sale_units = parse_list(value),
            "operator" => {
                self.operator = Some(value.to_string()).filter(|name| !name.is_empty());
            }
            "export_dir" => {
                self.export_dir = Some(PathBuf::from(value)).filter(|_| !value.is_empty());
            }
            other => {
                return Err(LedgerError::Config(format!("unknown setting `{other}`")));
            }
        }
        Ok(())
    }

    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(LedgerError::Config(format!(
            "expected on/off, got `{other}`"
        ))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and saves [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.week_start, WeekStart::Sunday);
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("week_start", "monday").unwrap();
        config.set("analytics", "off").unwrap();
        config.set("sale_units", "plates, bowls ,").unwrap();
        config.set("operator", "Meena").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.week_start, WeekStart::Monday);
        assert!(!loaded.show_analytics);
        assert_eq!(loaded.sale_units, vec!["plates", "bowls"]);
        assert_eq!(loaded.operator.as_deref(), Some("Meena"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"week_start":"monday"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.week_start, WeekStart::Monday);
        assert_eq!(loaded.currency_symbol, "₹");
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(config.set("theme", "dark"), Err(LedgerError::Config(_))));
        assert!(config.set("week_start", "friday").is_err());
        assert!(config.set("analytics", "maybe").is_err());
    }

    #[test]
    fn amounts_use_currency_symbol() {
        let config = Config::default();
        assert_eq!(config.format_amount(1250.5), "₹1250.50");
        assert_eq!(config.format_amount(-20.0), "-₹20.00");
    }
}
