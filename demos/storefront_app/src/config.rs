// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json,
}

impl FromStr for OutputFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "text" => Ok(OutputFormat::Text),
      "json" => Ok(OutputFormat::Json),
      other => Err(AppError::Config(format!("unknown output format '{}'", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// How views are written to stdout.
  pub output: OutputFormat,
  /// Log line format on stderr.
  pub log_format: OutputFormat,
  /// How long an "Added!" label stays before reverting.
  pub label_reset: Duration,
  pub currency_symbol: String,
  pub show_banner: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let output = lookup("STOREFRONT_OUTPUT")
      .map(|v| v.parse::<OutputFormat>())
      .transpose()?
      .unwrap_or(OutputFormat::Text);
    let log_format = lookup("STOREFRONT_LOG_FORMAT")
      .map(|v| v.parse::<OutputFormat>())
      .transpose()?
      .unwrap_or(OutputFormat::Text);
    let label_reset_ms = lookup("STOREFRONT_LABEL_RESET_MS")
      .unwrap_or_else(|| "1000".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_LABEL_RESET_MS: {}", e)))?;
    let currency_symbol = lookup("STOREFRONT_CURRENCY_SYMBOL").unwrap_or_else(|| "$".to_string());
    let show_banner = lookup("STOREFRONT_BANNER")
      .unwrap_or_else(|| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_BANNER value: {}", e)))?;

    Ok(Self {
      output,
      log_format,
      label_reset: Duration::from_millis(label_reset_ms),
      currency_symbol,
      show_banner,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn defaults_apply_when_unset() {
    let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config.output, OutputFormat::Text);
    assert_eq!(config.label_reset, Duration::from_millis(1000));
    assert_eq!(config.currency_symbol, "$");
    assert!(config.show_banner);
  }

  #[test]
  fn reads_overrides() {
    let config = AppConfig::from_lookup(lookup_from(&[
      ("STOREFRONT_OUTPUT", "JSON"),
      ("STOREFRONT_LABEL_RESET_MS", "250"),
      ("STOREFRONT_CURRENCY_SYMBOL", "€"),
      ("STOREFRONT_BANNER", "false"),
    ]))
    .unwrap();
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.label_reset, Duration::from_millis(250));
    assert_eq!(config.currency_symbol, "€");
    assert!(!config.show_banner);
  }

  #[test]
  fn rejects_bad_values() {
    assert!(matches!(
      AppConfig::from_lookup(lookup_from(&[("STOREFRONT_LABEL_RESET_MS", "soon")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup_from(&[("STOREFRONT_OUTPUT", "xml")])),
      Err(AppError::Config(_))
    ));
  }
}
