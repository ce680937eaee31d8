//! Configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Serialize;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, human readable columns.
    #[default]
    Text,
    /// One JSON document per command.
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown output format '{other}', expected 'text' or 'json'"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output format (NCODE_FORMAT, default: text).
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup("NCODE_FORMAT") {
            Some(value) if !value.trim().is_empty() => value
                .parse()
                .context("NCODE_FORMAT must be 'text' or 'json'")?,
            _ => OutputFormat::default(),
        };

        Ok(Self { format })
    }

    /// Apply a command-line override.
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn lookup_from(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn defaults_to_text() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn reads_format() {
        let config = Config::from_lookup(lookup_from(&[("NCODE_FORMAT", "JSON")])).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn blank_format_is_default() {
        let config = Config::from_lookup(lookup_from(&[("NCODE_FORMAT", "  ")])).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Config::from_lookup(lookup_from(&[("NCODE_FORMAT", "yaml")])).unwrap_err();
        assert!(err.to_string().contains("NCODE_FORMAT"));
    }

    #[test]
    fn flag_overrides_environment() {
        let config = Config::from_lookup(lookup_from(&[("NCODE_FORMAT", "json")]))
            .unwrap()
            .with_format(Some(OutputFormat::Text));
        assert_eq!(config.format, OutputFormat::Text);

        let config = Config::default().with_format(None);
        assert_eq!(config.format, OutputFormat::Text);
    }
}
