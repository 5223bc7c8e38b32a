pub mod artifacts;

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub preprocessor_path: PathBuf,
    pub model_path: PathBuf,
    pub max_body_size: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            preprocessor_path: PathBuf::from("artifacts/preprocessor.json"),
            model_path: PathBuf::from("artifacts/model.json"),
            max_body_size: 16 * 1024,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Read configuration from the process environment, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port)?,
            preprocessor_path: env::var("PREPROCESSOR_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.preprocessor_path),
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            max_body_size: parsed("MAX_BODY_SIZE", defaults.max_body_size)?,
            log_format: parsed("LOG_FORMAT", defaults.log_format)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid {key} value '{raw}'")),
        Err(_) => Ok(default),
    }
}
