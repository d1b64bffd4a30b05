use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use schoolmeal_calendar::{HolidayRegistry, YearMonth, parse_date_key};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Fixture,
    Directory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// Directory holding `YYYY-MM.json` menu files, for the directory source
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CalendarConfig {
    /// Month opened on startup as `YYYY-MM`; today's month when unset
    #[serde(default)]
    pub initial_month: Option<String>,
    /// School discretionary holidays seeded into the registry
    #[serde(default)]
    pub school_holidays: Vec<String>,
}

impl CalendarConfig {
    pub fn initial_month(&self) -> Option<YearMonth> {
        self.initial_month
            .as_deref()
            .and_then(|month| month.parse().ok())
    }

    /// Configured month, or the current UTC month
    pub fn start_month(&self) -> YearMonth {
        self.initial_month()
            .unwrap_or_else(|| YearMonth::containing(time::OffsetDateTime::now_utc().date()))
    }

    pub fn school_holiday_dates(&self) -> impl Iterator<Item = time::Date> + '_ {
        self.school_holidays
            .iter()
            .filter_map(|key| parse_date_key(key))
    }

    /// Public holidays plus the configured school holidays
    pub fn registry(&self) -> HolidayRegistry {
        let mut registry = HolidayRegistry::default();
        registry.set_school_holidays(self.school_holiday_dates());

        registry
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SCHOOLMEAL__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("source.kind", "fixture")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional; defaults and env still apply without it
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHOOLMEAL")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.source.kind == SourceKind::Directory && self.source.directory.is_none() {
            return Err("Directory source requires source.directory".to_string());
        }
        if let Some(month) = &self.calendar.initial_month
            && month.parse::<YearMonth>().is_err()
        {
            return Err(format!("Invalid calendar.initial_month '{month}', expected YYYY-MM"));
        }
        if let Some(bad) = self
            .calendar
            .school_holidays
            .iter()
            .find(|key| parse_date_key(key).is_none())
        {
            return Err(format!("Invalid school holiday '{bad}', expected YYYY-MM-DD"));
        }
        if !matches!(self.log.format.as_str(), "pretty" | "json") {
            return Err(format!("Unknown log format '{}'", self.log.format));
        }
        Ok(())
    }
}
