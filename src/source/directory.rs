use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use schoolmeal_calendar::{DailyLeftoverResponse, MenuMap, MenuResponse, YearMonth, date_key};

use super::MenuSource;
use crate::error::AppError;

/// Reads upstream API responses saved to disk:
///
/// ```text
/// {directory}/2025-05.json               menu calendar of May 2025
/// {directory}/leftover/2025-05-02.json   per-dish leftovers of one day
/// ```
pub struct DirectorySource {
    directory: PathBuf,
}

impl DirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn month_path(&self, month: YearMonth) -> PathBuf {
        self.directory.join(format!("{}.json", month.period()))
    }

    fn leftover_path(&self, key: &str) -> PathBuf {
        self.directory.join("leftover").join(format!("{key}.json"))
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl MenuSource for DirectorySource {
    #[tracing::instrument(skip(self), fields(month = %month.period()))]
    async fn fetch_month(&self, month: YearMonth) -> Result<MenuMap, AppError> {
        let Some(content) = read_optional(&self.month_path(month)).await? else {
            tracing::debug!("No menu file for month");
            return Ok(MenuMap::new());
        };

        let response: MenuResponse = serde_json::from_str(&content)?;
        let mut menus = MenuMap::try_from(response)?;

        for date in month.days() {
            let key = date_key(date);
            if let Some(content) = read_optional(&self.leftover_path(&key)).await? {
                let report: DailyLeftoverResponse = serde_json::from_str(&content)?;
                menus.attach_leftovers(report)?;
            }
        }

        menus.validate()?;

        Ok(menus)
    }

    async fn generate_month(&self, _month: YearMonth) -> Result<MenuMap, AppError> {
        Err(AppError::Unsupported("menu generation"))
    }
}
