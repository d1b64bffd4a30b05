//! Where menu data comes from.
//!
//! The school-meal REST API sits behind [`MenuSource`]; the implementations
//! here serve generated fixture data or upstream-shaped JSON files on disk.

mod directory;
mod fixture;

use std::sync::Arc;

use async_trait::async_trait;
use schoolmeal_calendar::{MenuMap, YearMonth};

use crate::{
    config::{SourceConfig, SourceKind},
    error::AppError,
};

pub use directory::DirectorySource;
pub use fixture::FixtureSource;

#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Menu data of one month; an empty map when the month has none
    async fn fetch_month(&self, month: YearMonth) -> Result<MenuMap, AppError>;

    /// Creates the menus of a month and returns them
    async fn generate_month(&self, month: YearMonth) -> Result<MenuMap, AppError>;
}

/// Builds the configured source. The fixture source starts with `seed` generated.
pub async fn from_config(
    config: &SourceConfig,
    seed: YearMonth,
) -> Result<Arc<dyn MenuSource>, AppError> {
    match (config.kind, &config.directory) {
        (SourceKind::Directory, Some(directory)) => {
            tracing::info!(directory = %directory.display(), "Using directory menu source");
            Ok(Arc::new(DirectorySource::new(directory)))
        }
        (SourceKind::Directory, None) => Err(AppError::NotFound(
            "source.directory is not configured".to_owned(),
        )),
        (SourceKind::Fixture, _) => {
            tracing::info!(seed = %seed.period(), "Using generated fixture menu source");
            let source = FixtureSource::new();
            source.generate_month(seed).await?;
            Ok(Arc::new(source))
        }
    }
}
