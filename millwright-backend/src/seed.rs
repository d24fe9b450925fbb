//! Startup seeding of the planner's default settings.
//!
//! After migrations the seeder inserts one `default_settings` row built from
//! the bundled defaults file, unless a row already exists. A database that is
//! unreachable or not migrated yet is skipped quietly so startup can proceed.

use crate::error::{AppError, Result};
use crate::hooks::PostMigrateHook;
use async_trait::async_trait;
use millwright_entity::{default_settings, prelude::*};
use millwright_types::{DefaultSettingsFile, SeedStatus};
use sea_orm::*;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const SEED_DISPATCH_UID: &str = "millwright.seed_default_settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Created { id: i32 },
    AlreadySeeded,
    FileMissing,
    DatabaseNotReady,
}

impl SeedOutcome {
    pub fn status(&self) -> SeedStatus {
        match self {
            SeedOutcome::Created { .. } => SeedStatus::Created,
            SeedOutcome::AlreadySeeded => SeedStatus::AlreadySeeded,
            SeedOutcome::FileMissing => SeedStatus::FileMissing,
            SeedOutcome::DatabaseNotReady => SeedStatus::DatabaseNotReady,
        }
    }

    pub fn settings_id(&self) -> Option<i32> {
        match self {
            SeedOutcome::Created { id } => Some(*id),
            _ => None,
        }
    }
}

/// Insert the default settings row from `path` if none exists yet.
pub async fn seed_default_settings(db: &DatabaseConnection, path: &Path) -> Result<SeedOutcome> {
    match try_seed(db, path).await {
        Err(AppError::DatabaseError(e)) if is_database_not_ready(&e) => {
            tracing::warn!("⏳ Skipping default settings seed, database not ready: {}", e);
            Ok(SeedOutcome::DatabaseNotReady)
        }
        outcome => outcome,
    }
}

async fn try_seed(db: &DatabaseConnection, path: &Path) -> Result<SeedOutcome> {
    if DefaultSettings::find().one(db).await?.is_some() {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    if !path.exists() {
        tracing::info!("No defaults file at {}", path.display());
        return Ok(SeedOutcome::FileMissing);
    }

    let raw = fs::read(path).await?;
    let file = DefaultSettingsFile::from_slice(&raw)?;

    let settings = default_settings::ActiveModel {
        resource_limits: Set(serde_json::to_value(&file.resource_limits)?),
        weights: Set(serde_json::to_value(&file.weights)?),
        recipes_off: Set(serde_json::to_value(&file.recipes_off)?),
        inputs: Set(serde_json::to_value(&file.inputs)?),
        outputs: Set(serde_json::to_value(&file.outputs)?),
        max_item: Set(file.max_item),
        checkbox_nuclear_waste: Set(file.checkbox_nuclear_waste),
        ..ActiveModelBehavior::new()
    }
    .insert(db)
    .await?;

    Ok(SeedOutcome::Created { id: settings.id })
}

/// Connection failures and missing tables mean migrations have not run yet.
pub fn is_database_not_ready(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => true,
        DbErr::Exec(_) | DbErr::Query(_) => {
            let message = err.to_string().to_lowercase();
            [
                "no such table",
                "does not exist",
                "doesn't exist",
                "undefined table",
            ]
            .iter()
            .any(|needle| message.contains(needle))
        }
        _ => false,
    }
}

pub async fn get_default_settings(
    db: &DatabaseConnection,
) -> Result<Option<default_settings::Model>> {
    let settings = DefaultSettings::find()
        .order_by_asc(default_settings::Column::Id)
        .one(db)
        .await?;

    Ok(settings)
}

/// Post-migrate hook wrapping [`seed_default_settings`].
pub struct SeedDefaultSettings {
    path: PathBuf,
}

impl SeedDefaultSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostMigrateHook for SeedDefaultSettings {
    fn dispatch_uid(&self) -> &str {
        SEED_DISPATCH_UID
    }

    async fn run(&self, db: &DatabaseConnection) -> Result<()> {
        match seed_default_settings(db, &self.path).await? {
            SeedOutcome::Created { id } => {
                tracing::info!("🌱 Seeded default settings #{} from {}", id, self.path.display())
            }
            SeedOutcome::AlreadySeeded => tracing::debug!("Default settings already present"),
            SeedOutcome::FileMissing | SeedOutcome::DatabaseNotReady => {}
        }
        Ok(())
    }
}
