// ABOUTME: SQLite implementation of the DatabaseProvider trait using sqlx
// ABOUTME: Stores profiles and plans as JSON text keyed by user id with RFC3339 timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{DatabaseProvider, StoredProfile};
use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{DeficitIntensity, DietPlan, WorkoutPlan};

const MAX_FILE_CONNECTIONS: u32 = 5;

/// `SQLite`-backed store
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if needed) the database at `url`
    ///
    /// In-memory databases live only as long as their connection, so the pool
    /// is pinned to a single connection that never expires.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file or its directory cannot be created or
    /// the connection fails.
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(SqliteConnectOptions::from_str("sqlite::memory:").map_err(
                        |e| AppError::database(format!("Invalid in-memory options: {e}")),
                    )?)
                    .await
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                SqlitePoolOptions::new()
                    .max_connections(MAX_FILE_CONNECTIONS)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        info!(database = %url, "Connected to SQLite database");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn save_document<T: Serialize + Sync>(
        &self,
        table: &'static str,
        user_id: Uuid,
        document: &T,
    ) -> AppResult<()> {
        let started = Instant::now();
        let json = serde_json::to_string(document)?;
        let sql = format!(
            "INSERT INTO {table} (user_id, document, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET document = excluded.document,
                                                updated_at = excluded.updated_at"
        );
        let result = sqlx::query(&sql)
            .bind(user_id.to_string())
            .bind(json)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await;
        log_operation("upsert", table, result.is_ok(), started);
        result.map_err(|e| AppError::database(format!("Failed to save {table}: {e}")))?;
        Ok(())
    }

    async fn load_document<T: DeserializeOwned>(
        &self,
        table: &'static str,
        user_id: Uuid,
    ) -> AppResult<Option<T>> {
        let sql = format!("SELECT document FROM {table} WHERE user_id = ?1");
        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load {table}: {e}")))?;

        row.map(|row| decode_json::<T>(&row, "document")).transpose()
    }
}

fn log_operation(operation: &str, table: &str, success: bool, started: Instant) {
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    AppLogger::log_database_operation(operation, table, success, elapsed_ms);
}

fn column<T>(row: &SqliteRow, name: &str) -> AppResult<T>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::database(format!("Failed to read column {name}: {e}")))
}

fn decode_json<T: DeserializeOwned>(row: &SqliteRow, name: &str) -> AppResult<T> {
    let raw: String = column(row, name)?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::serialization(format!("Stored {name} is not valid JSON: {e}"))
    })
}

fn decode_timestamp(row: &SqliteRow, name: &str) -> AppResult<DateTime<Utc>> {
    let raw: String = column(row, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::serialization(format!("Stored {name} is not RFC3339: {e}")))
}

fn row_to_profile(row: &SqliteRow) -> AppResult<StoredProfile> {
    let user_id: String = column(row, "user_id")?;
    let deficit: String = column(row, "deficit")?;
    Ok(StoredProfile {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::serialization(format!("Stored user id is invalid: {e}")))?,
        profile: decode_json(row, "profile")?,
        deficit: DeficitIntensity::from_str(&deficit)?,
        stats: decode_json(row, "stats")?,
        created_at: decode_timestamp(row, "created_at")?,
        updated_at: decode_timestamp(row, "updated_at")?,
    })
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn migrate(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                profile TEXT NOT NULL,
                deficit TEXT NOT NULL,
                stats TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS diet_plans (
                user_id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                user_id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        debug!("Database schema is up to date");
        Ok(())
    }

    async fn upsert_profile(&self, profile: &StoredProfile) -> AppResult<()> {
        let started = Instant::now();
        let result = sqlx::query(
            r"
            INSERT INTO profiles (user_id, profile, deficit, stats, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(user_id) DO UPDATE SET
                profile = excluded.profile,
                deficit = excluded.deficit,
                stats = excluded.stats,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(serde_json::to_string(&profile.profile)?)
        .bind(profile.deficit.as_str())
        .bind(serde_json::to_string(&profile.stats)?)
        .bind(profile.created_at.to_rfc3339())
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        log_operation("upsert", "profiles", result.is_ok(), started);
        result.map_err(|e| AppError::database(format!("Failed to save profile: {e}")))?;
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<StoredProfile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, profile, deficit, stats, created_at, updated_at
            FROM profiles WHERE user_id = ?1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load profile: {e}")))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    async fn save_diet_plan(&self, user_id: Uuid, plan: &DietPlan) -> AppResult<()> {
        self.save_document("diet_plans", user_id, plan).await
    }

    async fn get_diet_plan(&self, user_id: Uuid) -> AppResult<Option<DietPlan>> {
        self.load_document("diet_plans", user_id).await
    }

    async fn save_workout_plan(&self, user_id: Uuid, plan: &WorkoutPlan) -> AppResult<()> {
        self.save_document("workout_plans", user_id, plan).await
    }

    async fn get_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        self.load_document("workout_plans", user_id).await
    }

    async fn delete_user_data(&self, user_id: Uuid) -> AppResult<bool> {
        let started = Instant::now();
        let id = user_id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        for table in ["diet_plans", "workout_plans"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE user_id = ?1"))
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to delete {table}: {e}")))?;
        }
        let removed = sqlx::query("DELETE FROM profiles WHERE user_id = ?1")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete profile: {e}")))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;
        log_operation("delete", "profiles", true, started);
        Ok(removed > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}
