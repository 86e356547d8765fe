// ABOUTME: Persistence abstraction for onboarding profiles and generated plans
// ABOUTME: DatabaseProvider trait with a SQLite implementation storing JSON documents per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Layer
//!
//! Each user owns at most one profile, one diet plan and one workout plan. The
//! application talks to storage through [`DatabaseProvider`] so services and
//! routes do not depend on a concrete backend.

/// `SQLite` implementation
pub mod sqlite;

pub use sqlite::SqliteDatabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{BiometricProfile, CalculatedStats, DeficitIntensity, DietPlan, WorkoutPlan};

/// A user's onboarding answers together with the stats derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Owner
    pub user_id: Uuid,
    /// Biometric inputs
    pub profile: BiometricProfile,
    /// Chosen deficit intensity
    pub deficit: DeficitIntensity,
    /// Stats computed from `profile` and `deficit`
    pub stats: CalculatedStats,
    /// First submission
    pub created_at: DateTime<Utc>,
    /// Last change to profile or deficit
    pub updated_at: DateTime<Utc>,
}

/// Core database abstraction trait
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Create tables if they do not exist
    async fn migrate(&self) -> AppResult<()>;

    /// Insert or replace a user's profile; `created_at` of an existing row is kept
    async fn upsert_profile(&self, profile: &StoredProfile) -> AppResult<()>;

    /// Fetch a user's profile
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<StoredProfile>>;

    /// Insert or replace a user's diet plan
    async fn save_diet_plan(&self, user_id: Uuid, plan: &DietPlan) -> AppResult<()>;

    /// Fetch a user's diet plan
    async fn get_diet_plan(&self, user_id: Uuid) -> AppResult<Option<DietPlan>>;

    /// Insert or replace a user's workout plan (preferences included)
    async fn save_workout_plan(&self, user_id: Uuid, plan: &WorkoutPlan) -> AppResult<()>;

    /// Fetch a user's workout plan
    async fn get_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>>;

    /// Remove everything stored for a user; returns whether a profile existed
    async fn delete_user_data(&self, user_id: Uuid) -> AppResult<bool>;

    /// Cheap connectivity probe
    async fn ping(&self) -> AppResult<()>;
}
