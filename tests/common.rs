// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, a scripted LLM provider, and fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pierre_diet_planner`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use async_trait::async_trait;
use pierre_diet_planner::{
    config::DatabaseUrl,
    database::{DatabaseProvider, SqliteDatabase},
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider},
    models::{ActivityLevel, BiometricProfile, DayOfWeek, Sex},
    plans::{GenerationSettings, PlanGenerator},
    resources::ServerResources,
};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Migrated in-memory database
pub async fn create_test_database() -> Result<Arc<SqliteDatabase>> {
    init_test_logging();
    let database = SqliteDatabase::new(&DatabaseUrl::Memory).await?;
    database.migrate().await?;
    Ok(Arc::new(database))
}

/// LLM provider that replays queued responses and records every request
pub struct ScriptedLlmProvider {
    responses: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    capabilities: LlmCapabilities,
    healthy: AtomicBool,
}

impl ScriptedLlmProvider {
    /// Provider that answers with `responses` in order
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
            capabilities: LlmCapabilities::structured_output(),
            healthy: AtomicBool::new(true),
        }
    }

    /// Make the next health checks report an unreachable provider
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Provider without JSON mode
    pub fn text_only(responses: Vec<String>) -> Self {
        Self {
            capabilities: LlmCapabilities::text_only(),
            ..Self::new(responses)
        }
    }

    /// Queue another successful response
    pub fn push_response(&self, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
    }

    /// Queue a failure
    pub fn push_error(&self, error: AppError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the user message in the most recent request
    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|request| request.messages.last())
            .map(|message| message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("scripted provider ran out of responses")));
        next.map(|content| ChatResponse {
            content,
            model: request
                .model
                .clone()
                .unwrap_or_else(|| "scripted-model".to_owned()),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }
}

/// Generator over a scripted provider with default settings
pub fn scripted_generator(provider: &Arc<ScriptedLlmProvider>) -> PlanGenerator {
    PlanGenerator::new(
        Arc::clone(provider) as Arc<dyn LlmProvider>,
        GenerationSettings::default(),
    )
}

/// Server resources backed by an in-memory database and a scripted provider
pub async fn create_test_resources(
    responses: Vec<String>,
) -> Result<(Arc<ServerResources>, Arc<ScriptedLlmProvider>)> {
    let database = create_test_database().await?;
    let provider = Arc::new(ScriptedLlmProvider::new(responses));
    let generator = scripted_generator(&provider);
    let resources = ServerResources::new(database as Arc<dyn DatabaseProvider>, Some(generator));
    Ok((Arc::new(resources), provider))
}

/// Server resources with plan generation disabled
pub async fn create_test_resources_without_llm() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database as Arc<dyn DatabaseProvider>,
        None,
    )))
}

/// Male, 30, 90 kg, 175 cm, sedentary, 10 kg to lose
pub fn male_profile() -> BiometricProfile {
    BiometricProfile {
        sex: Sex::Male,
        age: 30,
        weight_kg: 90.0,
        height_cm: 175.0,
        activity_level: ActivityLevel::Sedentary,
        target_weight_loss_kg: 10.0,
    }
}

/// Female, 25, 60 kg, 160 cm, very active, nothing to lose
pub fn female_profile() -> BiometricProfile {
    BiometricProfile {
        sex: Sex::Female,
        age: 25,
        weight_kg: 60.0,
        height_cm: 160.0,
        activity_level: ActivityLevel::VeryActive,
        target_weight_loss_kg: 0.0,
    }
}

/// One meal as the model would return it
pub fn meal_json(meal_type: &str, name: &str, calories: u32) -> Value {
    json!({
        "meal_type": meal_type,
        "name": name,
        "description": format!("{name}, home made"),
        "calories": calories,
        "protein_g": 30,
        "carbs_g": 40,
        "fat_g": 15,
        "ingredients": ["ingredient a", "ingredient b"]
    })
}

/// A week of three meals per day in the given day order
pub fn diet_plan_value(days: &[DayOfWeek]) -> Value {
    let days: Vec<Value> = days
        .iter()
        .map(|day| {
            json!({
                "day": day.as_str(),
                "meals": [
                    meal_json("breakfast", &format!("{day} oats"), 450),
                    meal_json("lunch", &format!("{day} salad"), 600),
                    meal_json("dinner", &format!("{day} stew"), 700),
                ]
            })
        })
        .collect();
    json!({ "days": days })
}

/// Full diet week as raw model output
pub fn diet_plan_output() -> String {
    diet_plan_value(&DayOfWeek::ALL).to_string()
}

/// One workout day as the model would return it
pub fn workout_day_json(day: DayOfWeek, title: &str, rest_day: bool) -> Value {
    let exercises = if rest_day {
        json!([])
    } else {
        json!([
            { "name": "Goblet squat", "sets": 3, "reps": "10-12", "rest_seconds": 90,
              "notes": "Keep chest up" },
            { "name": "Push-up", "sets": 3, "reps": "8-10", "rest_seconds": 60 }
        ])
    };
    json!({
        "day": day.as_str(),
        "title": title,
        "rest_day": rest_day,
        "exercises": exercises
    })
}

/// Full workout week: training Monday, Wednesday, Friday; rest otherwise
pub fn workout_plan_output() -> String {
    let days: Vec<Value> = DayOfWeek::ALL
        .into_iter()
        .map(|day| match day {
            DayOfWeek::Monday | DayOfWeek::Wednesday | DayOfWeek::Friday => {
                workout_day_json(day, "Full body", false)
            }
            _ => workout_day_json(day, "Rest", true),
        })
        .collect();
    json!({ "days": days }).to_string()
}
