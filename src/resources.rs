// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Wires the database and optional plan generator into the onboarding service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::database::DatabaseProvider;
use crate::plans::PlanGenerator;
use crate::services::OnboardingService;

/// Long-lived dependencies shared across requests
#[derive(Clone)]
pub struct ServerResources {
    /// Profile and plan store
    pub database: Arc<dyn DatabaseProvider>,
    /// Onboarding business logic
    pub onboarding: OnboardingService,
    /// Plan generator for readiness checks, `None` when plan generation is disabled
    pub plan_generator: Option<PlanGenerator>,
}

impl ServerResources {
    /// Build resources from a store and an optional plan generator
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>, generator: Option<PlanGenerator>) -> Self {
        let onboarding = OnboardingService::new(Arc::clone(&database), generator.clone());
        Self {
            database,
            onboarding,
            plan_generator: generator,
        }
    }
}
