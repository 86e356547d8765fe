// ABOUTME: Re-exports command modules for pierre-diet-cli
// ABOUTME: Provides access to the calorie stats commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod stats;
