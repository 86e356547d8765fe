// ABOUTME: Helper modules for pierre-diet-cli
// ABOUTME: Output formatting shared by the commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
