// ABOUTME: Pierre diet CLI - computes calorie targets locally without a server
// ABOUTME: Parses a biometric profile from flags and prints stats as text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Stats for a moderate (20%) deficit
//! pierre-diet-cli stats --sex male --age 30 --weight-kg 90 --height-cm 175 \
//!     --activity sedentary --target-loss-kg 10
//!
//! # Aggressive deficit, JSON output
//! pierre-diet-cli stats --sex female --age 25 --weight-kg 60 --height-cm 160 \
//!     --activity very_active --deficit aggressive --format json
//!
//! # Every deficit intensity side by side
//! pierre-diet-cli compare --sex male --age 30 --weight-kg 90 --height-cm 175 \
//!     --activity sedentary
//! ```

mod commands;
mod helpers;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pierre_diet_planner::{
    errors::AppResult,
    logging::LoggingConfig,
    models::{ActivityLevel, BiometricProfile, DeficitIntensity, Sex},
};

#[derive(Parser)]
#[command(
    name = "pierre-diet-cli",
    about = "Pierre Diet Planner CLI",
    long_about = "Compute BMR, TDEE, a daily calorie target and weeks to goal from a biometric profile."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Calorie stats for one deficit intensity
    Stats {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Deficit intensity: light, moderate or aggressive
        #[arg(long, default_value = "moderate")]
        deficit: DeficitIntensity,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Calorie stats for every deficit intensity
    Compare {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

/// Biometric inputs shared by every subcommand
#[derive(Args)]
struct ProfileArgs {
    /// Biological sex: male or female
    #[arg(long)]
    sex: Sex,

    /// Age in years
    #[arg(long)]
    age: u32,

    /// Body weight in kilograms
    #[arg(long)]
    weight_kg: f64,

    /// Height in centimeters
    #[arg(long)]
    height_cm: f64,

    /// Activity level: sedentary, lightly_active, moderately_active, very_active, extra_active
    #[arg(long)]
    activity: ActivityLevel,

    /// Weight to lose in kilograms
    #[arg(long, default_value_t = 0.0)]
    target_loss_kg: f64,
}

impl From<ProfileArgs> for BiometricProfile {
    fn from(args: ProfileArgs) -> Self {
        Self {
            sex: args.sex,
            age: args.age,
            weight_kg: args.weight_kg,
            height_cm: args.height_cm,
            activity_level: args.activity,
            target_weight_loss_kg: args.target_loss_kg,
        }
    }
}

/// How results are printed
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Pretty,
    /// Single JSON document
    Json,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::for_cli(log_level).init()?;

    match cli.command {
        Command::Stats {
            profile,
            deficit,
            format,
        } => commands::stats::run(&profile.into(), deficit, format),
        Command::Compare { profile, format } => commands::stats::compare(&profile.into(), format),
    }
}
