// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the autopilot

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub policy: PolicyConfig,
    pub runner: RunnerConfig,
}

/// Default board geometry, overridable from the command line
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
}

/// Starvation thresholds steering the decision policy
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    /// Soft threshold multiplier: past `width * height * this` turns
    /// without eating, the explorer picks a random surviving branch
    pub loop_break_turns_per_cell: u32,
    /// Hard threshold multiplier: past `width * height * this` turns
    /// without eating, the runner declares the snake starved
    pub starvation_turns_per_cell: u32,
}

impl PolicyConfig {
    /// Turn count past which the explorer randomizes its branch choice
    pub fn loop_break_limit(&self, width: i32, height: i32) -> u32 {
        (width * height) as u32 * self.loop_break_turns_per_cell
    }

    /// Turn count past which the game ends as starved
    pub fn starvation_limit(&self, width: i32, height: i32) -> u32 {
        (width * height) as u32 * self.starvation_turns_per_cell
    }
}

/// Headless runner parameters
#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    pub games: u32,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                width: 20,
                height: 15,
            },
            policy: PolicyConfig {
                loop_break_turns_per_cell: 4,
                starvation_turns_per_cell: 30,
            },
            runner: RunnerConfig { games: 5 },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
