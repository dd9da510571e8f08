// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration for stitching and point classification

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`Config::load`]
pub const CONFIG_FILE: &str = "polystitch.toml";

/// Stitching options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchOptions {
    /// Sweep the other way round complex edges, so touching solids stay
    /// separate instead of merging across the edge
    pub avoid_cavities: bool,
}

/// Point classification options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// Count crossings instead of summing signed windings per mesh
    pub even_odd: bool,
    /// Rays to try before giving up on a point
    pub max_ray_attempts: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            even_odd: false,
            max_ray_attempts: 64,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stitch: StitchOptions,
    pub classify: ClassifyOptions,
    /// Seed for ray directions; random when unset
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `polystitch.toml` from the working directory if present, then
    /// apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `POLYSTITCH_*` overrides looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = var("POLYSTITCH_AVOID_CAVITIES") {
            self.stitch.avoid_cavities = parse_flag(&value);
        }
        if let Some(value) = var("POLYSTITCH_EVEN_ODD") {
            self.classify.even_odd = parse_flag(&value);
        }
        if let Some(value) = var("POLYSTITCH_MAX_RAY_ATTEMPTS") {
            self.classify.max_ray_attempts = value
                .parse()
                .with_context(|| format!("Invalid POLYSTITCH_MAX_RAY_ATTEMPTS: {:?}", value))?;
        }
        if let Some(value) = var("POLYSTITCH_SEED") {
            self.seed = Some(
                value
                    .parse()
                    .with_context(|| format!("Invalid POLYSTITCH_SEED: {:?}", value))?,
            );
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
