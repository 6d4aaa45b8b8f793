// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::CurrencyStyle;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "FinTrack", "fintrack"));

pub const CONFIG_ENV: &str = "FINTRACK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
    pub locale: String,
    pub recent_limit: usize,
    pub data_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            locale: "en-IN".to_string(),
            recent_limit: 3,
            data_path: None,
        }
    }
}

impl Settings {
    pub fn currency_style(&self) -> CurrencyStyle {
        CurrencyStyle::new(&self.currency, &self.locale)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(anyhow!("Invalid currency code '{}'", value));
                }
                self.currency = value.to_uppercase();
            }
            "locale" => self.locale = value.to_string(),
            "recent_limit" => {
                self.recent_limit = value
                    .parse()
                    .with_context(|| format!("Invalid recent_limit '{}'", value))?;
            }
            "data_path" => {
                self.data_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(anyhow!(
                    "Unknown setting '{}' (use currency|locale|recent_limit|data_path)",
                    other
                ));
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Missing file means defaults.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("Read config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Parse config {}", path.display()))
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config dir")?;
    }
    fs::write(path, serde_json::to_string_pretty(settings)?)
        .with_context(|| format!("Write config {}", path.display()))?;
    Ok(())
}
