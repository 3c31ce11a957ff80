// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use steplog_app::{SubmittedFields, WorkoutField};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "steplog";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub seed: Seed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            seed: Seed::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub focus_form_on_start: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            focus_form_on_start: Some(true),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    pub workouts: Option<Vec<SeedWorkout>>,
}

/// An entry preloaded into the store at startup, in the same shape the
/// entry form submits. Blank entries are dropped by the store's own guard
/// and same-date entries merge, exactly as if typed.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedWorkout {
    pub date: Option<String>,
    pub distance: Option<String>,
}

impl SeedWorkout {
    pub fn to_fields(&self) -> SubmittedFields {
        let mut fields = SubmittedFields::new();
        fields.set(
            WorkoutField::Date.as_str(),
            self.date.as_deref().unwrap_or(""),
        );
        fields.set(
            WorkoutField::Distance.as_str(),
            self.distance.as_deref().unwrap_or(""),
        );
        fields
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("STEPLOG_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set STEPLOG_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [ui] and [seed]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        Ok(config)
    }

    pub fn focus_form_on_start(&self) -> bool {
        self.ui.focus_form_on_start.unwrap_or(true)
    }

    pub fn seed_workouts(&self) -> &[SeedWorkout] {
        self.seed.workouts.as_deref().unwrap_or(&[])
    }

    pub fn example_config() -> String {
        [
            format!("version = {CONFIG_VERSION}"),
            String::new(),
            "[ui]".to_owned(),
            "# focus_form_on_start = true".to_owned(),
            String::new(),
            "# Entries preloaded at startup; same-date entries merge.".to_owned(),
            "# [[seed.workouts]]".to_owned(),
            "# date = \"04.04.17\"".to_owned(),
            "# distance = \"10\"".to_owned(),
            String::new(),
        ]
        .join("\n")
    }
}
