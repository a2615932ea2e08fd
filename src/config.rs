// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Emission configuration

use crate::codegen::EndMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options governing source emission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Trailing call appended after the chain
    pub end_mode: EndMode,
    /// One indentation unit per nesting level
    pub indent: String,
    /// Host builder class name
    pub builder_class: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            end_mode: EndMode::Builder,
            indent: "  ".to_string(),
            builder_class: "PointsBuilder".to_string(),
        }
    }
}

impl EmitOptions {
    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let options: EmitOptions = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(options)
    }

    /// Load options with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut options = if PathBuf::from("pointframe.toml").exists() {
            Self::from_file("pointframe.toml")?
        } else {
            Self::default()
        };

        if let Ok(mode) = std::env::var("POINTFRAME_END_MODE") {
            if let Some(mode) = EndMode::parse(&mode) {
                options.end_mode = mode;
            }
        }

        if let Ok(class) = std::env::var("POINTFRAME_CLASS") {
            options.builder_class = class;
        }

        Ok(options)
    }
}
