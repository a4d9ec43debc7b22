// File: src/config.rs
// Purpose: Route table configuration parsed from pathway.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutingConfig {
    /// Prefix stripped before matching (e.g., "/api")
    #[serde(default)]
    pub base_path: Option<String>,

    /// Routes in dispatch order
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One registered template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Identifier returned as the invoker (and locator) for this route
    pub name: String,

    /// Path template, e.g. "users/{id}"
    pub template: String,

    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    #[serde(default)]
    pub produces: Vec<String>,

    /// Whether a prefix match dispatches to this route as a locator
    #[serde(default = "default_false")]
    pub locator: bool,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn default_false() -> bool {
    false
}

impl RoutingConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./pathway.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("pathway.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Offset at which matching starts for `path`
    ///
    /// Skips the base path (when `path` starts with it) and then one `/`.
    pub fn start_offset(&self, path: &str) -> usize {
        let base = self
            .base_path
            .as_deref()
            .map(|b| b.trim_end_matches('/'))
            .filter(|b| !b.is_empty() && path.starts_with(b))
            .filter(|b| matches!(path.as_bytes().get(b.len()), None | Some(b'/')))
            .map_or(0, str::len);

        if path[base..].starts_with('/') {
            base + 1
        } else {
            base
        }
    }
}
