//! Application configuration
//!
//! The configuration is a camelCase JSON document. Every field is optional;
//! a missing field falls back to the built-in default.

use std::path::Path;

use anyhow::{Context, Result};
use app_ui::navigation::{NavigatorNode, DEFAULT_MAX_DEPTH};
use app_ui::theme::{ThemeKind, ThemeSelection};
use serde::{Deserialize, Serialize};

use crate::navigation::task_planner_navigation;

/// Top-level configuration of the application shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Initial theme selection
    #[serde(default)]
    pub theme: ThemeSelection,

    /// Root navigator tree
    #[serde(default = "task_planner_navigation")]
    pub navigation: NavigatorNode,

    /// Deepest navigator nesting the composer accepts
    #[serde(default = "default_max_navigator_depth")]
    pub max_navigator_depth: usize,
}

fn default_max_navigator_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeSelection::default(),
            navigation: task_planner_navigation(),
            max_navigator_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AppConfig {
    /// Parse a configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.max_navigator_depth == 0 {
            anyhow::bail!("maxNavigatorDepth must be at least 1");
        }
        if let Some(custom) = &self.theme.custom_theme {
            custom
                .colors
                .validate()
                .with_context(|| format!("Invalid custom theme '{}'", custom.name))?;
        } else if self.theme.kind == ThemeKind::Custom {
            tracing::warn!("custom theme selected without a customTheme; using the light theme");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::navigation::NavigatorType;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.navigation.name, "Root");
        assert_eq!(config.max_navigator_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_parses_theme_and_navigation() {
        let config = AppConfig::from_json_str(
            r#"{
                "theme": { "kind": "dark" },
                "maxNavigatorDepth": 4,
                "navigation": {
                    "type": "bottomTab",
                    "name": "Tabs",
                    "initialRouteName": "Today",
                    "children": [
                        { "name": "Today", "component": "TaskListScreen" }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.theme.kind, ThemeKind::Dark);
        assert_eq!(config.max_navigator_depth, 4);
        assert_eq!(config.navigation.navigator_type().unwrap(), NavigatorType::BottomTab);
    }

    #[test]
    fn test_rejects_bad_custom_colors() {
        let err = AppConfig::from_json_str(
            r##"{
                "theme": {
                    "kind": "custom",
                    "customTheme": {
                        "name": "Broken",
                        "dark": false,
                        "colors": {
                            "primary": "blue",
                            "background": "#FFFFFF",
                            "card": "#FFFFFF",
                            "text": "#000000",
                            "border": "#CCCCCC",
                            "notification": "#FF0000"
                        }
                    }
                }
            }"##,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Broken"));
    }

    #[test]
    fn test_rejects_zero_depth() {
        assert!(AppConfig::from_json_str(r#"{"maxNavigatorDepth": 0}"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(AppConfig::from_json_str("{ not json").is_err());
    }
}
