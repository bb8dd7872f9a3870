//! Theme selection for the navigation container
//!
//! The navigation container is themed by one of three selections:
//! - Light: the built-in light theme
//! - Dark: the built-in dark theme
//! - Custom: an application-supplied theme, falling back to light when unset
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{ThemeKind, ThemeSelector};
//!
//! let mut selector = ThemeSelector::default();
//! selector.set_theme_type(ThemeKind::Dark);
//! assert!(selector.theme().dark);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while parsing or checking themes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// Theme kind string is not light, dark or custom
    #[error("Unknown theme kind: {0}")]
    UnknownKind(String),

    /// A theme color is not a hex color string
    #[error("Invalid color for {field}: {value}")]
    InvalidColor {
        /// Name of the offending color slot
        field: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as an RGB(A) hex string (e.g., "#FFFFFF" or "#FFFFFF80")
pub type Color = String;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

// =============================================================================
// Theme Definition
// =============================================================================

/// Colors consumed by navigators and screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Accent color for focused tabs, buttons and links
    pub primary: Color,
    /// Screen background
    pub background: Color,
    /// Header, tab bar and drawer background
    pub card: Color,
    /// Text color
    pub text: Color,
    /// Separator and border color
    pub border: Color,
    /// Badge color
    pub notification: Color,
}

impl ThemeColors {
    /// Check that every slot holds a hex color
    pub fn validate(&self) -> Result<()> {
        let slots = [
            ("primary", &self.primary),
            ("background", &self.background),
            ("card", &self.card),
            ("text", &self.text),
            ("border", &self.border),
            ("notification", &self.notification),
        ];
        for (field, value) in slots {
            if parse_hex_color(value).is_none() {
                return Err(ThemeError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Complete theme handed to the navigation container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name of the theme
    pub name: String,
    /// Whether the theme is dark
    pub dark: bool,
    /// Theme colors
    pub colors: ThemeColors,
}

/// Create the light theme
pub fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        dark: false,
        colors: ThemeColors {
            primary: "#007AFF".to_string(),
            background: "#F2F2F2".to_string(),
            card: "#FFFFFF".to_string(),
            text: "#1C1C1E".to_string(),
            border: "#D8D8D8".to_string(),
            notification: "#FF3B30".to_string(),
        },
    }
}

/// Create the dark theme
pub fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        dark: true,
        colors: ThemeColors {
            primary: "#0A84FF".to_string(),
            background: "#010101".to_string(),
            card: "#121212".to_string(),
            text: "#E5E5E7".to_string(),
            border: "#272729".to_string(),
            notification: "#FF453A".to_string(),
        },
    }
}

// =============================================================================
// Theme Selection
// =============================================================================

/// Which theme the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    /// Built-in light theme
    #[default]
    Light,
    /// Built-in dark theme
    Dark,
    /// Application-supplied theme
    Custom,
}

impl std::fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeKind::Light => write!(f, "light"),
            ThemeKind::Dark => write!(f, "dark"),
            ThemeKind::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for ThemeKind {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeKind::Light),
            "dark" => Ok(ThemeKind::Dark),
            "custom" => Ok(ThemeKind::Custom),
            _ => Err(ThemeError::UnknownKind(s.to_string())),
        }
    }
}

/// A theme selection: the picked kind plus the optional custom theme
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSelection {
    /// Selected kind
    #[serde(default)]
    pub kind: ThemeKind,
    /// Theme used when `kind` is custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,
}

/// Resolve a selection to a concrete theme
///
/// A custom selection without a custom theme resolves to the light theme.
pub fn resolve(selection: &ThemeSelection) -> Theme {
    match selection.kind {
        ThemeKind::Light => light_theme(),
        ThemeKind::Dark => dark_theme(),
        ThemeKind::Custom => selection
            .custom_theme
            .clone()
            .unwrap_or_else(light_theme),
    }
}

/// Theme selection state owned by the application shell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeSelector {
    selection: ThemeSelection,
}

impl ThemeSelector {
    /// Create a selector with an initial selection
    pub fn new(selection: ThemeSelection) -> Self {
        Self { selection }
    }

    /// Current selection
    pub fn selection(&self) -> &ThemeSelection {
        &self.selection
    }

    /// Selected kind
    pub fn theme_type(&self) -> ThemeKind {
        self.selection.kind
    }

    /// Custom theme, if one was supplied
    pub fn custom_theme(&self) -> Option<&Theme> {
        self.selection.custom_theme.as_ref()
    }

    /// Resolved theme for the current selection
    pub fn theme(&self) -> Theme {
        resolve(&self.selection)
    }

    /// Switch the selected kind
    pub fn set_theme_type(&mut self, kind: ThemeKind) {
        tracing::info!(kind = %kind, "theme type changed");
        self.selection.kind = kind;
    }

    /// Store a custom theme; it only takes effect while the kind is custom
    pub fn set_custom_theme(&mut self, theme: Theme) {
        tracing::info!(name = %theme.name, "custom theme set");
        self.selection.custom_theme = Some(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sepia_theme() -> Theme {
        Theme {
            name: "Sepia".to_string(),
            dark: false,
            colors: ThemeColors {
                primary: "#8B5E3C".to_string(),
                background: "#F4ECD8".to_string(),
                card: "#FBF5E6".to_string(),
                text: "#3B2F2F".to_string(),
                border: "#D9C8A9".to_string(),
                notification: "#C0392B".to_string(),
            },
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#007AFF"), Some((0, 122, 255)));
        assert_eq!(parse_hex_color("007AFF80"), Some((0, 122, 255)));
        assert_eq!(parse_hex_color("#FF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_theme_kind_from_str() {
        assert_eq!("light".parse::<ThemeKind>().unwrap(), ThemeKind::Light);
        assert_eq!("DARK".parse::<ThemeKind>().unwrap(), ThemeKind::Dark);
        assert_eq!("custom".parse::<ThemeKind>().unwrap(), ThemeKind::Custom);
        assert_eq!(
            "dim".parse::<ThemeKind>(),
            Err(ThemeError::UnknownKind("dim".to_string()))
        );
    }

    #[test]
    fn test_resolve_builtin_kinds() {
        let light = resolve(&ThemeSelection::default());
        assert_eq!(light, light_theme());
        assert!(!light.dark);

        let dark = resolve(&ThemeSelection {
            kind: ThemeKind::Dark,
            custom_theme: Some(sepia_theme()),
        });
        assert_eq!(dark, dark_theme());
    }

    #[test]
    fn test_resolve_custom_falls_back_to_light() {
        let selection = ThemeSelection {
            kind: ThemeKind::Custom,
            custom_theme: None,
        };
        assert_eq!(resolve(&selection), light_theme());
    }

    #[test]
    fn test_resolve_custom_returns_custom_theme() {
        let selection = ThemeSelection {
            kind: ThemeKind::Custom,
            custom_theme: Some(sepia_theme()),
        };
        assert_eq!(resolve(&selection), sepia_theme());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let selection = ThemeSelection {
            kind: ThemeKind::Custom,
            custom_theme: Some(sepia_theme()),
        };
        assert_eq!(resolve(&selection), resolve(&selection));
    }

    #[test]
    fn test_selector_mutations_are_observable() {
        let mut selector = ThemeSelector::default();
        assert_eq!(selector.theme_type(), ThemeKind::Light);

        selector.set_theme_type(ThemeKind::Custom);
        assert_eq!(selector.theme(), light_theme());

        selector.set_custom_theme(sepia_theme());
        assert_eq!(selector.theme(), sepia_theme());

        selector.set_theme_type(ThemeKind::Dark);
        assert_eq!(selector.theme(), dark_theme());
        // Custom theme is kept for later
        assert_eq!(selector.custom_theme(), Some(&sepia_theme()));
    }

    #[test]
    fn test_builtin_colors_are_valid() {
        assert!(light_theme().colors.validate().is_ok());
        assert!(dark_theme().colors.validate().is_ok());
    }

    #[test]
    fn test_invalid_custom_color_rejected() {
        let mut theme = sepia_theme();
        theme.colors.border = "tan".to_string();
        assert_eq!(
            theme.colors.validate(),
            Err(ThemeError::InvalidColor {
                field: "border",
                value: "tan".to_string()
            })
        );
    }

    #[test]
    fn test_selection_serialization() {
        let selection: ThemeSelection =
            serde_json::from_str(r#"{"kind":"dark"}"#).unwrap();
        assert_eq!(selection.kind, ThemeKind::Dark);
        assert!(selection.custom_theme.is_none());

        let json = serde_json::to_string(&ThemeKind::Custom).unwrap();
        assert_eq!(json, "\"custom\"");
    }
}
