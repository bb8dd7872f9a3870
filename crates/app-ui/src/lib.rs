//! User interface layer for the Task Planner
//!
//! This crate provides the navigation framework and theming the application
//! shell builds on.
//!
//! # Modules
//!
//! - [`navigation`] - Declarative navigator trees, composition and the command handle
//! - [`components`] - Screen renderables and their registry
//! - [`theme`] - Light, dark and custom theme selection
//!
//! # Example
//!
//! ```rust
//! use app_ui::theme::{ThemeKind, ThemeSelection, resolve};
//!
//! let theme = resolve(&ThemeSelection { kind: ThemeKind::Dark, custom_theme: None });
//! assert!(theme.dark);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod navigation;
pub mod theme;

// Re-export commonly used types
pub use components::{ComponentRegistry, Renderable, RenderedFrame, ScreenProps};

pub use navigation::{
    Composer, MountedNavigator, NavigationContainer, NavigationError, NavigationHandle,
    NavigationTarget, NavigatorNode, NavigatorOptions, NavigatorType, ResetRoute, RouteConfig,
    RouteParams, ScreenDescriptor, ScreenOptions,
};

pub use theme::{
    dark_theme, light_theme, resolve, Theme, ThemeColors, ThemeError, ThemeKind, ThemeSelection,
    ThemeSelector,
};
