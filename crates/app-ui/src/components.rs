//! Screen components and their registry
//!
//! Screens are opaque to the navigation layer: a [`Renderable`] receives the
//! route it is mounted under plus the resolved theme and returns its body.
//! Configuration trees refer to renderables by key, and the
//! [`ComponentRegistry`] maps those keys to implementations.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::navigation::{RouteParams, ScreenOptions};
use crate::theme::Theme;

/// Everything a screen sees when it renders
#[derive(Debug, Clone, Copy)]
pub struct ScreenProps<'a> {
    /// Name of the route the screen is mounted under
    pub route_name: &'a str,
    /// Params of the focused route entry
    pub params: &'a RouteParams,
    /// Screen options from the configuration tree
    pub options: &'a ScreenOptions,
    /// Theme resolved for this render pass
    pub theme: &'a Theme,
}

/// A screen implementation
pub trait Renderable: Send + Sync {
    /// Render the screen body
    fn render(&self, props: &ScreenProps<'_>) -> String;
}

impl<F> Renderable for F
where
    F: Fn(&ScreenProps<'_>) -> String + Send + Sync,
{
    fn render(&self, props: &ScreenProps<'_>) -> String {
        self(props)
    }
}

/// Component key to renderable lookup
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn Renderable>>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.components.keys().collect();
        keys.sort();
        f.debug_struct("ComponentRegistry")
            .field("components", &keys)
            .finish()
    }
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared renderable under `key`, replacing any previous one
    pub fn register_shared(&mut self, key: impl Into<String>, component: Arc<dyn Renderable>) -> &mut Self {
        self.components.insert(key.into(), component);
        self
    }

    /// Register a renderable under `key`
    pub fn register<R: Renderable + 'static>(&mut self, key: impl Into<String>, component: R) -> &mut Self {
        self.register_shared(key, Arc::new(component))
    }

    /// Register a render function under `key`
    pub fn register_fn<F>(&mut self, key: impl Into<String>, render: F) -> &mut Self
    where
        F: Fn(&ScreenProps<'_>) -> String + Send + Sync + 'static,
    {
        self.register(key, render)
    }

    /// Look up a renderable
    pub fn get(&self, key: &str) -> Option<Arc<dyn Renderable>> {
        self.components.get(key).cloned()
    }

    /// Whether `key` is registered
    pub fn contains(&self, key: &str) -> bool {
        self.components.contains_key(key)
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Output of one render pass over the focused route path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFrame {
    /// Route names from the root navigator down to the focused screen
    pub path: Vec<String>,
    /// Header title of the focused screen
    pub title: String,
    /// Whether the focused screen shows a header
    pub header_shown: bool,
    /// Body returned by the screen
    pub body: String,
    /// Name of the theme used for the pass
    pub theme: String,
}

impl RenderedFrame {
    /// Name of the focused screen route
    pub fn screen(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}
