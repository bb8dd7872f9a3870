//! Mounted navigators and their route state
//!
//! A [`MountedNavigator`] is what the composer produces for one navigator
//! node. It owns its registered routes in configuration order and a history
//! of focused route entries. Nested navigators stay unmounted until their
//! route is focused or rendered for the first time.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::composer::{Composer, NavigatorProps, RouteRegistration};
use super::config::{NavigatorNode, NavigatorOptions, NavigatorType, RouteConfig, ScreenOptions};
use super::{NavigationError, Result};
use crate::components::{RenderedFrame, Renderable, ScreenProps};
use crate::theme::Theme;

// =============================================================================
// Route Parameters
// =============================================================================

/// Parameters attached to a route entry
pub type RouteParams = serde_json::Map<String, Value>;

/// Merge `params` over `defaults` and decode the result
///
/// Keys present in `params` win; keys missing from `params` keep their default.
pub fn route_params<T>(params: &RouteParams, defaults: T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        _ => RouteParams::new(),
    };
    for (key, value) in params {
        merged.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}

// =============================================================================
// History Entries
// =============================================================================

/// One entry in a navigator's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Unique key for this entry
    pub key: String,
    /// Route name
    pub name: String,
    /// Route params
    #[serde(default)]
    pub params: RouteParams,
}

impl RouteEntry {
    /// Create a new entry with a fresh key
    pub fn new(name: impl Into<String>, params: Option<RouteParams>) -> Self {
        let name = name.into();
        Self {
            key: format!("{}-{}", name, uuid::Uuid::new_v4()),
            name,
            params: params.unwrap_or_default(),
        }
    }
}

/// A route passed to `reset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetRoute {
    /// Route name
    pub name: String,
    /// Route params
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RouteParams>,
}

impl ResetRoute {
    /// Reset target without params
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    /// Reset target with params
    pub fn with_params(name: impl Into<String>, params: RouteParams) -> Self {
        Self {
            name: name.into(),
            params: Some(params),
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

/// A nested navigator that is built on first activation
pub struct LazyNavigator {
    config: NavigatorNode,
    composer: Arc<Composer>,
    mounted: Option<Box<MountedNavigator>>,
}

impl std::fmt::Debug for LazyNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyNavigator")
            .field("name", &self.config.name)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl LazyNavigator {
    pub(crate) fn new(config: NavigatorNode, composer: Arc<Composer>) -> Self {
        Self {
            config,
            composer,
            mounted: None,
        }
    }

    /// Configuration of the nested navigator
    pub fn config(&self) -> &NavigatorNode {
        &self.config
    }

    /// Whether the nested navigator has been built
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The nested navigator, if already built
    pub fn get(&self) -> Option<&MountedNavigator> {
        self.mounted.as_deref()
    }

    /// The nested navigator, if already built
    pub fn get_mut(&mut self) -> Option<&mut MountedNavigator> {
        self.mounted.as_deref_mut()
    }

    /// Build the nested navigator if needed and return it
    pub fn get_or_mount(&mut self) -> Result<&mut MountedNavigator> {
        let navigator = match self.mounted.take() {
            Some(navigator) => navigator,
            None => {
                tracing::debug!(navigator = %self.config.name, "mounting nested navigator");
                Box::new(self.composer.build(&self.config)?)
            }
        };
        let navigator: &mut MountedNavigator = self.mounted.insert(navigator);
        Ok(navigator)
    }

    /// Drop the built navigator so the next activation starts fresh
    pub(crate) fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            tracing::debug!(navigator = %self.config.name, "unmounted nested navigator");
        }
    }

    /// Whether navigating to `name` inside this navigator would find a route
    pub(crate) fn handles(&self, name: &str) -> bool {
        match self.get() {
            Some(navigator) => navigator.handles(name),
            None => initially_handles(&self.config, name),
        }
    }
}

/// Whether a freshly mounted `node` resolves `name` along its initial routes
fn initially_handles(node: &NavigatorNode, name: &str) -> bool {
    if node.child(name).is_some() {
        return true;
    }
    match node.child(&node.initial_route_name) {
        Some(RouteConfig::Navigator(nested)) => initially_handles(nested, name),
        _ => false,
    }
}

/// What a route renders
pub enum RouteBody {
    /// A screen bound directly to its renderable
    Screen(Arc<dyn Renderable>),
    /// A nested navigator
    Navigator(LazyNavigator),
}

impl std::fmt::Debug for RouteBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteBody::Screen(_) => f.write_str("Screen(..)"),
            RouteBody::Navigator(lazy) => f.debug_tuple("Navigator").field(lazy).finish(),
        }
    }
}

/// A route registered on a mounted navigator
#[derive(Debug)]
pub struct MountedRoute {
    /// Route name
    pub name: String,
    /// Options applied to the route
    pub options: ScreenOptions,
    /// Icon for tab bars and drawers
    pub icon: Option<String>,
    /// Route body
    pub body: RouteBody,
}

impl MountedRoute {
    /// Whether the route hosts a nested navigator
    pub fn is_navigator(&self) -> bool {
        matches!(self.body, RouteBody::Navigator(_))
    }

    /// The nested navigator, if this route hosts one and it is mounted
    pub fn nested(&self) -> Option<&MountedNavigator> {
        match &self.body {
            RouteBody::Navigator(lazy) => lazy.get(),
            RouteBody::Screen(_) => None,
        }
    }
}

impl From<RouteRegistration> for MountedRoute {
    fn from(registration: RouteRegistration) -> Self {
        Self {
            name: registration.name,
            options: registration.options,
            icon: registration.icon,
            body: registration.body,
        }
    }
}

// =============================================================================
// Mounted Navigator
// =============================================================================

/// A live navigator with its routes and history
#[derive(Debug)]
pub struct MountedNavigator {
    navigator_type: NavigatorType,
    name: String,
    options: NavigatorOptions,
    initial_route: String,
    routes: Vec<MountedRoute>,
    history: Vec<RouteEntry>,
    index: usize,
}

impl MountedNavigator {
    /// Create a navigator focused on its initial route
    ///
    /// The props come from a validated node, so the initial route is one of
    /// the registered routes.
    pub fn new(navigator_type: NavigatorType, props: NavigatorProps, routes: Vec<RouteRegistration>) -> Self {
        let history = vec![RouteEntry::new(props.initial_route_name.clone(), None)];
        Self {
            navigator_type,
            name: props.name,
            options: props.options,
            initial_route: props.initial_route_name,
            routes: routes.into_iter().map(MountedRoute::from).collect(),
            history,
            index: 0,
        }
    }

    /// Navigator kind
    pub fn navigator_type(&self) -> NavigatorType {
        self.navigator_type
    }

    /// Navigator name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Navigator options
    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    /// Initial route name
    pub fn initial_route(&self) -> &str {
        &self.initial_route
    }

    /// Registered routes in configuration order
    pub fn routes(&self) -> &[MountedRoute] {
        &self.routes
    }

    /// Registered route names in configuration order
    pub fn route_names(&self) -> Vec<&str> {
        self.routes.iter().map(|route| route.name.as_str()).collect()
    }

    /// Look up a registered route
    pub fn route(&self, name: &str) -> Option<&MountedRoute> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Whether a route with this name is registered
    pub fn has_route(&self, name: &str) -> bool {
        self.route(name).is_some()
    }

    /// History entries, oldest first
    pub fn history(&self) -> &[RouteEntry] {
        &self.history
    }

    /// Index of the focused entry in the history
    pub fn index(&self) -> usize {
        self.index
    }

    /// The focused entry
    pub fn focused(&self) -> &RouteEntry {
        &self.history[self.index]
    }

    /// Name of the focused route
    pub fn focused_route(&self) -> &str {
        &self.focused().name
    }

    /// Whether `go_back` would change this navigator
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Nested navigator behind the focused route, if mounted
    pub fn focused_nested(&self) -> Option<&MountedNavigator> {
        self.route(self.focused_route()).and_then(MountedRoute::nested)
    }

    /// Route names from this navigator down to the deepest mounted focus
    pub fn focused_path(&self) -> Vec<String> {
        let mut path = vec![self.focused_route().to_string()];
        if let Some(nested) = self.focused_nested() {
            path.extend(nested.focused_path());
        }
        path
    }

    /// Whether `name` is registered here or on the focused nested path
    fn handles(&self, name: &str) -> bool {
        self.has_route(name) || self.focused_nested().is_some_and(|nested| nested.handles(name))
    }

    /// Unmount stack routes whose entries left the history
    fn release_detached(&mut self) {
        if !self.navigator_type.is_stack() {
            return;
        }
        let history = &self.history;
        for route in self.routes.iter_mut() {
            if let RouteBody::Navigator(lazy) = &mut route.body {
                if history.iter().all(|entry| entry.name != route.name) {
                    lazy.unmount();
                }
            }
        }
    }

    fn route_mut(&mut self, name: &str) -> Option<&mut MountedRoute> {
        self.routes.iter_mut().find(|route| route.name == name)
    }

    /// Mount and return the nested navigator behind the focused route
    fn focused_nested_mut(&mut self) -> Result<Option<&mut MountedNavigator>> {
        let focused = self.history[self.index].name.clone();
        match self.route_mut(&focused).map(|route| &mut route.body) {
            Some(RouteBody::Navigator(lazy)) => lazy.get_or_mount().map(Some),
            _ => Ok(None),
        }
    }

    /// Mount the nested navigator behind `name`, if any
    fn activate(&mut self, name: &str) -> Result<()> {
        if let Some(RouteBody::Navigator(lazy)) = self.route_mut(name).map(|route| &mut route.body) {
            lazy.get_or_mount()?;
        }
        Ok(())
    }

    /// Focus a registered route on this navigator
    fn focus(&mut self, name: &str, params: Option<RouteParams>) -> Result<()> {
        let keep = self.index + 1;
        self.history.truncate(keep);

        if let Some(position) = self.history.iter().position(|entry| entry.name == name) {
            if self.navigator_type.is_stack() {
                // Stacks pop back to an existing entry
                self.history.truncate(position + 1);
                if let Some(params) = params {
                    self.history[position].params.extend(params);
                }
            } else {
                // Tabs and drawers move the entry to the top of their history
                let mut entry = self.history.remove(position);
                if let Some(params) = params {
                    entry.params.extend(params);
                }
                self.history.push(entry);
            }
        } else {
            self.history.push(RouteEntry::new(name, params));
        }
        self.release_detached();

        self.index = self.history.len() - 1;
        tracing::debug!(
            navigator = %self.name,
            route = %name,
            depth = self.history.len(),
            "focused route"
        );
        self.activate(name)
    }

    /// Navigate to `name`, letting the deepest focused navigator handle it first
    pub fn navigate(&mut self, name: &str, params: Option<RouteParams>) -> Result<()> {
        if self.try_navigate(name, params)? {
            Ok(())
        } else {
            tracing::warn!(navigator = %self.name, route = %name, "navigate to unknown route");
            Err(NavigationError::UnknownRoute(name.to_string()))
        }
    }

    fn try_navigate(&mut self, name: &str, params: Option<RouteParams>) -> Result<bool> {
        if let Some(nested) = self.focused_nested_mut()? {
            if nested.try_navigate(name, params.clone())? {
                return Ok(true);
            }
        }
        if self.has_route(name) {
            self.focus(name, params)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Navigate to `screen` inside the navigator registered as `parent`
    pub fn navigate_nested(&mut self, parent: &str, screen: &str, params: Option<RouteParams>) -> Result<()> {
        if self.try_navigate_nested(parent, screen, params)? {
            Ok(())
        } else {
            tracing::warn!(navigator = %self.name, route = %parent, "navigate to unknown route");
            Err(NavigationError::UnknownRoute(parent.to_string()))
        }
    }

    fn try_navigate_nested(&mut self, parent: &str, screen: &str, params: Option<RouteParams>) -> Result<bool> {
        if let Some(nested) = self.focused_nested_mut()? {
            if nested.try_navigate_nested(parent, screen, params.clone())? {
                return Ok(true);
            }
        }
        match self.route(parent).map(|route| &route.body) {
            None => return Ok(false),
            Some(RouteBody::Screen(_)) => {
                return Err(NavigationError::NotANavigator(parent.to_string()));
            }
            Some(RouteBody::Navigator(lazy)) => {
                if !lazy.handles(screen) {
                    tracing::warn!(navigator = %parent, route = %screen, "navigate to unknown route");
                    return Err(NavigationError::UnknownRoute(screen.to_string()));
                }
            }
        }
        self.focus(parent, None)?;
        match self.focused_nested_mut()? {
            Some(nested) => nested.navigate(screen, params).map(|_| true),
            None => Err(NavigationError::NotANavigator(parent.to_string())),
        }
    }

    /// Go back in the deepest focused navigator that has somewhere to go
    ///
    /// Returns false when every navigator on the focused path is at its first entry.
    pub fn go_back(&mut self) -> bool {
        match self.focused_nested_mut() {
            Ok(Some(nested)) => {
                if nested.go_back() {
                    return true;
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(navigator = %self.name, error = %err, "nested navigator failed to mount during go_back");
            }
        }
        if !self.can_go_back() {
            return false;
        }
        self.history.truncate(self.index);
        self.index -= 1;
        self.release_detached();
        tracing::debug!(navigator = %self.name, route = %self.focused_route(), "went back");
        true
    }

    /// Replace the whole history of this navigator
    ///
    /// Every route must be registered here and `start_index` must point into
    /// `routes`; otherwise the history is left untouched. Nested navigators
    /// start over from their initial route.
    pub fn reset(&mut self, routes: Vec<ResetRoute>, start_index: usize) -> Result<()> {
        if routes.is_empty() {
            return Err(NavigationError::EmptyReset);
        }
        if start_index >= routes.len() {
            return Err(NavigationError::ResetIndexOutOfRange {
                index: start_index,
                len: routes.len(),
            });
        }
        if let Some(unknown) = routes.iter().find(|route| !self.has_route(&route.name)) {
            return Err(NavigationError::UnknownRoute(unknown.name.clone()));
        }

        self.history = routes
            .into_iter()
            .map(|route| RouteEntry::new(route.name, route.params))
            .collect();
        self.index = start_index;
        for route in self.routes.iter_mut() {
            if let RouteBody::Navigator(lazy) = &mut route.body {
                lazy.unmount();
            }
        }
        tracing::debug!(
            navigator = %self.name,
            routes = self.history.len(),
            index = start_index,
            "navigation reset"
        );

        let focused = self.focused_route().to_string();
        self.activate(&focused)
    }

    /// Render the focused route path with `theme`
    pub fn render(&mut self, theme: &Theme) -> Result<RenderedFrame> {
        let mut path = Vec::new();
        self.render_into(theme, &mut path)
    }

    fn render_into(&mut self, theme: &Theme, path: &mut Vec<String>) -> Result<RenderedFrame> {
        let header_default = self.options.header_shown.unwrap_or(true);
        let entry = self.history[self.index].clone();
        path.push(entry.name.clone());

        let route = match self.route_mut(&entry.name) {
            Some(route) => route,
            None => return Err(NavigationError::UnknownRoute(entry.name)),
        };
        match &mut route.body {
            RouteBody::Screen(renderable) => {
                let props = ScreenProps {
                    route_name: &entry.name,
                    params: &entry.params,
                    options: &route.options,
                    theme,
                };
                let body = renderable.render(&props);
                Ok(RenderedFrame {
                    path: std::mem::take(path),
                    title: route.options.title.clone().unwrap_or_else(|| entry.name.clone()),
                    header_shown: route.options.header_shown.unwrap_or(header_default),
                    body,
                    theme: theme.name.clone(),
                })
            }
            RouteBody::Navigator(lazy) => lazy.get_or_mount()?.render_into(theme, path),
        }
    }
}
