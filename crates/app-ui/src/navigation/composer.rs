//! Navigator composition
//!
//! The [`Composer`] turns a [`NavigatorNode`] tree into a [`MountedNavigator`].
//! Each node's `type` tag selects one of four navigator primitives from a
//! [`PrimitiveTable`]; screens are bound to their renderables and nested
//! navigators are registered as routes that compose on first activation.
//!
//! The whole tree is validated before the root is mounted, so a malformed
//! descendant fails composition without leaving a partial tree behind.

use std::collections::HashSet;
use std::sync::Arc;

use super::config::{
    NavigatorNode, NavigatorOptions, NavigatorType, RouteConfig, ScreenOptions,
};
use super::state::{LazyNavigator, MountedNavigator, RouteBody};
use super::{NavigationError, Result};
use crate::components::ComponentRegistry;

/// Default nesting limit for configuration trees
pub const DEFAULT_MAX_DEPTH: usize = 32;

// =============================================================================
// Primitives
// =============================================================================

/// Navigator-level props handed to a primitive
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorProps {
    /// Navigator name
    pub name: String,
    /// Route focused on mount
    pub initial_route_name: String,
    /// Navigator options
    pub options: NavigatorOptions,
}

/// A route registered on a navigator, in configuration order
#[derive(Debug)]
pub struct RouteRegistration {
    /// Route name
    pub name: String,
    /// Route options
    pub options: ScreenOptions,
    /// Icon for tab bars and drawers
    pub icon: Option<String>,
    /// Screen renderable or deferred nested navigator
    pub body: RouteBody,
}

/// Builds a navigator of one kind
///
/// The UI layer supplies one primitive per [`NavigatorType`]; the built-in
/// primitive mounts the plain route-state navigator.
pub trait NavigatorPrimitive: Send + Sync {
    /// Mount a navigator from its props and registered routes
    fn mount(
        &self,
        kind: NavigatorType,
        props: NavigatorProps,
        routes: Vec<RouteRegistration>,
    ) -> Result<MountedNavigator>;
}

/// Primitive that mounts [`MountedNavigator`] directly
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPrimitive;

impl NavigatorPrimitive for BuiltinPrimitive {
    fn mount(
        &self,
        kind: NavigatorType,
        props: NavigatorProps,
        routes: Vec<RouteRegistration>,
    ) -> Result<MountedNavigator> {
        Ok(MountedNavigator::new(kind, props, routes))
    }
}

/// Navigator type to primitive mapping
#[derive(Clone)]
pub struct PrimitiveTable {
    stack: Arc<dyn NavigatorPrimitive>,
    drawer: Arc<dyn NavigatorPrimitive>,
    bottom_tab: Arc<dyn NavigatorPrimitive>,
    top_tab: Arc<dyn NavigatorPrimitive>,
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        let builtin: Arc<dyn NavigatorPrimitive> = Arc::new(BuiltinPrimitive);
        Self {
            stack: Arc::clone(&builtin),
            drawer: Arc::clone(&builtin),
            bottom_tab: Arc::clone(&builtin),
            top_tab: builtin,
        }
    }
}

impl std::fmt::Debug for PrimitiveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveTable").finish_non_exhaustive()
    }
}

impl PrimitiveTable {
    /// Table with the built-in primitive for every kind
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the primitive for `kind`
    pub fn with(mut self, kind: NavigatorType, primitive: Arc<dyn NavigatorPrimitive>) -> Self {
        *self.slot_mut(kind) = primitive;
        self
    }

    /// Primitive registered for `kind`
    pub fn get(&self, kind: NavigatorType) -> &Arc<dyn NavigatorPrimitive> {
        match kind {
            NavigatorType::Stack => &self.stack,
            NavigatorType::Drawer => &self.drawer,
            NavigatorType::BottomTab => &self.bottom_tab,
            NavigatorType::TopTab => &self.top_tab,
        }
    }

    fn slot_mut(&mut self, kind: NavigatorType) -> &mut Arc<dyn NavigatorPrimitive> {
        match kind {
            NavigatorType::Stack => &mut self.stack,
            NavigatorType::Drawer => &mut self.drawer,
            NavigatorType::BottomTab => &mut self.bottom_tab,
            NavigatorType::TopTab => &mut self.top_tab,
        }
    }
}

// =============================================================================
// Composer
// =============================================================================

/// Turns configuration trees into mounted navigators
#[derive(Debug)]
pub struct Composer {
    primitives: PrimitiveTable,
    components: ComponentRegistry,
    max_depth: usize,
}

impl Composer {
    /// Create a composer with the built-in primitives
    pub fn new(components: ComponentRegistry) -> Self {
        Self {
            primitives: PrimitiveTable::default(),
            components,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use a custom primitive table
    pub fn with_primitives(mut self, primitives: PrimitiveTable) -> Self {
        self.primitives = primitives;
        self
    }

    /// Limit how deep navigators may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Registered screen components
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Maximum nesting depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate `node` and everything below it, then mount `node`
    ///
    /// Nested navigators are registered as deferred routes and only mount
    /// once their route is focused or rendered.
    pub fn compose(self: &Arc<Self>, node: &NavigatorNode) -> Result<MountedNavigator> {
        self.validate(node, 1)?;
        self.build(node)
    }

    /// Check a tree without mounting anything
    pub fn validate(&self, node: &NavigatorNode, depth: usize) -> Result<()> {
        node.navigator_type()?;
        if depth > self.max_depth {
            return Err(NavigationError::DepthExceeded {
                navigator: node.name.clone(),
                limit: self.max_depth,
            });
        }
        if node.children.is_empty() {
            return Err(NavigationError::EmptyNavigator(node.name.clone()));
        }

        let mut seen = HashSet::new();
        for child in &node.children {
            if !seen.insert(child.name()) {
                return Err(NavigationError::DuplicateRoute {
                    navigator: node.name.clone(),
                    route: child.name().to_string(),
                });
            }
            match child {
                RouteConfig::Screen(screen) => {
                    if !self.components.contains(&screen.component) {
                        return Err(NavigationError::UnknownComponent {
                            screen: screen.name.clone(),
                            component: screen.component.clone(),
                        });
                    }
                }
                RouteConfig::Navigator(nested) => self.validate(nested, depth + 1)?,
            }
        }

        if node.child(&node.initial_route_name).is_none() {
            return Err(NavigationError::InitialRouteNotFound {
                navigator: node.name.clone(),
                initial_route: node.initial_route_name.clone(),
            });
        }
        Ok(())
    }

    /// Mount one validated node
    pub(crate) fn build(self: &Arc<Self>, node: &NavigatorNode) -> Result<MountedNavigator> {
        let kind = node.navigator_type()?;
        let routes = node
            .children
            .iter()
            .map(|child| self.register(child))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            navigator = %node.name,
            kind = %kind,
            routes = routes.len(),
            "composing navigator"
        );

        let props = NavigatorProps {
            name: node.name.clone(),
            initial_route_name: node.initial_route_name.clone(),
            options: node.options.clone(),
        };
        self.primitives.get(kind).mount(kind, props, routes)
    }

    fn register(self: &Arc<Self>, child: &RouteConfig) -> Result<RouteRegistration> {
        match child {
            RouteConfig::Screen(screen) => {
                let component = self.components.get(&screen.component).ok_or_else(|| {
                    NavigationError::UnknownComponent {
                        screen: screen.name.clone(),
                        component: screen.component.clone(),
                    }
                })?;
                Ok(RouteRegistration {
                    name: screen.name.clone(),
                    options: screen.options.clone(),
                    icon: screen.icon.clone(),
                    body: RouteBody::Screen(component),
                })
            }
            RouteConfig::Navigator(nested) => Ok(RouteRegistration {
                name: nested.name.clone(),
                options: route_options(&nested.options),
                icon: nested.icon.clone(),
                body: RouteBody::Navigator(LazyNavigator::new(nested.clone(), Arc::clone(self))),
            }),
        }
    }
}

/// Options of the route hosting a nested navigator
fn route_options(options: &NavigatorOptions) -> ScreenOptions {
    ScreenOptions {
        header_shown: options.header_shown,
        extra: options.extra.clone(),
        ..ScreenOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::config::ScreenDescriptor;
    use parking_lot::Mutex;

    fn components() -> ComponentRegistry {
        let mut components = ComponentRegistry::new();
        for key in ["X", "Y", "Z"] {
            components.register_fn(key, move |_| key.to_string());
        }
        components
    }

    /// Records every navigator it mounts
    #[derive(Default)]
    struct RecordingPrimitive {
        mounted: Mutex<Vec<(NavigatorType, String)>>,
    }

    impl NavigatorPrimitive for RecordingPrimitive {
        fn mount(
            &self,
            kind: NavigatorType,
            props: NavigatorProps,
            routes: Vec<RouteRegistration>,
        ) -> Result<MountedNavigator> {
            self.mounted.lock().push((kind, props.name.clone()));
            BuiltinPrimitive.mount(kind, props, routes)
        }
    }

    fn recording_composer(recorder: &Arc<RecordingPrimitive>) -> Arc<Composer> {
        let mut table = PrimitiveTable::new();
        for kind in NavigatorType::ALL {
            table = table.with(kind, Arc::clone(recorder) as Arc<dyn NavigatorPrimitive>);
        }
        Arc::new(Composer::new(components()).with_primitives(table))
    }

    fn example_tree() -> NavigatorNode {
        NavigatorNode::new(NavigatorType::Stack, "Root", "A")
            .screen(ScreenDescriptor::new("A", "X"))
            .navigator(
                NavigatorNode::new(NavigatorType::BottomTab, "B", "B1")
                    .screen(ScreenDescriptor::new("B1", "Y"))
                    .screen(ScreenDescriptor::new("B2", "Z")),
            )
    }

    #[test]
    fn test_compose_preserves_child_order() {
        let node = NavigatorNode::new(NavigatorType::Drawer, "Main", "Z")
            .screen(ScreenDescriptor::new("Z", "Z"))
            .screen(ScreenDescriptor::new("X", "X"))
            .screen(ScreenDescriptor::new("Y", "Y"));

        let nav = Arc::new(Composer::new(components())).compose(&node).unwrap();
        assert_eq!(nav.navigator_type(), NavigatorType::Drawer);
        assert_eq!(nav.route_names(), ["Z", "X", "Y"]);
        assert_eq!(nav.focused_route(), "Z");
    }

    #[test]
    fn test_dispatches_on_navigator_type() {
        for kind in NavigatorType::ALL {
            let recorder = Arc::new(RecordingPrimitive::default());
            let node = NavigatorNode::new(kind, "Nav", "X").screen(ScreenDescriptor::new("X", "X"));
            let nav = recording_composer(&recorder).compose(&node).unwrap();

            assert_eq!(nav.navigator_type(), kind);
            assert_eq!(*recorder.mounted.lock(), vec![(kind, "Nav".to_string())]);
        }
    }

    #[test]
    fn test_nested_navigator_mounts_lazily() {
        let recorder = Arc::new(RecordingPrimitive::default());
        let mut nav = recording_composer(&recorder).compose(&example_tree()).unwrap();

        assert_eq!(recorder.mounted.lock().len(), 1);
        assert!(nav.route("B").unwrap().nested().is_none());

        nav.navigate("B", None).unwrap();
        let nested = nav.route("B").unwrap().nested().unwrap();
        assert_eq!(nested.navigator_type(), NavigatorType::BottomTab);
        assert_eq!(nested.route_names(), ["B1", "B2"]);
        assert_eq!(nested.focused_route(), "B1");
        assert_eq!(
            *recorder.mounted.lock(),
            vec![
                (NavigatorType::Stack, "Root".to_string()),
                (NavigatorType::BottomTab, "B".to_string())
            ]
        );
    }

    #[test]
    fn test_unknown_type_fails_before_mounting() {
        let recorder = Arc::new(RecordingPrimitive::default());
        let mut node = example_tree();
        if let RouteConfig::Navigator(nested) = &mut node.children[1] {
            nested.kind = "tab".to_string();
        }

        let err = recording_composer(&recorder).compose(&node).unwrap_err();
        assert!(matches!(&err, NavigationError::UnknownNavigatorType(tag) if tag == "tab"));
        assert!(err.is_configuration_error());
        assert!(recorder.mounted.lock().is_empty());
    }

    #[test]
    fn test_initial_route_must_name_a_child() {
        let node = NavigatorNode::new(NavigatorType::Stack, "Root", "Missing")
            .screen(ScreenDescriptor::new("A", "X"));
        let err = Arc::new(Composer::new(components())).compose(&node).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InitialRouteNotFound { navigator, initial_route }
                if navigator == "Root" && initial_route == "Missing"
        ));
    }

    #[test]
    fn test_initial_route_may_name_a_nested_navigator() {
        let mut node = example_tree();
        node.initial_route_name = "B".to_string();
        let mut nav = Arc::new(Composer::new(components())).compose(&node).unwrap();
        assert_eq!(nav.focused_route(), "B");

        let frame = nav.render(&crate::theme::light_theme()).unwrap();
        assert_eq!(frame.path, ["B", "B1"]);
        assert_eq!(frame.body, "Y");
    }

    #[test]
    fn test_rejects_empty_navigator() {
        let node = NavigatorNode::new(NavigatorType::TopTab, "Empty", "A");
        let err = Arc::new(Composer::new(components())).compose(&node).unwrap_err();
        assert!(matches!(err, NavigationError::EmptyNavigator(name) if name == "Empty"));
    }

    #[test]
    fn test_rejects_duplicate_sibling_names() {
        let node = NavigatorNode::new(NavigatorType::Stack, "Root", "A")
            .screen(ScreenDescriptor::new("A", "X"))
            .screen(ScreenDescriptor::new("A", "Y"));
        let err = Arc::new(Composer::new(components())).compose(&node).unwrap_err();
        assert!(matches!(err, NavigationError::DuplicateRoute { route, .. } if route == "A"));
    }

    #[test]
    fn test_rejects_unregistered_component() {
        let node = NavigatorNode::new(NavigatorType::Stack, "Root", "A")
            .screen(ScreenDescriptor::new("A", "Unregistered"));
        let err = Arc::new(Composer::new(components())).compose(&node).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::UnknownComponent { component, .. } if component == "Unregistered"
        ));
    }

    #[test]
    fn test_depth_guard() {
        let mut node = NavigatorNode::new(NavigatorType::Stack, "Level3", "Leaf")
            .screen(ScreenDescriptor::new("Leaf", "X"));
        for level in (1..=2).rev() {
            let name = format!("Level{}", level);
            let child = node.name.clone();
            node = NavigatorNode::new(NavigatorType::Stack, name, child).navigator(node);
        }

        let shallow = Arc::new(Composer::new(components()).with_max_depth(2));
        let err = shallow.compose(&node).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::DepthExceeded { navigator, limit: 2 } if navigator == "Level3"
        ));

        let deep_enough = Arc::new(Composer::new(components()).with_max_depth(3));
        assert!(deep_enough.compose(&node).is_ok());
    }

    #[test]
    fn test_nested_route_inherits_navigator_options() {
        let mut tree = example_tree();
        if let RouteConfig::Navigator(nested) = &mut tree.children[1] {
            nested.options.header_shown = Some(false);
        }
        let nav = Arc::new(Composer::new(components())).compose(&tree).unwrap();
        assert_eq!(nav.route("B").unwrap().options.header_shown, Some(false));
    }
}
