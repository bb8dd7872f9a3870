//! Declarative navigator configuration
//!
//! A configuration tree is plain data: navigator nodes own an ordered list of
//! children, each either a nested navigator or a screen. Trees are authored in
//! Rust with the builder methods or loaded from JSON:
//!
//! ```json
//! {
//!   "type": "stack",
//!   "name": "Root",
//!   "initialRouteName": "TaskList",
//!   "options": { "headerShown": false },
//!   "screens": [
//!     { "name": "TaskList", "component": "TaskListScreen", "options": { "title": "Task Planner" } }
//!   ]
//! }
//! ```
//!
//! The navigator `type` is kept as authored and checked by the composer, so an
//! unknown tag surfaces as a configuration error naming the tag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{NavigationError, Result};

// =============================================================================
// Navigator Types
// =============================================================================

/// The four navigator kinds a tree may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigatorType {
    /// Card stack with push/pop history
    Stack,
    /// Side drawer
    Drawer,
    /// Tab bar at the bottom of the screen
    BottomTab,
    /// Swipeable tabs at the top of the screen
    TopTab,
}

impl NavigatorType {
    /// Every navigator kind
    pub const ALL: [NavigatorType; 4] = [
        NavigatorType::Stack,
        NavigatorType::Drawer,
        NavigatorType::BottomTab,
        NavigatorType::TopTab,
    ];

    /// Configuration tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            NavigatorType::Stack => "stack",
            NavigatorType::Drawer => "drawer",
            NavigatorType::BottomTab => "bottomTab",
            NavigatorType::TopTab => "topTab",
        }
    }

    /// Whether `navigate` pushes history entries instead of switching focus
    pub fn is_stack(&self) -> bool {
        matches!(self, NavigatorType::Stack)
    }
}

impl std::fmt::Display for NavigatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for NavigatorType {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        NavigatorType::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| NavigationError::UnknownNavigatorType(s.to_string()))
    }
}

// =============================================================================
// Options
// =============================================================================

/// Navigator-level options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorOptions {
    /// Show the navigator header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_shown: Option<bool>,

    /// Pass-through styling options
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Screen-level options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenOptions {
    /// Header title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Show the screen header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_shown: Option<bool>,

    /// Label in a bottom or top tab bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_bar_label: Option<String>,

    /// Label in a drawer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawer_label: Option<String>,

    /// Pass-through styling options
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScreenOptions {
    /// Options with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

// =============================================================================
// Tree Nodes
// =============================================================================

/// A leaf screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDescriptor {
    /// Route name, unique among siblings
    pub name: String,
    /// Key of the renderable in the component registry
    pub component: String,
    /// Screen options
    #[serde(default)]
    pub options: ScreenOptions,
    /// Icon name for tab bars and drawers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ScreenDescriptor {
    /// Create a screen bound to a component key
    pub fn new(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
            options: ScreenOptions::default(),
            icon: None,
        }
    }

    /// Set the screen options
    pub fn options(mut self, options: ScreenOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the screen icon
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A navigator and its ordered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorNode {
    /// Navigator type tag as authored (`stack`, `drawer`, `bottomTab`, `topTab`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Route name of this navigator inside its parent
    pub name: String,
    /// Child focused when the navigator mounts
    pub initial_route_name: String,
    /// Children in display order
    #[serde(alias = "screens")]
    pub children: Vec<RouteConfig>,
    /// Navigator options
    #[serde(default)]
    pub options: NavigatorOptions,
    /// Icon name for tab bars and drawers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavigatorNode {
    /// Create an empty navigator of the given kind
    pub fn new(
        kind: NavigatorType,
        name: impl Into<String>,
        initial_route_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.tag().to_string(),
            name: name.into(),
            initial_route_name: initial_route_name.into(),
            children: Vec::new(),
            options: NavigatorOptions::default(),
            icon: None,
        }
    }

    /// Append a screen child
    pub fn screen(mut self, screen: ScreenDescriptor) -> Self {
        self.children.push(RouteConfig::Screen(screen));
        self
    }

    /// Append a nested navigator child
    pub fn navigator(mut self, navigator: NavigatorNode) -> Self {
        self.children.push(RouteConfig::Navigator(navigator));
        self
    }

    /// Set the navigator options
    pub fn options(mut self, options: NavigatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the navigator icon
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Parse the type tag
    pub fn navigator_type(&self) -> Result<NavigatorType> {
        self.kind.parse()
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&RouteConfig> {
        self.children.iter().find(|child| child.name() == name)
    }
}

/// A child of a navigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteConfig {
    /// Nested navigator
    Navigator(NavigatorNode),
    /// Leaf screen
    Screen(ScreenDescriptor),
}

impl RouteConfig {
    /// Route name of the child
    pub fn name(&self) -> &str {
        match self {
            RouteConfig::Navigator(node) => &node.name,
            RouteConfig::Screen(screen) => &screen.name,
        }
    }

    /// Icon of the child
    pub fn icon(&self) -> Option<&str> {
        match self {
            RouteConfig::Navigator(node) => node.icon.as_deref(),
            RouteConfig::Screen(screen) => screen.icon.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_type_tags() {
        for kind in NavigatorType::ALL {
            assert_eq!(kind.tag().parse::<NavigatorType>().unwrap(), kind);
        }
        assert_eq!(NavigatorType::BottomTab.to_string(), "bottomTab");
        assert!(matches!(
            "tab".parse::<NavigatorType>(),
            Err(NavigationError::UnknownNavigatorType(tag)) if tag == "tab"
        ));
    }

    #[test]
    fn test_navigator_type_serialization() {
        let json = serde_json::to_string(&NavigatorType::TopTab).unwrap();
        assert_eq!(json, "\"topTab\"");
    }

    #[test]
    fn test_builder_preserves_child_order() {
        let node = NavigatorNode::new(NavigatorType::Drawer, "Main", "Inbox")
            .screen(ScreenDescriptor::new("Inbox", "InboxScreen"))
            .navigator(
                NavigatorNode::new(NavigatorType::TopTab, "Lists", "Today")
                    .screen(ScreenDescriptor::new("Today", "TodayScreen")),
            )
            .screen(ScreenDescriptor::new("Settings", "SettingsScreen").icon("gear"));

        let names: Vec<&str> = node.children.iter().map(RouteConfig::name).collect();
        assert_eq!(names, ["Inbox", "Lists", "Settings"]);
        assert_eq!(node.child("Settings").and_then(RouteConfig::icon), Some("gear"));
        assert_eq!(node.navigator_type().unwrap(), NavigatorType::Drawer);
    }

    #[test]
    fn test_deserialize_nested_tree() {
        let json = r#"{
            "type": "stack",
            "name": "Root",
            "initialRouteName": "TaskList",
            "options": { "headerShown": false, "animation": "fade" },
            "screens": [
                { "name": "TaskList", "component": "TaskListScreen", "options": { "title": "Task Planner" } },
                {
                    "type": "bottomTab",
                    "name": "Home",
                    "initialRouteName": "Today",
                    "children": [
                        { "name": "Today", "component": "TodayScreen", "icon": "sun" }
                    ]
                }
            ]
        }"#;

        let node: NavigatorNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, "stack");
        assert_eq!(node.options.header_shown, Some(false));
        assert_eq!(node.options.extra.get("animation"), Some(&Value::from("fade")));

        match &node.children[0] {
            RouteConfig::Screen(screen) => {
                assert_eq!(screen.component, "TaskListScreen");
                assert_eq!(screen.options.title.as_deref(), Some("Task Planner"));
            }
            other => panic!("expected screen, got {:?}", other),
        }
        match &node.children[1] {
            RouteConfig::Navigator(nested) => {
                assert_eq!(nested.navigator_type().unwrap(), NavigatorType::BottomTab);
                assert_eq!(nested.children[0].icon(), Some("sun"));
            }
            other => panic!("expected navigator, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_survives_parsing() {
        let json = r#"{
            "type": "carousel",
            "name": "Root",
            "initialRouteName": "A",
            "children": [{ "name": "A", "component": "A" }]
        }"#;

        let node: NavigatorNode = serde_json::from_str(json).unwrap();
        assert!(matches!(
            node.navigator_type(),
            Err(NavigationError::UnknownNavigatorType(tag)) if tag == "carousel"
        ));
    }
}
