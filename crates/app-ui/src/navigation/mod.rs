//! Navigation system for the Task Planner
//!
//! This module provides a declarative navigation framework with:
//! - A serializable configuration tree of navigators and screens
//! - A composer that turns the tree into mounted navigators
//! - Per-navigator route state (stack, drawer and tab semantics)
//! - A process-wide handle for issuing commands outside the render tree
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use app_ui::components::ComponentRegistry;
//! use app_ui::navigation::{
//!     Composer, NavigationContainer, NavigationHandle, NavigatorNode, NavigatorType,
//!     ScreenDescriptor,
//! };
//!
//! let mut components = ComponentRegistry::new();
//! components.register_fn("Home", |_| "home".to_string());
//!
//! let config = NavigatorNode::new(NavigatorType::Stack, "Root", "Home")
//!     .screen(ScreenDescriptor::new("Home", "Home"));
//!
//! let composer = Arc::new(Composer::new(components));
//! let handle = NavigationHandle::new();
//! let container = NavigationContainer::mount(&composer, &config, handle.clone()).unwrap();
//! assert!(handle.is_bound());
//! # drop(container);
//! ```

pub mod composer;
pub mod config;
pub mod container;
pub mod handle;
pub mod state;

pub use composer::{
    BuiltinPrimitive, Composer, NavigatorPrimitive, NavigatorProps, PrimitiveTable,
    RouteRegistration, DEFAULT_MAX_DEPTH,
};
pub use config::{
    NavigatorNode, NavigatorOptions, NavigatorType, RouteConfig, ScreenDescriptor, ScreenOptions,
};
pub use container::NavigationContainer;
pub use handle::{NavigationHandle, NavigationTarget, SharedTarget};
pub use state::{
    route_params, LazyNavigator, MountedNavigator, MountedRoute, ResetRoute, RouteBody,
    RouteEntry, RouteParams,
};

/// Errors raised while composing or driving navigators
///
/// Every variant except [`NavigationError::UnknownRoute`],
/// [`NavigationError::NotANavigator`] and [`NavigationError::InvalidParams`]
/// is a configuration error: the tree or the command was malformed.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Navigator `type` tag outside stack, drawer, bottomTab and topTab
    #[error("Unknown navigator type: {0}")]
    UnknownNavigatorType(String),

    /// Navigator declared without children
    #[error("Navigator {0} has no screens")]
    EmptyNavigator(String),

    /// `initialRouteName` does not name a direct child
    #[error("Navigator {navigator} has no route named {initial_route} for its initial route")]
    InitialRouteNotFound {
        /// Navigator name
        navigator: String,
        /// Configured initial route
        initial_route: String,
    },

    /// Two siblings share a name
    #[error("Navigator {navigator} declares route {route} more than once")]
    DuplicateRoute {
        /// Navigator name
        navigator: String,
        /// Repeated route name
        route: String,
    },

    /// Screen references a component key nobody registered
    #[error("Screen {screen} uses unregistered component {component}")]
    UnknownComponent {
        /// Screen name
        screen: String,
        /// Component key
        component: String,
    },

    /// Nesting deeper than the composer allows
    #[error("Navigator {navigator} exceeds the maximum nesting depth of {limit}")]
    DepthExceeded {
        /// Navigator name at the offending depth
        navigator: String,
        /// Configured limit
        limit: usize,
    },

    /// Reset called without routes
    #[error("Reset requires at least one route")]
    EmptyReset,

    /// Reset start index outside the route list
    #[error("Reset index {index} is out of range for {len} routes")]
    ResetIndexOutOfRange {
        /// Requested start index
        index: usize,
        /// Number of routes supplied
        len: usize,
    },

    /// No navigator on the focused path registers the route
    #[error("No navigator handles route {0}")]
    UnknownRoute(String),

    /// Nested navigation targeted a screen route
    #[error("Route {0} is not a navigator")]
    NotANavigator(String),

    /// Route params could not be merged or decoded
    #[error("Invalid route params: {0}")]
    InvalidParams(#[from] serde_json::Error),
}

impl NavigationError {
    /// Whether the error stems from a malformed tree or command
    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            NavigationError::UnknownRoute(_)
                | NavigationError::NotANavigator(_)
                | NavigationError::InvalidParams(_)
        )
    }
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Shared in-memory sink for formatted log lines
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` with a thread-local subscriber and return the lines it logged
    pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
        (result, output.lines().map(str::to_string).collect())
    }
}
