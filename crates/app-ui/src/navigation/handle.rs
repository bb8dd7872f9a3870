//! Imperative navigation outside the render tree
//!
//! A [`NavigationHandle`] holds a weak reference to the mounted root
//! navigator. It starts unbound, is bound when a
//! [`NavigationContainer`](super::NavigationContainer) mounts, and becomes
//! unbound again when that container is dropped. Commands issued while
//! unbound are skipped with a warning; they are never queued.
//!
//! The application shell normally uses [`NavigationHandle::global`]; tests
//! create their own handle and bind any [`NavigationTarget`].

use std::sync::{Arc, OnceLock, Weak};

use parking_lot::{Mutex, RwLock};

#[cfg(test)]
use mockall::automock;

use super::state::{MountedNavigator, ResetRoute, RouteParams};
use super::Result;

/// Something that can execute navigation commands
#[cfg_attr(test, automock)]
pub trait NavigationTarget: Send {
    /// Navigate to a route by name
    fn navigate(&mut self, name: &str, params: Option<RouteParams>) -> Result<()>;

    /// Go back one entry; false when there is nowhere to go
    fn go_back(&mut self) -> bool;

    /// Navigate to a screen inside a nested navigator
    fn navigate_nested(&mut self, parent: &str, screen: &str, params: Option<RouteParams>) -> Result<()>;

    /// Replace the navigation history
    fn reset(&mut self, routes: Vec<ResetRoute>, start_index: usize) -> Result<()>;
}

impl NavigationTarget for MountedNavigator {
    fn navigate(&mut self, name: &str, params: Option<RouteParams>) -> Result<()> {
        MountedNavigator::navigate(self, name, params)
    }

    fn go_back(&mut self) -> bool {
        MountedNavigator::go_back(self)
    }

    fn navigate_nested(&mut self, parent: &str, screen: &str, params: Option<RouteParams>) -> Result<()> {
        MountedNavigator::navigate_nested(self, parent, screen, params)
    }

    fn reset(&mut self, routes: Vec<ResetRoute>, start_index: usize) -> Result<()> {
        MountedNavigator::reset(self, routes, start_index)
    }
}

/// A bound command target shared with the container that mounted it
pub type SharedTarget = Arc<Mutex<dyn NavigationTarget>>;

type WeakTarget = Weak<Mutex<dyn NavigationTarget>>;

/// Process-wide access point for navigation commands
#[derive(Clone, Default)]
pub struct NavigationHandle {
    slot: Arc<RwLock<Option<WeakTarget>>>,
}

impl std::fmt::Debug for NavigationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationHandle")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl NavigationHandle {
    /// Create an unbound handle
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle shared by the whole process
    pub fn global() -> &'static NavigationHandle {
        static GLOBAL: OnceLock<NavigationHandle> = OnceLock::new();
        GLOBAL.get_or_init(NavigationHandle::new)
    }

    /// Bind the handle to a mounted target
    pub fn bind(&self, target: &SharedTarget) {
        let mut slot = self.slot.write();
        if slot.as_ref().is_some_and(|weak| weak.strong_count() > 0) {
            tracing::warn!("navigation handle rebound while a root was still mounted");
        }
        *slot = Some(Arc::downgrade(target));
        tracing::info!("navigation handle bound");
    }

    /// Unbind the handle
    pub fn unbind(&self) {
        if self.slot.write().take().is_some() {
            tracing::info!("navigation handle unbound");
        }
    }

    /// Unbind the handle if it still points at `target`
    pub fn release(&self, target: &SharedTarget) {
        let mut slot = self.slot.write();
        let points_at_target = slot
            .as_ref()
            .is_some_and(|weak| std::ptr::addr_eq(weak.as_ptr(), Arc::as_ptr(target)));
        if points_at_target {
            *slot = None;
            tracing::info!("navigation handle unbound");
        }
    }

    /// Whether a live target is bound
    pub fn is_bound(&self) -> bool {
        self.target().is_some()
    }

    fn target(&self) -> Option<SharedTarget> {
        self.slot.read().as_ref().and_then(Weak::upgrade)
    }

    /// Run `command` against the bound target, or warn and skip it
    fn dispatch<R>(&self, operation: &'static str, command: impl FnOnce(&mut dyn NavigationTarget) -> R) -> Option<R> {
        match self.target() {
            Some(target) => {
                let mut guard = target.lock();
                Some(command(&mut *guard))
            }
            None => {
                tracing::warn!(operation, "navigation ref is not set; command skipped");
                None
            }
        }
    }

    /// Navigate to a route by name
    pub fn navigate(&self, name: &str, params: Option<RouteParams>) -> Result<()> {
        self.dispatch("navigate", |target| target.navigate(name, params))
            .unwrap_or(Ok(()))
    }

    /// Go back one entry
    ///
    /// Returns false when unbound or when nothing is left to go back to.
    pub fn go_back(&self) -> bool {
        let went_back = self.dispatch("go_back", |target| target.go_back());
        if went_back == Some(false) {
            tracing::warn!("go_back ignored: already at the first route");
        }
        went_back.unwrap_or(false)
    }

    /// Navigate to `screen` inside the nested navigator registered as `parent`
    pub fn navigate_nested(&self, parent: &str, screen: &str, params: Option<RouteParams>) -> Result<()> {
        self.dispatch("navigate_nested", |target| target.navigate_nested(parent, screen, params))
            .unwrap_or(Ok(()))
    }

    /// Replace the navigation history, focusing `routes[start_index]`
    pub fn reset(&self, routes: Vec<ResetRoute>, start_index: usize) -> Result<()> {
        self.dispatch("reset", |target| target.reset(routes, start_index))
            .unwrap_or(Ok(()))
    }
}
