//! Root container for a composed navigator tree
//!
//! The container owns the mounted root navigator, binds it into a
//! [`NavigationHandle`] while alive, and renders the focused route with the
//! theme supplied for each pass.

use std::sync::Arc;

use parking_lot::Mutex;

use super::composer::Composer;
use super::config::NavigatorNode;
use super::handle::{NavigationHandle, SharedTarget};
use super::state::MountedNavigator;
use super::Result;
use crate::components::RenderedFrame;
use crate::theme::Theme;

/// Mounted root navigator bound to a navigation handle
pub struct NavigationContainer {
    root: Arc<Mutex<MountedNavigator>>,
    target: SharedTarget,
    handle: NavigationHandle,
}

impl std::fmt::Debug for NavigationContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationContainer")
            .field("root", &self.root.lock().name())
            .field("handle", &self.handle)
            .finish()
    }
}

impl NavigationContainer {
    /// Compose `config` and bind the mounted root into `handle`
    ///
    /// A configuration error is returned before anything is bound.
    pub fn mount(composer: &Arc<Composer>, config: &NavigatorNode, handle: NavigationHandle) -> Result<Self> {
        let root = Arc::new(Mutex::new(composer.compose(config)?));
        let target: SharedTarget = root.clone();
        handle.bind(&target);
        tracing::info!(root = %config.name, "navigation container mounted");
        Ok(Self {
            root,
            target,
            handle,
        })
    }

    /// Handle bound to this container
    pub fn handle(&self) -> &NavigationHandle {
        &self.handle
    }

    /// Inspect the mounted root navigator
    pub fn with_root<R>(&self, inspect: impl FnOnce(&MountedNavigator) -> R) -> R {
        inspect(&self.root.lock())
    }

    /// Route names from the root down to the focused screen
    pub fn focused_path(&self) -> Vec<String> {
        self.root.lock().focused_path()
    }

    /// Render the focused route with `theme`
    pub fn render(&self, theme: &Theme) -> Result<RenderedFrame> {
        self.root.lock().render(theme)
    }
}

impl Drop for NavigationContainer {
    fn drop(&mut self) {
        self.handle.release(&self.target);
        tracing::info!("navigation container unmounted");
    }
}
