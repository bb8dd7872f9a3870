//! Application startup and the running application

use std::sync::Arc;

use anyhow::{Context, Result};
use app_state::TaskStore;
use app_ui::components::{ComponentRegistry, RenderedFrame};
use app_ui::navigation::{Composer, NavigationContainer, NavigationHandle};
use app_ui::theme::{Theme, ThemeKind, ThemeSelector};
use chrono::{Local, NaiveDate};
use parking_lot::RwLock;

use crate::config::AppConfig;
use crate::screens::{register_screens, SharedTaskStore, TaskListScreen};

/// A started application: mounted navigation, theme and task state
#[derive(Debug)]
pub struct App {
    container: NavigationContainer,
    theme: RwLock<ThemeSelector>,
    tasks: SharedTaskStore,
    task_list: TaskListScreen,
}

impl App {
    /// Start the application with today's date selected
    pub fn start(config: AppConfig, handle: NavigationHandle) -> Result<Self> {
        Self::start_on(config, handle, Local::now().date_naive())
    }

    /// Start the application with `selected` as the task list date
    ///
    /// The whole navigator tree is validated before anything is bound, so a
    /// malformed configuration fails here rather than on first render.
    pub fn start_on(config: AppConfig, handle: NavigationHandle, selected: NaiveDate) -> Result<Self> {
        let tasks: SharedTaskStore = Arc::new(RwLock::new(TaskStore::seeded(selected)));
        let task_list = TaskListScreen::new(tasks.clone(), selected);

        let mut components = ComponentRegistry::new();
        register_screens(&mut components, task_list.clone());

        let composer = Arc::new(Composer::new(components).with_max_depth(config.max_navigator_depth));
        let container = NavigationContainer::mount(&composer, &config.navigation, handle)
            .with_context(|| format!("Failed to compose navigator '{}'", config.navigation.name))?;

        tracing::info!(
            root = %config.navigation.name,
            theme = %config.theme.kind,
            "application started"
        );

        Ok(Self {
            container,
            theme: RwLock::new(ThemeSelector::new(config.theme)),
            tasks,
            task_list,
        })
    }

    /// Handle bound to the mounted navigator
    pub fn navigation(&self) -> &NavigationHandle {
        self.container.handle()
    }

    /// Mounted navigation container
    pub fn container(&self) -> &NavigationContainer {
        &self.container
    }

    /// Shared task store
    pub fn tasks(&self) -> &SharedTaskStore {
        &self.tasks
    }

    /// Task list screen, for changing the selected date
    pub fn task_list(&self) -> &TaskListScreen {
        &self.task_list
    }

    /// Theme currently in effect
    pub fn theme(&self) -> Theme {
        self.theme.read().theme()
    }

    /// Switch between light, dark and custom themes
    pub fn set_theme_type(&self, kind: ThemeKind) {
        self.theme.write().set_theme_type(kind);
    }

    /// Replace the custom theme
    pub fn set_custom_theme(&self, theme: Theme) {
        self.theme.write().set_custom_theme(theme);
    }

    /// Render the focused screen with the current theme
    pub fn render(&self) -> Result<RenderedFrame> {
        let theme = self.theme();
        self.container
            .render(&theme)
            .context("Failed to render the focused screen")
    }
}
