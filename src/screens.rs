//! Screens registered by the application shell

use std::sync::Arc;

use app_state::{Priority, Task, TaskStore};
use app_ui::components::{ComponentRegistry, Renderable, ScreenProps};
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::navigation::{FORGOT_PASSWORD_SCREEN, LOGIN_SCREEN, REGISTER_SCREEN, TASK_LIST_SCREEN};

/// Task store shared between the shell and its screens
pub type SharedTaskStore = Arc<RwLock<TaskStore>>;

/// Lists the tasks of one day
///
/// The day comes from the `date` route param (`YYYY-MM-DD`) and falls back
/// to the screen's selected date.
#[derive(Debug, Clone)]
pub struct TaskListScreen {
    store: SharedTaskStore,
    selected: Arc<RwLock<NaiveDate>>,
}

impl TaskListScreen {
    /// Create the screen over a shared store
    pub fn new(store: SharedTaskStore, selected: NaiveDate) -> Self {
        Self {
            store,
            selected: Arc::new(RwLock::new(selected)),
        }
    }

    /// Date shown when the route carries no `date` param
    pub fn selected_date(&self) -> NaiveDate {
        *self.selected.read()
    }

    /// Change the selected date
    pub fn select_date(&self, date: NaiveDate) {
        *self.selected.write() = date;
    }

    fn date_for(&self, props: &ScreenProps<'_>) -> NaiveDate {
        match props.params.get("date").and_then(|v| v.as_str()) {
            Some(raw) => match raw.parse() {
                Ok(date) => date,
                Err(_) => {
                    tracing::warn!(date = raw, "ignoring malformed date param");
                    self.selected_date()
                }
            },
            None => self.selected_date(),
        }
    }
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let time = task
        .time
        .map(|t| format!("{} ", t.format("%H:%M")))
        .unwrap_or_default();
    let priority = match task.priority {
        Priority::High => " !",
        Priority::Medium | Priority::Low => "",
    };
    format!("{} {}{}{}", mark, time, task.title, priority)
}

impl Renderable for TaskListScreen {
    fn render(&self, props: &ScreenProps<'_>) -> String {
        let date = self.date_for(props);
        let store = self.store.read();
        let tasks = store.tasks_on(date);

        let mut lines = vec![date.format("%A, %B %-d").to_string()];
        if tasks.is_empty() {
            lines.push("No tasks".to_string());
        } else {
            lines.extend(tasks.into_iter().map(task_line));
        }
        lines.join("\n")
    }
}

fn placeholder(title: &'static str) -> impl Fn(&ScreenProps<'_>) -> String + Send + Sync {
    move |props| format!("{} ({})", title, props.route_name)
}

/// Register every screen the navigator trees reference
pub fn register_screens(components: &mut ComponentRegistry, task_list: TaskListScreen) {
    components
        .register(TASK_LIST_SCREEN, task_list)
        .register_fn(LOGIN_SCREEN, placeholder("Sign in"))
        .register_fn(REGISTER_SCREEN, placeholder("Create an account"))
        .register_fn(FORGOT_PASSWORD_SCREEN, placeholder("Reset your password"));
}
