//! Task Planner application shell
//!
//! Wires the navigation framework and the task store together: loads the
//! application configuration, registers the screens, mounts the root
//! navigator and renders it with the selected theme.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod cli;
pub mod config;
pub mod navigation;
pub mod screens;

pub use app::App;
pub use config::AppConfig;
