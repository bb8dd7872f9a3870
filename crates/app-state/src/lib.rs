//! Application state for the Task Planner
//!
//! This crate holds the planner's domain state: tasks and the tag and people
//! catalogs they reference.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod tasks;

pub use tasks::{DateMarker, NewTask, Person, Priority, Tag, Task, TaskError, TaskStore};
