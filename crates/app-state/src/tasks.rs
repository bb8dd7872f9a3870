//! Task storage for the planner
//!
//! Holds the user's tasks together with the tag and people catalogs a task
//! can reference. All state is in memory; the shell wraps the store in a lock
//! and shares it with the screens that render it.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by task operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// A task needs a non-blank title
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// No task with this id exists
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    /// Tag id missing from the tag catalog
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// Person id missing from the people catalog
    #[error("Unknown person: {0}")]
    UnknownPerson(String),
}

/// Result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// How urgent a task is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Default urgency
    #[default]
    Medium,
    /// Do first
    High,
}

/// A label that can be attached to tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Hex color used for the tag chip
    pub color: String,
}

impl Tag {
    /// Create a tag
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Someone who can be invited to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Person {
    /// Create a person without an avatar
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }
}

/// A planned task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Short title
    pub title: String,
    /// Free-form notes
    pub description: String,
    /// Day the task is planned for
    pub date: NaiveDate,
    /// Optional time of day
    pub time: Option<NaiveTime>,
    /// Whether the task is done
    pub completed: bool,
    /// Tag ids
    pub tags: Vec<String>,
    /// Person ids
    pub invitees: Vec<String>,
    /// Urgency
    pub priority: Priority,
    /// When the task was created
    pub created_at: DateTime<Utc>,
    /// When the task was last changed
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short title, must not be blank
    pub title: String,
    /// Free-form notes
    #[serde(default)]
    pub description: String,
    /// Day the task is planned for
    pub date: NaiveDate,
    /// Optional time of day
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Tag ids
    #[serde(default)]
    pub tags: Vec<String>,
    /// Person ids
    #[serde(default)]
    pub invitees: Vec<String>,
    /// Urgency
    #[serde(default)]
    pub priority: Priority,
}

impl NewTask {
    /// Minimal task input with a title and a date
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            time: None,
            tags: Vec::new(),
            invitees: Vec::new(),
            priority: Priority::default(),
        }
    }

    /// Set the priority
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a tag id
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Invite a person by id
    pub fn invitee(mut self, person: impl Into<String>) -> Self {
        self.invitees.push(person.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn validated_title(&self) -> Result<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(title.to_string())
    }
}

/// Calendar marker for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateMarker {
    /// At least one task falls on this day
    pub marked: bool,
    /// The first task planned for this day is done
    pub completed: bool,
    /// This is the selected day
    pub selected: bool,
}

/// In-memory task store
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    tags: Vec<Tag>,
    people: Vec<Person>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Empty store seeded with the default tag and people catalogs
    pub fn new() -> Self {
        Self::with_catalog(default_tags(), default_people())
    }

    /// Empty store with custom catalogs
    pub fn with_catalog(tags: Vec<Tag>, people: Vec<Person>) -> Self {
        Self {
            tasks: Vec::new(),
            tags,
            people,
        }
    }

    /// Default catalogs plus sample tasks planned around `today`
    pub fn seeded(today: NaiveDate) -> Self {
        let mut store = Self::new();
        for (input, completed) in sample_tasks(today) {
            let added = store.add_task(input).and_then(|task| match completed {
                true => store.toggle_completion(task.id),
                false => Ok(task),
            });
            if let Err(err) = added {
                tracing::warn!(error = %err, "skipping invalid sample task");
            }
        }
        store
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tag catalog
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// People catalog
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Add a task, assigning its id and timestamps
    pub fn add_task(&mut self, input: NewTask) -> Result<Task> {
        let title = input.validated_title()?;
        self.check_references(&input)?;
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title,
            description: input.description,
            date: input.date,
            time: input.time,
            completed: false,
            tags: input.tags,
            invitees: input.invitees,
            priority: input.priority,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(task = %task.id, date = %task.date, "task added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replace the editable fields of a task
    ///
    /// Completion state and creation time are preserved.
    pub fn update_task(&mut self, id: Uuid, input: NewTask) -> Result<Task> {
        let title = input.validated_title()?;
        self.check_references(&input)?;
        let task = self.get_mut(id)?;
        task.title = title;
        task.description = input.description;
        task.date = input.date;
        task.time = input.time;
        task.tags = input.tags;
        task.invitees = input.invitees;
        task.priority = input.priority;
        task.updated_at = Utc::now();
        let updated = task.clone();
        tracing::debug!(task = %id, "task updated");
        Ok(updated)
    }

    /// Remove a task, returning it
    pub fn delete_task(&mut self, id: Uuid) -> Result<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        tracing::debug!(task = %id, "task deleted");
        Ok(self.tasks.remove(position))
    }

    /// Flip the completion state
    pub fn toggle_completion(&mut self, id: Uuid) -> Result<Task> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    /// Tasks planned for `date`, open tasks first, then by time and priority
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|task| task.date == date).collect();
        tasks.sort_by(|a, b| {
            a.completed
                .cmp(&b.completed)
                .then_with(|| match (a.time, b.time) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
                .then_with(|| b.priority.cmp(&a.priority))
        });
        tasks
    }

    /// Calendar markers for every day with tasks plus the selected day
    pub fn marked_dates(&self, selected: NaiveDate) -> BTreeMap<NaiveDate, DateMarker> {
        let mut markers: BTreeMap<NaiveDate, DateMarker> = BTreeMap::new();
        for task in &self.tasks {
            markers.entry(task.date).or_insert(DateMarker {
                marked: true,
                completed: task.completed,
                selected: false,
            });
        }
        markers.entry(selected).or_default().selected = true;
        markers
    }

    /// Every tag and invitee must come from the catalogs
    fn check_references(&self, input: &NewTask) -> Result<()> {
        if let Some(tag) = input.tags.iter().find(|id| !self.tags.iter().any(|tag| &tag.id == *id)) {
            return Err(TaskError::UnknownTag(tag.clone()));
        }
        if let Some(person) = input
            .invitees
            .iter()
            .find(|id| !self.people.iter().any(|person| &person.id == *id))
        {
            return Err(TaskError::UnknownPerson(person.clone()));
        }
        Ok(())
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }
}

/// Tags every new store starts with
pub fn default_tags() -> Vec<Tag> {
    vec![
        Tag::new("work", "Work", "#FF9500"),
        Tag::new("personal", "Personal", "#34C759"),
        Tag::new("urgent", "Urgent", "#FF3B30"),
        Tag::new("ideas", "Ideas", "#AF52DE"),
    ]
}

/// People every new store starts with
pub fn default_people() -> Vec<Person> {
    vec![
        Person::new("alex", "Alex"),
        Person::new("sam", "Sam"),
        Person::new("jordan", "Jordan"),
    ]
}

/// Sample tasks relative to `today`, paired with their completion state
fn sample_tasks(today: NaiveDate) -> Vec<(NewTask, bool)> {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let later = today.checked_add_days(Days::new(3)).unwrap_or(today);
    let time = |h, m| NaiveTime::from_hms_opt(h, m, 0);

    let mut standup = NewTask::new("Team standup", today)
        .priority(Priority::High)
        .tag("work")
        .invitee("alex")
        .invitee("sam")
        .description("Share progress and blockers");
    standup.time = time(9, 30);

    let groceries = NewTask::new("Buy groceries", today)
        .priority(Priority::Low)
        .tag("personal");

    let mut dentist = NewTask::new("Dentist appointment", tomorrow).tag("personal");
    dentist.time = time(14, 0);

    let proposal = NewTask::new("Draft project proposal", later)
        .priority(Priority::High)
        .tag("work")
        .tag("ideas")
        .invitee("jordan");

    vec![(standup, false), (groceries, true), (dentist, false), (proposal, false)]
}
