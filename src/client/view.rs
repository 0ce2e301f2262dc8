use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::ClientError;
use crate::models::task::parse_due_date;
use crate::models::{
    NewTask, PublicUser, Task, TaskChanges, TaskPriority, TaskQuery, TaskStatus,
};

pub const EMPTY_BOARD_MESSAGE: &str = "No tasks found. Create one to get started!";
pub const NO_DESCRIPTION: &str = "No description provided.";

/// What a submitted [`TaskForm`] asks the board to do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(NewTask),
    Update(Uuid, TaskChanges),
}

/// Collects the fields of a task being created or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    editing: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// `YYYY-MM-DD`, or empty for no due date.
    pub due_date: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    /// An empty form for a new task.
    pub fn new() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            due_date: String::new(),
        }
    }

    /// A form pre-filled from `task`.
    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            status: task.status,
            due_date: task
                .due_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn parsed_due_date(&self) -> Result<Option<DateTime<Utc>>, ClientError> {
        let raw = self.due_date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_due_date(raw)
            .map(Some)
            .ok_or_else(|| ClientError::Invalid(format!("due date {:?} is not YYYY-MM-DD", raw)))
    }

    /// Validates the fields and builds the request to send.
    pub fn submit(&self) -> Result<FormSubmission, ClientError> {
        let title = self.title.trim().to_string();
        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());
        let due_date = self.parsed_due_date()?;

        let submission = match self.editing {
            None => {
                let task = NewTask {
                    title,
                    description,
                    priority: Some(self.priority),
                    status: Some(self.status),
                    due_date,
                };
                task.validate()
                    .map_err(|e| ClientError::Invalid(e.to_string()))?;
                FormSubmission::Create(task)
            }
            // An edit sends every field, so emptied fields are cleared.
            Some(id) => {
                let changes = TaskChanges {
                    title: Some(title),
                    description: Some(description),
                    priority: Some(self.priority),
                    status: Some(self.status),
                    due_date: Some(due_date),
                };
                changes
                    .validate()
                    .map_err(|e| ClientError::Invalid(e.to_string()))?;
                FormSubmission::Update(id, changes)
            }
        };
        Ok(submission)
    }
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Done => "[x]",
    }
}

fn priority_badge(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "LOW",
        TaskPriority::Medium => "MEDIUM",
        TaskPriority::High => "HIGH",
    }
}

/// Renders one task as a text card.
///
/// ```text
/// [~] Write release notes  (HIGH)
///     Cover the API changes
///     due Jun 1, 2024 · in-progress
///     edit: 6f1c…  delete: 6f1c…
/// ```
pub fn render_card(task: &Task) -> String {
    let description = task
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION);

    let schedule = match task.due_date {
        Some(due) => format!("due {} · {}", due.format("%b %-d, %Y"), task.status),
        None => task.status.to_string(),
    };

    [
        format!(
            "{} {}  ({})",
            status_marker(task.status),
            task.title,
            priority_badge(task.priority)
        ),
        format!("    {}", description),
        format!("    {}", schedule),
        format!("    edit: {id}  delete: {id}", id = task.id),
    ]
    .join("\n")
}

fn filter_label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "all".to_string(), |v| v.to_string())
}

/// The header greeting: the display name, or the email when there is none.
pub fn greeting(user: &PublicUser) -> String {
    let who = user
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&user.email);
    format!("Welcome, {}", who)
}

/// Renders the greeting (when signed in), the filter line and every task in
/// `tasks`.
pub fn render_board(user: Option<&PublicUser>, tasks: &[&Task], filter: &TaskQuery) -> String {
    let mut out = String::new();
    if let Some(user) = user {
        out.push_str(&greeting(user));
        out.push_str("\n\n");
    }
    out.push_str(&format!(
        "Filter by: status={} priority={}\n\n",
        filter_label(filter.status),
        filter_label(filter.priority)
    ));

    if tasks.is_empty() {
        out.push_str(EMPTY_BOARD_MESSAGE);
        return out;
    }

    let cards: Vec<String> = tasks.iter().map(|task| render_card(task)).collect();
    out.push_str(&cards.join("\n\n"));
    out
}
