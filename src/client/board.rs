use uuid::Uuid;

use super::view::{render_board, FormSubmission};
use super::{ApiClient, ClientError};
use crate::models::{NewTask, Task, TaskChanges, TaskQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A transient message describing the outcome of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// The tasks in `tasks` that pass `filter`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskQuery) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// A cached view of the signed-in user's tasks.
///
/// The list is fetched on first [`load`](TaskBoard::load) and served from
/// the cache afterwards. Every successful mutation invalidates the cache, so
/// the next `load` refetches. Failed mutations leave it untouched.
pub struct TaskBoard {
    api: ApiClient,
    cache: Option<Vec<Task>>,
    filter: TaskQuery,
    notices: Vec<Notice>,
}

impl TaskBoard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: None,
            filter: TaskQuery::default(),
            notices: Vec::new(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_none()
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Returns the cached list, fetching it first if the cache is stale.
    pub async fn load(&mut self) -> Result<&[Task], ClientError> {
        if self.cache.is_none() {
            let tasks = self.api.list_tasks().await?;
            log::debug!("Fetched {} tasks", tasks.len());
            self.cache = Some(tasks);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    pub fn filter(&self) -> TaskQuery {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TaskQuery) {
        self.filter = filter;
    }

    /// Cached tasks matching the current filter. Empty until loaded.
    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(self.cache.as_deref().unwrap_or_default(), &self.filter)
    }

    /// Renders the cached, filtered list with the signed-in user's greeting.
    pub fn render(&self) -> String {
        render_board(self.api.user(), &self.visible(), &self.filter)
    }

    pub async fn create(&mut self, task: NewTask) -> Result<Task, ClientError> {
        let result = self.api.create_task(&task).await;
        self.settle(result, "Task created successfully", "Failed to create task")
    }

    pub async fn update(&mut self, id: Uuid, changes: TaskChanges) -> Result<Task, ClientError> {
        let result = self.api.update_task(id, &changes).await;
        self.settle(result, "Task updated successfully", "Failed to update task")
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        let result = self.api.delete_task(id).await;
        self.settle(result, "Task deleted successfully", "Failed to delete task")
    }

    /// Sends a submitted form as either a create or an update.
    pub async fn submit(&mut self, submission: FormSubmission) -> Result<Task, ClientError> {
        match submission {
            FormSubmission::Create(task) => self.create(task).await,
            FormSubmission::Update(id, changes) => self.update(id, changes).await,
        }
    }

    /// Takes all pending notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn settle<T>(
        &mut self,
        result: Result<T, ClientError>,
        success: &str,
        failure: &str,
    ) -> Result<T, ClientError> {
        match &result {
            Ok(_) => {
                self.invalidate();
                self.notices.push(Notice::success(success));
            }
            Err(e) => {
                log::warn!("{}: {}", failure, e);
                self.notices.push(Notice::failure(failure));
            }
        }
        result
    }
}
