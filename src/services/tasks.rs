use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskChanges, TaskQuery};
use crate::store::Store;

/// CRUD on tasks, always scoped to the owning user.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a task for `owner`. Priority defaults to medium, status to todo.
    pub async fn create(&self, owner: Uuid, input: NewTask) -> Result<Task, AppError> {
        let task = self.store.insert_task(Task::new(input, owner)).await?;
        log::info!("User {} created task {}", owner, task.id);
        Ok(task)
    }

    /// The owner's tasks, most recently created first.
    pub async fn list(&self, owner: Uuid, query: TaskQuery) -> Result<Vec<Task>, AppError> {
        self.store.list_tasks(owner, query).await
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Task, AppError> {
        self.store
            .find_task(owner, id)
            .await?
            .ok_or_else(AppError::task_not_found)
    }

    /// Applies a partial update. A task owned by someone else is reported as
    /// not found.
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: TaskChanges,
    ) -> Result<Task, AppError> {
        if changes.is_empty() {
            return Err(AppError::BadRequest("No fields to update".into()));
        }

        let task = self
            .store
            .update_task(owner, id, &changes)
            .await?
            .ok_or_else(AppError::task_not_found)?;
        log::debug!("User {} updated task {}", owner, id);
        Ok(task)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_task(owner, id).await? {
            return Err(AppError::task_not_found());
        }
        log::info!("User {} deleted task {}", owner, id);
        Ok(())
    }
}
