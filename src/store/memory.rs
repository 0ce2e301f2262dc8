use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{unknown_owner, Store};
use crate::error::AppError;
use crate::models::{Task, TaskChanges, TaskQuery, User};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    // Insertion order; newest last.
    tasks: Vec<Task>,
}

/// In-process store. Cloning shares the same underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<Option<User>, AppError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|existing| existing.email == user.email) {
            return Ok(None);
        }
        state.users.insert(user.id, user.clone());
        Ok(Some(user))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&task.user_id) {
            return Err(unknown_owner());
        }
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner: Uuid, query: TaskQuery) -> Result<Vec<Task>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .rev()
            .filter(|task| task.user_id == owner && query.matches(task))
            .cloned()
            .collect())
    }

    async fn find_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .find(|task| task.id == id && task.user_id == owner)
            .cloned())
    }

    async fn update_task(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let mut state = self.state.write().await;
        Ok(state
            .tasks
            .iter_mut()
            .find(|task| task.id == id && task.user_id == owner)
            .map(|task| {
                changes.apply_to(task);
                task.clone()
            }))
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let before = state.tasks.len();
        state
            .tasks
            .retain(|task| !(task.id == id && task.user_id == owner));
        Ok(state.tasks.len() < before)
    }
}
