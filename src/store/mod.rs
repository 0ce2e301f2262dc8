//! Persistence for users and tasks.
//!
//! Services talk to a [`Store`]. `PgStore` is the production backend and
//! `MemoryStore` keeps everything in process for tests and local runs.
//!
//! Every task operation takes the owner's id and matches on it together with
//! the task id in a single step. A task that exists but belongs to someone
//! else is reported exactly like a missing one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskChanges, TaskQuery, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts `user` unless the email is taken. Returns `None` on conflict.
    async fn insert_user(&self, user: User) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Inserts `task`. Fails with `Unauthorized` if its owner does not exist.
    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;

    /// Lists the owner's tasks newest first.
    async fn list_tasks(&self, owner: Uuid, query: TaskQuery) -> Result<Vec<Task>, AppError>;

    async fn find_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError>;

    /// Applies `changes` if the task exists and belongs to `owner`.
    async fn update_task(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError>;

    /// Returns `false` when nothing matched `id` and `owner`.
    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError>;
}

pub(crate) fn unknown_owner() -> AppError {
    AppError::Unauthorized("User no longer exists".into())
}
