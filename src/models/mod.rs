pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskChanges, TaskPriority, TaskQuery, TaskStatus};
pub use user::{NewUser, PublicUser, User};
