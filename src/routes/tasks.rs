use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{NewTask, TaskChanges, TaskQuery},
    services::TaskService,
};
use actix_web::{delete, get, post, route, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): `todo`, `in-progress` or `done`.
/// - `priority` (optional): `low`, `medium` or `high`.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `400 Bad Request`: unknown filter value.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    query: web::Query<TaskQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `priority` (optional): defaults to `medium`.
/// - `status` (optional): defaults to `todo`.
/// - `dueDate` (optional): RFC 3339 timestamp or `YYYY-MM-DD`.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: malformed body or validation failure.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    task_data: web::Json<NewTask>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let input = task_data.into_inner();
    input.validate()?;

    let task = tasks.create(user.0, input).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(user.0, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates some fields of a task.
///
/// `PUT` is the canonical verb. `POST` is accepted for older clients.
///
/// ## Request Body:
/// Any subset of `title`, `description`, `priority`, `status`, `dueDate`.
/// At least one must be present. `null` clears `description` or `dueDate`.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: empty or invalid change set.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[route("/{id}", method = "PUT", method = "POST")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
    changes: web::Json<TaskChanges>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    changes.validate()?;

    let task = tasks
        .update(user.0, task_id.into_inner(), changes.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no such task, or it belongs to another user. A second
///   delete of the same id lands here.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks.delete(user.0, task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
