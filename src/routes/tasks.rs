use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskStatus, TaskUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Creates a task owned by the authenticated caller.
///
/// The owner is always the caller's identity, never client-supplied, and the
/// status always starts `Pending`. An explicit `status` in the payload is
/// tolerated only when it names the initial state.
#[post("")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let body = body.into_inner();

    let (description, priority) = match (body.description, body.priority) {
        (Some(description), Some(priority)) => (description, priority),
        _ => {
            return Err(AppError::BadRequest(
                "Description and priority are required".into(),
            ))
        }
    };

    if matches!(body.status, Some(ref status) if *status != TaskStatus::Pending) {
        return Err(AppError::BadRequest("Invalid status".into()));
    }

    let result = sqlx::query(
        "INSERT INTO tasks (description, priority, status, user_id) VALUES (?, ?, ?, ?)",
    )
    .bind(&description)
    .bind(&priority)
    .bind(TaskStatus::Pending)
    .bind(user.0)
    .execute(&**pool)
    .await
    .map_err(|err| {
        log::error!("task insert failed: {}", err);
        AppError::DatabaseError("Could not create task".into())
    })?;

    Ok(HttpResponse::Created().json(json!({
        "id": result.last_insert_rowid(),
        "description": description,
        "priority": priority,
    })))
}

/// Lists the caller's pending tasks in store-native (insertion) order.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, description, priority, status, user_id FROM tasks \
         WHERE user_id = ? AND status = ?",
    )
    .bind(user.0)
    .bind(TaskStatus::Pending)
    .fetch_all(&**pool)
    .await
    .map_err(|err| {
        log::error!("task list failed: {}", err);
        AppError::DatabaseError("Could not list tasks".into())
    })?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Updates a task with field-level merge semantics: omitted fields keep their
/// stored values, and an empty payload returns the task unchanged.
///
/// The lookup is scoped to (id, owner) in a single predicate so a foreign
/// task is indistinguishable from a missing one.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
    body: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let body = body.into_inner();
    let task_id = task_id.into_inner();

    let task = owned_task(&**pool, task_id, user.0).await?;

    let description = body.description.unwrap_or(task.description);
    let priority = body.priority.unwrap_or(task.priority);
    let status = body.status.unwrap_or(task.status);

    sqlx::query(
        "UPDATE tasks SET description = ?, priority = ?, status = ? \
         WHERE id = ? AND user_id = ?",
    )
    .bind(&description)
    .bind(&priority)
    .bind(&status)
    .bind(task_id)
    .bind(user.0)
    .execute(&**pool)
    .await
    .map_err(|err| {
        log::error!("task update failed: {}", err);
        AppError::DatabaseError("Could not edit task".into())
    })?;

    Ok(HttpResponse::Ok().json(Task {
        id: task_id,
        description,
        priority,
        status,
        user_id: user.0,
    }))
}

/// Deletes a task, subject to the same owner-scoped lookup as update.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();

    owned_task(&**pool, task_id, user.0).await?;

    sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(task_id)
        .bind(user.0)
        .execute(&**pool)
        .await
        .map_err(|err| {
            log::error!("task delete failed: {}", err);
            AppError::DatabaseError("Could not delete task".into())
        })?;

    Ok(HttpResponse::NoContent().finish())
}

/// Fetches a task by (id, owner) in one predicate. No match answers NotFound,
/// whether the task is absent or owned by someone else; a store failure here
/// is reported the same way.
async fn owned_task(pool: &SqlitePool, task_id: i64, user_id: i64) -> Result<Task, AppError> {
    sqlx::query_as::<_, Task>(
        "SELECT id, description, priority, status, user_id FROM tasks \
         WHERE id = ? AND user_id = ?",
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .unwrap_or_else(|err| {
        log::error!("task lookup failed: {}", err);
        None
    })
    .ok_or_else(|| AppError::NotFound("Task not found".into()))
}
