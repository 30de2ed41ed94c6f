use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::get,
};
use db::DBService;
use db::models::task::{CreateTask, Task, UpdateTask};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, middleware::load_task_middleware};

pub async fn get_tasks(State(db): State<DBService>) -> Result<ResponseJson<Vec<Task>>, ApiError> {
    let tasks = Task::find_all(&db.pool).await?;
    Ok(ResponseJson(tasks))
}

pub async fn get_task(Extension(task): Extension<Task>) -> Result<ResponseJson<Task>, ApiError> {
    Ok(ResponseJson(task))
}

pub async fn create_task(
    State(db): State<DBService>,
    Json(payload): Json<CreateTask>,
) -> Result<(StatusCode, ResponseJson<Task>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    tracing::debug!("Creating task '{}'", payload.title);
    let task = Task::create(&db.pool, &payload).await?;

    Ok((StatusCode::CREATED, ResponseJson(task)))
}

pub async fn update_task(
    Extension(existing_task): Extension<Task>,
    State(db): State<DBService>,
    Json(payload): Json<UpdateTask>,
) -> Result<ResponseJson<Task>, ApiError> {
    let task = Task::update(&db.pool, existing_task.id, &payload).await?;
    Ok(ResponseJson(task))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
    pub message: String,
}

// Deleting reports success whether or not a row existed.
pub async fn delete_task(
    State(db): State<DBService>,
    Path(task_id): Path<i64>,
) -> Result<ResponseJson<DeleteTaskResponse>, ApiError> {
    let rows_affected = Task::delete(&db.pool, task_id).await?;
    tracing::debug!(task_id, rows_affected, "Deleted task");

    Ok(ResponseJson(DeleteTaskResponse {
        success: true,
        message: "Task deleted".to_string(),
    }))
}

pub fn router(db: &DBService) -> Router<DBService> {
    let inner = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route(
            "/{task_id}",
            get(get_task)
                .put(update_task)
                .layer(from_fn_with_state(db.clone(), load_task_middleware::<DBService>))
                .delete(delete_task),
        );

    Router::new().nest("/tasks", inner)
}
