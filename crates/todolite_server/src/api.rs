//! Request handlers and wire DTOs for the todo endpoints.
//!
//! Each handler is a direct translation of one store operation: parse the
//! input, run a single repository call under the connection lock, map the
//! result onto a response body or an [`ApiError`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use todolite_core::{SqliteTodoRepository, Todo, TodoDraft, TodoId, TodoService};

use crate::error::ApiError;
use crate::AppState;

/// Body for `POST /todos`. `completed` defaults to false when omitted.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body for `PUT /todos/{id}`. Full replace: both fields are required.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    pub completed: bool,
}

/// Id-only response for create and update.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoIdResponse {
    pub id: TodoId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: todolite_core::core_version(),
    })
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoIdResponse>), ApiError> {
    let conn = state.db.lock().await;
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    let draft = TodoDraft::new(input.title, input.completed);
    let id = service.create_todo(&draft)?;
    Ok((StatusCode::CREATED, Json(TodoIdResponse { id })))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    let conn = state.db.lock().await;
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    service
        .get_todo(id)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let conn = state.db.lock().await;
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    Ok(Json(service.list_todos()?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    Json(input): Json<UpdateTodoRequest>,
) -> Result<Json<TodoIdResponse>, ApiError> {
    let conn = state.db.lock().await;
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    let draft = TodoDraft::new(input.title, input.completed);
    match service.update_todo(id, &draft)? {
        Some(todo) => Ok(Json(TodoIdResponse { id: todo.id })),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<bool>, ApiError> {
    let conn = state.db.lock().await;
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    if service.delete_todo(id)? {
        Ok(Json(true))
    } else {
        Err(ApiError::NotFound)
    }
}
