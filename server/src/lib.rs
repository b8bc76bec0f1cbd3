//! HTTP interface for the todo service.
//!
//! Handlers translate requests to `TodoService` calls and results back to
//! responses; no business logic lives here beyond parsing and the status
//! mapping in [`error`]. The router is built by [`app`] so integration
//! tests can drive it through `tower::ServiceExt::oneshot` without a
//! listening socket.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use todo_core::{SortKey, TodoFilter, TodoId, TodoService};

pub mod error;
pub mod extract;
pub mod schemas;

use error::ApiError;
use extract::AppJson;
use schemas::{CreateTodoRequest, TodoOut, UpdateTodoRequest};

#[derive(Clone)]
pub struct AppState {
    service: TodoService,
    api_prefix: Arc<str>,
}

/// Build the router with all routes nested under `api_prefix`.
pub fn app(service: TodoService, api_prefix: &str) -> Router {
    let state = AppState {
        service,
        api_prefix: Arc::from(api_prefix),
    };
    let todos = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        );
    Router::new()
        .nest(api_prefix, todos)
        .route("/health", get(health))
        .with_state(state)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[derive(Debug, Deserialize)]
struct ListTodosQuery {
    is_done: Option<bool>,
    sort: Option<String>,
}

async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<Vec<TodoOut>>, ApiError> {
    let sort = query.sort.as_deref().map(SortKey::parse).transpose()?;
    let filter = TodoFilter {
        is_done: query.is_done,
    };
    let todos = state.service.list_todos(filter, sort).await?;
    Ok(Json(todos.into_iter().map(TodoOut::from).collect()))
}

async fn create_todo(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateTodoRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<TodoOut>), ApiError> {
    let draft = body.into_draft()?;
    let todo = state.service.create_todo(draft).await?;
    let location = format!("{}/todos/{}", state.api_prefix, todo.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TodoOut::from(todo)),
    ))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<TodoOut>, ApiError> {
    let todo = state.service.get_todo(id).await?;
    Ok(Json(todo.into()))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    AppJson(body): AppJson<UpdateTodoRequest>,
) -> Result<Json<TodoOut>, ApiError> {
    let todo = state.service.update_todo(id, body.into_patch()).await?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
