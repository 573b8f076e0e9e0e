//! HTTP handlers for `/api/todos`.
//!
//! Handlers only translate between HTTP and `TodoService`: they parse the id
//! and body, take the lock for the duration of one service call, and map the
//! outcome to a status code. Mutations and their cache invalidation happen
//! under the same write guard.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use todo_core::{Todo, TodoService};
use tokio::sync::RwLock;

use crate::error::ApiError;

pub type SharedService = Arc<RwLock<TodoService>>;

pub fn api_routes() -> Router<SharedService> {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

/// Parse a path id the lenient way: leading whitespace and a `+` sign are
/// skipped and trailing garbage is ignored (`"3abc"` is 3). Returns `None`
/// when no positive id can be read.
pub fn parse_id(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<u64>().ok().filter(|id| *id > 0)
}

fn path_id(raw: &str) -> Result<u64, ApiError> {
    parse_id(raw).ok_or_else(|| {
        tracing::warn!(id = raw, "todo not found");
        ApiError::NotFound
    })
}

/// Whether the request declares a JSON body (`application/json`, with or
/// without parameters such as `charset`).
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Decode a mutation body. Bodies that are empty or not declared as JSON
/// count as `{}`; a declared JSON body that fails to parse is a fault of
/// the request pipeline and surfaces as a generic 500.
fn parse_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, ApiError> {
    if body.is_empty() || !is_json(headers) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Internal(format!("malformed JSON body: {e}")))
}

async fn list_todos(State(service): State<SharedService>) -> Json<Vec<Todo>> {
    Json(service.read().await.list())
}

async fn get_todo(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = path_id(&id)?;
    let todo = service.read().await.get(id)?;
    Ok(Json(todo))
}

async fn create_todo(
    State(service): State<SharedService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let body = parse_body(&headers, &body)?;
    let todo = service.write().await.create(&body)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let id = path_id(&id)?;
    let body = parse_body(&headers, &body)?;
    let todo = service.write().await.update(id, &body)?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&id)?;
    service.write().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
