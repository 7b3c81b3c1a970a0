//! Request handlers for the `/tasks` resource.

use super::{
    dto::{ListParams, PageResponse, TaskPayload},
    error::ApiError,
    router::AppState,
};
use crate::task::{
    domain::{PageRequest, TaskId, TaskSort},
    ports::TaskRepository,
    services::TaskResponse,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;
use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /tasks`
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let created = state.manager().create_task(body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /tasks?page&size&sort`
pub async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(query) = params?;
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<TaskSort>)
        .transpose()?
        .unwrap_or_default();
    let size = state.limits().effective_size(query.size);
    let request = PageRequest::new(query.page.unwrap_or_default(), size, sort)?;

    let page = state.manager().get_tasks(request).await?;
    Ok(Json(PageResponse::from(page)))
}

/// `GET /tasks/{id}`
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    Ok(Json(state.manager().get_task(id).await?))
}

/// `PUT /tasks/{id}`
pub async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let Json(body) = payload?;
    Ok(Json(state.manager().update_task(id, body.into()).await?))
}

/// `POST /tasks/{id}/done`
pub async fn complete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    Ok(Json(state.manager().complete_task(id).await?))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    state.manager().delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Identifiers that are not UUIDs cannot name a stored task.
fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}
