//! Generic admin resource controller
//!
//! One controller serves every resource type. Each handler walks the same
//! state machine: bind the target record (id routes), authorize, validate,
//! execute against the repository, and wrap the outcome in the response
//! envelope. All failures converge on [`failure_envelope`].

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};

use crate::auth::Principal;
use crate::repository::{MemoryRepository, Page, ResourceRepository};
use crate::resources::AdminResource;

use super::envelope::ApiResponse;
use super::error::{failure_envelope, ApiError};
use super::query::DtQuery;
use super::sanitize::{sanitize, Operation};

/// Router state for one resource type
pub struct ResourceState<R: AdminResource> {
    repo: Arc<MemoryRepository<R>>,
}

impl<R: AdminResource> Clone for ResourceState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// Build the resource subrouter: index, dt, store, show, update, destroy
pub fn resource_routes<R: AdminResource>(repo: Arc<MemoryRepository<R>>) -> Router {
    Router::new()
        .route("/", get(index::<R>).post(store::<R>))
        .route("/dt", get(dt::<R>))
        .route(
            "/{id}",
            get(show::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(destroy::<R>),
        )
        .with_state(ResourceState { repo })
}

fn authorize<R: AdminResource>(
    principal: &Principal,
    operation: Operation,
    target: Option<&R::Entity>,
) -> Result<(), ApiError> {
    if R::authorize(principal, operation, target) {
        Ok(())
    } else {
        Err(ApiError::unauthorized())
    }
}

fn body_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::invalid_field("payload", "must be a JSON object"))
}

/// Explicit lookup of the target record; a miss is a NotFound failure
async fn bind<R: AdminResource>(
    repo: &MemoryRepository<R>,
    id: i64,
) -> Result<R::Entity, ApiError> {
    repo.find_by_id(&id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(R::ENTITY, id.to_string()))
}

async fn index<R: AdminResource>(
    State(state): State<ResourceState<R>>,
    principal: Principal,
) -> Response {
    match run_index(&state, &principal).await {
        Ok(records) => ApiResponse::success()
            .message(format!("List of {}", R::COLLECTION))
            .payload(records)
            .send(),
        Err(error) => failure_envelope(error),
    }
}

async fn run_index<R: AdminResource>(
    state: &ResourceState<R>,
    principal: &Principal,
) -> Result<Vec<R::Entity>, ApiError> {
    authorize::<R>(principal, Operation::Index, None)?;
    state.repo.index().await.map_err(ApiError::from)
}

async fn dt<R: AdminResource>(
    State(state): State<ResourceState<R>>,
    principal: Principal,
    Query(query): Query<DtQuery>,
) -> Response {
    match run_dt(&state, &principal, &query).await {
        // The page is returned as-is; only failures are enveloped.
        Ok(page) => Json(page).into_response(),
        Err(error) => failure_envelope(error),
    }
}

async fn run_dt<R: AdminResource>(
    state: &ResourceState<R>,
    principal: &Principal,
    query: &DtQuery,
) -> Result<Page<R::Entity>, ApiError> {
    authorize::<R>(principal, Operation::Dt, None)?;
    state
        .repo
        .dt(query.search.as_deref(), query.order_by(), query.pagination())
        .await
        .map_err(ApiError::from)
}

async fn store<R: AdminResource>(
    State(state): State<ResourceState<R>>,
    principal: Principal,
    Json(body): Json<Value>,
) -> Response {
    match run_store(&state, &principal, &body).await {
        Ok(record) => ApiResponse::success()
            .message("Record created successfully")
            .payload(record)
            .send(),
        Err(error) => failure_envelope(error),
    }
}

async fn run_store<R: AdminResource>(
    state: &ResourceState<R>,
    principal: &Principal,
    body: &Value,
) -> Result<R::Entity, ApiError> {
    authorize::<R>(principal, Operation::Store, None)?;
    let input = sanitize(R::store_rules(), body_object(body)?)?;
    let data: R::Create = input.into_object()?;
    state.repo.store(data).await.map_err(ApiError::from)
}

async fn show<R: AdminResource>(
    State(state): State<ResourceState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Response {
    match run_show(&state, &principal, id).await {
        Ok(record) => ApiResponse::success()
            .message("Single record fetched")
            .payload(record)
            .send(),
        Err(error) => failure_envelope(error),
    }
}

async fn run_show<R: AdminResource>(
    state: &ResourceState<R>,
    principal: &Principal,
    id: i64,
) -> Result<R::Entity, ApiError> {
    let record = bind(&state.repo, id).await?;
    authorize::<R>(principal, Operation::View, Some(&record))?;
    state.repo.show(record).await.map_err(ApiError::from)
}

async fn update<R: AdminResource>(
    State(state): State<ResourceState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    match run_update(&state, &principal, id, &body).await {
        Ok(record) => ApiResponse::success()
            .message("Record updated successfully")
            .payload(record)
            .send(),
        Err(error) => failure_envelope(error),
    }
}

async fn run_update<R: AdminResource>(
    state: &ResourceState<R>,
    principal: &Principal,
    id: i64,
    body: &Value,
) -> Result<R::Entity, ApiError> {
    let record = bind(&state.repo, id).await?;
    authorize::<R>(principal, Operation::Update, Some(&record))?;
    let input = sanitize(R::update_rules(), body_object(body)?)?;
    let data: R::Update = input.into_object()?;
    state
        .repo
        .update(&record, data)
        .await
        .map_err(ApiError::from)
}

async fn destroy<R: AdminResource>(
    State(state): State<ResourceState<R>>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Response {
    match run_destroy(&state, &principal, id).await {
        Ok(record) => ApiResponse::success()
            .message("Record deleted successfully")
            .payload(record)
            .send(),
        Err(error) => failure_envelope(error),
    }
}

async fn run_destroy<R: AdminResource>(
    state: &ResourceState<R>,
    principal: &Principal,
    id: i64,
) -> Result<R::Entity, ApiError> {
    let record = bind(&state.repo, id).await?;
    authorize::<R>(principal, Operation::Destroy, Some(&record))?;
    state.repo.destroy(record).await.map_err(ApiError::from)
}
