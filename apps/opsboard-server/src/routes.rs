//! HTTP route layer.
//!
//! Handlers are generic over the entity kind; per-kind routers are
//! instantiated in [`app`]. All storage access goes through the
//! `EntityStore` contract handles injected at startup.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;

use opsboard_config::Environment;
use opsboard_core::store::EntityStore;
use opsboard_core::types::{Entity, Person, Project, Task};

use crate::error::{bad_request, map_store_error, not_found, ErrorBody, Failure};
use crate::validate::Validated;

/// Shared handler state: one contract handle per entity kind, all pointing at
/// the single store instance constructed at startup.
#[derive(Clone)]
pub struct AppState {
    people: Arc<dyn EntityStore<Person>>,
    projects: Arc<dyn EntityStore<Project>>,
    tasks: Arc<dyn EntityStore<Task>>,
    environment: Environment,
}

impl AppState {
    pub fn new(
        people: Arc<dyn EntityStore<Person>>,
        projects: Arc<dyn EntityStore<Project>>,
        tasks: Arc<dyn EntityStore<Task>>,
        environment: Environment,
    ) -> Self {
        Self {
            people,
            projects,
            tasks,
            environment,
        }
    }
}

/// Selects the right contract handle for the kind a generic handler is
/// instantiated with.
trait HasStore<E: Entity> {
    fn store(&self) -> &dyn EntityStore<E>;
}

impl HasStore<Person> for AppState {
    fn store(&self) -> &dyn EntityStore<Person> {
        self.people.as_ref()
    }
}

impl HasStore<Project> for AppState {
    fn store(&self) -> &dyn EntityStore<Project> {
        self.projects.as_ref()
    }
}

impl HasStore<Task> for AppState {
    fn store(&self) -> &dyn EntityStore<Task> {
        self.tasks.as_ref()
    }
}

/// Bodies arrive as raw JSON so that both malformed JSON and missing fields
/// surface as 400s with a `{message}` body rather than the extractor's
/// default rejection.
fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T, Failure> {
    serde_json::from_value(body).map_err(|err| bad_request(format!("invalid body: {}", err)))
}

async fn handle_create<E>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<E>), Failure>
where
    E: Entity + Serialize,
    E::Create: DeserializeOwned + Validated,
    AppState: HasStore<E>,
{
    let input: E::Create = decode_body(body)?;
    let input = input.validated().map_err(bad_request)?;
    let created = state
        .store()
        .create(input)
        .await
        .map_err(|err| map_store_error(state.environment, err))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn handle_list<E>(State(state): State<AppState>) -> Result<Json<Vec<E>>, Failure>
where
    E: Entity + Serialize,
    AppState: HasStore<E>,
{
    let records = state
        .store()
        .list()
        .await
        .map_err(|err| map_store_error(state.environment, err))?;
    Ok(Json(records))
}

async fn handle_get<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E>, Failure>
where
    E: Entity + Serialize,
    AppState: HasStore<E>,
{
    match state.store().get(&id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(not_found()),
        Err(err) => Err(map_store_error(state.environment, err)),
    }
}

async fn handle_update<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<E>, Failure>
where
    E: Entity + Serialize,
    E::Update: DeserializeOwned + Validated,
    AppState: HasStore<E>,
{
    let input: E::Update = decode_body(body)?;
    let input = input.validated().map_err(bad_request)?;
    let updated = state
        .store()
        .update(&id, input)
        .await
        .map_err(|err| map_store_error(state.environment, err))?;
    Ok(Json(updated))
}

async fn handle_patch<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<E>, Failure>
where
    E: Entity + Serialize,
    E::Patch: DeserializeOwned,
    AppState: HasStore<E>,
{
    let patch: E::Patch = decode_body(body)?;
    let patched = state
        .store()
        .patch(&id, patch)
        .await
        .map_err(|err| map_store_error(state.environment, err))?;
    Ok(Json(patched))
}

async fn handle_delete<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure>
where
    E: Entity,
    AppState: HasStore<E>,
{
    state
        .store()
        .delete(&id)
        .await
        .map_err(|err| map_store_error(state.environment, err))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn fallback() -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Not found".to_string(),
            detail: None,
        }),
    )
}

fn resource_router<E>() -> Router<AppState>
where
    E: Entity + Serialize,
    E::Create: DeserializeOwned + Validated,
    E::Update: DeserializeOwned + Validated,
    E::Patch: DeserializeOwned,
    AppState: HasStore<E>,
{
    Router::new()
        .route("/", post(handle_create::<E>).get(handle_list::<E>))
        .route(
            "/{id}",
            get(handle_get::<E>)
                .put(handle_update::<E>)
                .patch(handle_patch::<E>)
                .delete(handle_delete::<E>),
        )
}

/// Assemble the full application router.
pub fn app(state: AppState, allow_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/api/health", get(health))
        .nest("/api/people", resource_router::<Person>())
        .nest("/api/projects", resource_router::<Project>())
        .nest("/api/tasks", resource_router::<Task>())
        .fallback(fallback)
        .layer(cors)
        .with_state(state)
}
