//! Person CRUD handlers: list, paged list, read, create, update, delete.

use crate::error::AppError;
use crate::model::Person;
use crate::page::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::response::{success_ok, success_page};
use crate::service::PersonValidator;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

const fn default_page() -> i64 {
    DEFAULT_PAGE
}

const fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("request: list all persons");
    let persons = state.persons.get_all_persons().await?;
    Ok(success_ok(persons))
}

pub async fn list_paged(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    tracing::info!(page = params.page, size = params.size, "request: list persons paged");
    let request = PageRequest::new(params.page, params.size)?;
    let page = state.persons.get_persons_page(request).await?;
    Ok(success_page(page))
}

pub async fn read(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    tracing::info!(person_id = id, "request: get person");
    match state.persons.get_person_by_id(id).await? {
        Some(person) => Ok(success_ok(person).into_response()),
        None => {
            tracing::warn!(person_id = id, "person not found");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}

/// Client-supplied ids are discarded; the repository assigns them. Any persistence
/// failure is reported as a generic internal error.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Person>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(person) = body?;
    let person = person.without_ids();
    tracing::info!(name = %person.name, "request: create person");
    PersonValidator::validate(&person)?;
    let saved = state
        .persons
        .save_person(person)
        .await
        .map_err(|e| AppError::Internal(format!("failed to save person: {}", e)))?;
    Ok(success_ok(saved))
}

/// Full overwrite of name, phoneNumber, emailAddress and address: anything omitted
/// from the payload is cleared on the stored person.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Person>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(details) = body?;
    tracing::info!(person_id = id, "request: update person");
    PersonValidator::validate(&details)?;
    let Some(mut person) = state.persons.get_person_by_id(id).await? else {
        tracing::warn!(person_id = id, "person not found");
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    person.apply_details(details);
    let updated = state.persons.save_person(person).await?;
    Ok(success_ok(updated).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    tracing::info!(person_id = id, "request: delete person");
    state.persons.delete_person(id).await?;
    tracing::info!(person_id = id, "person deleted");
    Ok(StatusCode::NO_CONTENT)
}
