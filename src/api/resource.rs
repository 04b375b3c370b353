//! Generic CRUD handlers shared by every resource.
//!
//! A resource implements [`Resource`] (how to build a row from a request
//! body and how to merge an update into a stored row); the five handlers
//! below do the rest: storage access, 404s, relation loading and the
//! per-operation 500 message.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, DataResponse, JsonBody, KeyPath};
use crate::db::{exists, DatabaseError, Repository};

pub trait Resource: Repository + Serialize + Clone {
    /// Display name in messages, e.g. `"Hospital affiliation"`.
    const LABEL: &'static str;
    /// Lower-case plural for list failures, e.g. `"hospital affiliations"`.
    const PLURAL: &'static str;
    /// Route for the key segments, e.g. `"/:doctorId/:hospitalId"`.
    const KEY_PATH: &'static str;

    type Input: DeserializeOwned + Send + 'static;

    /// Validate a create body and resolve its references.
    fn build(conn: &Connection, input: Self::Input) -> Result<Self, ApiError>;

    /// Apply an update body onto the stored row and re-validate the result.
    fn merge(conn: &Connection, existing: Self, input: Self::Input) -> Result<Self, ApiError>;
}

fn noun<R: Resource>() -> String {
    R::LABEL.to_lowercase()
}

fn not_found<R: Resource>() -> ApiError {
    ApiError::NotFound(format!("{} not found", R::LABEL))
}

/// 400 unless the referenced row exists.
pub fn ensure_exists<R: Resource>(conn: &Connection, key: &R::Key) -> Result<(), ApiError> {
    ensure_reference::<R>(conn, key, R::LABEL)
}

/// Like [`ensure_exists`], naming the reference by its role.
pub fn ensure_reference<R: Resource>(
    conn: &Connection,
    key: &R::Key,
    role: &str,
) -> Result<(), ApiError> {
    if exists::<R>(conn, key)? {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("{role} with given ID not found")))
    }
}

/// 400 when a row with the same key is already stored.
pub fn ensure_new<R: Resource>(conn: &Connection, row: &R, message: &str) -> Result<(), ApiError> {
    if exists::<R>(conn, &row.key())? {
        return Err(ApiError::BadRequest(message.to_string()));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Handlers
// ═══════════════════════════════════════════════════════════

/// `GET /`: all rows with their relations.
pub async fn list<R: Resource>(
    State(ctx): State<ApiContext>,
) -> Result<Json<DataResponse<Vec<R::Detail>>>, ApiError> {
    let rows = ctx
        .db
        .run(|conn| -> Result<_, ApiError> {
            let rows = R::find_all(conn)?
                .into_iter()
                .map(|row| R::with_relations(conn, row))
                .collect::<Result<Vec<_>, DatabaseError>>()?;
            Ok(rows)
        })
        .await
        .map_err(|e| e.during(format!("Could not fetch {}", R::PLURAL)))?;

    Ok(DataResponse::new(rows))
}

/// `GET /:key`: one row with its relations.
pub async fn get_one<R: Resource>(
    State(ctx): State<ApiContext>,
    KeyPath(key): KeyPath<R::Key>,
) -> Result<Json<DataResponse<R::Detail>>, ApiError> {
    let row = ctx
        .db
        .run(move |conn| -> Result<_, ApiError> {
            let row = R::find_one(conn, &key)?.ok_or_else(not_found::<R>)?;
            Ok(R::with_relations(conn, row)?)
        })
        .await
        .map_err(|e| e.during(format!("Could not fetch {}", noun::<R>())))?;

    Ok(DataResponse::new(row))
}

/// `POST /`: validate, insert, return the stored row.
pub async fn create<R: Resource>(
    State(ctx): State<ApiContext>,
    JsonBody(input): JsonBody<R::Input>,
) -> Result<Json<DataResponse<R>>, ApiError> {
    let row = ctx
        .db
        .run(move |conn| -> Result<R, ApiError> {
            let row = R::build(conn, input)?;
            Ok(R::insert(conn, row)?)
        })
        .await
        .map_err(|e| e.during(format!("Could not create {}", noun::<R>())))?;

    tracing::info!(resource = R::PLURAL, key = ?row.key(), "Created");
    Ok(DataResponse::new(row))
}

/// `PUT /:key`: partial update of an existing row.
pub async fn update<R: Resource>(
    State(ctx): State<ApiContext>,
    KeyPath(key): KeyPath<R::Key>,
    JsonBody(input): JsonBody<R::Input>,
) -> Result<Json<DataResponse<R>>, ApiError> {
    let row = ctx
        .db
        .run(move |conn| -> Result<R, ApiError> {
            let existing = R::find_one(conn, &key)?.ok_or_else(not_found::<R>)?;
            let merged = R::merge(conn, existing, input)?;
            Ok(R::update(conn, merged)?)
        })
        .await
        .map_err(|e| e.during(format!("Could not update {}", noun::<R>())))?;

    tracing::info!(resource = R::PLURAL, key = ?row.key(), "Updated");
    Ok(DataResponse::new(row))
}

/// `DELETE /:key`: remove a row, answering with its last stored state.
pub async fn delete<R: Resource>(
    State(ctx): State<ApiContext>,
    KeyPath(key): KeyPath<R::Key>,
) -> Result<Json<DataResponse<R::Detail>>, ApiError> {
    let row = ctx
        .db
        .run(move |conn| -> Result<_, ApiError> {
            let row = R::find_one(conn, &key)?.ok_or_else(not_found::<R>)?;
            let detail = R::with_relations(conn, row)?;
            R::delete(conn, &key).map_err(|e| match e {
                DatabaseError::ConstraintViolation(_) => ApiError::BadRequest(format!(
                    "{} is still referenced by other records",
                    R::LABEL
                )),
                other => other.into(),
            })?;
            tracing::info!(resource = R::PLURAL, key = ?key, "Deleted");
            Ok(detail)
        })
        .await
        .map_err(|e| e.during(format!("Could not delete {}", noun::<R>())))?;

    Ok(DataResponse::new(row))
}

/// The five CRUD routes for one resource, ready to nest under its prefix.
pub fn resource_router<R: Resource>() -> Router<ApiContext> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            R::KEY_PATH,
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
}
