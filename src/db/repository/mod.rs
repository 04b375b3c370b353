//! Repository layer: entity-scoped database operations.
//!
//! One sub-module per table. Each exposes plain functions taking a
//! `&Connection` and implements [`Repository`] on top of them so the HTTP
//! layer can drive every resource through the same five operations.

mod doctor;
mod doctor_history;
mod drug;
mod hospital;
mod hospital_affiliation;
mod insurance_company;
mod office_visit;
mod patient;
mod prescription;

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::DatabaseError;

/// Storage port shared by all entities.
///
/// `insert` and `update` stamp `created_at`/`updated_at` and return the
/// row as stored (including a generated id, where the table has one).
pub trait Repository: Sized + Send + 'static {
    /// Primary key; a tuple for composite keys, in URL path order.
    type Key: Clone + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static;
    /// The entity with its many-to-one relations loaded.
    type Detail: Serialize + Send + 'static;

    fn key(&self) -> Self::Key;
    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError>;
    fn find_one(conn: &Connection, key: &Self::Key) -> Result<Option<Self>, DatabaseError>;
    fn insert(conn: &Connection, entity: Self) -> Result<Self, DatabaseError>;
    fn update(conn: &Connection, entity: Self) -> Result<Self, DatabaseError>;
    fn delete(conn: &Connection, key: &Self::Key) -> Result<(), DatabaseError>;
    fn with_relations(conn: &Connection, entity: Self) -> Result<Self::Detail, DatabaseError>;
}

/// True when a row with `key` exists.
pub fn exists<R: Repository>(conn: &Connection, key: &R::Key) -> Result<bool, DatabaseError> {
    Ok(R::find_one(conn, key)?.is_some())
}

pub use doctor::*;
pub use doctor_history::*;
pub use drug::*;
pub use hospital::*;
pub use hospital_affiliation::*;
pub use insurance_company::*;
pub use office_visit::*;
pub use patient::*;
pub use prescription::*;
