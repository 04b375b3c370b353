//! HTTP API.
//!
//! Every resource is mounted under `/api/<resource>` with the same five
//! routes (list, get, create, update, delete). `api_router()` returns a
//! `Router` that can be served directly or driven in tests.

pub mod endpoints;
pub mod error;
pub mod resource;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
