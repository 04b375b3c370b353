//! Entity records and their request bodies.
//!
//! Each entity offers `from_input` (create), `apply` (partial update) and
//! `validate`, so create and update share one set of rules.

pub mod doctor;
pub mod doctor_history;
pub mod drug;
pub mod enums;
pub mod field;
pub mod hospital;
pub mod hospital_affiliation;
pub mod insurance_company;
pub mod office_visit;
pub mod patient;
pub mod prescription;

pub use doctor::*;
pub use doctor_history::*;
pub use drug::*;
pub use field::Field;
pub use hospital::*;
pub use hospital_affiliation::*;
pub use insurance_company::*;
pub use office_visit::*;
pub use patient::*;
pub use prescription::*;

/// A request failed a field-level rule. Maps to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
