//! `/api/patients`
//!
//! A dependent's `insuranceOwnerId` must name an existing patient; doctor
//! and insurer references are resolved on every write.

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::{ensure_exists, ensure_reference, Resource};
use crate::models::{Doctor, InsuranceCompany, Patient, PatientInput};

fn resolve_references(conn: &Connection, patient: &Patient) -> Result<(), ApiError> {
    ensure_exists::<Doctor>(conn, &patient.doctor_id)?;
    ensure_exists::<InsuranceCompany>(conn, &patient.insurance_id)?;
    if let Some(owner_id) = patient.insurance_owner_id {
        ensure_reference::<Patient>(conn, &owner_id, "Insurance owner")?;
    }
    Ok(())
}

impl Resource for Patient {
    const LABEL: &'static str = "Patient";
    const PLURAL: &'static str = "patients";
    const KEY_PATH: &'static str = "/:id";

    type Input = PatientInput;

    fn build(conn: &Connection, input: PatientInput) -> Result<Self, ApiError> {
        let patient = Patient::from_input(input)?;
        resolve_references(conn, &patient)?;
        Ok(patient)
    }

    fn merge(conn: &Connection, mut existing: Self, input: PatientInput) -> Result<Self, ApiError> {
        existing.apply(input)?;
        existing.validate()?;
        resolve_references(conn, &existing)?;
        Ok(existing)
    }
}
