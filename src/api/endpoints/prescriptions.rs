//! `/api/prescriptions`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::{ensure_exists, Resource};
use crate::models::{Doctor, Drug, Patient, Prescription, PrescriptionInput};

fn resolve_references(conn: &Connection, rx: &Prescription) -> Result<(), ApiError> {
    ensure_exists::<Patient>(conn, &rx.patient_id)?;
    ensure_exists::<Doctor>(conn, &rx.doctor_id)?;
    ensure_exists::<Drug>(conn, &rx.drug_id)?;
    Ok(())
}

impl Resource for Prescription {
    const LABEL: &'static str = "Prescription";
    const PLURAL: &'static str = "prescriptions";
    const KEY_PATH: &'static str = "/:rxId";

    type Input = PrescriptionInput;

    fn build(conn: &Connection, input: PrescriptionInput) -> Result<Self, ApiError> {
        let rx = Prescription::from_input(input)?;
        resolve_references(conn, &rx)?;
        Ok(rx)
    }

    fn merge(
        conn: &Connection,
        mut existing: Self,
        input: PrescriptionInput,
    ) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        resolve_references(conn, &existing)?;
        Ok(existing)
    }
}
