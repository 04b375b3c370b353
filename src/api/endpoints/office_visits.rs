//! `/api/officeVisits/:patientId/:doctorId/:visitDate`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::{ensure_exists, ensure_new, Resource};
use crate::models::{Doctor, OfficeVisit, OfficeVisitInput, Patient};

pub const VISIT_EXISTS: &str = "Visit already exists";

impl Resource for OfficeVisit {
    const LABEL: &'static str = "Office visit";
    const PLURAL: &'static str = "office visits";
    const KEY_PATH: &'static str = "/:patientId/:doctorId/:visitDate";

    type Input = OfficeVisitInput;

    fn build(conn: &Connection, input: OfficeVisitInput) -> Result<Self, ApiError> {
        let visit = OfficeVisit::from_input(input)?;
        ensure_exists::<Doctor>(conn, &visit.doctor_id)?;
        ensure_exists::<Patient>(conn, &visit.patient_id)?;
        ensure_new(conn, &visit, VISIT_EXISTS)?;
        Ok(visit)
    }

    fn merge(
        _conn: &Connection,
        mut existing: Self,
        input: OfficeVisitInput,
    ) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
