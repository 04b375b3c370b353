//! `/api/doctorhistories/:doctorId/:patientId`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::{ensure_exists, ensure_new, Resource};
use crate::models::{Doctor, DoctorHistory, DoctorHistoryInput, Patient};

pub const HISTORY_EXISTS: &str = "Doctor history already exists";

impl Resource for DoctorHistory {
    const LABEL: &'static str = "Doctor history";
    const PLURAL: &'static str = "doctor histories";
    const KEY_PATH: &'static str = "/:doctorId/:patientId";

    type Input = DoctorHistoryInput;

    fn build(conn: &Connection, input: DoctorHistoryInput) -> Result<Self, ApiError> {
        let history = DoctorHistory::from_input(input)?;
        ensure_exists::<Doctor>(conn, &history.doctor_id)?;
        ensure_exists::<Patient>(conn, &history.patient_id)?;
        ensure_new(conn, &history, HISTORY_EXISTS)?;
        Ok(history)
    }

    fn merge(
        _conn: &Connection,
        mut existing: Self,
        input: DoctorHistoryInput,
    ) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
