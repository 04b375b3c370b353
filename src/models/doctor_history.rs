use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::doctor::Doctor;
use super::field::Field;
use super::patient::Patient;
use super::ValidationError;

pub const DOCTOR_HISTORY_REQUIRED_FIELDS: &str =
    "Doctor history has to have doctor ID, patient ID and start date";
pub const END_BEFORE_START: &str = "End date can not be before start date";

/// A period during which a patient was under a doctor's care.
/// Keyed by `(doctor_id, patient_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorHistory {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub reason_for_leaving: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorHistoryDetail {
    #[serde(flatten)]
    pub history: DoctorHistory,
    pub doctor: Option<Doctor>,
    pub patient: Option<Patient>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorHistoryInput {
    pub doctor_id: Field<i64>,
    pub patient_id: Field<i64>,
    pub start_date: Field<NaiveDate>,
    pub end_date: Field<NaiveDate>,
    pub reason_for_leaving: Field<String>,
}

impl DoctorHistory {
    pub fn from_input(input: DoctorHistoryInput) -> Result<Self, ValidationError> {
        let (Some(doctor_id), Some(patient_id), Some(start_date)) = (
            input.doctor_id.value(),
            input.patient_id.value(),
            input.start_date.value(),
        ) else {
            return Err(ValidationError::new(DOCTOR_HISTORY_REQUIRED_FIELDS));
        };

        let now = Utc::now();
        let history = DoctorHistory {
            doctor_id,
            patient_id,
            start_date,
            end_date: input.end_date.value(),
            reason_for_leaving: input.reason_for_leaving.trimmed(),
            created_at: now,
            updated_at: now,
        };
        history.validate()?;
        Ok(history)
    }

    pub fn apply(&mut self, input: DoctorHistoryInput) {
        input.start_date.apply(&mut self.start_date);
        input.end_date.apply_nullable(&mut self.end_date);
        input.reason_for_leaving.apply_optional_text(&mut self.reason_for_leaving);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.doctor_id <= 0 || self.patient_id <= 0 {
            return Err(ValidationError::new(DOCTOR_HISTORY_REQUIRED_FIELDS));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::new(END_BEFORE_START));
            }
        }
        Ok(())
    }
}
