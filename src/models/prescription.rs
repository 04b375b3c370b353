use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::doctor::Doctor;
use super::drug::Drug;
use super::field::{is_blank, Field};
use super::patient::Patient;
use super::ValidationError;

pub const PRESCRIPTION_REQUIRED_FIELDS: &str = "Prescription has to have date prescribed, dosage, duration, refillability, patient ID, doctor ID and drug ID";
pub const REFILLS_REQUIRED: &str = "Refillable prescription has to have number of refills";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub rx_id: i64,
    pub date_prescribed: NaiveDate,
    pub dosage: String,
    /// Date the prescription runs until.
    pub duration: NaiveDate,
    pub refillable: bool,
    pub refill_no: Option<i64>,
    pub comments: Option<String>,
    pub non_refill_reason: Option<String>,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub drug_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDetail {
    #[serde(flatten)]
    pub prescription: Prescription,
    pub patient: Option<Patient>,
    pub doctor: Option<Doctor>,
    pub drug: Option<Drug>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionInput {
    pub date_prescribed: Field<NaiveDate>,
    pub dosage: Field<String>,
    pub duration: Field<NaiveDate>,
    pub refillable: Field<bool>,
    pub refill_no: Field<i64>,
    pub comments: Field<String>,
    pub non_refill_reason: Field<String>,
    pub patient_id: Field<i64>,
    pub doctor_id: Field<i64>,
    pub drug_id: Field<i64>,
}

impl Prescription {
    pub fn from_input(input: PrescriptionInput) -> Result<Self, ValidationError> {
        let (
            Some(date_prescribed),
            Some(duration),
            Some(refillable),
            Some(patient_id),
            Some(doctor_id),
            Some(drug_id),
        ) = (
            input.date_prescribed.value(),
            input.duration.value(),
            input.refillable.value(),
            input.patient_id.value(),
            input.doctor_id.value(),
            input.drug_id.value(),
        )
        else {
            return Err(ValidationError::new(PRESCRIPTION_REQUIRED_FIELDS));
        };

        let refill_no = if refillable {
            input.refill_no.value()
        } else {
            Some(0)
        };

        let now = Utc::now();
        let prescription = Prescription {
            rx_id: 0,
            date_prescribed,
            dosage: input.dosage.trimmed().unwrap_or_default(),
            duration,
            refillable,
            refill_no,
            comments: input.comments.trimmed(),
            non_refill_reason: input.non_refill_reason.trimmed(),
            patient_id,
            doctor_id,
            drug_id,
            created_at: now,
            updated_at: now,
        };
        prescription.validate()?;
        Ok(prescription)
    }

    pub fn apply(&mut self, input: PrescriptionInput) {
        input.date_prescribed.apply(&mut self.date_prescribed);
        input.dosage.apply_text(&mut self.dosage);
        input.duration.apply(&mut self.duration);
        input.refillable.apply(&mut self.refillable);
        input.refill_no.apply_nullable(&mut self.refill_no);
        input.comments.apply_optional_text(&mut self.comments);
        input.non_refill_reason.apply_optional_text(&mut self.non_refill_reason);
        input.patient_id.apply(&mut self.patient_id);
        input.doctor_id.apply(&mut self.doctor_id);
        input.drug_id.apply(&mut self.drug_id);
        if !self.refillable {
            self.refill_no = Some(0);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.dosage) || self.patient_id <= 0 || self.doctor_id <= 0 || self.drug_id <= 0 {
            return Err(ValidationError::new(PRESCRIPTION_REQUIRED_FIELDS));
        }
        if self.refillable && !self.refill_no.is_some_and(|n| n > 0) {
            return Err(ValidationError::new(REFILLS_REQUIRED));
        }
        Ok(())
    }
}
