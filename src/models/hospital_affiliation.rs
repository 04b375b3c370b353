use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::doctor::Doctor;
use super::field::Field;
use super::hospital::Hospital;
use super::ValidationError;

pub const HOSPITAL_AFFILIATION_REQUIRED_FIELDS: &str =
    "Hospital affiliation has to have doctor ID and hospital ID";

/// Links a doctor to a hospital. Keyed by `(doctor_id, hospital_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalAffiliation {
    pub doctor_id: i64,
    pub hospital_id: i64,
    pub affiliation_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalAffiliationDetail {
    #[serde(flatten)]
    pub affiliation: HospitalAffiliation,
    pub doctor: Option<Doctor>,
    pub hospital: Option<Hospital>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalAffiliationInput {
    pub doctor_id: Field<i64>,
    pub hospital_id: Field<i64>,
    pub affiliation_date: Field<NaiveDate>,
}

impl HospitalAffiliation {
    /// Build a new affiliation; the date defaults to today.
    pub fn from_input(input: HospitalAffiliationInput) -> Result<Self, ValidationError> {
        let (Some(doctor_id), Some(hospital_id)) = (input.doctor_id.value(), input.hospital_id.value())
        else {
            return Err(ValidationError::new(HOSPITAL_AFFILIATION_REQUIRED_FIELDS));
        };

        let now = Utc::now();
        let affiliation = HospitalAffiliation {
            doctor_id,
            hospital_id,
            affiliation_date: input.affiliation_date.value().unwrap_or_else(|| now.date_naive()),
            created_at: now,
            updated_at: now,
        };
        affiliation.validate()?;
        Ok(affiliation)
    }

    /// Only the date is mutable; the key comes from the request path.
    pub fn apply(&mut self, input: HospitalAffiliationInput) {
        input.affiliation_date.apply(&mut self.affiliation_date);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.doctor_id <= 0 || self.hospital_id <= 0 {
            return Err(ValidationError::new(HOSPITAL_AFFILIATION_REQUIRED_FIELDS));
        }
        Ok(())
    }
}
