use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{is_blank, Field};
use super::ValidationError;

pub const DOCTOR_REQUIRED_FIELDS: &str =
    "Doctor has to have name, address, phone, specialization and hospital affiliation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub specialization: String,
    /// Free-text affiliation as entered; structured links live in
    /// `hospital_affiliations`.
    pub hospital_affiliation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/doctors` and `PUT /api/doctors/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorInput {
    pub name: Field<String>,
    pub address: Field<String>,
    pub phone: Field<String>,
    pub specialization: Field<String>,
    pub hospital_affiliation: Field<String>,
}

impl Doctor {
    pub fn from_input(input: DoctorInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut doctor = Doctor {
            id: 0,
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            specialization: String::new(),
            hospital_affiliation: String::new(),
            created_at: now,
            updated_at: now,
        };
        doctor.apply(input);
        doctor.validate()?;
        Ok(doctor)
    }

    pub fn apply(&mut self, input: DoctorInput) {
        input.name.apply_text(&mut self.name);
        input.address.apply_text(&mut self.address);
        input.phone.apply_text(&mut self.phone);
        input.specialization.apply_text(&mut self.specialization);
        input.hospital_affiliation.apply_text(&mut self.hospital_affiliation);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = [
            &self.name,
            &self.address,
            &self.phone,
            &self.specialization,
            &self.hospital_affiliation,
        ]
        .iter()
        .any(|v| is_blank(v));

        if missing {
            return Err(ValidationError::new(DOCTOR_REQUIRED_FIELDS));
        }
        Ok(())
    }
}
