use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::doctor::Doctor;
use super::enums::Relationship;
use super::field::{is_blank, Field};
use super::insurance_company::InsuranceCompany;
use super::ValidationError;

pub const PATIENT_REQUIRED_FIELDS: &str =
    "Patient has to have name, address, phone, email, relationship, doctor ID and insurance ID";
pub const INVALID_RELATIONSHIP: &str = "Invalid relationship type";
pub const OWNER_REQUIRED: &str = "Insurance owner ID is required for dependent patients";
pub const OWNER_IS_SELF: &str = "Patient can not be their own insurance owner";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub relationship: Relationship,
    pub doctor_id: i64,
    pub insurance_id: i64,
    /// Set only for dependents; points at the patient holding the policy.
    pub insurance_owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient with its many-to-one relations loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetail {
    #[serde(flatten)]
    pub patient: Patient,
    pub doctor: Option<Doctor>,
    pub insurance_company: Option<InsuranceCompany>,
    pub insurance_owner: Option<Patient>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInput {
    pub name: Field<String>,
    pub address: Field<String>,
    pub phone: Field<String>,
    pub email: Field<String>,
    pub relationship: Field<String>,
    pub doctor_id: Field<i64>,
    pub insurance_id: Field<i64>,
    pub insurance_owner_id: Field<i64>,
}

impl PatientInput {
    fn has_required_fields(&self) -> bool {
        let text_present = [&self.name, &self.address, &self.phone, &self.email, &self.relationship]
            .iter()
            .all(|f| f.as_value().is_some_and(|v| !is_blank(v)));
        text_present && self.doctor_id.as_value().is_some() && self.insurance_id.as_value().is_some()
    }
}

fn parse_relationship(value: &str) -> Result<Relationship, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(INVALID_RELATIONSHIP))
}

impl Patient {
    pub fn from_input(input: PatientInput) -> Result<Self, ValidationError> {
        if !input.has_required_fields() {
            return Err(ValidationError::new(PATIENT_REQUIRED_FIELDS));
        }

        let now = Utc::now();
        let mut patient = Patient {
            id: 0,
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            relationship: Relationship::InsuranceOwner,
            doctor_id: 0,
            insurance_id: 0,
            insurance_owner_id: None,
            created_at: now,
            updated_at: now,
        };
        patient.apply(input)?;
        patient.validate()?;
        Ok(patient)
    }

    /// Apply supplied fields. Fails only on an unknown relationship value.
    pub fn apply(&mut self, input: PatientInput) -> Result<(), ValidationError> {
        if let Some(value) = input.relationship.as_value() {
            self.relationship = parse_relationship(value)?;
        }
        input.name.apply_text(&mut self.name);
        input.address.apply_text(&mut self.address);
        input.phone.apply_text(&mut self.phone);
        input.email.apply_text(&mut self.email);
        input.doctor_id.apply(&mut self.doctor_id);
        input.insurance_id.apply(&mut self.insurance_id);
        input.insurance_owner_id.apply_nullable(&mut self.insurance_owner_id);

        if self.relationship == Relationship::InsuranceOwner {
            self.insurance_owner_id = None;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let text_missing = [&self.name, &self.address, &self.phone, &self.email]
            .iter()
            .any(|v| is_blank(v));
        if text_missing || self.doctor_id <= 0 || self.insurance_id <= 0 {
            return Err(ValidationError::new(PATIENT_REQUIRED_FIELDS));
        }

        if self.relationship == Relationship::Dependent {
            match self.insurance_owner_id {
                None => return Err(ValidationError::new(OWNER_REQUIRED)),
                Some(owner) if self.id != 0 && owner == self.id => {
                    return Err(ValidationError::new(OWNER_IS_SELF));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
