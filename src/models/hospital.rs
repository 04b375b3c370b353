use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{is_blank, Field};
use super::ValidationError;

pub const HOSPITAL_REQUIRED_FIELDS: &str = "Hospital has to have a name, address and phone number";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalInput {
    pub name: Field<String>,
    pub address: Field<String>,
    pub phone: Field<String>,
}

impl Hospital {
    pub fn from_input(input: HospitalInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut hospital = Hospital {
            id: 0,
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            created_at: now,
            updated_at: now,
        };
        hospital.apply(input);
        hospital.validate()?;
        Ok(hospital)
    }

    pub fn apply(&mut self, input: HospitalInput) {
        input.name.apply_text(&mut self.name);
        input.address.apply_text(&mut self.address);
        input.phone.apply_text(&mut self.phone);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) || is_blank(&self.address) || is_blank(&self.phone) {
            return Err(ValidationError::new(HOSPITAL_REQUIRED_FIELDS));
        }
        Ok(())
    }
}
