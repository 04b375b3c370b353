use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{is_blank, Field};
use super::ValidationError;

pub const INSURANCE_COMPANY_REQUIRED_FIELDS: &str =
    "Insurance company has to have a name and phone number";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceCompany {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsuranceCompanyInput {
    pub name: Field<String>,
    pub phone: Field<String>,
}

impl InsuranceCompany {
    pub fn from_input(input: InsuranceCompanyInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut company = InsuranceCompany {
            id: 0,
            name: String::new(),
            phone: String::new(),
            created_at: now,
            updated_at: now,
        };
        company.apply(input);
        company.validate()?;
        Ok(company)
    }

    pub fn apply(&mut self, input: InsuranceCompanyInput) {
        input.name.apply_text(&mut self.name);
        input.phone.apply_text(&mut self.phone);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) || is_blank(&self.phone) {
            return Err(ValidationError::new(INSURANCE_COMPANY_REQUIRED_FIELDS));
        }
        Ok(())
    }
}
