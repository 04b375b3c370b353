use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{is_blank, Field};
use super::ValidationError;

pub const DRUG_REQUIRED_FIELDS: &str = "Drug has to have name, side effects and benefits";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    pub id: i64,
    pub drug_name: String,
    pub side_effects: String,
    pub benefits: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrugInput {
    pub drug_name: Field<String>,
    pub side_effects: Field<String>,
    pub benefits: Field<String>,
}

impl Drug {
    pub fn from_input(input: DrugInput) -> Result<Self, ValidationError> {
        let now = Utc::now();
        let mut drug = Drug {
            id: 0,
            drug_name: String::new(),
            side_effects: String::new(),
            benefits: String::new(),
            created_at: now,
            updated_at: now,
        };
        drug.apply(input);
        drug.validate()?;
        Ok(drug)
    }

    pub fn apply(&mut self, input: DrugInput) {
        input.drug_name.apply_text(&mut self.drug_name);
        input.side_effects.apply_text(&mut self.side_effects);
        input.benefits.apply_text(&mut self.benefits);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.drug_name) || is_blank(&self.side_effects) || is_blank(&self.benefits) {
            return Err(ValidationError::new(DRUG_REQUIRED_FIELDS));
        }
        Ok(())
    }
}
