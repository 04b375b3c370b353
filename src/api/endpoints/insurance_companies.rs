//! `/api/insuranceCompanies`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::Resource;
use crate::models::{InsuranceCompany, InsuranceCompanyInput};

impl Resource for InsuranceCompany {
    const LABEL: &'static str = "Insurance company";
    const PLURAL: &'static str = "insurance companies";
    const KEY_PATH: &'static str = "/:id";

    type Input = InsuranceCompanyInput;

    fn build(_conn: &Connection, input: InsuranceCompanyInput) -> Result<Self, ApiError> {
        Ok(InsuranceCompany::from_input(input)?)
    }

    fn merge(
        _conn: &Connection,
        mut existing: Self,
        input: InsuranceCompanyInput,
    ) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
