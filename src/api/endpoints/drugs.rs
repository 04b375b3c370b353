//! `/api/drugs`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::Resource;
use crate::models::{Drug, DrugInput};

impl Resource for Drug {
    const LABEL: &'static str = "Drug";
    const PLURAL: &'static str = "drugs";
    const KEY_PATH: &'static str = "/:id";

    type Input = DrugInput;

    fn build(_conn: &Connection, input: DrugInput) -> Result<Self, ApiError> {
        Ok(Drug::from_input(input)?)
    }

    fn merge(_conn: &Connection, mut existing: Self, input: DrugInput) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
