//! `/api/hospitals`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::Resource;
use crate::models::{Hospital, HospitalInput};

impl Resource for Hospital {
    const LABEL: &'static str = "Hospital";
    const PLURAL: &'static str = "hospitals";
    const KEY_PATH: &'static str = "/:id";

    type Input = HospitalInput;

    fn build(_conn: &Connection, input: HospitalInput) -> Result<Self, ApiError> {
        Ok(Hospital::from_input(input)?)
    }

    fn merge(_conn: &Connection, mut existing: Self, input: HospitalInput) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
