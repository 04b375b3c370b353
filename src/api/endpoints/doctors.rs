//! `/api/doctors`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::Resource;
use crate::models::{Doctor, DoctorInput};

impl Resource for Doctor {
    const LABEL: &'static str = "Doctor";
    const PLURAL: &'static str = "doctors";
    const KEY_PATH: &'static str = "/:id";

    type Input = DoctorInput;

    fn build(_conn: &Connection, input: DoctorInput) -> Result<Self, ApiError> {
        Ok(Doctor::from_input(input)?)
    }

    fn merge(_conn: &Connection, mut existing: Self, input: DoctorInput) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
