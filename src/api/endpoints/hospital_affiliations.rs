//! `/api/hospitalAffiliations/:doctorId/:hospitalId`

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::api::resource::{ensure_exists, ensure_new, Resource};
use crate::models::{Doctor, Hospital, HospitalAffiliation, HospitalAffiliationInput};

pub const AFFILIATION_EXISTS: &str = "Hospital affiliation already exists";

impl Resource for HospitalAffiliation {
    const LABEL: &'static str = "Hospital affiliation";
    const PLURAL: &'static str = "hospital affiliations";
    const KEY_PATH: &'static str = "/:doctorId/:hospitalId";

    type Input = HospitalAffiliationInput;

    fn build(conn: &Connection, input: HospitalAffiliationInput) -> Result<Self, ApiError> {
        let affiliation = HospitalAffiliation::from_input(input)?;
        ensure_exists::<Doctor>(conn, &affiliation.doctor_id)?;
        ensure_exists::<Hospital>(conn, &affiliation.hospital_id)?;
        ensure_new(conn, &affiliation, AFFILIATION_EXISTS)?;
        Ok(affiliation)
    }

    fn merge(
        _conn: &Connection,
        mut existing: Self,
        input: HospitalAffiliationInput,
    ) -> Result<Self, ApiError> {
        existing.apply(input);
        existing.validate()?;
        Ok(existing)
    }
}
