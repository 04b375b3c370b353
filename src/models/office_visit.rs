use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::doctor::Doctor;
use super::field::{is_blank, Field};
use super::patient::Patient;
use super::ValidationError;

pub const OFFICE_VISIT_REQUIRED_FIELDS: &str =
    "Office visit has to have at least doctor ID, patient ID and date of visit";
pub const VISIT_TYPE_AMBIGUOUS: &str =
    "Visit has to be either initial visit, follow-up visit, routine visit or other visit";
pub const MISSING_INITIAL_DIAGNOSIS: &str = "Missing initial diagnosis";
pub const MISSING_DIAGNOSIS_STATUS: &str = "Missing diagnosis status";
pub const MISSING_VITALS: &str = "Missing blood pressure, height or weight";

/// The four visit flags read as a single selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitType {
    Initial,
    Followup,
    Routine,
    Other,
}

/// Keyed by `(patient_id, doctor_id, visit_date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeVisit {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub visit_date: NaiveDate,
    pub symptoms: Option<String>,
    pub initial_visit: bool,
    pub initial_diagnosis: Option<String>,
    pub followup_visit: bool,
    pub diagnosis_status: Option<String>,
    pub routine_visit: bool,
    pub blood_pressure: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub diagnosis: Option<String>,
    pub other_visit: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeVisitDetail {
    #[serde(flatten)]
    pub visit: OfficeVisit,
    pub doctor: Option<Doctor>,
    pub patient: Option<Patient>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficeVisitInput {
    pub patient_id: Field<i64>,
    pub doctor_id: Field<i64>,
    pub visit_date: Field<NaiveDate>,
    pub symptoms: Field<String>,
    pub initial_visit: Field<bool>,
    pub initial_diagnosis: Field<String>,
    pub followup_visit: Field<bool>,
    pub diagnosis_status: Field<String>,
    pub routine_visit: Field<bool>,
    pub blood_pressure: Field<String>,
    pub height: Field<f64>,
    pub weight: Field<f64>,
    pub diagnosis: Field<String>,
    pub other_visit: Field<bool>,
}

impl OfficeVisit {
    pub fn from_input(mut input: OfficeVisitInput) -> Result<Self, ValidationError> {
        let (Some(patient_id), Some(doctor_id), Some(visit_date)) = (
            std::mem::take(&mut input.patient_id).value(),
            std::mem::take(&mut input.doctor_id).value(),
            std::mem::take(&mut input.visit_date).value(),
        ) else {
            return Err(ValidationError::new(OFFICE_VISIT_REQUIRED_FIELDS));
        };

        let now = Utc::now();
        let mut visit = OfficeVisit {
            patient_id,
            doctor_id,
            visit_date,
            symptoms: None,
            initial_visit: false,
            initial_diagnosis: None,
            followup_visit: false,
            diagnosis_status: None,
            routine_visit: false,
            blood_pressure: None,
            height: None,
            weight: None,
            diagnosis: None,
            other_visit: false,
            created_at: now,
            updated_at: now,
        };
        visit.apply(input);
        visit.validate()?;
        Ok(visit)
    }

    /// Apply everything except the key, which comes from the request path.
    pub fn apply(&mut self, input: OfficeVisitInput) {
        input.symptoms.apply_optional_text(&mut self.symptoms);
        input.initial_visit.apply(&mut self.initial_visit);
        input.initial_diagnosis.apply_optional_text(&mut self.initial_diagnosis);
        input.followup_visit.apply(&mut self.followup_visit);
        input.diagnosis_status.apply_optional_text(&mut self.diagnosis_status);
        input.routine_visit.apply(&mut self.routine_visit);
        input.blood_pressure.apply_optional_text(&mut self.blood_pressure);
        input.height.apply_nullable(&mut self.height);
        input.weight.apply_nullable(&mut self.weight);
        input.diagnosis.apply_optional_text(&mut self.diagnosis);
        input.other_visit.apply(&mut self.other_visit);
    }

    /// Exactly one of the four flags must be set.
    pub fn visit_type(&self) -> Result<VisitType, ValidationError> {
        match (
            self.initial_visit,
            self.followup_visit,
            self.routine_visit,
            self.other_visit,
        ) {
            (true, false, false, false) => Ok(VisitType::Initial),
            (false, true, false, false) => Ok(VisitType::Followup),
            (false, false, true, false) => Ok(VisitType::Routine),
            (false, false, false, true) => Ok(VisitType::Other),
            _ => Err(ValidationError::new(VISIT_TYPE_AMBIGUOUS)),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.patient_id <= 0 || self.doctor_id <= 0 {
            return Err(ValidationError::new(OFFICE_VISIT_REQUIRED_FIELDS));
        }

        let has_text = |v: &Option<String>| v.as_deref().is_some_and(|s| !is_blank(s));
        let positive = |v: Option<f64>| v.is_some_and(|n| n > 0.0);

        match self.visit_type()? {
            VisitType::Initial if !has_text(&self.initial_diagnosis) => {
                Err(ValidationError::new(MISSING_INITIAL_DIAGNOSIS))
            }
            VisitType::Followup if !has_text(&self.diagnosis_status) => {
                Err(ValidationError::new(MISSING_DIAGNOSIS_STATUS))
            }
            VisitType::Routine
                if !has_text(&self.blood_pressure)
                    || !positive(self.height)
                    || !positive(self.weight) =>
            {
                Err(ValidationError::new(MISSING_VITALS))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> OfficeVisitInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn two_flags_rejected() {
        let err = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01",
                "initialVisit":true,"followupVisit":true,"initialDiagnosis":"flu"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), VISIT_TYPE_AMBIGUOUS);
    }

    #[test]
    fn no_flags_rejected() {
        let err = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), VISIT_TYPE_AMBIGUOUS);
    }

    #[test]
    fn initial_visit_needs_diagnosis() {
        let err = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01","initialVisit":true}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), MISSING_INITIAL_DIAGNOSIS);
    }

    #[test]
    fn followup_needs_status() {
        let err = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01","followupVisit":true}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), MISSING_DIAGNOSIS_STATUS);
    }

    #[test]
    fn routine_needs_all_vitals() {
        let err = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01","routineVisit":true,
                "bloodPressure":"120/80","height":180}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), MISSING_VITALS);

        let visit = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01","routineVisit":true,
                "bloodPressure":"120/80","height":180,"weight":75.5}"#,
        ))
        .unwrap();
        assert_eq!(visit.visit_type().unwrap(), VisitType::Routine);
    }

    #[test]
    fn other_visit_needs_nothing_extra() {
        let visit = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01","otherVisit":true,
                "symptoms":"  cough "}"#,
        ))
        .unwrap();
        assert_eq!(visit.visit_type().unwrap(), VisitType::Other);
        assert_eq!(visit.symptoms.as_deref(), Some("cough"));
    }

    #[test]
    fn missing_date_rejected() {
        let err = OfficeVisit::from_input(input(r#"{"patientId":1,"doctorId":2,"otherVisit":true}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), OFFICE_VISIT_REQUIRED_FIELDS);
    }

    #[test]
    fn update_can_switch_visit_type() {
        let mut visit = OfficeVisit::from_input(input(
            r#"{"patientId":1,"doctorId":2,"visitDate":"2024-05-01","initialVisit":true,
                "initialDiagnosis":"flu"}"#,
        ))
        .unwrap();

        visit.apply(input(r#"{"followupVisit":true}"#));
        assert_eq!(visit.validate().unwrap_err().to_string(), VISIT_TYPE_AMBIGUOUS);

        visit.apply(input(r#"{"initialVisit":false,"diagnosisStatus":"improving"}"#));
        assert!(visit.validate().is_ok());
        assert_eq!(visit.visit_type().unwrap(), VisitType::Followup);
    }
}
