//! Resource bindings and service endpoints.
//!
//! Each resource module implements [`Resource`](crate::api::resource::Resource)
//! for its entity; the generic handlers serve it.

pub mod doctor_histories;
pub mod doctors;
pub mod drugs;
pub mod health;
pub mod hospital_affiliations;
pub mod hospitals;
pub mod insurance_companies;
pub mod office_visits;
pub mod patients;
pub mod prescriptions;
