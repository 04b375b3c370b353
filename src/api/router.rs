//! API router.
//!
//! Returns a composable `Router` with every resource nested under `/api/`.
//! Layers (outermost → innermost): CORS → request tracing → handler.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::resource::resource_router;
use crate::api::types::ApiContext;
use crate::models::{
    Doctor, DoctorHistory, Drug, Hospital, HospitalAffiliation, InsuranceCompany, OfficeVisit,
    Patient, Prescription,
};

/// Path segments mounted under `/api/`, in the order they are nested.
pub const RESOURCES: &[&str] = &[
    "patients",
    "doctors",
    "doctorhistories",
    "drugs",
    "hospitalAffiliations",
    "hospitals",
    "insuranceCompanies",
    "officeVisits",
    "prescriptions",
];

/// Build the API router around an already opened storage client.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api", get(endpoints::health::index))
        .route("/api/health", get(endpoints::health::check))
        .nest("/api/patients", resource_router::<Patient>())
        .nest("/api/doctors", resource_router::<Doctor>())
        .nest("/api/doctorhistories", resource_router::<DoctorHistory>())
        .nest("/api/drugs", resource_router::<Drug>())
        .nest("/api/hospitalAffiliations", resource_router::<HospitalAffiliation>())
        .nest("/api/hospitals", resource_router::<Hospital>())
        .nest("/api/insuranceCompanies", resource_router::<InsuranceCompany>())
        .nest("/api/officeVisits", resource_router::<OfficeVisit>())
        .nest("/api/prescriptions", resource_router::<Prescription>())
        .fallback(endpoints::health::not_found)
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::endpoints::doctor_histories::HISTORY_EXISTS;
    use crate::db::Database;
    use crate::models::doctor::DOCTOR_REQUIRED_FIELDS;
    use crate::models::doctor_history::END_BEFORE_START;
    use crate::models::office_visit::{MISSING_INITIAL_DIAGNOSIS, MISSING_VITALS, VISIT_TYPE_AMBIGUOUS};
    use crate::models::patient::{OWNER_IS_SELF, OWNER_REQUIRED};
    use crate::models::prescription::REFILLS_REQUIRED;

    fn test_app() -> Router {
        api_router(ApiContext::new(Database::open_in_memory().unwrap()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn doctor_body(name: &str) -> Value {
        json!({
            "name": name,
            "address": "1 Main St",
            "phone": "555-0100",
            "specialization": "General practice",
            "hospitalAffiliation": "City General"
        })
    }

    async fn create(app: &Router, resource: &str, body: Value) -> Value {
        let (status, json) = send(app, "POST", &format!("/api/{resource}"), Some(body)).await;
        assert_eq!(status, StatusCode::OK, "creating {resource}: {json}");
        json["data"].clone()
    }

    /// Doctor, insurer and one insurance-owner patient.
    async fn seed_patient(app: &Router) -> (i64, i64, i64) {
        let doctor = create(app, "doctors", doctor_body("Ann")).await;
        let insurer = create(
            app,
            "insuranceCompanies",
            json!({ "name": "Acme Health", "phone": "555-0300" }),
        )
        .await;
        let patient = create(
            app,
            "patients",
            json!({
                "name": "Mary",
                "address": "3 Elm St",
                "phone": "555-0400",
                "email": "mary@example.org",
                "relationship": "insuranceOwner",
                "doctorId": doctor["id"],
                "insuranceId": insurer["id"]
            }),
        )
        .await;
        (
            doctor["id"].as_i64().unwrap(),
            insurer["id"].as_i64().unwrap(),
            patient["id"].as_i64().unwrap(),
        )
    }

    // ── Service endpoints ────────────────────────────────────

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn index_lists_every_resource() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api", None).await;
        assert_eq!(status, StatusCode::OK);
        let resources = json["resources"].as_array().unwrap();
        assert_eq!(resources.len(), RESOURCES.len());
        assert!(resources.contains(&json!("/api/officeVisits")));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/nonexistent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Route not found");
    }

    // ── Doctors ──────────────────────────────────────────────

    #[tokio::test]
    async fn create_doctor_trims_fields() {
        let app = test_app();
        let mut body = doctor_body("  Dr. Ann Lee  ");
        body["phone"] = json!(" 555-0100 ");
        let doctor = create(&app, "doctors", body).await;

        assert!(doctor["id"].as_i64().unwrap() > 0);
        assert_eq!(doctor["name"], "Dr. Ann Lee");
        assert_eq!(doctor["phone"], "555-0100");
        assert_eq!(doctor["hospitalAffiliation"], "City General");
        assert!(doctor["createdAt"].is_string());
    }

    #[tokio::test]
    async fn create_doctor_without_phone_is_400() {
        let app = test_app();
        let mut body = doctor_body("Ann");
        body.as_object_mut().unwrap().remove("phone");
        let (status, json) = send(&app, "POST", "/api/doctors", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], DOCTOR_REQUIRED_FIELDS);
    }

    #[tokio::test]
    async fn update_doctor_keeps_absent_fields() {
        let app = test_app();
        let doctor = create(&app, "doctors", doctor_body("Ann")).await;
        let uri = format!("/api/doctors/{}", doctor["id"]);

        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "phone": "555-9999" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["phone"], "555-9999");
        assert_eq!(json["data"]["name"], "Ann");
        assert_eq!(json["data"]["createdAt"], doctor["createdAt"]);
    }

    #[tokio::test]
    async fn update_doctor_with_blank_name_is_400() {
        let app = test_app();
        let doctor = create(&app, "doctors", doctor_body("Ann")).await;
        let uri = format!("/api/doctors/{}", doctor["id"]);
        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "name": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], DOCTOR_REQUIRED_FIELDS);
    }

    #[tokio::test]
    async fn update_missing_doctor_is_404() {
        let app = test_app();
        let (status, json) =
            send(&app, "PUT", "/api/doctors/999", Some(json!({ "phone": "1" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Doctor not found");
    }

    #[tokio::test]
    async fn referenced_doctor_cannot_be_deleted() {
        let app = test_app();
        let (doctor_id, _, _) = seed_patient(&app).await;
        let (status, json) = send(&app, "DELETE", &format!("/api/doctors/{doctor_id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Doctor is still referenced by other records");
    }

    #[tokio::test]
    async fn malformed_body_is_json_400() {
        let app = test_app();
        let req = Request::builder()
            .method("POST")
            .uri("/api/doctors")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/doctors/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid path parameter"));
    }

    // ── Patients ─────────────────────────────────────────────

    #[tokio::test]
    async fn missing_patient_is_404() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/patients/424242", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "error": "Patient not found" }));
    }

    #[tokio::test]
    async fn dependent_without_owner_is_400() {
        let app = test_app();
        let (doctor_id, insurer_id, _) = seed_patient(&app).await;
        let body = json!({
            "name": "Tom",
            "address": "3 Elm St",
            "phone": "555-0401",
            "email": "tom@example.org",
            "relationship": "dependent",
            "doctorId": doctor_id,
            "insuranceId": insurer_id
        });
        let (status, json) = send(&app, "POST", "/api/patients", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], OWNER_REQUIRED);
    }

    #[tokio::test]
    async fn unresolved_references_are_400() {
        let app = test_app();
        let (doctor_id, insurer_id, _) = seed_patient(&app).await;
        let base = json!({
            "name": "Tom",
            "address": "3 Elm St",
            "phone": "555-0401",
            "email": "tom@example.org",
            "relationship": "dependent",
            "doctorId": doctor_id,
            "insuranceId": insurer_id,
            "insuranceOwnerId": 999
        });

        let (status, json) = send(&app, "POST", "/api/patients", Some(base.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Insurance owner with given ID not found");

        let mut body = base;
        body["doctorId"] = json!(999);
        let (status, json) = send(&app, "POST", "/api/patients", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Doctor with given ID not found");
    }

    #[tokio::test]
    async fn patient_round_trip_with_relations() {
        let app = test_app();
        let (doctor_id, insurer_id, owner_id) = seed_patient(&app).await;
        let created = create(
            &app,
            "patients",
            json!({
                "name": "Tom",
                "address": "3 Elm St",
                "phone": "555-0401",
                "email": "tom@example.org",
                "relationship": "dependent",
                "doctorId": doctor_id,
                "insuranceId": insurer_id,
                "insuranceOwnerId": owner_id
            }),
        )
        .await;

        let uri = format!("/api/patients/{}", created["id"]);
        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let fetched = &json["data"];
        for (key, value) in created.as_object().unwrap() {
            assert_eq!(&fetched[key], value, "field {key}");
        }
        assert_eq!(fetched["doctor"]["id"], doctor_id);
        assert_eq!(fetched["insuranceCompany"]["name"], "Acme Health");
        assert_eq!(fetched["insuranceOwner"]["id"], owner_id);

        let (_, list) = send(&app, "GET", "/api/patients", None).await;
        assert_eq!(list["data"].as_array().unwrap().len(), 2);
    }

    // ── Hospitals ────────────────────────────────────────────

    #[tokio::test]
    async fn deleted_hospital_is_gone() {
        let app = test_app();
        let hospital = create(
            &app,
            "hospitals",
            json!({ "name": "General", "address": "2 Hospital Rd", "phone": "555-0200" }),
        )
        .await;
        let uri = format!("/api/hospitals/{}", hospital["id"]);

        let (status, json) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "General");

        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Hospital not found");
    }

    #[tokio::test]
    async fn affiliation_uses_composite_path() {
        let app = test_app();
        let doctor = create(&app, "doctors", doctor_body("Ann")).await;
        let hospital = create(
            &app,
            "hospitals",
            json!({ "name": "General", "address": "2 Hospital Rd", "phone": "555-0200" }),
        )
        .await;
        let body = json!({
            "doctorId": doctor["id"],
            "hospitalId": hospital["id"],
            "affiliationDate": "2023-06-01"
        });
        create(&app, "hospitalAffiliations", body.clone()).await;

        let (status, json) = send(&app, "POST", "/api/hospitalAffiliations", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Hospital affiliation already exists");

        let uri = format!("/api/hospitalAffiliations/{}/{}", doctor["id"], hospital["id"]);
        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["affiliationDate"], "2023-06-01");
        assert_eq!(json["data"]["hospital"]["name"], "General");
    }

    // ── Office visits ────────────────────────────────────────

    #[tokio::test]
    async fn visit_with_two_types_is_400() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        let body = json!({
            "patientId": patient_id,
            "doctorId": doctor_id,
            "visitDate": "2024-05-01",
            "initialVisit": true,
            "followupVisit": true,
            "initialDiagnosis": "Flu",
            "diagnosisStatus": "Improving"
        });
        let (status, json) = send(&app, "POST", "/api/officeVisits", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], VISIT_TYPE_AMBIGUOUS);
    }

    #[tokio::test]
    async fn initial_visit_needs_diagnosis() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        let body = json!({
            "patientId": patient_id,
            "doctorId": doctor_id,
            "visitDate": "2024-05-01",
            "initialVisit": true
        });
        let (status, json) = send(&app, "POST", "/api/officeVisits", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], MISSING_INITIAL_DIAGNOSIS);
    }

    #[tokio::test]
    async fn duplicate_visit_is_400() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        let body = json!({
            "patientId": patient_id,
            "doctorId": doctor_id,
            "visitDate": "2024-05-01",
            "initialVisit": true,
            "initialDiagnosis": "Flu"
        });
        create(&app, "officeVisits", body.clone()).await;

        let (status, json) = send(&app, "POST", "/api/officeVisits", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Visit already exists");

        let uri = format!("/api/officeVisits/{patient_id}/{doctor_id}/2024-05-01");
        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["initialDiagnosis"], "Flu");
        assert_eq!(json["data"]["patient"]["name"], "Mary");
    }

    #[tokio::test]
    async fn bad_visit_date_in_path_is_400() {
        let app = test_app();
        let (status, _) = send(&app, "GET", "/api/officeVisits/1/1/yesterday", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ── Prescriptions ────────────────────────────────────────

    #[tokio::test]
    async fn making_prescription_refillable_requires_refills() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        let drug = create(
            &app,
            "drugs",
            json!({ "drugName": "Ibuprofen", "sideEffects": "Nausea", "benefits": "Pain relief" }),
        )
        .await;
        let rx = create(
            &app,
            "prescriptions",
            json!({
                "datePrescribed": "2024-03-01",
                "dosage": "200mg",
                "duration": "2024-03-14",
                "refillable": false,
                "patientId": patient_id,
                "doctorId": doctor_id,
                "drugId": drug["id"]
            }),
        )
        .await;
        assert_eq!(rx["refillNo"], 0);

        let uri = format!("/api/prescriptions/{}", rx["rxId"]);
        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "refillable": true }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], REFILLS_REQUIRED);

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "refillable": true, "refillNo": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["refillNo"], 3);
    }

    #[tokio::test]
    async fn prescription_update_checks_references() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        let drug = create(
            &app,
            "drugs",
            json!({ "drugName": "Ibuprofen", "sideEffects": "Nausea", "benefits": "Pain relief" }),
        )
        .await;
        let rx = create(
            &app,
            "prescriptions",
            json!({
                "datePrescribed": "2024-03-01",
                "dosage": "200mg",
                "duration": "2024-03-14",
                "refillable": false,
                "patientId": patient_id,
                "doctorId": doctor_id,
                "drugId": drug["id"]
            }),
        )
        .await;
        let uri = format!("/api/prescriptions/{}", rx["rxId"]);

        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "drugId": 999 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Drug with given ID not found");

        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "doctorId": 999 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Doctor with given ID not found");

        let (_, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(json["data"]["drugId"], drug["id"]);
        assert_eq!(json["data"]["doctorId"], doctor_id);
    }

    // ── Patient updates ──────────────────────────────────────

    #[tokio::test]
    async fn patient_update_checks_references() {
        let app = test_app();
        let (_, _, owner_id) = seed_patient(&app).await;
        let uri = format!("/api/patients/{owner_id}");

        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "doctorId": 999 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Doctor with given ID not found");

        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "insuranceId": 999 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Insurance company with given ID not found");

        let body = json!({ "relationship": "dependent", "insuranceOwnerId": 999 });
        let (status, json) = send(&app, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Insurance owner with given ID not found");
    }

    #[tokio::test]
    async fn patient_cannot_own_their_own_policy() {
        let app = test_app();
        let (_, _, owner_id) = seed_patient(&app).await;
        let uri = format!("/api/patients/{owner_id}");
        let body = json!({ "relationship": "dependent", "insuranceOwnerId": owner_id });
        let (status, json) = send(&app, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], OWNER_IS_SELF);
    }

    #[tokio::test]
    async fn referenced_insurer_and_owner_cannot_be_deleted() {
        let app = test_app();
        let (doctor_id, insurer_id, owner_id) = seed_patient(&app).await;
        let dependent = create(
            &app,
            "patients",
            json!({
                "name": "Tom",
                "address": "3 Elm St",
                "phone": "555-0401",
                "email": "tom@example.org",
                "relationship": "dependent",
                "doctorId": doctor_id,
                "insuranceId": insurer_id,
                "insuranceOwnerId": owner_id
            }),
        )
        .await;

        let uri = format!("/api/insuranceCompanies/{insurer_id}");
        let (status, json) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Insurance company is still referenced by other records");

        let uri = format!("/api/patients/{owner_id}");
        let (status, json) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Patient is still referenced by other records");

        let uri = format!("/api/patients/{}", dependent["id"]);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &format!("/api/patients/{owner_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    // ── Composite keys ───────────────────────────────────────

    #[tokio::test]
    async fn visit_update_and_delete_by_composite_path() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        create(
            &app,
            "officeVisits",
            json!({
                "patientId": patient_id,
                "doctorId": doctor_id,
                "visitDate": "2024-05-01",
                "initialVisit": true,
                "initialDiagnosis": "Flu"
            }),
        )
        .await;
        let uri = format!("/api/officeVisits/{patient_id}/{doctor_id}/2024-05-01");

        let switch = json!({ "initialVisit": false, "routineVisit": true });
        let (status, json) = send(&app, "PUT", &uri, Some(switch.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], MISSING_VITALS);

        let mut body = switch;
        body["bloodPressure"] = json!("120/80");
        body["height"] = json!(180.0);
        body["weight"] = json!(75.5);
        body["visitDate"] = json!("2030-01-01");
        body["patientId"] = json!(999);
        let (status, json) = send(&app, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["routineVisit"], true);
        assert_eq!(json["data"]["visitDate"], "2024-05-01");
        assert_eq!(json["data"]["patientId"], patient_id);

        let (status, json) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["bloodPressure"], "120/80");

        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Office visit not found");
    }

    #[tokio::test]
    async fn history_update_and_delete_by_composite_path() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        let body = json!({ "doctorId": doctor_id, "patientId": patient_id, "startDate": "2020-01-01" });
        create(&app, "doctorhistories", body.clone()).await;

        let (status, json) = send(&app, "POST", "/api/doctorhistories", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], HISTORY_EXISTS);

        let uri = format!("/api/doctorhistories/{doctor_id}/{patient_id}");
        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "endDate": "2019-12-31" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], END_BEFORE_START);

        let update = json!({ "endDate": "2023-06-30", "reasonForLeaving": " Moved ", "doctorId": 999 });
        let (status, json) = send(&app, "PUT", &uri, Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["endDate"], "2023-06-30");
        assert_eq!(json["data"]["reasonForLeaving"], "Moved");
        assert_eq!(json["data"]["doctorId"], doctor_id);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn affiliation_update_and_delete_by_composite_path() {
        let app = test_app();
        let doctor = create(&app, "doctors", doctor_body("Ann")).await;
        let hospital = create(
            &app,
            "hospitals",
            json!({ "name": "General", "address": "2 Hospital Rd", "phone": "555-0200" }),
        )
        .await;
        create(
            &app,
            "hospitalAffiliations",
            json!({ "doctorId": doctor["id"], "hospitalId": hospital["id"], "affiliationDate": "2023-06-01" }),
        )
        .await;
        let uri = format!("/api/hospitalAffiliations/{}/{}", doctor["id"], hospital["id"]);

        let (status, json) = send(&app, "PUT", &uri, Some(json!({ "affiliationDate": "2024-01-15" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["affiliationDate"], "2024-01-15");
        assert_eq!(json["data"]["hospitalId"], hospital["id"]);

        let (status, json) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["doctor"]["name"], "Ann");

        let (status, json) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Hospital affiliation not found");
    }

    #[tokio::test]
    async fn deleting_patient_cascades_to_history() {
        let app = test_app();
        let (doctor_id, _, patient_id) = seed_patient(&app).await;
        create(
            &app,
            "doctorhistories",
            json!({ "doctorId": doctor_id, "patientId": patient_id, "startDate": "2020-01-01" }),
        )
        .await;

        let (status, _) = send(&app, "DELETE", &format!("/api/patients/{patient_id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send(&app, "GET", "/api/doctorhistories", None).await;
        assert_eq!(json["data"], json!([]));
    }
}
