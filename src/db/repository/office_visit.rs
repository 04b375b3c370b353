use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{get_doctor, get_patient, Repository};
use crate::db::DatabaseError;
use crate::models::{OfficeVisit, OfficeVisitDetail};

const VISIT_COLUMNS: &str = "patient_id, doctor_id, visit_date, symptoms, initial_visit,
    initial_diagnosis, followup_visit, diagnosis_status, routine_visit, blood_pressure,
    height, weight, diagnosis, other_visit, created_at, updated_at";

fn visit_from_row(row: &Row<'_>) -> rusqlite::Result<OfficeVisit> {
    Ok(OfficeVisit {
        patient_id: row.get(0)?,
        doctor_id: row.get(1)?,
        visit_date: row.get(2)?,
        symptoms: row.get(3)?,
        initial_visit: row.get(4)?,
        initial_diagnosis: row.get(5)?,
        followup_visit: row.get(6)?,
        diagnosis_status: row.get(7)?,
        routine_visit: row.get(8)?,
        blood_pressure: row.get(9)?,
        height: row.get(10)?,
        weight: row.get(11)?,
        diagnosis: row.get(12)?,
        other_visit: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

pub fn insert_office_visit(conn: &Connection, visit: &OfficeVisit) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO office_visits (patient_id, doctor_id, visit_date, symptoms, initial_visit,
         initial_diagnosis, followup_visit, diagnosis_status, routine_visit, blood_pressure,
         height, weight, diagnosis, other_visit, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            visit.patient_id,
            visit.doctor_id,
            visit.visit_date,
            visit.symptoms,
            visit.initial_visit,
            visit.initial_diagnosis,
            visit.followup_visit,
            visit.diagnosis_status,
            visit.routine_visit,
            visit.blood_pressure,
            visit.height,
            visit.weight,
            visit.diagnosis,
            visit.other_visit,
            visit.created_at,
            visit.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(())
}

pub fn get_office_visit(
    conn: &Connection,
    patient_id: i64,
    doctor_id: i64,
    visit_date: NaiveDate,
) -> Result<Option<OfficeVisit>, DatabaseError> {
    let sql = format!(
        "SELECT {VISIT_COLUMNS} FROM office_visits
         WHERE patient_id = ?1 AND doctor_id = ?2 AND visit_date = ?3"
    );
    Ok(conn
        .query_row(&sql, params![patient_id, doctor_id, visit_date], visit_from_row)
        .optional()?)
}

pub fn get_all_office_visits(conn: &Connection) -> Result<Vec<OfficeVisit>, DatabaseError> {
    let sql = format!(
        "SELECT {VISIT_COLUMNS} FROM office_visits ORDER BY visit_date, patient_id, doctor_id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], visit_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Rewrites every non-key column.
pub fn update_office_visit(conn: &Connection, visit: &OfficeVisit) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE office_visits SET symptoms = ?4, initial_visit = ?5, initial_diagnosis = ?6,
             followup_visit = ?7, diagnosis_status = ?8, routine_visit = ?9,
             blood_pressure = ?10, height = ?11, weight = ?12, diagnosis = ?13,
             other_visit = ?14, updated_at = ?15
             WHERE patient_id = ?1 AND doctor_id = ?2 AND visit_date = ?3",
            params![
                visit.patient_id,
                visit.doctor_id,
                visit.visit_date,
                visit.symptoms,
                visit.initial_visit,
                visit.initial_diagnosis,
                visit.followup_visit,
                visit.diagnosis_status,
                visit.routine_visit,
                visit.blood_pressure,
                visit.height,
                visit.weight,
                visit.diagnosis,
                visit.other_visit,
                visit.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "OfficeVisit".into(),
            id: format!("{}/{}/{}", visit.patient_id, visit.doctor_id, visit.visit_date),
        });
    }
    Ok(())
}

pub fn delete_office_visit(
    conn: &Connection,
    patient_id: i64,
    doctor_id: i64,
    visit_date: NaiveDate,
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM office_visits WHERE patient_id = ?1 AND doctor_id = ?2 AND visit_date = ?3",
        params![patient_id, doctor_id, visit_date],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for OfficeVisit {
    /// `(patient_id, doctor_id, visit_date)`
    type Key = (i64, i64, NaiveDate);
    type Detail = OfficeVisitDetail;

    fn key(&self) -> (i64, i64, NaiveDate) {
        (self.patient_id, self.doctor_id, self.visit_date)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_office_visits(conn)
    }

    fn find_one(
        conn: &Connection,
        key: &(i64, i64, NaiveDate),
    ) -> Result<Option<Self>, DatabaseError> {
        get_office_visit(conn, key.0, key.1, key.2)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        insert_office_visit(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_office_visit(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &(i64, i64, NaiveDate)) -> Result<(), DatabaseError> {
        delete_office_visit(conn, key.0, key.1, key.2)
    }

    fn with_relations(conn: &Connection, entity: Self) -> Result<OfficeVisitDetail, DatabaseError> {
        Ok(OfficeVisitDetail {
            doctor: get_doctor(conn, entity.doctor_id)?,
            patient: get_patient(conn, entity.patient_id)?,
            visit: entity,
        })
    }
}
