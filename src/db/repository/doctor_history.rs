use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{get_doctor, get_patient, Repository};
use crate::db::DatabaseError;
use crate::models::{DoctorHistory, DoctorHistoryDetail};

const HISTORY_COLUMNS: &str =
    "doctor_id, patient_id, start_date, end_date, reason_for_leaving, created_at, updated_at";

fn history_from_row(row: &Row<'_>) -> rusqlite::Result<DoctorHistory> {
    Ok(DoctorHistory {
        doctor_id: row.get(0)?,
        patient_id: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        reason_for_leaving: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn insert_doctor_history(
    conn: &Connection,
    history: &DoctorHistory,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctor_histories (doctor_id, patient_id, start_date, end_date,
         reason_for_leaving, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            history.doctor_id,
            history.patient_id,
            history.start_date,
            history.end_date,
            history.reason_for_leaving,
            history.created_at,
            history.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(())
}

pub fn get_doctor_history(
    conn: &Connection,
    doctor_id: i64,
    patient_id: i64,
) -> Result<Option<DoctorHistory>, DatabaseError> {
    let sql = format!(
        "SELECT {HISTORY_COLUMNS} FROM doctor_histories WHERE doctor_id = ?1 AND patient_id = ?2"
    );
    Ok(conn
        .query_row(&sql, params![doctor_id, patient_id], history_from_row)
        .optional()?)
}

pub fn get_all_doctor_histories(conn: &Connection) -> Result<Vec<DoctorHistory>, DatabaseError> {
    let sql = format!(
        "SELECT {HISTORY_COLUMNS} FROM doctor_histories ORDER BY doctor_id, patient_id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], history_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_doctor_history(
    conn: &Connection,
    history: &DoctorHistory,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE doctor_histories SET start_date = ?3, end_date = ?4,
             reason_for_leaving = ?5, updated_at = ?6
             WHERE doctor_id = ?1 AND patient_id = ?2",
            params![
                history.doctor_id,
                history.patient_id,
                history.start_date,
                history.end_date,
                history.reason_for_leaving,
                history.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "DoctorHistory".into(),
            id: format!("{}/{}", history.doctor_id, history.patient_id),
        });
    }
    Ok(())
}

pub fn delete_doctor_history(
    conn: &Connection,
    doctor_id: i64,
    patient_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM doctor_histories WHERE doctor_id = ?1 AND patient_id = ?2",
        params![doctor_id, patient_id],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for DoctorHistory {
    /// `(doctor_id, patient_id)`
    type Key = (i64, i64);
    type Detail = DoctorHistoryDetail;

    fn key(&self) -> (i64, i64) {
        (self.doctor_id, self.patient_id)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_doctor_histories(conn)
    }

    fn find_one(conn: &Connection, key: &(i64, i64)) -> Result<Option<Self>, DatabaseError> {
        get_doctor_history(conn, key.0, key.1)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        insert_doctor_history(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_doctor_history(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &(i64, i64)) -> Result<(), DatabaseError> {
        delete_doctor_history(conn, key.0, key.1)
    }

    fn with_relations(
        conn: &Connection,
        entity: Self,
    ) -> Result<DoctorHistoryDetail, DatabaseError> {
        Ok(DoctorHistoryDetail {
            doctor: get_doctor(conn, entity.doctor_id)?,
            patient: get_patient(conn, entity.patient_id)?,
            history: entity,
        })
    }
}
