use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{get_doctor, get_drug, get_patient, Repository};
use crate::db::DatabaseError;
use crate::models::{Prescription, PrescriptionDetail};

const PRESCRIPTION_COLUMNS: &str = "rx_id, date_prescribed, dosage, duration, refillable,
    refill_no, comments, non_refill_reason, patient_id, doctor_id, drug_id,
    created_at, updated_at";

fn prescription_from_row(row: &Row<'_>) -> rusqlite::Result<Prescription> {
    Ok(Prescription {
        rx_id: row.get(0)?,
        date_prescribed: row.get(1)?,
        dosage: row.get(2)?,
        duration: row.get(3)?,
        refillable: row.get(4)?,
        refill_no: row.get(5)?,
        comments: row.get(6)?,
        non_refill_reason: row.get(7)?,
        patient_id: row.get(8)?,
        doctor_id: row.get(9)?,
        drug_id: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

/// Insert a prescription and return its generated `rx_id`.
pub fn insert_prescription(conn: &Connection, rx: &Prescription) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (date_prescribed, dosage, duration, refillable, refill_no,
         comments, non_refill_reason, patient_id, doctor_id, drug_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            rx.date_prescribed,
            rx.dosage,
            rx.duration,
            rx.refillable,
            rx.refill_no,
            rx.comments,
            rx.non_refill_reason,
            rx.patient_id,
            rx.doctor_id,
            rx.drug_id,
            rx.created_at,
            rx.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_prescription(conn: &Connection, rx_id: i64) -> Result<Option<Prescription>, DatabaseError> {
    let sql = format!("SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE rx_id = ?1");
    Ok(conn
        .query_row(&sql, params![rx_id], prescription_from_row)
        .optional()?)
}

pub fn get_all_prescriptions(conn: &Connection) -> Result<Vec<Prescription>, DatabaseError> {
    let sql = format!("SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions ORDER BY rx_id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], prescription_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_prescription(conn: &Connection, rx: &Prescription) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE prescriptions SET date_prescribed = ?2, dosage = ?3, duration = ?4,
             refillable = ?5, refill_no = ?6, comments = ?7, non_refill_reason = ?8,
             patient_id = ?9, doctor_id = ?10, drug_id = ?11, updated_at = ?12
             WHERE rx_id = ?1",
            params![
                rx.rx_id,
                rx.date_prescribed,
                rx.dosage,
                rx.duration,
                rx.refillable,
                rx.refill_no,
                rx.comments,
                rx.non_refill_reason,
                rx.patient_id,
                rx.doctor_id,
                rx.drug_id,
                rx.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Prescription".into(),
            id: rx.rx_id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_prescription(conn: &Connection, rx_id: i64) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM prescriptions WHERE rx_id = ?1", params![rx_id])
        .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for Prescription {
    type Key = i64;
    type Detail = PrescriptionDetail;

    fn key(&self) -> i64 {
        self.rx_id
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_prescriptions(conn)
    }

    fn find_one(conn: &Connection, key: &i64) -> Result<Option<Self>, DatabaseError> {
        get_prescription(conn, *key)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        entity.rx_id = insert_prescription(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_prescription(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &i64) -> Result<(), DatabaseError> {
        delete_prescription(conn, *key)
    }

    fn with_relations(conn: &Connection, entity: Self) -> Result<PrescriptionDetail, DatabaseError> {
        Ok(PrescriptionDetail {
            patient: get_patient(conn, entity.patient_id)?,
            doctor: get_doctor(conn, entity.doctor_id)?,
            drug: get_drug(conn, entity.drug_id)?,
            prescription: entity,
        })
    }
}
