use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{get_doctor, get_insurance_company, Repository};
use crate::db::DatabaseError;
use crate::models::{Patient, PatientDetail};

const PATIENT_COLUMNS: &str = "id, name, address, phone, email, relationship, doctor_id,
    insurance_id, insurance_owner_id, created_at, updated_at";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        relationship: row.get(5)?,
        doctor_id: row.get(6)?,
        insurance_id: row.get(7)?,
        insurance_owner_id: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, address, phone, email, relationship, doctor_id,
         insurance_id, insurance_owner_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            patient.name,
            patient.address,
            patient.phone,
            patient.email,
            patient.relationship,
            patient.doctor_id,
            patient.insurance_id,
            patient.insurance_owner_id,
            patient.created_at,
            patient.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], patient_from_row).optional()?)
}

pub fn get_all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE patients SET name = ?2, address = ?3, phone = ?4, email = ?5,
             relationship = ?6, doctor_id = ?7, insurance_id = ?8, insurance_owner_id = ?9,
             updated_at = ?10
             WHERE id = ?1",
            params![
                patient.id,
                patient.name,
                patient.address,
                patient.phone,
                patient.email,
                patient.relationship,
                patient.doctor_id,
                patient.insurance_id,
                patient.insurance_owner_id,
                patient.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: patient.id.to_string(),
        });
    }
    Ok(())
}

/// Delete a patient. Histories, prescriptions and visits cascade;
/// a patient still holding a policy for dependents is refused.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM patients WHERE id = ?1", params![id])
        .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for Patient {
    type Key = i64;
    type Detail = PatientDetail;

    fn key(&self) -> i64 {
        self.id
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_patients(conn)
    }

    fn find_one(conn: &Connection, key: &i64) -> Result<Option<Self>, DatabaseError> {
        get_patient(conn, *key)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        entity.id = insert_patient(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_patient(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &i64) -> Result<(), DatabaseError> {
        delete_patient(conn, *key)
    }

    fn with_relations(conn: &Connection, entity: Self) -> Result<PatientDetail, DatabaseError> {
        let insurance_owner = match entity.insurance_owner_id {
            Some(owner_id) => get_patient(conn, owner_id)?,
            None => None,
        };
        Ok(PatientDetail {
            doctor: get_doctor(conn, entity.doctor_id)?,
            insurance_company: get_insurance_company(conn, entity.insurance_id)?,
            insurance_owner,
            patient: entity,
        })
    }
}
