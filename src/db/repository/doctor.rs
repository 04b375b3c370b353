use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Repository;
use crate::db::DatabaseError;
use crate::models::Doctor;

const DOCTOR_COLUMNS: &str =
    "id, name, address, phone, specialization, hospital_affiliation, created_at, updated_at";

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        specialization: row.get(4)?,
        hospital_affiliation: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Insert a doctor and return the generated id.
pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (name, address, phone, specialization, hospital_affiliation,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            doctor.name,
            doctor.address,
            doctor.phone,
            doctor.specialization,
            doctor.hospital_affiliation,
            doctor.created_at,
            doctor.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Option<Doctor>, DatabaseError> {
    let sql = format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], doctor_from_row).optional()?)
}

pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let sql = format!("SELECT {DOCTOR_COLUMNS} FROM doctors ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE doctors SET name = ?2, address = ?3, phone = ?4, specialization = ?5,
             hospital_affiliation = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                doctor.id,
                doctor.name,
                doctor.address,
                doctor.phone,
                doctor.specialization,
                doctor.hospital_affiliation,
                doctor.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Doctor".into(),
            id: doctor.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_doctor(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM doctors WHERE id = ?1", params![id])
        .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for Doctor {
    type Key = i64;
    type Detail = Doctor;

    fn key(&self) -> i64 {
        self.id
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_doctors(conn)
    }

    fn find_one(conn: &Connection, key: &i64) -> Result<Option<Self>, DatabaseError> {
        get_doctor(conn, *key)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        entity.id = insert_doctor(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_doctor(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &i64) -> Result<(), DatabaseError> {
        delete_doctor(conn, *key)
    }

    fn with_relations(_conn: &Connection, entity: Self) -> Result<Self, DatabaseError> {
        Ok(entity)
    }
}
