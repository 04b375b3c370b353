use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Repository;
use crate::db::DatabaseError;
use crate::models::Hospital;

const HOSPITAL_COLUMNS: &str = "id, name, address, phone, created_at, updated_at";

fn hospital_from_row(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    Ok(Hospital {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub fn insert_hospital(conn: &Connection, hospital: &Hospital) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO hospitals (name, address, phone, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            hospital.name,
            hospital.address,
            hospital.phone,
            hospital.created_at,
            hospital.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_hospital(conn: &Connection, id: i64) -> Result<Option<Hospital>, DatabaseError> {
    let sql = format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], hospital_from_row).optional()?)
}

pub fn get_all_hospitals(conn: &Connection) -> Result<Vec<Hospital>, DatabaseError> {
    let sql = format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], hospital_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_hospital(conn: &Connection, hospital: &Hospital) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE hospitals SET name = ?2, address = ?3, phone = ?4, updated_at = ?5
             WHERE id = ?1",
            params![
                hospital.id,
                hospital.name,
                hospital.address,
                hospital.phone,
                hospital.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Hospital".into(),
            id: hospital.id.to_string(),
        });
    }
    Ok(())
}

/// Delete a hospital. Its affiliations go with it.
pub fn delete_hospital(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM hospitals WHERE id = ?1", params![id])
        .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for Hospital {
    type Key = i64;
    type Detail = Hospital;

    fn key(&self) -> i64 {
        self.id
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_hospitals(conn)
    }

    fn find_one(conn: &Connection, key: &i64) -> Result<Option<Self>, DatabaseError> {
        get_hospital(conn, *key)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        entity.id = insert_hospital(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_hospital(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &i64) -> Result<(), DatabaseError> {
        delete_hospital(conn, *key)
    }

    fn with_relations(_conn: &Connection, entity: Self) -> Result<Self, DatabaseError> {
        Ok(entity)
    }
}
