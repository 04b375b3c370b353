use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{get_doctor, get_hospital, Repository};
use crate::db::DatabaseError;
use crate::models::{HospitalAffiliation, HospitalAffiliationDetail};

const AFFILIATION_COLUMNS: &str =
    "doctor_id, hospital_id, affiliation_date, created_at, updated_at";

fn affiliation_from_row(row: &Row<'_>) -> rusqlite::Result<HospitalAffiliation> {
    Ok(HospitalAffiliation {
        doctor_id: row.get(0)?,
        hospital_id: row.get(1)?,
        affiliation_date: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

pub fn insert_hospital_affiliation(
    conn: &Connection,
    affiliation: &HospitalAffiliation,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO hospital_affiliations (doctor_id, hospital_id, affiliation_date,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            affiliation.doctor_id,
            affiliation.hospital_id,
            affiliation.affiliation_date,
            affiliation.created_at,
            affiliation.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(())
}

pub fn get_hospital_affiliation(
    conn: &Connection,
    doctor_id: i64,
    hospital_id: i64,
) -> Result<Option<HospitalAffiliation>, DatabaseError> {
    let sql = format!(
        "SELECT {AFFILIATION_COLUMNS} FROM hospital_affiliations
         WHERE doctor_id = ?1 AND hospital_id = ?2"
    );
    Ok(conn
        .query_row(&sql, params![doctor_id, hospital_id], affiliation_from_row)
        .optional()?)
}

pub fn get_all_hospital_affiliations(
    conn: &Connection,
) -> Result<Vec<HospitalAffiliation>, DatabaseError> {
    let sql = format!(
        "SELECT {AFFILIATION_COLUMNS} FROM hospital_affiliations ORDER BY doctor_id, hospital_id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], affiliation_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Only the date is mutable; the key pair identifies the row.
pub fn update_hospital_affiliation(
    conn: &Connection,
    affiliation: &HospitalAffiliation,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE hospital_affiliations SET affiliation_date = ?3, updated_at = ?4
             WHERE doctor_id = ?1 AND hospital_id = ?2",
            params![
                affiliation.doctor_id,
                affiliation.hospital_id,
                affiliation.affiliation_date,
                affiliation.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "HospitalAffiliation".into(),
            id: format!("{}/{}", affiliation.doctor_id, affiliation.hospital_id),
        });
    }
    Ok(())
}

pub fn delete_hospital_affiliation(
    conn: &Connection,
    doctor_id: i64,
    hospital_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM hospital_affiliations WHERE doctor_id = ?1 AND hospital_id = ?2",
        params![doctor_id, hospital_id],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for HospitalAffiliation {
    /// `(doctor_id, hospital_id)`
    type Key = (i64, i64);
    type Detail = HospitalAffiliationDetail;

    fn key(&self) -> (i64, i64) {
        (self.doctor_id, self.hospital_id)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_hospital_affiliations(conn)
    }

    fn find_one(conn: &Connection, key: &(i64, i64)) -> Result<Option<Self>, DatabaseError> {
        get_hospital_affiliation(conn, key.0, key.1)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        insert_hospital_affiliation(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_hospital_affiliation(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &(i64, i64)) -> Result<(), DatabaseError> {
        delete_hospital_affiliation(conn, key.0, key.1)
    }

    fn with_relations(
        conn: &Connection,
        entity: Self,
    ) -> Result<HospitalAffiliationDetail, DatabaseError> {
        Ok(HospitalAffiliationDetail {
            doctor: get_doctor(conn, entity.doctor_id)?,
            hospital: get_hospital(conn, entity.hospital_id)?,
            affiliation: entity,
        })
    }
}
