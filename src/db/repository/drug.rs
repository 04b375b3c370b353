use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Repository;
use crate::db::DatabaseError;
use crate::models::Drug;

const DRUG_COLUMNS: &str = "id, drug_name, side_effects, benefits, created_at, updated_at";

fn drug_from_row(row: &Row<'_>) -> rusqlite::Result<Drug> {
    Ok(Drug {
        id: row.get(0)?,
        drug_name: row.get(1)?,
        side_effects: row.get(2)?,
        benefits: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub fn insert_drug(conn: &Connection, drug: &Drug) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO drugs (drug_name, side_effects, benefits, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            drug.drug_name,
            drug.side_effects,
            drug.benefits,
            drug.created_at,
            drug.updated_at,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_drug(conn: &Connection, id: i64) -> Result<Option<Drug>, DatabaseError> {
    let sql = format!("SELECT {DRUG_COLUMNS} FROM drugs WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], drug_from_row).optional()?)
}

pub fn get_all_drugs(conn: &Connection) -> Result<Vec<Drug>, DatabaseError> {
    let sql = format!("SELECT {DRUG_COLUMNS} FROM drugs ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], drug_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_drug(conn: &Connection, drug: &Drug) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE drugs SET drug_name = ?2, side_effects = ?3, benefits = ?4, updated_at = ?5
             WHERE id = ?1",
            params![
                drug.id,
                drug.drug_name,
                drug.side_effects,
                drug.benefits,
                drug.updated_at,
            ],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Drug".into(),
            id: drug.id.to_string(),
        });
    }
    Ok(())
}

/// Delete a drug along with every prescription for it.
pub fn delete_drug(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM drugs WHERE id = ?1", params![id])
        .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for Drug {
    type Key = i64;
    type Detail = Drug;

    fn key(&self) -> i64 {
        self.id
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_drugs(conn)
    }

    fn find_one(conn: &Connection, key: &i64) -> Result<Option<Self>, DatabaseError> {
        get_drug(conn, *key)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        entity.id = insert_drug(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_drug(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &i64) -> Result<(), DatabaseError> {
        delete_drug(conn, *key)
    }

    fn with_relations(_conn: &Connection, entity: Self) -> Result<Self, DatabaseError> {
        Ok(entity)
    }
}
