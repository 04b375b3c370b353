use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Repository;
use crate::db::DatabaseError;
use crate::models::InsuranceCompany;

fn insurance_company_from_row(row: &Row<'_>) -> rusqlite::Result<InsuranceCompany> {
    Ok(InsuranceCompany {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

pub fn insert_insurance_company(
    conn: &Connection,
    company: &InsuranceCompany,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO insurance_companies (name, phone, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![company.name, company.phone, company.created_at, company.updated_at],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_insurance_company(
    conn: &Connection,
    id: i64,
) -> Result<Option<InsuranceCompany>, DatabaseError> {
    Ok(conn
        .query_row(
            "SELECT id, name, phone, created_at, updated_at
             FROM insurance_companies WHERE id = ?1",
            params![id],
            insurance_company_from_row,
        )
        .optional()?)
}

pub fn get_all_insurance_companies(
    conn: &Connection,
) -> Result<Vec<InsuranceCompany>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, created_at, updated_at
         FROM insurance_companies ORDER BY id",
    )?;
    let rows = stmt.query_map([], insurance_company_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_insurance_company(
    conn: &Connection,
    company: &InsuranceCompany,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE insurance_companies SET name = ?2, phone = ?3, updated_at = ?4
             WHERE id = ?1",
            params![company.id, company.name, company.phone, company.updated_at],
        )
        .map_err(DatabaseError::from_write)?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "InsuranceCompany".into(),
            id: company.id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_insurance_company(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM insurance_companies WHERE id = ?1", params![id])
        .map_err(DatabaseError::from_write)?;
    Ok(())
}

impl Repository for InsuranceCompany {
    type Key = i64;
    type Detail = InsuranceCompany;

    fn key(&self) -> i64 {
        self.id
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>, DatabaseError> {
        get_all_insurance_companies(conn)
    }

    fn find_one(conn: &Connection, key: &i64) -> Result<Option<Self>, DatabaseError> {
        get_insurance_company(conn, *key)
    }

    fn insert(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        let now = Utc::now();
        entity.created_at = now;
        entity.updated_at = now;
        entity.id = insert_insurance_company(conn, &entity)?;
        Ok(entity)
    }

    fn update(conn: &Connection, mut entity: Self) -> Result<Self, DatabaseError> {
        entity.updated_at = Utc::now();
        update_insurance_company(conn, &entity)?;
        Ok(entity)
    }

    fn delete(conn: &Connection, key: &i64) -> Result<(), DatabaseError> {
        delete_insurance_company(conn, *key)
    }

    fn with_relations(_conn: &Connection, entity: Self) -> Result<Self, DatabaseError> {
        Ok(entity)
    }
}
