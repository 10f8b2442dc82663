//! # Company Records
//!
//! Companies are keyed by a caller-chosen `code`. All reads and writes are
//! single statements against the `companies` table.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Full company row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Projection used by the company listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

impl Company {
    /// Lists every company in store-defined order.
    pub async fn list(db_pool: &PgPool) -> Result<Vec<CompanySummary>, sqlx::Error> {
        sqlx::query_as::<_, CompanySummary>("SELECT code, name FROM companies")
            .fetch_all(db_pool)
            .await
    }

    pub async fn find(db_pool: &PgPool, code: &str) -> Result<Option<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(db_pool)
        .await
    }

    pub async fn insert(
        db_pool: &PgPool,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Company, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(description)
        .fetch_one(db_pool)
        .await
    }

    /// Replaces name and description. `None` if no company has `code`.
    pub async fn update(
        db_pool: &PgPool,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET name = $1, description = $2
            WHERE code = $3
            RETURNING code, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(code)
        .fetch_optional(db_pool)
        .await
    }

    /// Deletes by code and returns the deleted code, if any row matched.
    pub async fn delete(db_pool: &PgPool, code: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE code = $1 RETURNING code")
            .bind(code)
            .fetch_optional(db_pool)
            .await
    }
}
