//! # Industry Records
//!
//! Industries relate to companies many-to-many through `company_industries`.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// An industry with the codes of its associated companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct IndustryListing {
    pub code: String,
    pub industry: String,
    pub company_codes: Vec<String>,
}

impl Industry {
    pub async fn insert(db_pool: &PgPool, code: &str, industry: &str) -> Result<Industry, sqlx::Error> {
        sqlx::query_as::<_, Industry>(
            "INSERT INTO industries (code, industry) VALUES ($1, $2) RETURNING code, industry",
        )
        .bind(code)
        .bind(industry)
        .fetch_one(db_pool)
        .await
    }

    /// Lists industries that have at least one company.
    ///
    /// Inner joins drop industries without associations. Industries are
    /// ordered by code, and so is each `company_codes` array.
    pub async fn list_with_companies(db_pool: &PgPool) -> Result<Vec<IndustryListing>, sqlx::Error> {
        sqlx::query_as::<_, IndustryListing>(
            r#"
            SELECT i.code, i.industry, array_agg(c.code ORDER BY c.code) AS company_codes
            FROM industries AS i
            JOIN company_industries AS ci ON i.code = ci.industry_code
            JOIN companies AS c ON ci.company_code = c.code
            GROUP BY i.code, i.industry
            ORDER BY i.code
            "#,
        )
        .fetch_all(db_pool)
        .await
    }

    /// Links a company to an industry.
    pub async fn associate(
        db_pool: &PgPool,
        company_code: &str,
        industry_code: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO company_industries (company_code, industry_code) VALUES ($1, $2)")
            .bind(company_code)
            .bind(industry_code)
            .execute(db_pool)
            .await?;
        Ok(())
    }
}
