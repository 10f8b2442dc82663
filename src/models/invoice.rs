//! # Invoice Records
//!
//! Invoices belong to a company through `comp_code`. The only derived field
//! is `paid_date`, which is maintained by [`next_paid_date`] whenever the
//! invoice is updated.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::Date;
use tracing::debug;

use crate::models::Company;

/// Full invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
}

/// Projection used by the invoice listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// An invoice with its company nested under `company`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
    pub company: Company,
}

/// Flat result of the invoice/company join.
#[derive(sqlx::FromRow)]
struct InvoiceCompanyRow {
    id: i32,
    comp_code: String,
    amt: f64,
    paid: bool,
    add_date: Date,
    paid_date: Option<Date>,
    code: String,
    name: String,
    description: Option<String>,
}

impl From<InvoiceCompanyRow> for InvoiceDetail {
    fn from(row: InvoiceCompanyRow) -> Self {
        Self {
            id: row.id,
            comp_code: row.comp_code,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: Company {
                code: row.code,
                name: row.name,
                description: row.description,
            },
        }
    }
}

/// Payment columns read before an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct PaymentState {
    pub paid: bool,
    pub paid_date: Option<Date>,
}

/// Locked payment columns plus the store's current date.
#[derive(sqlx::FromRow)]
struct LockedPayment {
    paid: bool,
    paid_date: Option<Date>,
    today: Date,
}

/// Computes the `paid_date` an invoice should have after an update.
///
/// - unpaid → paid: `today`
/// - paid → unpaid: cleared
/// - no change in `paid`: the current value is kept
pub fn next_paid_date(current: PaymentState, requested_paid: bool, today: Date) -> Option<Date> {
    match (current.paid, requested_paid) {
        (false, true) => Some(today),
        (true, false) => None,
        _ => current.paid_date,
    }
}

impl Invoice {
    pub async fn list(db_pool: &PgPool) -> Result<Vec<InvoiceSummary>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices")
            .fetch_all(db_pool)
            .await
    }

    pub async fn exists(db_pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM invoices WHERE id = $1)")
            .bind(id)
            .fetch_one(db_pool)
            .await
    }

    /// Fetches an invoice joined with its company.
    pub async fn find_with_company(
        db_pool: &PgPool,
        id: i32,
    ) -> Result<Option<InvoiceDetail>, sqlx::Error> {
        let row = sqlx::query_as::<_, InvoiceCompanyRow>(
            r#"
            SELECT i.id, i.comp_code, i.amt, i.paid, i.add_date, i.paid_date,
                   c.code, c.name, c.description
            FROM invoices AS i
            JOIN companies AS c ON i.comp_code = c.code
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db_pool)
        .await?;

        Ok(row.map(InvoiceDetail::from))
    }

    /// Inserts an unpaid invoice dated today (by the store's clock).
    pub async fn insert(db_pool: &PgPool, comp_code: &str, amt: f64) -> Result<Invoice, sqlx::Error> {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (comp_code, amt)
            VALUES ($1, $2)
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(comp_code)
        .bind(amt)
        .fetch_one(db_pool)
        .await
    }

    /// Sets amount and paid flag, deriving `paid_date` from the current row.
    ///
    /// The read locks the row and both statements share one transaction, so
    /// concurrent updates of the same invoice serialize. "Today" is the
    /// store's `CURRENT_DATE`, the same clock that fills `add_date`.
    /// Returns `None` if no invoice has `id`.
    pub async fn update_payment(
        db_pool: &PgPool,
        id: i32,
        amt: f64,
        paid: bool,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let mut tx = db_pool.begin().await?;

        let locked = sqlx::query_as::<_, LockedPayment>(
            "SELECT paid, paid_date, CURRENT_DATE AS today FROM invoices WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping the transaction rolls it back.
        let Some(locked) = locked else {
            return Ok(None);
        };

        let current = PaymentState {
            paid: locked.paid,
            paid_date: locked.paid_date,
        };
        let paid_date = next_paid_date(current, paid, locked.today);
        debug!(?current, requested_paid = paid, ?paid_date, "Derived paid_date");

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices SET amt = $1, paid = $2, paid_date = $3
            WHERE id = $4
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(amt)
        .bind(paid)
        .bind(paid_date)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(invoice))
    }

    /// Deletes by id and returns the deleted id, if any row matched.
    pub async fn delete(db_pool: &PgPool, id: i32) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("DELETE FROM invoices WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(db_pool)
            .await
    }
}
