mod common;

use biztime::handlers::{InvoiceDetailResponse, InvoiceResponse, InvoicesResponse, StatusResponse};
use serde_json::{Value, json};
use sqlx::PgPool;
use time::{Date, macros::date};

use common::spawn_app;

async fn invoice_id(pool: &PgPool, comp_code: &str, amt: f64) -> i32 {
    sqlx::query_scalar("SELECT id FROM invoices WHERE comp_code = $1 AND amt = $2")
        .bind(comp_code)
        .bind(amt)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(fixtures("companies", "invoices"))]
async fn test_list_invoices(pool: PgPool) {
    let address = spawn_app(pool).await;

    let response = reqwest::get(format!("{address}/invoices"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: InvoicesResponse = response.json().await.unwrap();
    let mut comp_codes: Vec<String> = body.invoices.into_iter().map(|i| i.comp_code).collect();
    comp_codes.sort();
    assert_eq!(comp_codes, vec!["apple", "apple", "ibm"]);
}

#[sqlx::test(fixtures("companies", "invoices"))]
async fn test_get_invoice_nests_company(pool: PgPool) {
    let id = invoice_id(&pool, "apple", 200.0).await;
    let address = spawn_app(pool).await;

    let response = reqwest::get(format!("{address}/invoices/{id}"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "invoice": {
                "id": id,
                "comp_code": "apple",
                "amt": 200.0,
                "paid": true,
                "add_date": "2024-01-11",
                "paid_date": "2024-02-01",
                "company": {
                    "code": "apple",
                    "name": "Apple Computer",
                    "description": "Maker of OSX."
                }
            }
        })
    );
}

#[sqlx::test]
async fn test_get_missing_invoice(pool: PgPool) {
    let address = spawn_app(pool).await;

    let response = reqwest::get(format!("{address}/invoices/999"))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Invoice not found");
}

async fn store_today(pool: &PgPool) -> Date {
    sqlx::query_scalar("SELECT CURRENT_DATE")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(fixtures("companies"))]
async fn test_invoice_payment_lifecycle(pool: PgPool) {
    let address = spawn_app(pool.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/invoices"))
        .json(&json!({ "comp_code": "ibm", "amt": 100 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let created: InvoiceResponse = response.json().await.unwrap();
    assert_eq!(created.invoice.comp_code, "ibm");
    assert_eq!(created.invoice.amt, 100.0);
    assert!(!created.invoice.paid);
    assert_eq!(created.invoice.paid_date, None);
    let id = created.invoice.id;

    let response = client
        .put(format!("{address}/invoices/{id}"))
        .json(&json!({ "amt": 100, "paid": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let paid: InvoiceResponse = response.json().await.unwrap();
    assert!(paid.invoice.paid);
    assert_eq!(paid.invoice.paid_date, Some(store_today(&pool).await));
    assert_eq!(paid.invoice.paid_date, Some(created.invoice.add_date));

    let response = client
        .put(format!("{address}/invoices/{id}"))
        .json(&json!({ "amt": 100, "paid": false }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let unpaid: InvoiceResponse = response.json().await.unwrap();
    assert!(!unpaid.invoice.paid);
    assert_eq!(unpaid.invoice.paid_date, None);
}

#[sqlx::test(fixtures("companies", "invoices"))]
async fn test_update_without_paid_change_keeps_paid_date(pool: PgPool) {
    let id = invoice_id(&pool, "apple", 200.0).await;
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{address}/invoices/{id}"))
        .json(&json!({ "amt": 250, "paid": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let updated: InvoiceResponse = response.json().await.unwrap();
    assert_eq!(updated.invoice.amt, 250.0);
    assert_eq!(updated.invoice.paid_date, Some(date!(2024 - 02 - 01)));
}

#[sqlx::test]
async fn test_update_missing_invoice(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{address}/invoices/999"))
        .json(&json!({ "amt": 200, "paid": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invoice not found");
}

#[sqlx::test]
async fn test_update_missing_invoice_with_unusable_body(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let test_cases = vec![
        (json!({ "amt": 0, "paid": true }), "Zero amount"),
        (json!({ "amt": 10 }), "Missing paid flag"),
    ];

    for (payload, description) in test_cases {
        let response = client
            .put(format!("{address}/invoices/999"))
            .json(&payload)
            .send()
            .await
            .unwrap_or_else(|_| panic!("Failed to execute request for {description}"));

        assert_eq!(
            response.status(),
            reqwest::StatusCode::NOT_FOUND,
            "Failed for case: {description}"
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Invoice not found");
    }
}

#[sqlx::test(fixtures("companies", "invoices"))]
async fn test_update_existing_invoice_with_unusable_body(pool: PgPool) {
    let id = invoice_id(&pool, "ibm", 300.0).await;
    let address = spawn_app(pool.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{address}/invoices/{id}"))
        .json(&json!({ "amt": -1, "paid": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Could not update invoice");

    let paid: bool = sqlx::query_scalar("SELECT paid FROM invoices WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!paid);
}

#[sqlx::test(fixtures("companies"))]
async fn test_create_invoice_for_unknown_company(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/invoices"))
        .json(&json!({ "comp_code": "nope", "amt": 10 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Could not create invoice");
}

#[sqlx::test(fixtures("companies"))]
async fn test_create_invoice_with_unusable_body_is_generic_error(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let test_cases = vec![
        (json!({ "comp_code": "ibm", "amt": 0 }), "Zero amount"),
        (json!({ "comp_code": "ibm", "amt": -5 }), "Negative amount"),
        (json!({ "comp_code": "", "amt": 5 }), "Empty company code"),
        (json!({ "comp_code": "ibm" }), "Missing amount"),
    ];

    for (payload, description) in test_cases {
        let response = client
            .post(format!("{address}/invoices"))
            .json(&payload)
            .send()
            .await
            .unwrap_or_else(|_| panic!("Failed to execute request for {description}"));

        assert_eq!(
            response.status(),
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "Failed for case: {description}"
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Could not create invoice");
    }
}

#[sqlx::test(fixtures("companies", "invoices"))]
async fn test_delete_invoice(pool: PgPool) {
    let id = invoice_id(&pool, "ibm", 300.0).await;
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{address}/invoices/{id}"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let status: StatusResponse = response.json().await.unwrap();
    assert_eq!(status, StatusResponse::deleted());

    let response = client
        .get(format!("{address}/invoices/{id}"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_delete_missing_invoice(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{address}/invoices/999"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[sqlx::test(fixtures("companies", "invoices"))]
async fn test_detail_response_parses(pool: PgPool) {
    let id = invoice_id(&pool, "ibm", 300.0).await;
    let address = spawn_app(pool).await;

    let body: InvoiceDetailResponse = reqwest::get(format!("{address}/invoices/{id}"))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(body.invoice.company.name, "IBM");
    assert_eq!(body.invoice.add_date, date!(2024 - 01 - 12));
}
