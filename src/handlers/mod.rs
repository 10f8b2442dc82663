//! # HTTP Request Handlers
//!
//! ## Available Handlers
//!
//! - **Companies** (`companies`) - Company CRUD
//! - **Invoices** (`invoices`) - Invoice CRUD and payment tracking
//! - **Industries** (`industries`) - Industries and company associations
//! - **Fallback** (`fallback`) - 404 envelope for unmatched requests
//! - **Health Check** (`health_check`) - Application health monitoring

mod companies;
mod fallback;
mod health_check;
mod industries;
mod invoices;

pub use companies::*;
pub use fallback::*;
pub use health_check::*;
pub use industries::*;
pub use invoices::*;

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_owned(),
        }
    }
}
