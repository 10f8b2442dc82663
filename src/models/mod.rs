mod company;
mod industry;
mod invoice;
mod state;

pub use company::{Company, CompanySummary};
pub use industry::{Industry, IndustryListing};
pub use invoice::{Invoice, InvoiceDetail, InvoiceSummary, PaymentState, next_paid_date};
pub use state::AppState;
