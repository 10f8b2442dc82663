//! # Utility Modules
//!
//! - **Constants** (`constant`) - Application-wide configuration constants
//! - **Slugs** (`slug`) - Deriving company codes from names

pub mod constant;
pub mod slug;
