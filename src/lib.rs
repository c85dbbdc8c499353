//! # Billing Core
//!
//! A GST billing library for Indian trade: invoice tax computation,
//! cart-style drafting and deterministic printable document generation.
//!
//! ## Features
//!
//! - **GST computation**: per-line CGST/SGST vs IGST split driven by the
//!   buyer's state, with free-quantity and discount handling
//! - **Invoice drafting**: a mutable cart that recomputes derived figures
//!   on every edit, including full reclassification on buyer change
//! - **Aggregation**: invoice totals, round-off and the HSN-wise summary
//! - **Amounts in words**: Indian crore/lakh grouping for the words line
//! - **Document rendering**: paginated A4 PDF in a detailed wholesale or
//!   compact retail template
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage and an atomic finalize commit
//!
//! ## Quick Start
//!
//! ```rust
//! use billing_core::{Billing, InvoiceCategory, MemoryStorage};
//! use chrono::NaiveDate;
//!
//! // let mut billing = Billing::new(MemoryStorage::new());
//! // billing.set_profile(profile).await?;
//! // let draft = billing.new_draft(InvoiceCategory::Wholesale, date).await?;
//! ```

pub mod document;
pub mod invoice;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;
pub mod words;

// Re-export commonly used types
pub use document::{document_file_name, render_invoice, RenderedDocument};
pub use invoice::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
pub use utils::MemoryStorage;
pub use words::amount_in_words;
