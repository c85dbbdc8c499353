//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::invoice::InvoiceDraft;
use crate::types::*;

/// Storage abstraction for the billing system
///
/// This trait allows the billing core to work with any storage backend
/// (SQLite, IndexedDB-backed shells, in-memory, etc.) by implementing
/// these methods. The core never touches storage directly; it receives
/// snapshots and hands back finished records.
#[async_trait]
pub trait BillingStorage: Send + Sync {
    /// Save the singleton company profile
    async fn save_profile(&mut self, profile: &CompanyProfile) -> BillingResult<()>;

    /// Fetch the singleton company profile, if one is configured
    async fn get_profile(&self) -> BillingResult<Option<CompanyProfile>>;

    /// Commit a finalized invoice together with its stock decrements
    ///
    /// The invoice record and the per-product stock reductions (billed
    /// plus free units for every line) form one logical transaction: if
    /// any part fails, nothing may be persisted.
    async fn commit_invoice(&mut self, invoice: &Invoice) -> BillingResult<()>;

    /// Fetch a committed invoice by its serial number
    async fn get_invoice(&self, invoice_no: &str) -> BillingResult<Option<Invoice>>;

    /// List all committed invoices, newest first
    async fn list_invoices(&self) -> BillingResult<Vec<Invoice>>;

    /// Number of committed invoices, used for serial number generation
    async fn invoice_count(&self) -> BillingResult<u64>;

    /// Units on hand for a product, if the product exists
    async fn get_stock(&self, product_id: &str) -> BillingResult<Option<i64>>;

    /// Overwrite the units on hand for a product
    async fn set_stock(&mut self, product_id: &str, on_hand: i64) -> BillingResult<()>;
}

/// Trait for implementing custom draft validation rules
pub trait DraftValidator: Send + Sync {
    /// Validate a draft before it is finalized and committed
    fn validate_draft(&self, draft: &InvoiceDraft) -> BillingResult<()>;
}

/// Default draft validator with the baseline finalize preconditions
pub struct DefaultDraftValidator;

impl DraftValidator for DefaultDraftValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> BillingResult<()> {
        if draft.items().is_empty() {
            return Err(BillingError::InvalidInvoice(
                "Cannot finalize an invoice with no line items".to_string(),
            ));
        }

        if draft.category == InvoiceCategory::Wholesale && draft.buyer.is_none() {
            return Err(BillingError::InvalidInvoice(
                "A wholesale invoice requires a buyer".to_string(),
            ));
        }

        Ok(())
    }
}
