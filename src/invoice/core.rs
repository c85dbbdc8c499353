//! The billing facade wiring storage, drafting and document rendering

use chrono::NaiveDate;

use crate::document::{render_invoice, RenderedDocument};
use crate::invoice::cart::{next_invoice_number, InvoiceDraft};
use crate::traits::{BillingStorage, DefaultDraftValidator, DraftValidator};
use crate::types::*;

/// Main orchestrator for the billing workflow
///
/// Generic over the storage backend. Drafting happens in memory on an
/// [`InvoiceDraft`]; this facade owns the transitions that touch storage:
/// profile management, serial number allocation, the finalize commit and
/// document rendering.
pub struct Billing<S: BillingStorage> {
    storage: S,
    validator: Box<dyn DraftValidator>,
}

impl<S: BillingStorage> Billing<S> {
    /// Create a new billing facade with the default draft validator
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultDraftValidator),
        }
    }

    /// Create a billing facade with a custom draft validator
    pub fn with_validator(storage: S, validator: Box<dyn DraftValidator>) -> Self {
        Self { storage, validator }
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save the singleton company profile
    pub async fn set_profile(&mut self, profile: CompanyProfile) -> BillingResult<()> {
        self.storage.save_profile(&profile).await
    }

    /// Fetch the company profile, failing if none is configured
    ///
    /// Every operation that produces a document goes through here, so a
    /// missing profile surfaces as an error instead of a blank letterhead.
    pub async fn profile(&self) -> BillingResult<CompanyProfile> {
        self.storage
            .get_profile()
            .await?
            .ok_or(BillingError::ProfileMissing)
    }

    /// Allocate the next serial number for a category
    ///
    /// Both categories draw from one shared register: the number is
    /// derived from the total committed invoice count, only the prefix
    /// differs.
    pub async fn next_invoice_number(&self, category: InvoiceCategory) -> BillingResult<String> {
        let existing = self.storage.invoice_count().await?;
        Ok(next_invoice_number(category, existing))
    }

    /// Open a new draft dated `date` with a freshly allocated serial
    ///
    /// The draft snapshots the profile's seller state and uniform-GST
    /// setting at creation, so later profile edits do not shift an open
    /// cart's tax treatment.
    pub async fn new_draft(
        &self,
        category: InvoiceCategory,
        date: NaiveDate,
    ) -> BillingResult<InvoiceDraft> {
        let profile = self.profile().await?;
        let invoice_no = self.next_invoice_number(category).await?;
        Ok(InvoiceDraft::new(&profile, category, invoice_no, date))
    }

    /// Validate, seal and commit a draft
    ///
    /// The invoice record and its stock decrements are persisted as one
    /// transaction by the storage backend; on any failure the draft's
    /// effects are fully absent.
    pub async fn finalize(&mut self, draft: InvoiceDraft) -> BillingResult<Invoice> {
        self.validator.validate_draft(&draft)?;
        let invoice = draft.finalize()?;
        self.storage.commit_invoice(&invoice).await?;
        Ok(invoice)
    }

    /// Render the printable document for an invoice
    ///
    /// The template comes from the profile override when set, otherwise
    /// from the invoice's category.
    pub async fn render_document(&self, invoice: &Invoice) -> BillingResult<RenderedDocument> {
        let profile = self.profile().await?;
        let template = TemplateKind::resolve(profile.invoice_template, invoice.category);
        render_invoice(invoice, &profile, template)
    }

    /// Re-render the document for a committed invoice
    ///
    /// The persisted amounts are laid out verbatim; nothing is recomputed,
    /// so a reprint matches the original even if tax rules or the product
    /// catalogue changed since.
    pub async fn reprint(&self, invoice_no: &str) -> BillingResult<RenderedDocument> {
        let invoice = self
            .storage
            .get_invoice(invoice_no)
            .await?
            .ok_or_else(|| BillingError::InvoiceNotFound(invoice_no.to_string()))?;
        self.render_document(&invoice).await
    }

    /// Fetch a committed invoice by serial number
    pub async fn get_invoice(&self, invoice_no: &str) -> BillingResult<Invoice> {
        self.storage
            .get_invoice(invoice_no)
            .await?
            .ok_or_else(|| BillingError::InvoiceNotFound(invoice_no.to_string()))
    }

    /// List all committed invoices, newest first
    pub async fn list_invoices(&self) -> BillingResult<Vec<Invoice>> {
        self.storage.list_invoices().await
    }
}
