//! Invoice drafting: the mutable cart that precedes a finalized invoice
//!
//! A draft keeps every derived field consistent with its inputs by
//! recomputing lines on each edit instead of caching totals. Editing a
//! line recomputes that line; changing the buyer recomputes all lines,
//! because the inter-/intra-state classification is buyer-dependent.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::invoice::aggregate::aggregate;
use crate::tax::{compute_line, recompute_all};
use crate::types::{
    BillingError, BillingResult, CompanyProfile, ComputedLineItem, GstSlab, Invoice,
    InvoiceCategory, InvoiceStatus, InvoiceTotals, LineItem, Party, Product, StateCode,
};

/// Legacy offset carried over from the previous installation's invoice
/// register, so serial numbers continue the old sequence.
pub const SERIAL_SEED: u64 = 65;

/// Format the serial number for the next invoice of a category
///
/// `existing_count` is the number of invoices already committed across
/// both categories; the register is shared, only the prefix differs.
pub fn next_invoice_number(category: InvoiceCategory, existing_count: u64) -> String {
    format!(
        "{} -{}",
        category.serial_prefix(),
        existing_count + SERIAL_SEED
    )
}

/// A mutable invoice under composition
///
/// Holds an immutable snapshot of the seller's tax identity and uniform
/// rate setting taken at creation time. The uniform slab is applied when a
/// line is added and never re-applied retroactively: a line's slab is
/// fixed at the moment it enters the cart, even if the profile setting
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    /// Serial number reserved for this draft
    pub invoice_no: String,
    /// Invoice date
    pub date: NaiveDate,
    /// Category; selects serial prefix and default template
    pub category: InvoiceCategory,
    /// Buyer, if one has been selected
    pub buyer: Option<Party>,
    /// Goods receipt reference
    pub gr_no: Option<String>,
    /// Dispatch vehicle number
    pub vehicle_no: Option<String>,
    /// Transport/carrier name
    pub transport: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    items: Vec<ComputedLineItem>,
    seller_state: StateCode,
    uniform_slab: Option<GstSlab>,
}

impl InvoiceDraft {
    /// Start a new draft against a profile snapshot
    pub fn new(
        profile: &CompanyProfile,
        category: InvoiceCategory,
        invoice_no: String,
        date: NaiveDate,
    ) -> Self {
        let uniform_slab = if profile.use_uniform_gst {
            // Fall back to the 5% slab like the settings screen does when
            // the uniform rate was never picked explicitly.
            Some(profile.uniform_gst_slab.unwrap_or(GstSlab::Five))
        } else {
            None
        };

        Self {
            invoice_no,
            date,
            category,
            buyer: None,
            gr_no: None,
            vehicle_no: None,
            transport: None,
            notes: None,
            items: Vec::new(),
            seller_state: profile.state_code(),
            uniform_slab,
        }
    }

    /// The buyer's state code under the current buyer selection
    ///
    /// An unregistered or absent buyer resolves to the seller's own code,
    /// so cash sales are always intra-state.
    pub fn buyer_state_code(&self) -> StateCode {
        match &self.buyer {
            Some(party) => party.state_code(&self.seller_state),
            None => self.seller_state.clone(),
        }
    }

    /// Lines in entry order
    pub fn items(&self) -> &[ComputedLineItem] {
        &self.items
    }

    /// Add a product to the cart with the given billed quantity
    ///
    /// The GST slab is frozen here: the profile's uniform rate (when
    /// enabled at draft creation) wins over the product's own slab, and
    /// later profile changes never re-tag the line.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> BillingResult<()> {
        if self.items.iter().any(|l| l.item.product_id == product.id) {
            return Err(BillingError::Validation(format!(
                "Product '{}' is already in the cart",
                product.name
            )));
        }

        let mut line = LineItem::from_product(product, quantity);
        if let Some(slab) = self.uniform_slab {
            line.gst_slab = slab;
        }

        let buyer_state = self.buyer_state_code();
        self.items
            .push(compute_line(&line, &self.seller_state, &buyer_state));
        Ok(())
    }

    /// Edit a line in place and recompute its derived fields
    pub fn update_item<F>(&mut self, index: usize, edit: F) -> BillingResult<()>
    where
        F: FnOnce(&mut LineItem),
    {
        let buyer_state = self.buyer_state_code();
        let line = self
            .items
            .get_mut(index)
            .ok_or_else(|| BillingError::Validation(format!("No cart line at index {index}")))?;

        let mut item = line.item.clone();
        edit(&mut item);
        *line = compute_line(&item, &self.seller_state, &buyer_state);
        Ok(())
    }

    /// Remove a line from the cart
    pub fn remove_item(&mut self, index: usize) -> BillingResult<()> {
        if index >= self.items.len() {
            return Err(BillingError::Validation(format!(
                "No cart line at index {index}"
            )));
        }
        self.items.remove(index);
        Ok(())
    }

    /// Select or clear the buyer and recompute every line
    ///
    /// All lines are recomputed, not just new ones: the CGST/SGST vs IGST
    /// classification follows the buyer, not the line.
    pub fn set_buyer(&mut self, buyer: Option<Party>) {
        self.buyer = buyer;
        let buyer_state = self.buyer_state_code();
        self.items = recompute_all(&self.items, &self.seller_state, &buyer_state);
    }

    /// Current invoice-level totals, aggregated fresh from the lines
    pub fn totals(&self) -> InvoiceTotals {
        aggregate(&self.items)
    }

    /// Convert the draft into an immutable invoice record
    ///
    /// Rejects an empty cart and a wholesale draft without a buyer; a
    /// retail draft without one becomes a "Cash Sale". The resulting
    /// record must be committed through storage and is never recomputed
    /// afterwards.
    pub fn finalize(self) -> BillingResult<Invoice> {
        if self.items.is_empty() {
            return Err(BillingError::InvalidInvoice(
                "Cannot finalize an invoice with no line items".to_string(),
            ));
        }
        if self.category == InvoiceCategory::Wholesale && self.buyer.is_none() {
            return Err(BillingError::InvalidInvoice(
                "A wholesale invoice requires a buyer".to_string(),
            ));
        }

        let buyer_state_code = self.buyer_state_code();
        let buyer = self.buyer.unwrap_or_else(|| Party {
            name: "Cash Sale".to_string(),
            gstin: None,
            address: String::new(),
            phone: None,
        });
        let totals = aggregate(&self.items);

        Ok(Invoice {
            id: Uuid::new_v4(),
            invoice_no: self.invoice_no,
            date: self.date,
            category: self.category,
            buyer,
            buyer_state_code,
            gr_no: self.gr_no,
            vehicle_no: self.vehicle_no,
            transport: self.transport,
            notes: self.notes,
            items: self.items,
            totals,
            status: InvoiceStatus::Paid,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}
