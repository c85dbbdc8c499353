//! Core types and data structures for the billing system

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fallback state code used when neither party carries a usable GSTIN
pub const DEFAULT_STATE_CODE: &str = "24";

/// Two-character GST state code, taken from the first two characters
/// of a party's GSTIN
///
/// Always exactly two characters; construction enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateCode(String);

impl StateCode {
    /// Create a state code from an explicit two-character string
    pub fn new(code: &str) -> Result<Self, BillingError> {
        let trimmed = code.trim();
        if trimmed.chars().count() != 2 {
            return Err(BillingError::Validation(format!(
                "State code must be exactly two characters, got '{}'",
                code
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derive a state code from a GSTIN-like registration string
    ///
    /// Unregistered parties (no GSTIN, or one too short to carry a state
    /// prefix) resolve to `default`. For a buyer the default is the
    /// seller's own code, so a cash sale is always intra-state.
    pub fn from_gstin(gstin: Option<&str>, default: &StateCode) -> Self {
        match gstin.map(str::trim) {
            Some(g) if g.chars().count() >= 2 => Self(g.chars().take(2).collect()),
            _ => default.clone(),
        }
    }

    /// The code as a two-character string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five statutory GST rate slabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstSlab {
    /// Exempt goods - 0%
    Zero,
    /// Reduced rate goods (most medicines) - 5%
    Five,
    /// Standard rate goods - 12%
    Twelve,
    /// Higher rate goods - 18%
    Eighteen,
    /// Luxury goods - 28%
    TwentyEight,
}

impl GstSlab {
    /// All slabs, in ascending rate order
    pub const ALL: [GstSlab; 5] = [
        GstSlab::Zero,
        GstSlab::Five,
        GstSlab::Twelve,
        GstSlab::Eighteen,
        GstSlab::TwentyEight,
    ];

    /// The slab rate as a whole percentage
    pub fn percent(&self) -> u8 {
        match self {
            GstSlab::Zero => 0,
            GstSlab::Five => 5,
            GstSlab::Twelve => 12,
            GstSlab::Eighteen => 18,
            GstSlab::TwentyEight => 28,
        }
    }

    /// The slab rate as a decimal percentage
    pub fn rate(&self) -> BigDecimal {
        BigDecimal::from(self.percent())
    }

    /// Look up the slab for a whole percentage, if it is one of the
    /// statutory rates
    pub fn from_percent(percent: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|slab| slab.percent() == percent)
    }
}

impl fmt::Display for GstSlab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Invoice category, which also selects the default print template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceCategory {
    /// Detailed tax invoice for registered trade buyers
    Wholesale,
    /// Compact cash memo for counter sales
    Retail,
}

impl InvoiceCategory {
    /// Serial number prefix for this category
    pub fn serial_prefix(&self) -> &'static str {
        match self {
            InvoiceCategory::Wholesale => "TI",
            InvoiceCategory::Retail => "RET",
        }
    }

    /// The print template this category renders with unless the profile
    /// overrides it
    pub fn default_template(&self) -> TemplateKind {
        match self {
            InvoiceCategory::Wholesale => TemplateKind::Detailed,
            InvoiceCategory::Retail => TemplateKind::Compact,
        }
    }
}

/// Closed set of print templates
///
/// Each variant carries its own column set and section visibility as data
/// (see `document::layout`); adding a template means adding a variant, not
/// threading new booleans through the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Full wholesale tax invoice with per-line tax split and HSN summary
    Detailed,
    /// Compact retail cash memo
    Compact,
}

/// Settlement status of a stored invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Cancelled,
}

/// Product record as supplied by the inventory collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Inventory identifier
    pub id: String,
    /// Product name
    pub name: String,
    /// Batch number
    pub batch: String,
    /// Expiry, as printed on the pack (free text, e.g. "08/27")
    pub expiry: String,
    /// HSN/SAC classification code
    pub hsn: String,
    /// GST slab attached to the product
    pub gst_slab: GstSlab,
    /// Maximum retail price per unit
    pub mrp: BigDecimal,
    /// Sale rate per unit
    pub sale_rate: BigDecimal,
    /// Units on hand
    pub stock: i64,
}

/// A buyer party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Party name
    pub name: String,
    /// GSTIN, absent for unregistered/cash buyers
    pub gstin: Option<String>,
    /// Billing address
    pub address: String,
    /// Contact phone
    pub phone: Option<String>,
}

impl Party {
    /// The party's state code, falling back to `default` when unregistered
    pub fn state_code(&self, default: &StateCode) -> StateCode {
        StateCode::from_gstin(self.gstin.as_deref(), default)
    }
}

/// A cart line as entered by the operator, before tax computation
///
/// Quantities are signed on purpose: the engine does not clamp negative
/// quantities or discounts, so credit/return lines stay expressible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Inventory identifier of the product sold
    pub product_id: String,
    /// Product name as printed
    pub name: String,
    /// Batch number
    pub batch: String,
    /// Expiry text
    pub expiry: String,
    /// HSN/SAC classification code
    pub hsn: String,
    /// Maximum retail price per unit
    pub mrp: BigDecimal,
    /// Sale rate per unit
    pub sale_rate: BigDecimal,
    /// Billed units
    pub quantity: i64,
    /// Free (scheme) units, excluded from the taxable base entirely
    pub free_quantity: i64,
    /// Discount percentage on the line base, 0-100
    pub discount_percent: BigDecimal,
    /// GST slab frozen at the moment the line was added to the cart
    pub gst_slab: GstSlab,
}

impl LineItem {
    /// Seed a line from a product record with the given billed quantity
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            batch: product.batch.clone(),
            expiry: product.expiry.clone(),
            hsn: product.hsn.clone(),
            mrp: product.mrp.clone(),
            sale_rate: product.sale_rate.clone(),
            quantity,
            free_quantity: 0,
            discount_percent: BigDecimal::zero(),
            gst_slab: product.gst_slab,
        }
    }

    /// Units that leave stock when the line is sold: billed plus free
    pub fn units_dispatched(&self) -> i64 {
        self.quantity + self.free_quantity
    }
}

/// A line item with its derived tax fields
///
/// Invariants upheld by the tax engine: at most one of the CGST+SGST pair
/// and IGST is non-zero, CGST always equals SGST, and the total equals
/// taxable value plus all three tax amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedLineItem {
    /// The input line
    #[serde(flatten)]
    pub item: LineItem,
    /// Line base after discount, excluding free units
    pub taxable_value: BigDecimal,
    /// Central GST half of an intra-state split
    pub cgst_amount: BigDecimal,
    /// State GST half of an intra-state split
    pub sgst_amount: BigDecimal,
    /// Integrated GST for an inter-state sale
    pub igst_amount: BigDecimal,
    /// Taxable value plus tax
    pub total_amount: BigDecimal,
}

impl ComputedLineItem {
    /// Total tax on the line across both split shapes
    pub fn total_tax(&self) -> BigDecimal {
        &self.cgst_amount + &self.sgst_amount + &self.igst_amount
    }
}

/// Invoice-level sums, persisted with the invoice at finalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line taxable values
    pub total_taxable: BigDecimal,
    /// Sum of line CGST amounts
    pub total_cgst: BigDecimal,
    /// Sum of line SGST amounts
    pub total_sgst: BigDecimal,
    /// Sum of line IGST amounts
    pub total_igst: BigDecimal,
    /// Sum of line totals, before rounding
    pub grand_total: BigDecimal,
    /// Difference between the rounded and unrounded grand total
    pub round_off: BigDecimal,
}

impl InvoiceTotals {
    /// All-zero totals, what an empty cart aggregates to
    pub fn zero() -> Self {
        Self {
            total_taxable: BigDecimal::zero(),
            total_cgst: BigDecimal::zero(),
            total_sgst: BigDecimal::zero(),
            total_igst: BigDecimal::zero(),
            grand_total: BigDecimal::zero(),
            round_off: BigDecimal::zero(),
        }
    }

    /// Combined tax across both split shapes
    pub fn total_tax(&self) -> BigDecimal {
        &self.total_cgst + &self.total_sgst + &self.total_igst
    }

    /// The displayed payable amount: the grand total rounded to the
    /// nearest rupee, half away from zero
    pub fn net_payable(&self) -> BigDecimal {
        self.grand_total.with_scale_round(0, RoundingMode::HalfUp)
    }
}

/// One row of the HSN-wise tax summary
///
/// Derived at render time from the invoice lines, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsnSummaryRow {
    /// HSN/SAC code shared by the grouped lines
    pub hsn: String,
    /// Aggregated taxable value for the code
    pub taxable: BigDecimal,
    /// Aggregated tax (CGST + SGST + IGST) for the code
    pub tax: BigDecimal,
}

impl HsnSummaryRow {
    /// Taxable value plus tax for the group
    pub fn net_value(&self) -> BigDecimal {
        &self.taxable + &self.tax
    }
}

/// A finalized invoice record
///
/// Immutable once committed: a reprint renders the stored lines verbatim
/// and never recomputes from live product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Internal record identifier
    pub id: Uuid,
    /// Human-facing serial number, e.g. "TI -66"
    pub invoice_no: String,
    /// Invoice date
    pub date: NaiveDate,
    /// Category, which selects the default print template
    pub category: InvoiceCategory,
    /// Buyer snapshot taken at finalization
    pub buyer: Party,
    /// Buyer state code resolved at finalization
    pub buyer_state_code: StateCode,
    /// Goods receipt reference
    pub gr_no: Option<String>,
    /// Dispatch vehicle number
    pub vehicle_no: Option<String>,
    /// Transport/carrier name
    pub transport: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Lines in entry order; the order is meaningful for print
    pub items: Vec<ComputedLineItem>,
    /// Invoice-level sums frozen at finalization
    pub totals: InvoiceTotals,
    /// Settlement status
    pub status: InvoiceStatus,
    /// When the record was created
    pub created_at: NaiveDateTime,
}

/// Bank details printed on the detailed template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_no: String,
    pub ifsc: String,
}

/// The seller's profile, a singleton configuration record
///
/// Read-only input to the engine; each render receives an immutable
/// snapshot rather than reading ambient global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Trading name, also used as the page watermark
    pub company_name: String,
    /// First address line
    pub address_line1: String,
    /// Second address line
    pub address_line2: String,
    /// Seller GSTIN
    pub gstin: String,
    /// Drug licence numbers; up to four are printed concatenated
    pub dl_no1: String,
    pub dl_no2: String,
    pub dl_no3: Option<String>,
    pub dl_no4: Option<String>,
    /// Comma-separated phone numbers
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Terms and conditions text, printed on the compact template
    pub terms: String,
    /// Jurisdiction city for the "Subject to ... Jurisdiction" clause
    pub jurisdiction: Option<String>,
    /// Bank details for the detailed template
    pub bank: Option<BankDetails>,
    /// Explicit template override; the invoice category decides otherwise
    pub invoice_template: Option<TemplateKind>,
    /// When set, newly added cart lines take `uniform_gst_slab` instead of
    /// the product's own slab
    pub use_uniform_gst: bool,
    /// Slab applied under `use_uniform_gst`
    pub uniform_gst_slab: Option<GstSlab>,
}

impl CompanyProfile {
    /// The seller's own state code, derived from the profile GSTIN
    pub fn state_code(&self) -> StateCode {
        let fallback = StateCode(DEFAULT_STATE_CODE.to_string());
        StateCode::from_gstin(Some(&self.gstin), &fallback)
    }

    /// Non-empty licence numbers joined for the identity block
    pub fn licence_line(&self) -> String {
        let mut numbers: Vec<&str> = vec![&self.dl_no1, &self.dl_no2];
        if let Some(n) = self.dl_no3.as_deref() {
            numbers.push(n);
        }
        if let Some(n) = self.dl_no4.as_deref() {
            numbers.push(n);
        }
        let joined: Vec<&str> = numbers
            .into_iter()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        format!("D.L. No: {}", joined.join(", "))
    }

    /// Individual phone numbers, split on commas
    pub fn phone_numbers(&self) -> Vec<String> {
        self.phone
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The "Subject to ... Jurisdiction" clause for the identity block
    pub fn jurisdiction_clause(&self) -> String {
        format!(
            "Subject to {} Jurisdiction",
            self.jurisdiction.as_deref().unwrap_or("Local")
        )
    }
}

/// Errors that can occur in the billing system
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("No company profile is configured")]
    ProfileMissing,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Invalid invoice: {0}")]
    InvalidInvoice(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for billing operations
pub type BillingResult<T> = Result<T, BillingError>;
