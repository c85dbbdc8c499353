//! Validation helpers for registrations, profiles and drafts

use bigdecimal::BigDecimal;

use crate::invoice::InvoiceDraft;
use crate::traits::{DefaultDraftValidator, DraftValidator};
use crate::types::{BillingError, BillingResult, CompanyProfile};

/// Check that a GSTIN has the statutory shape
///
/// Fifteen characters: a two-digit state code followed by thirteen
/// uppercase alphanumerics. This is a shape check only; the embedded
/// checksum is not verified.
pub fn validate_gstin(gstin: &str) -> BillingResult<()> {
    let trimmed = gstin.trim();
    if trimmed.chars().count() != 15 {
        return Err(BillingError::Validation(format!(
            "GSTIN must be 15 characters, got '{}'",
            gstin
        )));
    }
    if !trimmed.chars().take(2).all(|c| c.is_ascii_digit()) {
        return Err(BillingError::Validation(format!(
            "GSTIN must start with a two-digit state code, got '{}'",
            gstin
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    {
        return Err(BillingError::Validation(format!(
            "GSTIN may only contain digits and uppercase letters, got '{}'",
            gstin
        )));
    }
    Ok(())
}

/// Check a company profile before it is saved
pub fn validate_profile(profile: &CompanyProfile) -> BillingResult<()> {
    if profile.company_name.trim().is_empty() {
        return Err(BillingError::Validation(
            "Company name cannot be empty".to_string(),
        ));
    }
    validate_gstin(&profile.gstin)
}

/// Stricter draft validator for operator-facing flows
///
/// Adds business-rule checks on top of the baseline: the tax engine itself
/// stays permissive about negative quantities and oversized discounts, so
/// callers that want guard rails opt in here.
pub struct EnhancedDraftValidator;

impl DraftValidator for EnhancedDraftValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> BillingResult<()> {
        DefaultDraftValidator.validate_draft(draft)?;

        for line in draft.items() {
            if line.item.quantity == 0 {
                return Err(BillingError::Validation(format!(
                    "Line '{}' has zero billed quantity",
                    line.item.name
                )));
            }
            if line.item.discount_percent > BigDecimal::from(100) {
                return Err(BillingError::Validation(format!(
                    "Line '{}' has a discount above 100%",
                    line.item.name
                )));
            }
        }

        if let Some(buyer) = &draft.buyer {
            if let Some(gstin) = buyer.gstin.as_deref() {
                validate_gstin(gstin)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::next_invoice_number;
    use crate::types::{GstSlab, InvoiceCategory, Party, Product};
    use chrono::NaiveDate;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            company_name: "Shree Medical Agencies".into(),
            address_line1: "14 Station Road".into(),
            address_line2: "Ahmedabad 380001".into(),
            gstin: "24AAACB1234C1ZZ".into(),
            dl_no1: "GJ-AD-123".into(),
            dl_no2: "GJ-AD-456".into(),
            dl_no3: None,
            dl_no4: None,
            phone: "079-2550-1234".into(),
            email: "billing@shreemedical.example".into(),
            terms: String::new(),
            jurisdiction: None,
            bank: None,
            invoice_template: None,
            use_uniform_gst: false,
            uniform_gst_slab: None,
        }
    }

    #[test]
    fn gstin_shape_is_enforced() {
        assert!(validate_gstin("24AAACB1234C1ZZ").is_ok());
        assert!(validate_gstin("24AAACB1234C1Z").is_err());
        assert!(validate_gstin("XXAAACB1234C1ZZ").is_err());
        assert!(validate_gstin("24aaacb1234c1zz").is_err());
    }

    #[test]
    fn profile_validation_requires_a_name() {
        let mut p = profile();
        assert!(validate_profile(&p).is_ok());
        p.company_name = "  ".into();
        assert!(validate_profile(&p).is_err());
    }

    #[test]
    fn enhanced_validator_rejects_oversized_discounts() {
        let mut draft = InvoiceDraft::new(
            &profile(),
            InvoiceCategory::Retail,
            next_invoice_number(InvoiceCategory::Retail, 0),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        let product = Product {
            id: "p1".into(),
            name: "Cough Syrup".into(),
            batch: "B1".into(),
            expiry: "12/26".into(),
            hsn: "3004".into(),
            gst_slab: GstSlab::Twelve,
            mrp: BigDecimal::from(120),
            sale_rate: BigDecimal::from(100),
            stock: 10,
        };
        draft.add_item(&product, 2).unwrap();

        assert!(EnhancedDraftValidator.validate_draft(&draft).is_ok());

        draft
            .update_item(0, |line| line.discount_percent = BigDecimal::from(120))
            .unwrap();
        assert!(EnhancedDraftValidator.validate_draft(&draft).is_err());
    }

    #[test]
    fn enhanced_validator_rejects_malformed_buyer_gstin() {
        let mut draft = InvoiceDraft::new(
            &profile(),
            InvoiceCategory::Retail,
            next_invoice_number(InvoiceCategory::Retail, 0),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        let product = Product {
            id: "p1".into(),
            name: "Cough Syrup".into(),
            batch: "B1".into(),
            expiry: "12/26".into(),
            hsn: "3004".into(),
            gst_slab: GstSlab::Twelve,
            mrp: BigDecimal::from(120),
            sale_rate: BigDecimal::from(100),
            stock: 10,
        };
        draft.add_item(&product, 1).unwrap();
        draft.buyer = Some(Party {
            name: "City Pharma".into(),
            gstin: Some("BAD".into()),
            address: String::new(),
            phone: None,
        });

        assert!(EnhancedDraftValidator.validate_draft(&draft).is_err());
    }
}
