//! Printable document generation
//!
//! Turns a finalized invoice plus the company profile into a paginated A4
//! PDF. Layout tables live in [`layout`], the drawing code in [`render`].
//! Rendering is deterministic: the same invoice and profile produce the
//! same bytes, with the document timestamps pinned to the invoice date.

pub mod layout;
mod render;

use crate::types::{BillingResult, CompanyProfile, Invoice, TemplateKind};

/// A rendered document ready to hand to the caller
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Suggested file name, already sanitized for the filesystem
    pub file_name: String,
    /// The PDF bytes
    pub bytes: Vec<u8>,
}

/// Build the download file name for an invoice serial
///
/// Characters outside a conservative portable set are replaced so serials
/// like `TI -65` survive as a usable name on every platform.
pub fn document_file_name(invoice_no: &str) -> String {
    let cleaned: String = invoice_no
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = if cleaned.is_empty() {
        "INVOICE".to_string()
    } else {
        cleaned
    };
    format!("ORIGINAL_INVOICE_{stem}.pdf")
}

/// Render the printable document for an invoice under the given template
pub fn render_invoice(
    invoice: &Invoice,
    profile: &CompanyProfile,
    template: TemplateKind,
) -> BillingResult<RenderedDocument> {
    let bytes = render::render(invoice, profile, template)?;
    Ok(RenderedDocument {
        file_name: document_file_name(&invoice.invoice_no),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_replace_unsafe_characters() {
        assert_eq!(document_file_name("TI -65"), "ORIGINAL_INVOICE_TI_-65.pdf");
        assert_eq!(
            document_file_name("RET -70"),
            "ORIGINAL_INVOICE_RET_-70.pdf"
        );
        assert_eq!(document_file_name("a/b\\c"), "ORIGINAL_INVOICE_a_b_c.pdf");
    }

    #[test]
    fn blank_serials_still_produce_a_name() {
        assert_eq!(document_file_name("   "), "ORIGINAL_INVOICE_INVOICE.pdf");
    }
}
