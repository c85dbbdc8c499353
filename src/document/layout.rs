//! Page geometry and per-template layout tables
//!
//! Each template's column set and section visibility live here as data.
//! The renderer walks these tables instead of branching on the template,
//! so a third template would be a new variant plus a new table.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use crate::types::{ComputedLineItem, InvoiceCategory, TemplateKind};

/// A4 portrait page, all coordinates in millimetres
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
/// Outer border inset
pub const MARGIN: f32 = 7.0;

/// Height of one body row in the line-item table
pub const ROW_HEIGHT: f32 = 5.0;
/// Height of the table header band
pub const TABLE_HEADER_HEIGHT: f32 = 5.5;
/// Font size used inside the table
pub const TABLE_FONT_SIZE: f32 = 7.5;

/// Top of the line-item table on the first page, measured from the top
/// of the sheet (the header, identity and metadata blocks sit above it)
pub const TABLE_TOP_FROM_TOP: f32 = 66.0;
/// Top of the repeated table on continuation pages
pub const CONTINUATION_TOP_FROM_TOP: f32 = 12.0;
/// Rows never render below this line; overflow moves to the next page
pub const TABLE_FLOOR_Y: f32 = MARGIN + 10.0;

/// Horizontal cell text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One column of a line-item table
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Header caption
    pub header: &'static str,
    /// Column width in millimetres; a template's widths sum to the
    /// printable width between the borders
    pub width: f32,
    /// Body cell alignment (headers are always centered)
    pub align: Align,
}

const fn col(header: &'static str, width: f32, align: Align) -> ColumnSpec {
    ColumnSpec {
        header,
        width,
        align,
    }
}

/// Wholesale tax invoice: full per-line tax split
const DETAILED_COLUMNS: [ColumnSpec; 15] = [
    col("S.N", 8.0, Align::Center),
    col("ITEM DESCRIPTION", 36.0, Align::Left),
    col("Batch", 13.0, Align::Left),
    col("Exp", 9.0, Align::Center),
    col("HSN", 11.0, Align::Center),
    col("MRP", 12.0, Align::Right),
    col("QTY", 9.0, Align::Center),
    col("Fr.", 7.0, Align::Center),
    col("RATE", 12.0, Align::Right),
    col("Disc%", 10.0, Align::Right),
    col("Taxable", 14.0, Align::Right),
    col("SGST", 12.0, Align::Right),
    col("CGST", 12.0, Align::Right),
    col("IGST", 12.0, Align::Right),
    col("TOTAL", 19.0, Align::Right),
];

/// Retail cash memo: no rate, discount, free units or tax split
const COMPACT_COLUMNS: [ColumnSpec; 6] = [
    col("S.N", 10.0, Align::Center),
    col("ITEM DESCRIPTION", 86.0, Align::Left),
    col("MRP", 20.0, Align::Right),
    col("QTY", 20.0, Align::Center),
    col("GST%", 20.0, Align::Center),
    col("TOTAL", 40.0, Align::Right),
];

impl TemplateKind {
    /// Column table for this template
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            TemplateKind::Detailed => &DETAILED_COLUMNS,
            TemplateKind::Compact => &COMPACT_COLUMNS,
        }
    }

    /// Whether the HSN-wise tax summary table is printed
    pub fn shows_hsn_summary(&self) -> bool {
        matches!(self, TemplateKind::Detailed)
    }

    /// Whether the bank details block is printed
    pub fn shows_bank_details(&self) -> bool {
        matches!(self, TemplateKind::Detailed)
    }

    /// Whether the terms/conditions text is printed
    pub fn shows_terms(&self) -> bool {
        matches!(self, TemplateKind::Compact)
    }

    /// Resolve the template for an invoice: an explicit profile override
    /// wins, otherwise the category decides
    pub fn resolve(override_template: Option<TemplateKind>, category: InvoiceCategory) -> Self {
        override_template.unwrap_or_else(|| category.default_template())
    }
}

/// Document title printed in the top strip
pub fn document_title(category: InvoiceCategory) -> &'static str {
    match category {
        InvoiceCategory::Wholesale => "TAX INVOICE",
        InvoiceCategory::Retail => "RETAIL CASH MEMO",
    }
}

/// Copy-designation label printed on the right of the top strip
pub const COPY_LABEL: &str = "ORIGINAL FOR BUYER";

/// Format a currency amount with exactly two decimal places
pub fn fmt_amount(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

/// Format a discount percentage with one decimal place
pub fn fmt_discount(percent: &BigDecimal) -> String {
    percent.with_scale_round(1, RoundingMode::HalfUp).to_string()
}

/// Body cells for one table row, matching the template's column table
///
/// On the detailed template the side of the tax split that does not apply
/// prints as a dash, so intra- and inter-state lines are tell-apart at a
/// glance.
pub fn row_cells(serial: usize, line: &ComputedLineItem, template: TemplateKind) -> Vec<String> {
    match template {
        TemplateKind::Detailed => {
            let inter_state = !line.igst_amount.is_zero();
            let dash = "-".to_string();
            vec![
                serial.to_string(),
                line.item.name.clone(),
                line.item.batch.clone(),
                line.item.expiry.clone(),
                line.item.hsn.clone(),
                fmt_amount(&line.item.mrp),
                line.item.quantity.to_string(),
                line.item.free_quantity.to_string(),
                fmt_amount(&line.item.sale_rate),
                fmt_discount(&line.item.discount_percent),
                fmt_amount(&line.taxable_value),
                if inter_state {
                    dash.clone()
                } else {
                    fmt_amount(&line.sgst_amount)
                },
                if inter_state {
                    dash.clone()
                } else {
                    fmt_amount(&line.cgst_amount)
                },
                if inter_state {
                    fmt_amount(&line.igst_amount)
                } else {
                    dash
                },
                fmt_amount(&line.total_amount),
            ]
        }
        TemplateKind::Compact => vec![
            serial.to_string(),
            line.item.name.clone(),
            fmt_amount(&line.item.mrp),
            line.item.quantity.to_string(),
            format!("{}%", line.item.gst_slab.percent()),
            fmt_amount(&line.total_amount),
        ],
    }
}

/// Split free text into lines that fit the printable width, breaking on
/// words; used for the terms block and long addresses
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::compute_line;
    use crate::types::{GstSlab, LineItem, StateCode};

    fn computed(buyer_state: &str) -> ComputedLineItem {
        let item = LineItem {
            product_id: "p1".into(),
            name: "Amoxicillin 250".into(),
            batch: "AX11".into(),
            expiry: "03/27".into(),
            hsn: "3004".into(),
            mrp: BigDecimal::from(80),
            sale_rate: BigDecimal::from(60),
            quantity: 4,
            free_quantity: 1,
            discount_percent: BigDecimal::from(5),
            gst_slab: GstSlab::Twelve,
        };
        compute_line(
            &item,
            &StateCode::new("24").unwrap(),
            &StateCode::new(buyer_state).unwrap(),
        )
    }

    #[test]
    fn column_widths_fill_the_printable_width() {
        for template in [TemplateKind::Detailed, TemplateKind::Compact] {
            let total: f32 = template.columns().iter().map(|c| c.width).sum();
            assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.01);
        }
    }

    #[test]
    fn compact_template_has_no_tax_split_columns() {
        let headers: Vec<&str> = TemplateKind::Compact
            .columns()
            .iter()
            .map(|c| c.header)
            .collect();
        for split in ["SGST", "CGST", "IGST"] {
            assert!(!headers.contains(&split));
        }
        assert!(headers.contains(&"GST%"));
        assert!(!TemplateKind::Compact.shows_hsn_summary());
        assert!(TemplateKind::Compact.shows_terms());
    }

    #[test]
    fn detailed_template_carries_the_full_split() {
        let headers: Vec<&str> = TemplateKind::Detailed
            .columns()
            .iter()
            .map(|c| c.header)
            .collect();
        for header in ["SGST", "CGST", "IGST", "Fr.", "Disc%", "Taxable"] {
            assert!(headers.contains(&header));
        }
        assert!(TemplateKind::Detailed.shows_hsn_summary());
        assert!(TemplateKind::Detailed.shows_bank_details());
    }

    #[test]
    fn template_resolution_prefers_the_profile_override() {
        assert_eq!(
            TemplateKind::resolve(None, InvoiceCategory::Retail),
            TemplateKind::Compact
        );
        assert_eq!(
            TemplateKind::resolve(Some(TemplateKind::Detailed), InvoiceCategory::Retail),
            TemplateKind::Detailed
        );
    }

    #[test]
    fn cells_match_the_column_count() {
        for template in [TemplateKind::Detailed, TemplateKind::Compact] {
            let cells = row_cells(1, &computed("24"), template);
            assert_eq!(cells.len(), template.columns().len());
        }
    }

    #[test]
    fn intra_state_rows_dash_the_igst_cell() {
        let cells = row_cells(1, &computed("24"), TemplateKind::Detailed);
        assert_eq!(cells[13], "-");
        assert_ne!(cells[11], "-");
        assert_eq!(cells[11], cells[12]);
    }

    #[test]
    fn inter_state_rows_dash_the_split_cells() {
        let cells = row_cells(1, &computed("27"), TemplateKind::Detailed);
        assert_eq!(cells[11], "-");
        assert_eq!(cells[12], "-");
        assert_ne!(cells[13], "-");
    }

    #[test]
    fn amounts_format_with_two_decimals() {
        assert_eq!(fmt_amount(&BigDecimal::from(900)), "900.00");
        assert_eq!(fmt_discount(&BigDecimal::from(10)), "10.0");
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        let lines = wrap_text("Goods once sold will not be taken back or exchanged", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn titles_follow_the_category() {
        assert_eq!(document_title(InvoiceCategory::Wholesale), "TAX INVOICE");
        assert_eq!(document_title(InvoiceCategory::Retail), "RETAIL CASH MEMO");
    }
}
