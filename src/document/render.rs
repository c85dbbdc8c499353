//! PDF drawing for the invoice document
//!
//! Coordinates in this module run top-down in millimetres, like the layout
//! constants; the painter flips them into the PDF's bottom-up space at the
//! last moment. Every page gets the same chrome (border, watermark), the
//! line-item table repeats its header on continuation pages, and the whole
//! tail block moves to a fresh page when it does not fit under the table.

use bigdecimal::Zero;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb, TextMatrix,
};
use time::OffsetDateTime;

use crate::invoice::aggregate::hsn_summary;
use crate::types::{BillingError, BillingResult, CompanyProfile, Invoice, TemplateKind};
use crate::words::amount_in_words;

use super::layout::{
    self, document_title, fmt_amount, row_cells, wrap_text, Align, COPY_LABEL,
    CONTINUATION_TOP_FROM_TOP, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, ROW_HEIGHT, TABLE_FLOOR_Y,
    TABLE_FONT_SIZE, TABLE_HEADER_HEIGHT, TABLE_TOP_FROM_TOP,
};

/// Horizontal padding inside a table cell
const CELL_PAD: f32 = 1.0;
/// Lowest `t` (distance from the page top) a table row may occupy
const MAX_T: f32 = PAGE_HEIGHT - TABLE_FLOOR_Y;
/// Currency marker; the builtin Helvetica has no rupee glyph
const CURRENCY: &str = "Rs.";

/// Drawing handle for one page
struct Painter {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Painter {
    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    /// Rough Helvetica advance width; close enough to right-align numbers
    fn text_width(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5 * 0.3528
    }

    /// Left-aligned text with the baseline `t` millimetres from the top
    fn text(&self, text: &str, size: f32, x: f32, t: f32, bold: bool) {
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - t), self.font(bold));
    }

    fn text_right(&self, text: &str, size: f32, right_x: f32, t: f32, bold: bool) {
        self.text(text, size, right_x - Self::text_width(text, size), t, bold);
    }

    fn text_center(&self, text: &str, size: f32, center_x: f32, t: f32, bold: bool) {
        self.text(
            text,
            size,
            center_x - Self::text_width(text, size) / 2.0,
            t,
            bold,
        );
    }

    fn stroke(&self, points: Vec<(f32, f32)>, closed: bool) {
        let points = points
            .into_iter()
            .map(|(x, t)| (Point::new(Mm(x), Mm(PAGE_HEIGHT - t)), false))
            .collect();
        self.layer.add_line(Line {
            points,
            is_closed: closed,
        });
    }

    fn hline(&self, x1: f32, x2: f32, t: f32) {
        self.stroke(vec![(x1, t), (x2, t)], false);
    }

    fn vline(&self, x: f32, t1: f32, t2: f32) {
        self.stroke(vec![(x, t1), (x, t2)], false);
    }

    /// Page border and the diagonal company-name watermark
    fn chrome(&self, company_name: &str) {
        self.layer.set_outline_thickness(0.6);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.stroke(
            vec![
                (MARGIN, MARGIN),
                (PAGE_WIDTH - MARGIN, MARGIN),
                (PAGE_WIDTH - MARGIN, PAGE_HEIGHT - MARGIN),
                (MARGIN, PAGE_HEIGHT - MARGIN),
            ],
            true,
        );

        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.9, 0.9, 0.9, None)));
        self.layer.begin_text_section();
        self.layer.set_font(&self.bold, 42.0);
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            Mm(35.0).into(),
            Mm(110.0).into(),
            40.0,
        ));
        self.layer.write_text(company_name, &self.bold);
        self.layer.end_text_section();
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.set_outline_thickness(0.25);
    }
}

fn add_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

/// Render the full document and return the PDF bytes
pub(crate) fn render(
    invoice: &Invoice,
    profile: &CompanyProfile,
    template: TemplateKind,
) -> BillingResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_no),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| BillingError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| BillingError::Render(e.to_string()))?;

    let mut p = Painter {
        layer: doc.get_page(first_page).get_layer(first_layer),
        regular,
        bold,
    };

    p.chrome(&profile.company_name);
    draw_top_strip(&p, invoice, profile);
    draw_identity_block(&p, profile);
    draw_metadata_grid(&p, invoice);

    // Line-item table, paginated
    let columns = template.columns();
    let mut t = TABLE_TOP_FROM_TOP;
    let mut segment_top = t;
    draw_table_header(&p, columns, t);
    t += TABLE_HEADER_HEIGHT;

    for (index, line) in invoice.items.iter().enumerate() {
        if t + ROW_HEIGHT > MAX_T {
            close_table_segment(&p, columns, segment_top, t);
            p.layer = add_page(&doc);
            p.chrome(&profile.company_name);
            t = CONTINUATION_TOP_FROM_TOP;
            segment_top = t;
            draw_table_header(&p, columns, t);
            t += TABLE_HEADER_HEIGHT;
        }
        draw_row(&p, columns, &row_cells(index + 1, line, template), t);
        t += ROW_HEIGHT;
    }
    close_table_segment(&p, columns, segment_top, t);

    // Everything below the table moves as one block when it would not fit
    let summary = hsn_summary(&invoice.items);
    let terms_lines = wrap_text(&profile.terms, 58);
    let mut tail_t = t + 4.0;
    if tail_t + tail_height(invoice, template, summary.len(), terms_lines.len()) > MAX_T {
        p.layer = add_page(&doc);
        p.chrome(&profile.company_name);
        tail_t = CONTINUATION_TOP_FROM_TOP;
    }
    draw_tail(&p, invoice, profile, template, &summary, &terms_lines, tail_t);

    // Pin the document clock to the invoice date so identical inputs
    // yield identical bytes
    let doc = match invoice
        .date
        .and_hms_opt(0, 0, 0)
        .and_then(|dt| OffsetDateTime::from_unix_timestamp(dt.and_utc().timestamp()).ok())
    {
        Some(stamp) => doc.with_creation_date(stamp).with_mod_date(stamp),
        None => doc,
    };
    let doc = doc.with_document_id(format!("invoice-{}", invoice.invoice_no));

    doc.save_to_bytes()
        .map_err(|e| BillingError::Render(e.to_string()))
}

/// Title strip: seller GSTIN left, document title center, copy label right
fn draw_top_strip(p: &Painter, invoice: &Invoice, profile: &CompanyProfile) {
    p.text(&format!("GSTIN: {}", profile.gstin), 8.0, MARGIN + 2.0, 12.0, false);
    p.text_center(
        document_title(invoice.category),
        11.0,
        PAGE_WIDTH / 2.0,
        12.0,
        true,
    );
    p.text_right(COPY_LABEL, 8.0, PAGE_WIDTH - MARGIN - 2.0, 12.0, false);
    p.hline(MARGIN, PAGE_WIDTH - MARGIN, 14.5);
}

/// Centered company identity block under the title strip
fn draw_identity_block(p: &Painter, profile: &CompanyProfile) {
    let center = PAGE_WIDTH / 2.0;
    p.text_center(&profile.company_name, 14.0, center, 21.5, true);
    p.text_center(
        &format!("{}, {}", profile.address_line1, profile.address_line2),
        8.5,
        center,
        26.5,
        false,
    );
    p.text_center(&profile.licence_line(), 8.0, center, 30.5, false);
    p.text_center(
        &format!(
            "Ph: {} | Email: {}",
            profile.phone_numbers().join(", "),
            profile.email
        ),
        8.0,
        center,
        34.5,
        false,
    );
    p.hline(MARGIN, PAGE_WIDTH - MARGIN, 37.0);
}

/// Two-column grid: buyer details left, invoice references right
fn draw_metadata_grid(p: &Painter, invoice: &Invoice) {
    let left = MARGIN + 2.0;
    let divider_x = 118.0;
    let right = divider_x + 3.0;
    let dash = "-".to_string();

    p.text("Billed To:", 8.0, left, 42.0, true);
    p.text(&invoice.buyer.name, 9.0, left, 46.5, true);
    let address_lines = wrap_text(&invoice.buyer.address, 52);
    for (i, line) in address_lines.iter().take(2).enumerate() {
        p.text(line, 8.0, left, 50.5 + i as f32 * 4.0, false);
    }
    let registration = match invoice.buyer.gstin.as_deref() {
        Some(gstin) if !gstin.trim().is_empty() => format!("GSTIN: {gstin}"),
        _ => "Unregistered".to_string(),
    };
    p.text(&registration, 8.0, left, 59.0, false);
    p.text(
        &format!("State Code: {}", invoice.buyer_state_code),
        8.0,
        left,
        63.0,
        false,
    );

    p.text(
        &format!("Invoice No: {}", invoice.invoice_no),
        9.0,
        right,
        42.0,
        true,
    );
    p.text(
        &format!("Date: {}", invoice.date.format("%d-%m-%Y")),
        8.0,
        right,
        46.5,
        false,
    );
    p.text(
        &format!("GR No: {}", invoice.gr_no.as_deref().unwrap_or(&dash)),
        8.0,
        right,
        50.5,
        false,
    );
    p.text(
        &format!(
            "Vehicle No: {}",
            invoice.vehicle_no.as_deref().unwrap_or(&dash)
        ),
        8.0,
        right,
        54.5,
        false,
    );
    p.text(
        &format!(
            "Transport: {}",
            invoice.transport.as_deref().unwrap_or(&dash)
        ),
        8.0,
        right,
        59.0,
        false,
    );

    p.vline(divider_x, 37.0, 64.5);
    p.hline(MARGIN, PAGE_WIDTH - MARGIN, 64.5);
}

/// Bold centered column captions for one table segment
fn draw_table_header(p: &Painter, columns: &[layout::ColumnSpec], t: f32) {
    let baseline = t + TABLE_HEADER_HEIGHT - 1.5;
    let mut x = MARGIN;
    for column in columns {
        p.text_center(
            column.header,
            TABLE_FONT_SIZE,
            x + column.width / 2.0,
            baseline,
            true,
        );
        x += column.width;
    }
}

/// One body row; the cells already match the column table
fn draw_row(p: &Painter, columns: &[layout::ColumnSpec], cells: &[String], t: f32) {
    let baseline = t + ROW_HEIGHT - 1.5;
    let mut x = MARGIN;
    for (column, cell) in columns.iter().zip(cells) {
        match column.align {
            Align::Left => p.text(cell, TABLE_FONT_SIZE, x + CELL_PAD, baseline, false),
            Align::Center => {
                p.text_center(cell, TABLE_FONT_SIZE, x + column.width / 2.0, baseline, false)
            }
            Align::Right => p.text_right(
                cell,
                TABLE_FONT_SIZE,
                x + column.width - CELL_PAD,
                baseline,
                false,
            ),
        }
        x += column.width;
    }
}

/// Grid lines for the table rows drawn on one page
fn close_table_segment(p: &Painter, columns: &[layout::ColumnSpec], top: f32, bottom: f32) {
    p.hline(MARGIN, PAGE_WIDTH - MARGIN, top);
    p.hline(MARGIN, PAGE_WIDTH - MARGIN, top + TABLE_HEADER_HEIGHT);
    p.hline(MARGIN, PAGE_WIDTH - MARGIN, bottom);
    let mut x = MARGIN;
    for column in columns {
        x += column.width;
        if x < PAGE_WIDTH - MARGIN - 0.1 {
            p.vline(x, top, bottom);
        }
    }
}

/// Height the tail block needs, used to decide whether it fits on the
/// current page
fn tail_height(
    invoice: &Invoice,
    template: TemplateKind,
    hsn_rows: usize,
    terms_lines: usize,
) -> f32 {
    let left = if template.shows_hsn_summary() {
        5.5 + hsn_rows as f32 * 4.5
    } else if template.shows_terms() {
        5.5 + terms_lines as f32 * 4.0
    } else {
        0.0
    };
    let tax_rows: f32 = if invoice.totals.total_igst.is_zero() {
        2.0
    } else {
        1.0
    };
    let right = (2.0 + tax_rows) * 4.5 + 7.0;
    left.max(right) + 4.0 + 7.0 + 18.0 + 10.0 + 9.0
}

/// HSN summary or terms on the left, totals on the right, then the words
/// line, bank block, signatures and footer
fn draw_tail(
    p: &Painter,
    invoice: &Invoice,
    profile: &CompanyProfile,
    template: TemplateKind,
    summary: &[crate::types::HsnSummaryRow],
    terms_lines: &[String],
    t: f32,
) {
    let left = MARGIN + 2.0;
    let label_x = 122.0;
    let value_x = PAGE_WIDTH - MARGIN - 2.0;
    let totals = &invoice.totals;

    // Left block
    let mut left_t = t;
    if template.shows_hsn_summary() {
        p.text("HSN/SAC", 7.5, left, left_t + 3.5, true);
        p.text_right("Taxable", 7.5, left + 45.0, left_t + 3.5, true);
        p.text_right("Tax", 7.5, left + 65.0, left_t + 3.5, true);
        p.text_right("Net Value", 7.5, left + 90.0, left_t + 3.5, true);
        left_t += 5.5;
        for row in summary {
            p.text(&row.hsn, 7.5, left, left_t + 3.0, false);
            p.text_right(&fmt_amount(&row.taxable), 7.5, left + 45.0, left_t + 3.0, false);
            p.text_right(&fmt_amount(&row.tax), 7.5, left + 65.0, left_t + 3.0, false);
            p.text_right(
                &fmt_amount(&row.net_value()),
                7.5,
                left + 90.0,
                left_t + 3.0,
                false,
            );
            left_t += 4.5;
        }
    } else if template.shows_terms() {
        p.text("Terms & Conditions", 7.5, left, left_t + 3.5, true);
        left_t += 5.5;
        for line in terms_lines {
            p.text(line, 7.5, left, left_t + 3.0, false);
            left_t += 4.0;
        }
    }

    // Right block
    fn money_row(p: &Painter, x1: f32, x2: f32, t: &mut f32, label: &str, amount: &str, bold: bool) {
        p.text(label, 8.0, x1, *t + 3.5, bold);
        p.text_right(amount, 8.0, x2, *t + 3.5, bold);
        *t += 4.5;
    }
    let mut right_t = t;
    let row = &mut right_t;
    money_row(p, label_x, value_x, row, "Taxable Amount", &fmt_amount(&totals.total_taxable), false);
    if totals.total_igst.is_zero() {
        money_row(p, label_x, value_x, row, "CGST", &fmt_amount(&totals.total_cgst), false);
        money_row(p, label_x, value_x, row, "SGST", &fmt_amount(&totals.total_sgst), false);
    } else {
        money_row(p, label_x, value_x, row, "IGST", &fmt_amount(&totals.total_igst), false);
    }
    money_row(p, label_x, value_x, row, "Round Off", &fmt_amount(&totals.round_off), false);
    p.hline(label_x, value_x, right_t + 0.5);
    right_t += 1.5;
    money_row(
        p,
        label_x,
        value_x,
        &mut right_t,
        "GRAND TOTAL",
        &format!("{} {}", CURRENCY, fmt_amount(&totals.net_payable())),
        true,
    );

    // Words line spans the full width under both blocks
    let mut tail_t = left_t.max(right_t) + 4.0;
    p.text(
        &format!(
            "Bill Amount In Words : {}",
            amount_in_words(&totals.net_payable())
        ),
        8.0,
        left,
        tail_t + 3.0,
        true,
    );
    tail_t += 7.0;

    // Bank details left, signature anchor right
    if template.shows_bank_details() {
        if let Some(bank) = &profile.bank {
            p.text("Bank Details", 7.5, left, tail_t + 3.5, true);
            p.text(&format!("Bank: {}", bank.bank_name), 7.5, left, tail_t + 7.5, false);
            p.text(
                &format!("A/C No: {}", bank.account_no),
                7.5,
                left,
                tail_t + 11.5,
                false,
            );
            p.text(&format!("IFSC: {}", bank.ifsc), 7.5, left, tail_t + 15.5, false);
        }
    }
    p.text_right(
        &format!("For {}", profile.company_name),
        8.5,
        value_x,
        tail_t + 3.5,
        true,
    );
    tail_t += 18.0;

    p.text("Receiver's Signature", 8.0, left, tail_t + 3.0, false);
    p.text_right("Authorised Signatory", 8.0, value_x, tail_t + 3.0, false);
    tail_t += 10.0;

    p.text_center(
        &format!(
            "{} | This is a computer generated invoice.",
            profile.jurisdiction_clause()
        ),
        7.0,
        PAGE_WIDTH / 2.0,
        tail_t + 3.0,
        false,
    );
}
