//! Folding computed lines into invoice-level totals and the HSN summary

use bigdecimal::RoundingMode;

use crate::types::{ComputedLineItem, HsnSummaryRow, InvoiceTotals};

/// Sum the computed lines into invoice totals
///
/// An empty slice aggregates to all-zero totals; aggregation never fails.
/// `round_off` is the signed difference between the rounded grand total
/// (half away from zero, the amount the document displays) and the raw
/// sum. The displayed payable already equals the rounded value; the
/// round-off is informational, not re-added.
pub fn aggregate(items: &[ComputedLineItem]) -> InvoiceTotals {
    let mut totals = InvoiceTotals::zero();

    for line in items {
        totals.total_taxable += &line.taxable_value;
        totals.total_cgst += &line.cgst_amount;
        totals.total_sgst += &line.sgst_amount;
        totals.total_igst += &line.igst_amount;
        totals.grand_total += &line.total_amount;
    }

    totals.round_off =
        totals.grand_total.with_scale_round(0, RoundingMode::HalfUp) - &totals.grand_total;
    totals
}

/// Group lines by HSN code for the tax summary table
///
/// Derived on demand at render time and never persisted. Groups appear in
/// order of first occurrence among the lines, so the summary reads in the
/// same order the items were entered.
pub fn hsn_summary(items: &[ComputedLineItem]) -> Vec<HsnSummaryRow> {
    let mut rows: Vec<HsnSummaryRow> = Vec::new();

    for line in items {
        match rows.iter_mut().find(|row| row.hsn == line.item.hsn) {
            Some(row) => {
                row.taxable += &line.taxable_value;
                row.tax += line.total_tax();
            }
            None => rows.push(HsnSummaryRow {
                hsn: line.item.hsn.clone(),
                taxable: line.taxable_value.clone(),
                tax: line.total_tax(),
            }),
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::compute_line;
    use crate::types::{GstSlab, LineItem, StateCode};
    use bigdecimal::{BigDecimal, Zero};
    use std::str::FromStr;

    fn line(hsn: &str, rate: i64, qty: i64, discount: i64, slab: GstSlab) -> ComputedLineItem {
        let item = LineItem {
            product_id: format!("p-{hsn}"),
            name: format!("Item {hsn}"),
            batch: "B1".into(),
            expiry: "12/26".into(),
            hsn: hsn.into(),
            mrp: BigDecimal::from(rate),
            sale_rate: BigDecimal::from(rate),
            quantity: qty,
            free_quantity: 0,
            discount_percent: BigDecimal::from(discount),
            gst_slab: slab,
        };
        let state = StateCode::new("24").unwrap();
        compute_line(&item, &state, &state)
    }

    #[test]
    fn empty_cart_aggregates_to_zero() {
        let totals = aggregate(&[]);
        assert_eq!(totals, InvoiceTotals::zero());
        assert!(hsn_summary(&[]).is_empty());
    }

    #[test]
    fn totals_are_plain_sums_of_the_lines() {
        let items = vec![
            line("3004", 100, 10, 10, GstSlab::Twelve),
            line("3005", 100, 5, 0, GstSlab::Five),
        ];
        let totals = aggregate(&items);

        let expected_taxable: BigDecimal =
            items.iter().map(|i| i.taxable_value.clone()).sum();
        assert_eq!(totals.total_taxable, expected_taxable);
        assert_eq!(totals.grand_total, BigDecimal::from(1533));
        assert_eq!(totals.round_off, BigDecimal::zero());
        assert_eq!(totals.net_payable(), BigDecimal::from(1533));
    }

    #[test]
    fn round_off_is_rounded_minus_raw() {
        let items = vec![line("3004", 33, 1, 0, GstSlab::Five)];
        // 33 + 5% = 34.65, rounds up to 35
        let totals = aggregate(&items);
        assert_eq!(totals.grand_total, BigDecimal::from_str("34.65").unwrap());
        assert_eq!(totals.net_payable(), BigDecimal::from(35));
        assert_eq!(totals.round_off, BigDecimal::from_str("0.35").unwrap());
    }

    #[test]
    fn hsn_groups_keep_first_seen_order() {
        let items = vec![
            line("3004", 100, 10, 10, GstSlab::Twelve),
            line("3005", 100, 5, 0, GstSlab::Five),
            line("3004", 50, 2, 0, GstSlab::Twelve),
        ];
        let summary = hsn_summary(&items);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].hsn, "3004");
        assert_eq!(summary[1].hsn, "3005");
        assert_eq!(summary[0].taxable, BigDecimal::from(1000));
    }

    #[test]
    fn summary_net_values_reassemble_the_unrounded_grand_total() {
        let items = vec![
            line("3004", 100, 10, 10, GstSlab::Twelve),
            line("3005", 100, 5, 0, GstSlab::Five),
            line("9018", 33, 1, 0, GstSlab::Eighteen),
        ];
        let totals = aggregate(&items);
        let summary = hsn_summary(&items);

        let reassembled: BigDecimal = summary.iter().map(|row| row.net_value()).sum();
        assert_eq!(reassembled, totals.grand_total);
        assert_eq!(reassembled, totals.net_payable() - &totals.round_off);
    }

    #[test]
    fn worked_example_two_hsn_codes() {
        let items = vec![
            line("3004", 100, 10, 10, GstSlab::Twelve),
            line("3005", 100, 5, 0, GstSlab::Five),
        ];
        let summary = hsn_summary(&items);

        assert_eq!(summary[0].taxable, BigDecimal::from(900));
        assert_eq!(summary[0].tax, BigDecimal::from(108));
        assert_eq!(summary[1].taxable, BigDecimal::from(500));
        assert_eq!(summary[1].tax, BigDecimal::from(25));
        assert_eq!(aggregate(&items).grand_total, BigDecimal::from(1533));
    }
}
