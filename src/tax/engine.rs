//! Line-level GST computation engine
//!
//! The split rule is jurisdictional: when buyer and seller share a state
//! code the tax is levied as equal CGST and SGST halves, otherwise the
//! whole amount is levied as IGST. Exactly one of the two shapes is
//! non-zero on any computed line.

use bigdecimal::{BigDecimal, Zero};

use crate::types::{ComputedLineItem, LineItem, StateCode};

/// Compute the tax split for a single cart line
///
/// Pure and total over its numeric domain: negative rates, quantities or
/// discounts are not rejected and flow through as mathematically
/// consistent output, which keeps credit/return lines expressible. Free
/// units never enter the taxable base.
///
/// Must be re-invoked whenever a line field changes, and for every line
/// whenever the buyer changes, because the inter-/intra-state
/// classification depends on the buyer.
pub fn compute_line(
    item: &LineItem,
    seller_state: &StateCode,
    buyer_state: &StateCode,
) -> ComputedLineItem {
    let hundred = BigDecimal::from(100);

    let base_amount = &item.sale_rate * BigDecimal::from(item.quantity);
    let discount_amount = &base_amount * &item.discount_percent / &hundred;
    let taxable_value = base_amount - discount_amount;

    let total_tax = &taxable_value * item.gst_slab.rate() / &hundred;

    let (cgst_amount, sgst_amount, igst_amount) = if seller_state != buyer_state {
        (BigDecimal::zero(), BigDecimal::zero(), total_tax.clone())
    } else {
        let half = &total_tax / BigDecimal::from(2);
        (half.clone(), half, BigDecimal::zero())
    };

    let total_amount = &taxable_value + &total_tax;

    ComputedLineItem {
        item: item.clone(),
        taxable_value,
        cgst_amount,
        sgst_amount,
        igst_amount,
        total_amount,
    }
}

/// Recompute every line of a cart against the current buyer
///
/// Used when the buyer (and therefore the jurisdiction classification)
/// changes while lines are already entered.
pub fn recompute_all(
    items: &[ComputedLineItem],
    seller_state: &StateCode,
    buyer_state: &StateCode,
) -> Vec<ComputedLineItem> {
    items
        .iter()
        .map(|computed| compute_line(&computed.item, seller_state, buyer_state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GstSlab;

    fn sample_line() -> LineItem {
        LineItem {
            product_id: "p1".into(),
            name: "Paracetamol 500mg".into(),
            batch: "B2401".into(),
            expiry: "08/27".into(),
            hsn: "3004".into(),
            mrp: BigDecimal::from(120),
            sale_rate: BigDecimal::from(100),
            quantity: 10,
            free_quantity: 0,
            discount_percent: BigDecimal::from(10),
            gst_slab: GstSlab::Twelve,
        }
    }

    fn state(code: &str) -> StateCode {
        StateCode::new(code).unwrap()
    }

    #[test]
    fn intra_state_splits_tax_into_equal_halves() {
        let computed = compute_line(&sample_line(), &state("24"), &state("24"));

        assert_eq!(computed.taxable_value, BigDecimal::from(900));
        assert_eq!(computed.cgst_amount, BigDecimal::from(54));
        assert_eq!(computed.sgst_amount, BigDecimal::from(54));
        assert_eq!(computed.igst_amount, BigDecimal::from(0));
        assert_eq!(computed.total_amount, BigDecimal::from(1008));
    }

    #[test]
    fn inter_state_levies_igst_only() {
        let computed = compute_line(&sample_line(), &state("24"), &state("27"));

        assert_eq!(computed.igst_amount, BigDecimal::from(108));
        assert_eq!(computed.cgst_amount, BigDecimal::from(0));
        assert_eq!(computed.sgst_amount, BigDecimal::from(0));
        assert_eq!(computed.total_amount, BigDecimal::from(1008));
    }

    #[test]
    fn split_shapes_are_mutually_exclusive() {
        for buyer in ["24", "27"] {
            let computed = compute_line(&sample_line(), &state("24"), &state(buyer));
            let has_split = computed.cgst_amount != BigDecimal::from(0)
                || computed.sgst_amount != BigDecimal::from(0);
            let has_igst = computed.igst_amount != BigDecimal::from(0);
            assert!(!(has_split && has_igst));
            assert_eq!(computed.cgst_amount, computed.sgst_amount);
        }
    }

    #[test]
    fn total_equals_taxable_plus_all_tax_components() {
        let computed = compute_line(&sample_line(), &state("24"), &state("27"));
        let reassembled = &computed.taxable_value
            + &computed.cgst_amount
            + &computed.sgst_amount
            + &computed.igst_amount;
        assert_eq!(computed.total_amount, reassembled);
    }

    #[test]
    fn free_quantity_never_changes_the_tax() {
        let without_free = compute_line(&sample_line(), &state("24"), &state("24"));

        let mut line = sample_line();
        line.free_quantity = 5;
        let with_free = compute_line(&line, &state("24"), &state("24"));

        assert_eq!(with_free.taxable_value, without_free.taxable_value);
        assert_eq!(with_free.cgst_amount, without_free.cgst_amount);
        assert_eq!(with_free.sgst_amount, without_free.sgst_amount);
        assert_eq!(with_free.igst_amount, without_free.igst_amount);
        assert_eq!(with_free.total_amount, without_free.total_amount);
    }

    #[test]
    fn zero_rate_slab_produces_no_tax() {
        let mut line = sample_line();
        line.gst_slab = GstSlab::Zero;
        line.discount_percent = BigDecimal::from(0);

        let computed = compute_line(&line, &state("24"), &state("24"));
        assert_eq!(computed.taxable_value, BigDecimal::from(1000));
        assert_eq!(computed.total_tax(), BigDecimal::from(0));
        assert_eq!(computed.total_amount, BigDecimal::from(1000));
    }

    #[test]
    fn negative_quantity_flows_through_consistently() {
        // Returns are modeled as negative quantities; the engine does not
        // clamp them, it just keeps the arithmetic consistent.
        let mut line = sample_line();
        line.quantity = -2;
        line.discount_percent = BigDecimal::from(0);

        let computed = compute_line(&line, &state("24"), &state("24"));
        assert_eq!(computed.taxable_value, BigDecimal::from(-200));
        assert_eq!(
            computed.total_amount,
            &computed.taxable_value + computed.total_tax()
        );
    }

    #[test]
    fn recompute_all_reclassifies_every_line() {
        let intra: Vec<_> = (0..3)
            .map(|_| compute_line(&sample_line(), &state("24"), &state("24")))
            .collect();
        let inter = recompute_all(&intra, &state("24"), &state("27"));

        assert_eq!(inter.len(), 3);
        for line in &inter {
            assert_eq!(line.cgst_amount, BigDecimal::from(0));
            assert_eq!(line.igst_amount, BigDecimal::from(108));
        }
    }
}
