//! GST line computation walkthrough
//!
//! Run with: cargo run --example tax_computation

use bigdecimal::BigDecimal;
use billing_core::{
    aggregate, amount_in_words, compute_line, hsn_summary, GstSlab, LineItem, StateCode,
};

fn main() {
    println!("=== GST Line Computation Demo ===\n");

    let seller = StateCode::new("24").expect("valid state code");
    let local_buyer = StateCode::new("24").expect("valid state code");
    let outstation_buyer = StateCode::new("27").expect("valid state code");

    let line = LineItem {
        product_id: "para-500".into(),
        name: "Paracetamol 500".into(),
        batch: "PX19".into(),
        expiry: "10/27".into(),
        hsn: "3004".into(),
        mrp: BigDecimal::from(35),
        sale_rate: BigDecimal::from(100),
        quantity: 10,
        free_quantity: 2,
        discount_percent: BigDecimal::from(10),
        gst_slab: GstSlab::Twelve,
    };

    println!(
        "Line: {} x{} @ {} ({}% discount, {} slab, {} free)",
        line.name, line.quantity, line.sale_rate, line.discount_percent, line.gst_slab,
        line.free_quantity
    );

    println!("\n-- Intra-state sale (24 -> 24) --");
    let intra = compute_line(&line, &seller, &local_buyer);
    println!("Taxable value : {}", intra.taxable_value);
    println!("CGST          : {}", intra.cgst_amount);
    println!("SGST          : {}", intra.sgst_amount);
    println!("IGST          : {}", intra.igst_amount);
    println!("Line total    : {}", intra.total_amount);

    println!("\n-- Inter-state sale (24 -> 27) --");
    let inter = compute_line(&line, &seller, &outstation_buyer);
    println!("Taxable value : {}", inter.taxable_value);
    println!("CGST          : {}", inter.cgst_amount);
    println!("SGST          : {}", inter.sgst_amount);
    println!("IGST          : {}", inter.igst_amount);
    println!("Line total    : {}", inter.total_amount);

    println!("\n-- Invoice totals --");
    let second = LineItem {
        product_id: "band-aid".into(),
        name: "Adhesive Bandage".into(),
        batch: "AB02".into(),
        expiry: "01/28".into(),
        hsn: "3005".into(),
        mrp: BigDecimal::from(15),
        sale_rate: BigDecimal::from(100),
        quantity: 5,
        free_quantity: 0,
        discount_percent: BigDecimal::from(0),
        gst_slab: GstSlab::Five,
    };
    let items = vec![intra, compute_line(&second, &seller, &local_buyer)];
    let totals = aggregate(&items);
    println!("Total taxable : {}", totals.total_taxable);
    println!("Total tax     : {}", totals.total_tax());
    println!("Grand total   : {}", totals.grand_total);
    println!("Round off     : {}", totals.round_off);
    println!("Net payable   : {}", totals.net_payable());
    println!("In words      : {}", amount_in_words(&totals.net_payable()));

    println!("\n-- HSN summary --");
    for row in hsn_summary(&items) {
        println!(
            "HSN {:>6}  taxable {:>10}  tax {:>8}  net {:>10}",
            row.hsn,
            row.taxable,
            row.tax,
            row.net_value()
        );
    }
}
