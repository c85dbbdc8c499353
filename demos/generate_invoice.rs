//! End-to-end invoice generation: draft, finalize, render, write to disk
//!
//! Run with: cargo run --example generate_invoice

use bigdecimal::BigDecimal;
use billing_core::{
    BankDetails, Billing, BillingResult, BillingStorage, CompanyProfile, GstSlab, InvoiceCategory,
    MemoryStorage, Party, Product,
};
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> BillingResult<()> {
    println!("=== Invoice Generation Demo ===\n");

    let products = vec![
        Product {
            id: "para-500".into(),
            name: "Paracetamol 500".into(),
            batch: "PX19".into(),
            expiry: "10/27".into(),
            hsn: "3004".into(),
            gst_slab: GstSlab::Twelve,
            mrp: BigDecimal::from(35),
            sale_rate: BigDecimal::from(28),
            stock: 500,
        },
        Product {
            id: "cough-syr".into(),
            name: "Cough Syrup 100ml".into(),
            batch: "CS44".into(),
            expiry: "06/26".into(),
            hsn: "3004".into(),
            gst_slab: GstSlab::Twelve,
            mrp: BigDecimal::from(95),
            sale_rate: BigDecimal::from(72),
            stock: 120,
        },
        Product {
            id: "band-aid".into(),
            name: "Adhesive Bandage".into(),
            batch: "AB02".into(),
            expiry: "01/28".into(),
            hsn: "3005".into(),
            gst_slab: GstSlab::Five,
            mrp: BigDecimal::from(15),
            sale_rate: BigDecimal::from(11),
            stock: 900,
        },
    ];

    let mut billing = Billing::new(MemoryStorage::with_products(&products));
    billing
        .set_profile(CompanyProfile {
            company_name: "Shree Medical Agencies".into(),
            address_line1: "14 Station Road".into(),
            address_line2: "Ahmedabad 380001".into(),
            gstin: "24AAACB1234C1ZZ".into(),
            dl_no1: "GJ-AD-123".into(),
            dl_no2: "GJ-AD-456".into(),
            dl_no3: None,
            dl_no4: None,
            phone: "079-2550-1234, 98250-11111".into(),
            email: "billing@shreemedical.example".into(),
            terms: "Goods once sold will not be taken back or exchanged. \
                    Interest at 18% p.a. will be charged on overdue bills."
                .into(),
            jurisdiction: Some("Ahmedabad".into()),
            bank: Some(BankDetails {
                bank_name: "State Bank of India".into(),
                account_no: "3055 2214 9987".into(),
                ifsc: "SBIN0002345".into(),
            }),
            invoice_template: None,
            use_uniform_gst: false,
            uniform_gst_slab: None,
        })
        .await?;

    let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap_or_default();
    let mut draft = billing.new_draft(InvoiceCategory::Wholesale, date).await?;
    println!("Opened draft {}", draft.invoice_no);

    draft.set_buyer(Some(Party {
        name: "City Pharma".into(),
        gstin: Some("24AAPFU0939F1ZV".into()),
        address: "7 Relief Road, Ahmedabad".into(),
        phone: Some("98250-22222".into()),
    }));
    draft.gr_no = Some("GR-104".into());
    draft.transport = Some("Speedline Carriers".into());

    draft.add_item(&products[0], 40)?;
    draft.add_item(&products[1], 12)?;
    draft.add_item(&products[2], 60)?;
    draft.update_item(0, |line| {
        line.discount_percent = BigDecimal::from(5);
        line.free_quantity = 4;
    })?;

    let totals = draft.totals();
    println!("Cart taxable  : {}", totals.total_taxable);
    println!("Cart tax      : {}", totals.total_tax());
    println!("Net payable   : {}", totals.net_payable());

    let invoice = billing.finalize(draft).await?;
    println!("\nFinalized {} ({} lines)", invoice.invoice_no, invoice.items.len());
    println!(
        "Stock after sale: para-500 = {:?}",
        billing.storage().get_stock("para-500").await?
    );

    let document = billing.render_document(&invoice).await?;
    std::fs::write(&document.file_name, &document.bytes)
        .map_err(|e| billing_core::BillingError::Render(e.to_string()))?;
    println!(
        "Wrote {} ({} bytes)",
        document.file_name,
        document.bytes.len()
    );

    Ok(())
}
