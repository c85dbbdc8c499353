//! In-memory storage backend, for tests and embedding without a database

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::traits::BillingStorage;
use crate::types::*;

#[derive(Debug, Default)]
struct Store {
    profile: Option<CompanyProfile>,
    /// Committed invoices in commit order
    invoices: Vec<Invoice>,
    /// Units on hand per product id
    stock: HashMap<String, i64>,
}

/// Thread-safe in-memory implementation of [`BillingStorage`]
///
/// Cheap to clone; clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Store>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stock ledger from a product catalogue
    pub fn with_products(products: &[Product]) -> Self {
        let storage = Self::new();
        if let Ok(mut store) = storage.inner.write() {
            for product in products {
                store.stock.insert(product.id.clone(), product.stock);
            }
        }
        storage
    }

    fn read(&self) -> BillingResult<std::sync::RwLockReadGuard<'_, Store>> {
        self.inner
            .read()
            .map_err(|e| BillingError::Storage(format!("Lock poisoned: {e}")))
    }

    fn write(&self) -> BillingResult<std::sync::RwLockWriteGuard<'_, Store>> {
        self.inner
            .write()
            .map_err(|e| BillingError::Storage(format!("Lock poisoned: {e}")))
    }
}

#[async_trait]
impl BillingStorage for MemoryStorage {
    async fn save_profile(&mut self, profile: &CompanyProfile) -> BillingResult<()> {
        self.write()?.profile = Some(profile.clone());
        Ok(())
    }

    async fn get_profile(&self) -> BillingResult<Option<CompanyProfile>> {
        Ok(self.read()?.profile.clone())
    }

    async fn commit_invoice(&mut self, invoice: &Invoice) -> BillingResult<()> {
        let mut store = self.write()?;

        if store
            .invoices
            .iter()
            .any(|existing| existing.invoice_no == invoice.invoice_no)
        {
            return Err(BillingError::InvalidInvoice(format!(
                "Invoice number '{}' already exists",
                invoice.invoice_no
            )));
        }

        // Stage every decrement against a copy first; the live ledger is
        // only replaced once all lines resolved, so a missing product
        // leaves nothing behind
        let mut staged = store.stock.clone();
        for line in &invoice.items {
            let on_hand = staged
                .get_mut(&line.item.product_id)
                .ok_or_else(|| BillingError::ProductNotFound(line.item.product_id.clone()))?;
            *on_hand -= line.item.units_dispatched();
        }

        store.stock = staged;
        store.invoices.push(invoice.clone());
        Ok(())
    }

    async fn get_invoice(&self, invoice_no: &str) -> BillingResult<Option<Invoice>> {
        Ok(self
            .read()?
            .invoices
            .iter()
            .find(|inv| inv.invoice_no == invoice_no)
            .cloned())
    }

    async fn list_invoices(&self) -> BillingResult<Vec<Invoice>> {
        let store = self.read()?;
        Ok(store.invoices.iter().rev().cloned().collect())
    }

    async fn invoice_count(&self) -> BillingResult<u64> {
        Ok(self.read()?.invoices.len() as u64)
    }

    async fn get_stock(&self, product_id: &str) -> BillingResult<Option<i64>> {
        Ok(self.read()?.stock.get(product_id).copied())
    }

    async fn set_stock(&mut self, product_id: &str, on_hand: i64) -> BillingResult<()> {
        self.write()?.stock.insert(product_id.to_string(), on_hand);
        Ok(())
    }
}
