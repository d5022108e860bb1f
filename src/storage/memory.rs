use uuid::Uuid;

use crate::domain::{NewPurchase, NewSale, Purchase, PurchasePatch, Sale, SalePatch, Supplier};
use crate::errors::{LedgerError, Result};

use super::{RecordBook, RecordStore, StoreStatus};

/// Volatile store backed by a [`RecordBook`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    book: RecordBook,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_book(book: RecordBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }
}

impl RecordStore for MemoryStore {
    fn list_purchases(&self) -> Result<Vec<Purchase>> {
        Ok(self.book.purchases.clone())
    }

    fn list_sales(&self) -> Result<Vec<Sale>> {
        Ok(self.book.sales.clone())
    }

    fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        Ok(self.book.suppliers.clone())
    }

    fn create_purchase(&mut self, data: NewPurchase) -> Result<Purchase> {
        let purchase = Purchase::from_new(data);
        self.book.purchases.push(purchase.clone());
        Ok(purchase)
    }

    fn create_sale(&mut self, data: NewSale) -> Result<Sale> {
        let sale = Sale::from_new(data);
        self.book.sales.push(sale.clone());
        Ok(sale)
    }

    fn create_supplier(&mut self, supplier: Supplier) -> Result<Supplier> {
        self.book.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    fn update_purchase(&mut self, id: Uuid, patch: PurchasePatch) -> Result<Purchase> {
        let purchase = self
            .book
            .purchase_mut(id)
            .ok_or_else(|| LedgerError::NotFound(format!("purchase {id}")))?;
        purchase.apply(patch);
        Ok(purchase.clone())
    }

    fn update_sale(&mut self, id: Uuid, patch: SalePatch) -> Result<Sale> {
        let sale = self
            .book
            .sale_mut(id)
            .ok_or_else(|| LedgerError::NotFound(format!("sale {id}")))?;
        sale.apply(patch);
        Ok(sale.clone())
    }

    fn delete_purchase(&mut self, id: Uuid) -> Result<Purchase> {
        self.book
            .remove_purchase(id)
            .ok_or_else(|| LedgerError::NotFound(format!("purchase {id}")))
    }

    fn delete_sale(&mut self, id: Uuid) -> Result<Sale> {
        self.book
            .remove_sale(id)
            .ok_or_else(|| LedgerError::NotFound(format!("sale {id}")))
    }

    fn status(&self) -> StoreStatus {
        StoreStatus::default()
    }
}
