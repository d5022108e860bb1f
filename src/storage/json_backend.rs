use std::{
    fs,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::domain::{NewPurchase, NewSale, Purchase, PurchasePatch, Sale, SalePatch, Supplier};
use crate::errors::{LedgerError, Result};
use crate::utils::persistence::{ensure_dir, write_atomic};

use super::{RecordBook, RecordStore, StoreStatus, CURRENT_SCHEMA_VERSION};

const BACKUP_SUFFIX: &str = "bak";

/// Store persisted as a single JSON document.
///
/// Every mutation is applied to a copy of the book, written atomically, and
/// only then committed in memory; a failed write leaves both the file and the
/// in-memory records as they were.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    book: RecordBook,
    last_error: Option<String>,
}

impl JsonStore {
    /// Opens `path`, starting from an empty book when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let book = if path.exists() {
            load_book_from_path(&path)?
        } else {
            RecordBook::default()
        };
        for warning in book.warnings() {
            tracing::warn!(file = %path.display(), "{warning}");
        }
        Ok(Self {
            path,
            book,
            last_error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    fn commit<T>(&mut self, mutate: impl FnOnce(&mut RecordBook) -> Result<T>) -> Result<T> {
        let mut next = self.book.clone();
        let outcome = mutate(&mut next).and_then(|value| {
            self.persist(&next)?;
            Ok(value)
        });
        match outcome {
            Ok(value) => {
                self.book = next;
                self.last_error = None;
                Ok(value)
            }
            Err(err) => {
                tracing::error!(file = %self.path.display(), error = %err, "store write rejected");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn persist(&self, book: &RecordBook) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        if self.path.exists() {
            fs::copy(&self.path, self.backup_path())?;
        }
        save_book_to_path(book, &self.path)
    }
}

impl RecordStore for JsonStore {
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
        self.commit(|book| {
            let purchase = Purchase::from_new(data);
            book.purchases.push(purchase.clone());
            Ok(purchase)
        })
    }

    fn create_sale(&mut self, data: NewSale) -> Result<Sale> {
        self.commit(|book| {
            let sale = Sale::from_new(data);
            book.sales.push(sale.clone());
            Ok(sale)
        })
    }

    fn create_supplier(&mut self, supplier: Supplier) -> Result<Supplier> {
        self.commit(|book| {
            book.suppliers.push(supplier.clone());
            Ok(supplier)
        })
    }

    fn update_purchase(&mut self, id: Uuid, patch: PurchasePatch) -> Result<Purchase> {
        self.commit(|book| {
            let purchase = book
                .purchase_mut(id)
                .ok_or_else(|| LedgerError::NotFound(format!("purchase {id}")))?;
            purchase.apply(patch);
            Ok(purchase.clone())
        })
    }

    fn update_sale(&mut self, id: Uuid, patch: SalePatch) -> Result<Sale> {
        self.commit(|book| {
            let sale = book
                .sale_mut(id)
                .ok_or_else(|| LedgerError::NotFound(format!("sale {id}")))?;
            sale.apply(patch);
            Ok(sale.clone())
        })
    }

    fn delete_purchase(&mut self, id: Uuid) -> Result<Purchase> {
        self.commit(|book| {
            book.remove_purchase(id)
                .ok_or_else(|| LedgerError::NotFound(format!("purchase {id}")))
        })
    }

    fn delete_sale(&mut self, id: Uuid) -> Result<Sale> {
        self.commit(|book| {
            book.remove_sale(id)
                .ok_or_else(|| LedgerError::NotFound(format!("sale {id}")))
        })
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            loading: false,
            error: self.last_error.clone(),
        }
    }
}

pub fn save_book_to_path(book: &RecordBook, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    write_atomic(path, &json)
}

pub fn load_book_from_path(path: &Path) -> Result<RecordBook> {
    let data = fs::read_to_string(path)?;
    let book: RecordBook = serde_json::from_str(&data)?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Store(format!(
            "`{}` was written by a newer schema version ({})",
            path.display(),
            book.schema_version
        )));
    }
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn new_purchase(supplier_id: Uuid) -> NewPurchase {
        NewPurchase {
            product_name: "Chicken".into(),
            category: Category::Meat,
            supplier_id,
            quantity: 5.0,
            unit: "kg".into(),
            purchase_price_per_unit: 220.0,
            total_purchase_cost: 1100.0,
            purchase_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            invoice_number: None,
            notes: "fresh".into(),
            created_by: "Asha".into(),
        }
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut store = JsonStore::open(&path).unwrap();
        let supplier = store.create_supplier(Supplier::new("City Meats")).unwrap();
        let created = store.create_purchase(new_purchase(supplier.id)).unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.list_purchases().unwrap(), vec![created]);
        assert_eq!(reopened.list_suppliers().unwrap().len(), 1);
        assert!(reopened.book().warnings().is_empty());
    }

    #[test]
    fn overwrite_keeps_previous_file_as_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut store = JsonStore::open(&path).unwrap();
        store.create_supplier(Supplier::new("A")).unwrap();
        store.create_supplier(Supplier::new("B")).unwrap();

        let backup = load_book_from_path(&store.backup_path()).unwrap();
        assert_eq!(backup.suppliers.len(), 1);
    }

    #[test]
    fn failed_update_reports_status_and_keeps_records() {
        let dir = tempdir().unwrap();
        let mut store = JsonStore::open(dir.path().join("records.json")).unwrap();
        let err = store
            .update_sale(Uuid::new_v4(), SalePatch::default())
            .expect_err("unknown sale");
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert!(store.status().error.is_some());
        assert!(store.list_sales().unwrap().is_empty());
    }

    #[test]
    fn rejects_newer_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, r#"{"schema_version": 99}"#).unwrap();
        assert!(matches!(JsonStore::open(&path), Err(LedgerError::Store(_))));
    }
}
