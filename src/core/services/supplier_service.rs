use uuid::Uuid;

use crate::domain::{supplier, Supplier};
use crate::errors::{LedgerError, Result};
use crate::forms::{FormField, ValidationErrors};
use crate::storage::RecordStore;

pub struct SupplierService;

impl SupplierService {
    /// Registers a new active supplier. Names are unique, ignoring case.
    pub fn add(store: &mut dyn RecordStore, name: &str) -> Result<Supplier> {
        let name = name.trim();
        if name.is_empty() {
            let mut errors = ValidationErrors::default();
            errors.push(FormField::Supplier, "supplier name is required");
            return Err(errors.into());
        }
        if Self::by_name(store, name)?.is_some() {
            return Err(LedgerError::InvalidReference(format!(
                "supplier `{name}` already exists"
            )));
        }
        let created = store.create_supplier(Supplier::new(name))?;
        tracing::info!(id = %created.id, name = %created.name, "supplier added");
        Ok(created)
    }

    pub fn list(store: &dyn RecordStore) -> Result<Vec<Supplier>> {
        store.list_suppliers()
    }

    /// Suppliers that may be picked for a new purchase.
    pub fn selectable(store: &dyn RecordStore) -> Result<Vec<Supplier>> {
        let suppliers = store.list_suppliers()?;
        Ok(supplier::selectable(&suppliers).cloned().collect())
    }

    /// Looks a supplier up by id or by case-insensitive name.
    pub fn resolve(store: &dyn RecordStore, reference: &str) -> Result<Supplier> {
        let reference = reference.trim();
        if let Ok(id) = Uuid::parse_str(reference) {
            if let Some(found) = store.list_suppliers()?.into_iter().find(|s| s.id == id) {
                return Ok(found);
            }
        }
        Self::by_name(store, reference)?
            .ok_or_else(|| LedgerError::InvalidReference(format!("unknown supplier `{reference}`")))
    }

    fn by_name(store: &dyn RecordStore, name: &str) -> Result<Option<Supplier>> {
        Ok(store
            .list_suppliers()?
            .into_iter()
            .find(|supplier| supplier.name.eq_ignore_ascii_case(name)))
    }
}
