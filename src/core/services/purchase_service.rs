//! Business logic helpers for managing purchase records.

use uuid::Uuid;

use crate::core::identity::Identity;
use crate::domain::{Purchase, PurchasePatch, RecordKind};
use crate::errors::{LedgerError, Result};
use crate::forms::PurchaseForm;
use crate::storage::RecordStore;

use super::{delete_prompt, Confirm, RemoveOutcome};

/// Validated CRUD helpers for purchases.
pub struct PurchaseService;

impl PurchaseService {
    /// Validates `form` and creates a purchase attributed to `identity`.
    pub fn add(
        store: &mut dyn RecordStore,
        form: &PurchaseForm,
        identity: &Identity,
    ) -> Result<Purchase> {
        let data = form.validate(identity.display_name()).map_err(|errors| {
            tracing::warn!(errors = %errors, "purchase rejected");
            LedgerError::from(errors)
        })?;
        ensure_supplier(store, data.supplier_id)?;
        let purchase = store.create_purchase(data)?;
        tracing::info!(
            id = %purchase.id,
            product = %purchase.product_name,
            total = purchase.total_purchase_cost,
            "purchase recorded"
        );
        Ok(purchase)
    }

    /// Applies the edited form to the purchase identified by `id`.
    ///
    /// The original author of the record is preserved.
    pub fn update(store: &mut dyn RecordStore, id: Uuid, form: &PurchaseForm) -> Result<Purchase> {
        let data = form.validate("").map_err(|errors| {
            tracing::warn!(%id, errors = %errors, "purchase update rejected");
            LedgerError::from(errors)
        })?;
        ensure_supplier(store, data.supplier_id)?;
        let purchase = store.update_purchase(id, PurchasePatch::from(data))?;
        tracing::info!(%id, total = purchase.total_purchase_cost, "purchase updated");
        Ok(purchase)
    }

    /// Deletes the purchase once `confirm` approves the prompt naming it.
    pub fn remove(
        store: &mut dyn RecordStore,
        id: Uuid,
        confirm: &mut dyn Confirm,
    ) -> Result<RemoveOutcome<Purchase>> {
        let target = Self::find(store, id)?;
        if !confirm.confirm(&delete_prompt(RecordKind::Purchase, &target.product_name)) {
            tracing::info!(%id, "purchase delete cancelled");
            return Ok(RemoveOutcome::Cancelled);
        }
        let removed = store.delete_purchase(id)?;
        tracing::info!(%id, product = %removed.product_name, "purchase deleted");
        Ok(RemoveOutcome::Removed(removed))
    }

    pub fn find(store: &dyn RecordStore, id: Uuid) -> Result<Purchase> {
        store
            .list_purchases()?
            .into_iter()
            .find(|purchase| purchase.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("purchase {id}")))
    }

    pub fn list(store: &dyn RecordStore) -> Result<Vec<Purchase>> {
        store.list_purchases()
    }
}

fn ensure_supplier(store: &dyn RecordStore, supplier_id: Uuid) -> Result<()> {
    if store
        .list_suppliers()?
        .iter()
        .any(|supplier| supplier.id == supplier_id)
    {
        Ok(())
    } else {
        tracing::warn!(%supplier_id, "purchase references unknown supplier");
        Err(LedgerError::InvalidReference(format!(
            "supplier {supplier_id} does not exist"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Supplier};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn form_for(supplier: &Supplier) -> PurchaseForm {
        let mut form = PurchaseForm::new(today());
        form.product_name = "Onions".into();
        form.category = Category::Vegetables;
        form.supplier_id = Some(supplier.id);
        form.unit = "kg".into();
        form.set_quantity(10.0);
        form.set_price_per_unit(30.0);
        form
    }

    fn store_with_supplier() -> (MemoryStore, Supplier) {
        let mut store = MemoryStore::new();
        let supplier = store.create_supplier(Supplier::new("Green Farms")).unwrap();
        (store, supplier)
    }

    #[test]
    fn add_attributes_operator_and_total() {
        let (mut store, supplier) = store_with_supplier();
        let identity = Identity::new(Some("Ravi".into()));
        let purchase = PurchaseService::add(&mut store, &form_for(&supplier), &identity).unwrap();
        assert_eq!(purchase.created_by, "Ravi");
        assert_eq!(purchase.total_purchase_cost, 300.0);
        assert_eq!(store.book().purchases.len(), 1);
    }

    #[test]
    fn unknown_supplier_is_rejected_before_store_write() {
        let (mut store, _) = store_with_supplier();
        let stranger = Supplier::new("Nobody");
        let err = PurchaseService::add(&mut store, &form_for(&stranger), &Identity::anonymous())
            .expect_err("supplier must exist");
        assert!(matches!(err, LedgerError::InvalidReference(_)));
        assert!(store.book().purchases.is_empty());
    }

    #[test]
    fn update_keeps_author_and_recomputes_total() {
        let (mut store, supplier) = store_with_supplier();
        let identity = Identity::new(Some("Ravi".into()));
        let created = PurchaseService::add(&mut store, &form_for(&supplier), &identity).unwrap();

        let mut form = PurchaseForm::from_purchase(&created);
        form.set_quantity(4.0);
        let updated = PurchaseService::update(&mut store, created.id, &form).unwrap();
        assert_eq!(updated.total_purchase_cost, 120.0);
        assert_eq!(updated.created_by, "Ravi");
    }

    #[test]
    fn remove_respects_confirmation() {
        let (mut store, supplier) = store_with_supplier();
        let created =
            PurchaseService::add(&mut store, &form_for(&supplier), &Identity::anonymous()).unwrap();

        let mut asked = Vec::new();
        let mut decline = |prompt: &str| {
            asked.push(prompt.to_string());
            false
        };
        let outcome = PurchaseService::remove(&mut store, created.id, &mut decline).unwrap();
        assert_eq!(outcome, RemoveOutcome::Cancelled);
        assert_eq!(
            asked,
            vec!["Are you sure you want to delete this purchase record for \"Onions\"?"]
        );
        assert_eq!(store.book().purchases.len(), 1);

        let mut accept = |_: &str| true;
        let outcome = PurchaseService::remove(&mut store, created.id, &mut accept).unwrap();
        assert!(outcome.is_removed());
        assert!(store.book().purchases.is_empty());
    }
}
