use uuid::Uuid;

use crate::core::identity::Identity;
use crate::domain::{RecordKind, Sale, SalePatch};
use crate::errors::{LedgerError, Result};
use crate::forms::SaleForm;
use crate::storage::RecordStore;

use super::{delete_prompt, Confirm, RemoveOutcome};

/// Validated CRUD helpers for sales.
pub struct SaleService;

impl SaleService {
    pub fn add(store: &mut dyn RecordStore, form: &SaleForm, identity: &Identity) -> Result<Sale> {
        let data = form.validate(identity.display_name()).map_err(|errors| {
            tracing::warn!(errors = %errors, "sale rejected");
            LedgerError::from(errors)
        })?;
        let sale = store.create_sale(data)?;
        tracing::info!(
            id = %sale.id,
            product = %sale.product_name,
            total = sale.total_sale_amount,
            "sale recorded"
        );
        Ok(sale)
    }

    pub fn update(store: &mut dyn RecordStore, id: Uuid, form: &SaleForm) -> Result<Sale> {
        let data = form.validate("").map_err(|errors| {
            tracing::warn!(%id, errors = %errors, "sale update rejected");
            LedgerError::from(errors)
        })?;
        let sale = store.update_sale(id, SalePatch::from(data))?;
        tracing::info!(%id, total = sale.total_sale_amount, "sale updated");
        Ok(sale)
    }

    pub fn remove(
        store: &mut dyn RecordStore,
        id: Uuid,
        confirm: &mut dyn Confirm,
    ) -> Result<RemoveOutcome<Sale>> {
        let target = Self::find(store, id)?;
        if !confirm.confirm(&delete_prompt(RecordKind::Sale, &target.product_name)) {
            tracing::info!(%id, "sale delete cancelled");
            return Ok(RemoveOutcome::Cancelled);
        }
        let removed = store.delete_sale(id)?;
        tracing::info!(%id, product = %removed.product_name, "sale deleted");
        Ok(RemoveOutcome::Removed(removed))
    }

    pub fn find(store: &dyn RecordStore, id: Uuid) -> Result<Sale> {
        store
            .list_sales()?
            .into_iter()
            .find(|sale| sale.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("sale {id}")))
    }

    pub fn list(store: &dyn RecordStore) -> Result<Vec<Sale>> {
        store.list_sales()
    }
}
