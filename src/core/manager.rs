use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::aggregate::{CategoryBreakdown, ProfitSummary};
use crate::core::clock::{Clock, SystemClock};
use crate::core::filter::{FilterContext, FilterCriteria, WeekStart};
use crate::core::identity::Identity;
use crate::core::services::{
    Confirm, PurchaseService, RemoveOutcome, SaleService, SummaryService, SupplierService,
};
use crate::domain::{Purchase, RecordKind, Sale, Supplier};
use crate::errors::{LedgerError, Result};
use crate::export::{self, CsvExport};
use crate::forms::{purchased_products, FormModal, PurchaseForm, SaleForm};
use crate::storage::{RecordStore, StoreStatus};

/// Facade the screen talks to.
///
/// Owns the store, the operator identity, the active filter and the two
/// record forms. Form state survives a failed submission and is dropped on
/// success.
pub struct RecordsManager {
    store: Box<dyn RecordStore>,
    identity: Identity,
    clock: Arc<dyn Clock>,
    week_start: WeekStart,
    criteria: FilterCriteria,
    purchase_modal: FormModal<PurchaseForm>,
    sale_modal: FormModal<SaleForm>,
}

impl RecordsManager {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Box<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            identity: Identity::anonymous(),
            clock,
            week_start: WeekStart::default(),
            criteria: FilterCriteria::default(),
            purchase_modal: FormModal::Closed,
            sale_modal: FormModal::Closed,
        }
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn status(&self) -> StoreStatus {
        self.store.status()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.week_start = week_start;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn filter_context(&self) -> FilterContext {
        FilterContext::new(self.today(), self.week_start)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn open_new_purchase(&mut self) {
        self.purchase_modal = FormModal::open_new(PurchaseForm::new(self.today()));
    }

    pub fn open_edit_purchase(&mut self, id: Uuid) -> Result<()> {
        let purchase = PurchaseService::find(self.store.as_ref(), id)?;
        self.purchase_modal = FormModal::open_edit(id, PurchaseForm::from_purchase(&purchase));
        Ok(())
    }

    pub fn purchase_modal(&self) -> &FormModal<PurchaseForm> {
        &self.purchase_modal
    }

    pub fn purchase_form_mut(&mut self) -> Option<&mut PurchaseForm> {
        self.purchase_modal.form_mut()
    }

    pub fn close_purchase_form(&mut self) {
        self.purchase_modal.close();
    }

    /// Submits the open purchase form as a create or an update.
    pub fn submit_purchase(&mut self) -> Result<Purchase> {
        let (form, editing) = match &self.purchase_modal {
            FormModal::Open { form, editing } => (form, *editing),
            FormModal::Closed => return Err(LedgerError::FormClosed(RecordKind::Purchase)),
        };
        let saved = match editing {
            Some(id) => PurchaseService::update(self.store.as_mut(), id, form),
            None => PurchaseService::add(self.store.as_mut(), form, &self.identity),
        }?;
        self.purchase_modal.close();
        Ok(saved)
    }

    pub fn open_new_sale(&mut self) {
        self.sale_modal = FormModal::open_new(SaleForm::new(self.today()));
    }

    pub fn open_edit_sale(&mut self, id: Uuid) -> Result<()> {
        let sale = SaleService::find(self.store.as_ref(), id)?;
        self.sale_modal = FormModal::open_edit(id, SaleForm::from_sale(&sale));
        Ok(())
    }

    pub fn sale_modal(&self) -> &FormModal<SaleForm> {
        &self.sale_modal
    }

    pub fn sale_form_mut(&mut self) -> Option<&mut SaleForm> {
        self.sale_modal.form_mut()
    }

    pub fn close_sale_form(&mut self) {
        self.sale_modal.close();
    }

    /// Picks the product on the open sale form.
    ///
    /// A new sale is pre-filled from the purchase history of `product_name`;
    /// an edited sale only takes the new name and keeps its category, unit and price.
    pub fn select_sale_product(&mut self, product_name: &str) -> Result<()> {
        let purchases = self.store.list_purchases()?;
        match &mut self.sale_modal {
            FormModal::Open {
                form,
                editing: None,
            } => form.select_product(product_name, &purchases),
            FormModal::Open { form, .. } => form.product_name = product_name.to_string(),
            FormModal::Closed => return Err(LedgerError::FormClosed(RecordKind::Sale)),
        }
        Ok(())
    }

    pub fn submit_sale(&mut self) -> Result<Sale> {
        let (form, editing) = match &self.sale_modal {
            FormModal::Open { form, editing } => (form, *editing),
            FormModal::Closed => return Err(LedgerError::FormClosed(RecordKind::Sale)),
        };
        let saved = match editing {
            Some(id) => SaleService::update(self.store.as_mut(), id, form),
            None => SaleService::add(self.store.as_mut(), form, &self.identity),
        }?;
        self.sale_modal.close();
        Ok(saved)
    }

    pub fn delete_purchase(
        &mut self,
        id: Uuid,
        confirm: &mut dyn Confirm,
    ) -> Result<RemoveOutcome<Purchase>> {
        PurchaseService::remove(self.store.as_mut(), id, confirm)
    }

    pub fn delete_sale(&mut self, id: Uuid, confirm: &mut dyn Confirm) -> Result<RemoveOutcome<Sale>> {
        SaleService::remove(self.store.as_mut(), id, confirm)
    }

    pub fn suppliers(&self) -> Result<Vec<Supplier>> {
        SupplierService::list(self.store.as_ref())
    }

    pub fn add_supplier(&mut self, name: &str) -> Result<Supplier> {
        SupplierService::add(self.store.as_mut(), name)
    }

    pub fn resolve_supplier(&self, reference: &str) -> Result<Supplier> {
        SupplierService::resolve(self.store.as_ref(), reference)
    }

    pub fn filtered_purchases(&self) -> Result<Vec<Purchase>> {
        let purchases = self.store.list_purchases()?;
        let context = self.filter_context();
        Ok(self
            .criteria
            .apply(&purchases, &context)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn filtered_sales(&self) -> Result<Vec<Sale>> {
        let sales = self.store.list_sales()?;
        let context = self.filter_context();
        Ok(self
            .criteria
            .apply(&sales, &context)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn summary(&self) -> Result<ProfitSummary> {
        let purchases = self.store.list_purchases()?;
        let sales = self.store.list_sales()?;
        Ok(SummaryService::profit(
            &purchases,
            &sales,
            &self.criteria,
            &self.filter_context(),
        ))
    }

    pub fn breakdown(&self, kind: RecordKind) -> Result<CategoryBreakdown> {
        let context = self.filter_context();
        Ok(match kind {
            RecordKind::Purchase => {
                SummaryService::breakdown(&self.store.list_purchases()?, &self.criteria, &context)
            }
            RecordKind::Sale => {
                SummaryService::breakdown(&self.store.list_sales()?, &self.criteria, &context)
            }
        })
    }

    pub fn purchased_products(&self) -> Result<Vec<String>> {
        Ok(purchased_products(&self.store.list_purchases()?))
    }

    /// Builds the CSV payload for the filtered list of `kind`.
    pub fn export(&self, kind: RecordKind) -> Result<CsvExport> {
        let today = self.today();
        let range = &self.criteria.date_range;
        Ok(match kind {
            RecordKind::Purchase => {
                let purchases = self.filtered_purchases()?;
                let suppliers = self.store.list_suppliers()?;
                let rows: Vec<&Purchase> = purchases.iter().collect();
                export::export_purchases(&rows, &suppliers, range, today)
            }
            RecordKind::Sale => {
                let sales = self.filtered_sales()?;
                let rows: Vec<&Sale> = sales.iter().collect();
                export::export_sales(&rows, range, today)
            }
        })
    }

    pub fn export_to(&self, kind: RecordKind, dir: &Path) -> Result<PathBuf> {
        export::write_export(&self.export(kind)?, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::filter::DateRange;
    use crate::domain::Category;
    use crate::storage::MemoryStore;

    fn manager() -> RecordsManager {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 8, 20).unwrap()));
        RecordsManager::with_clock(Box::new(MemoryStore::new()), clock)
            .with_identity(Identity::new(Some("Priya".into())))
    }

    #[test]
    fn successful_submit_closes_the_form() {
        let mut manager = manager();
        let supplier = manager.add_supplier("Daily Dairy").unwrap();
        manager.open_new_purchase();
        let form = manager.purchase_form_mut().unwrap();
        form.product_name = "Paneer".into();
        form.category = Category::Dairy;
        form.supplier_id = Some(supplier.id);
        form.unit = "kg".into();
        form.set_quantity(2.0);
        form.set_price_per_unit(320.0);

        let saved = manager.submit_purchase().unwrap();
        assert_eq!(saved.created_by, "Priya");
        assert_eq!(saved.purchase_date, manager.today());
        assert!(!manager.purchase_modal().is_open());
    }

    #[test]
    fn rejected_submit_keeps_form_state() {
        let mut manager = manager();
        manager.open_new_sale();
        let form = manager.sale_form_mut().unwrap();
        form.product_name = "Samosa".into();
        form.unit = "pieces".into();
        form.set_price_per_unit(15.0);

        let err = manager.submit_sale().expect_err("quantity missing");
        assert!(err.is_validation());
        let form = manager.sale_modal().form().expect("form still open");
        assert_eq!(form.product_name, "Samosa");
        assert!(manager.filtered_sales().unwrap().is_empty());
    }

    #[test]
    fn submit_without_open_form_fails() {
        let mut manager = manager();
        assert!(matches!(
            manager.submit_sale(),
            Err(LedgerError::FormClosed(RecordKind::Sale))
        ));
    }

    #[test]
    fn edit_round_trip_updates_in_place() {
        let mut manager = manager();
        manager.open_new_sale();
        let form = manager.sale_form_mut().unwrap();
        form.product_name = "Chai".into();
        form.category = Category::Beverages;
        form.unit = "cups".into();
        form.set_quantity(10.0);
        form.set_price_per_unit(12.0);
        let created = manager.submit_sale().unwrap();

        manager.open_edit_sale(created.id).unwrap();
        manager.sale_form_mut().unwrap().set_quantity(12.0);
        let updated = manager.submit_sale().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.total_sale_amount, 144.0);
        assert_eq!(manager.filtered_sales().unwrap().len(), 1);
    }

    #[test]
    fn export_uses_active_date_filter_in_file_name() {
        let mut manager = manager();
        manager.criteria_mut().date_range = DateRange::ThisMonth;
        let export = manager.export(RecordKind::Sale).unwrap();
        assert_eq!(export.filename, "sales_this_month_2024-08-20.csv");
        assert_eq!(export.row_count, 0);
    }
}
