#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use shop_ledger::{
    config::ConfigManager,
    core::{clock::FixedClock, identity::Identity, manager::RecordsManager},
    storage::JsonStore,
    utils::paths,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Tuesday; the Sunday-start week runs 2024-08-18..=2024-08-24.
pub fn today() -> NaiveDate {
    date(2024, 8, 20)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated manager backed by a JSON file in a unique directory.
pub fn setup_test_env() -> (RecordsManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let store = JsonStore::open(paths::records_file_in(&base)).expect("open json store");
    let manager = RecordsManager::with_clock(Box::new(store), Arc::new(FixedClock::new(today())))
        .with_identity(Identity::new(Some("Asha".into())));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (manager, config_manager, base)
}

/// Records a purchase through the form workflow.
pub fn record_purchase(
    manager: &mut RecordsManager,
    supplier: &str,
    product: &str,
    quantity: &str,
    price: &str,
    on: NaiveDate,
) -> shop_ledger::domain::Purchase {
    let supplier = match manager.resolve_supplier(supplier) {
        Ok(existing) => existing,
        Err(_) => manager.add_supplier(supplier).expect("add supplier"),
    };
    manager.open_new_purchase();
    let form = manager.purchase_form_mut().expect("purchase form open");
    form.product_name = product.into();
    form.supplier_id = Some(supplier.id);
    form.unit = "kg".into();
    form.purchase_date = on;
    form.set_quantity_input(quantity);
    form.set_price_input(price);
    manager.submit_purchase().expect("submit purchase")
}

/// Records a sale, letting purchase history fill in category, unit and price.
pub fn record_sale(
    manager: &mut RecordsManager,
    product: &str,
    quantity: &str,
    on: NaiveDate,
) -> shop_ledger::domain::Sale {
    manager.open_new_sale();
    manager
        .select_sale_product(product)
        .expect("select sale product");
    let form = manager.sale_form_mut().expect("sale form open");
    if form.unit.is_empty() {
        form.unit = "plates".into();
        form.set_price_input("100");
    }
    form.sale_date = on;
    form.set_quantity_input(quantity);
    manager.submit_sale().expect("submit sale")
}
