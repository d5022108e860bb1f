use assert_fs::prelude::*;
use chrono::NaiveDate;
use predicates::prelude::*;
use shop_ledger::{
    config::{Config, ConfigManager},
    core::filter::WeekStart,
    domain::{Category, NewPurchase, Supplier},
    errors::LedgerError,
    storage::{JsonStore, RecordStore},
    utils::persistence::tmp_path,
};
use std::fs;
use uuid::Uuid;

fn new_purchase(supplier_id: Uuid, quantity: f64) -> NewPurchase {
    NewPurchase {
        product_name: "Basmati Rice".into(),
        category: Category::Grains,
        supplier_id,
        quantity,
        unit: "kg".into(),
        purchase_price_per_unit: 90.0,
        total_purchase_cost: quantity * 90.0,
        purchase_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        invoice_number: Some("INV-7".into()),
        notes: String::new(),
        created_by: "Asha".into(),
    }
}

#[test]
fn records_file_and_backup_are_written() {
    let temp = assert_fs::TempDir::new().unwrap();
    let records = temp.child("records.json");
    let mut store = JsonStore::open(records.path()).unwrap();

    let supplier = store.create_supplier(Supplier::new("Rice Mill")).unwrap();
    records.assert(predicate::path::exists());
    temp.child("records.json.bak").assert(predicate::path::missing());

    store.create_purchase(new_purchase(supplier.id, 5.0)).unwrap();
    records.assert(predicate::str::contains("Basmati Rice"));
    let backup = fs::read_to_string(temp.child("records.json.bak").path()).unwrap();
    assert!(backup.contains("Rice Mill"));
    assert!(!backup.contains("Basmati"), "backup holds the previous version");

    temp.close().unwrap();
}

#[test]
fn failed_write_keeps_file_and_memory_unchanged() {
    let temp = assert_fs::TempDir::new().unwrap();
    let records = temp.child("records.json");
    let mut store = JsonStore::open(records.path()).unwrap();
    let supplier = store.create_supplier(Supplier::new("Rice Mill")).unwrap();
    let original = fs::read_to_string(records.path()).unwrap();

    // A directory squatting on the staging path makes File::create fail.
    fs::create_dir_all(tmp_path(records.path())).unwrap();
    let result = store.create_purchase(new_purchase(supplier.id, 2.0));

    assert!(matches!(result, Err(LedgerError::Io(_))));
    assert!(store.list_purchases().unwrap().is_empty());
    assert!(store.status().error.is_some());
    assert_eq!(fs::read_to_string(records.path()).unwrap(), original);
}

#[test]
fn newer_schema_versions_are_refused() {
    let temp = assert_fs::TempDir::new().unwrap();
    let records = temp.child("records.json");
    records
        .write_str(r#"{"schema_version": 99, "purchases": [], "sales": [], "suppliers": []}"#)
        .unwrap();

    let err = JsonStore::open(records.path()).unwrap_err();
    assert!(matches!(err, LedgerError::Store(_)), "{err}");
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let temp = assert_fs::TempDir::new().unwrap();
    let records = temp.child("records.json");
    records.write_str("{}").unwrap();

    let store = JsonStore::open(records.path()).unwrap();
    assert!(store.list_sales().unwrap().is_empty());
    assert!(store.list_suppliers().unwrap().is_empty());
}

#[test]
fn config_round_trips_through_disk() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    assert_eq!(manager.load().unwrap(), Config::default());

    let mut config = Config::default();
    config.set("week_start", "monday").unwrap();
    config.set("operator", "Ravi").unwrap();
    config.set("sale_units", "plates, bowls").unwrap();
    manager.save(&config).unwrap();

    temp.child("config.json")
        .assert(predicate::str::contains("\"week_start\": \"monday\""));
    let loaded = manager.load().unwrap();
    assert_eq!(loaded.week_start, WeekStart::Monday);
    assert_eq!(loaded.operator.as_deref(), Some("Ravi"));
    assert_eq!(loaded.sale_units, vec!["plates".to_string(), "bowls".to_string()]);
}
