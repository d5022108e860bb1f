pub mod json_backend;
pub mod memory;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{NewPurchase, NewSale, Purchase, PurchasePatch, Sale, SalePatch, Supplier};
use crate::errors::Result;

pub use json_backend::JsonStore;
pub use memory::MemoryStore;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Loading flag and last failure reported by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Abstraction over the backend that owns purchase, sale and supplier records.
///
/// Implementations keep `total_*` fields equal to quantity × price whenever a
/// patch touches either factor.
pub trait RecordStore: Send {
    fn list_purchases(&self) -> Result<Vec<Purchase>>;
    fn list_sales(&self) -> Result<Vec<Sale>>;
    fn list_suppliers(&self) -> Result<Vec<Supplier>>;
    fn create_purchase(&mut self, data: NewPurchase) -> Result<Purchase>;
    fn create_sale(&mut self, data: NewSale) -> Result<Sale>;
    fn create_supplier(&mut self, supplier: Supplier) -> Result<Supplier>;
    fn update_purchase(&mut self, id: Uuid, patch: PurchasePatch) -> Result<Purchase>;
    fn update_sale(&mut self, id: Uuid, patch: SalePatch) -> Result<Sale>;
    fn delete_purchase(&mut self, id: Uuid) -> Result<Purchase>;
    fn delete_sale(&mut self, id: Uuid) -> Result<Sale>;
    fn status(&self) -> StoreStatus;
}

/// Everything a store persists, in one serializable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordBook {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
}

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl Default for RecordBook {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            purchases: Vec::new(),
            sales: Vec::new(),
            suppliers: Vec::new(),
        }
    }
}

impl RecordBook {
    pub fn purchase_mut(&mut self, id: Uuid) -> Option<&mut Purchase> {
        self.purchases.iter_mut().find(|purchase| purchase.id == id)
    }

    pub fn sale_mut(&mut self, id: Uuid) -> Option<&mut Sale> {
        self.sales.iter_mut().find(|sale| sale.id == id)
    }

    pub fn remove_purchase(&mut self, id: Uuid) -> Option<Purchase> {
        let index = self.purchases.iter().position(|purchase| purchase.id == id)?;
        Some(self.purchases.remove(index))
    }

    pub fn remove_sale(&mut self, id: Uuid) -> Option<Sale> {
        let index = self.sales.iter().position(|sale| sale.id == id)?;
        Some(self.sales.remove(index))
    }

    /// Detects dangling supplier references and totals that drifted from their factors.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for purchase in &self.purchases {
            if !self.suppliers.iter().any(|s| s.id == purchase.supplier_id) {
                warnings.push(format!(
                    "purchase {} references unknown supplier {}",
                    purchase.id, purchase.supplier_id
                ));
            }
            let expected = purchase.quantity * purchase.purchase_price_per_unit;
            if (purchase.total_purchase_cost - expected).abs() > 1e-6 {
                warnings.push(format!(
                    "purchase {} total {} does not match quantity × price {}",
                    purchase.id, purchase.total_purchase_cost, expected
                ));
            }
        }
        for sale in &self.sales {
            let expected = sale.quantity * sale.sale_price_per_unit;
            if (sale.total_sale_amount - expected).abs() > 1e-6 {
                warnings.push(format!(
                    "sale {} total {} does not match quantity × price {}",
                    sale.id, sale.total_sale_amount, expected
                ));
            }
        }
        warnings
    }
}
