use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// Stock bought from a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub id: Uuid,
    pub product_name: String,
    pub category: Category,
    pub supplier_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub purchase_price_per_unit: f64,
    pub total_purchase_cost: f64,
    pub purchase_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub created_by: String,
}

impl Purchase {
    /// Materializes a validated submission under a fresh identifier.
    pub fn from_new(data: NewPurchase) -> Self {
        Self {
            id: Uuid::new_v4(),
            total_purchase_cost: data.quantity * data.purchase_price_per_unit,
            product_name: data.product_name,
            category: data.category,
            supplier_id: data.supplier_id,
            quantity: data.quantity,
            unit: data.unit,
            purchase_price_per_unit: data.purchase_price_per_unit,
            purchase_date: data.purchase_date,
            invoice_number: data.invoice_number,
            notes: data.notes,
            created_by: data.created_by,
        }
    }

    /// Applies a patch and keeps the stored total equal to quantity × price.
    pub fn apply(&mut self, patch: PurchasePatch) {
        if let Some(name) = patch.product_name {
            self.product_name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(supplier) = patch.supplier_id {
            self.supplier_id = supplier;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(price) = patch.purchase_price_per_unit {
            self.purchase_price_per_unit = price;
        }
        if let Some(date) = patch.purchase_date {
            self.purchase_date = date;
        }
        if let Some(invoice) = patch.invoice_number {
            self.invoice_number = invoice;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.total_purchase_cost = self.quantity * self.purchase_price_per_unit;
    }
}

/// Validated purchase data ready to hand to a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPurchase {
    pub product_name: String,
    pub category: Category,
    pub supplier_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub purchase_price_per_unit: f64,
    pub total_purchase_cost: f64,
    pub purchase_date: NaiveDate,
    pub invoice_number: Option<String>,
    pub notes: String,
    pub created_by: String,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchasePatch {
    pub product_name: Option<String>,
    pub category: Option<Category>,
    pub supplier_id: Option<Uuid>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub purchase_price_per_unit: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub invoice_number: Option<Option<String>>,
    pub notes: Option<String>,
}

impl From<NewPurchase> for PurchasePatch {
    fn from(data: NewPurchase) -> Self {
        Self {
            product_name: Some(data.product_name),
            category: Some(data.category),
            supplier_id: Some(data.supplier_id),
            quantity: Some(data.quantity),
            unit: Some(data.unit),
            purchase_price_per_unit: Some(data.purchase_price_per_unit),
            purchase_date: Some(data.purchase_date),
            invoice_number: Some(data.invoice_number),
            notes: Some(data.notes),
        }
    }
}
