use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{Category, PaymentMethod};

/// Goods sold to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: Uuid,
    pub product_name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: String,
    pub sale_price_per_unit: f64,
    pub total_sale_amount: f64,
    pub sale_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
    pub created_by: String,
}

impl Sale {
    pub fn from_new(data: NewSale) -> Self {
        Self {
            id: Uuid::new_v4(),
            total_sale_amount: data.quantity * data.sale_price_per_unit,
            product_name: data.product_name,
            category: data.category,
            quantity: data.quantity,
            unit: data.unit,
            sale_price_per_unit: data.sale_price_per_unit,
            sale_date: data.sale_date,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            payment_method: data.payment_method,
            notes: data.notes,
            created_by: data.created_by,
        }
    }

    /// Applies a patch and keeps the stored total equal to quantity × price.
    pub fn apply(&mut self, patch: SalePatch) {
        if let Some(name) = patch.product_name {
            self.product_name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(price) = patch.sale_price_per_unit {
            self.sale_price_per_unit = price;
        }
        if let Some(date) = patch.sale_date {
            self.sale_date = date;
        }
        if let Some(customer) = patch.customer_name {
            self.customer_name = customer;
        }
        if let Some(phone) = patch.customer_phone {
            self.customer_phone = phone;
        }
        if let Some(method) = patch.payment_method {
            self.payment_method = method;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.total_sale_amount = self.quantity * self.sale_price_per_unit;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSale {
    pub product_name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: String,
    pub sale_price_per_unit: f64,
    pub total_sale_amount: f64,
    pub sale_date: NaiveDate,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePatch {
    pub product_name: Option<String>,
    pub category: Option<Category>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub sale_price_per_unit: Option<f64>,
    pub sale_date: Option<NaiveDate>,
    pub customer_name: Option<Option<String>>,
    pub customer_phone: Option<Option<String>>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

impl From<NewSale> for SalePatch {
    fn from(data: NewSale) -> Self {
        Self {
            product_name: Some(data.product_name),
            category: Some(data.category),
            quantity: Some(data.quantity),
            unit: Some(data.unit),
            sale_price_per_unit: Some(data.sale_price_per_unit),
            sale_date: Some(data.sale_date),
            customer_name: Some(data.customer_name),
            customer_phone: Some(data.customer_phone),
            payment_method: Some(data.payment_method),
            notes: Some(data.notes),
        }
    }
}
