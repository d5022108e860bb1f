use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Category, NewPurchase, Purchase, PURCHASE_CATEGORIES};

use super::validation::{
    optional_text, parse_number, require_positive, require_text, FormField, ValidationErrors,
};

/// Input state for the "add purchase" and "edit purchase" forms.
///
/// Quantity and unit price are only reachable through setters so the derived
/// total never drifts from its two factors.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseForm {
    pub product_name: String,
    pub category: Category,
    pub supplier_id: Option<Uuid>,
    pub unit: String,
    pub purchase_date: NaiveDate,
    pub invoice_number: String,
    pub notes: String,
    quantity: f64,
    price_per_unit: f64,
    total: f64,
}

impl PurchaseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            product_name: String::new(),
            category: Category::Vegetables,
            supplier_id: None,
            unit: String::new(),
            purchase_date: today,
            invoice_number: String::new(),
            notes: String::new(),
            quantity: 0.0,
            price_per_unit: 0.0,
            total: 0.0,
        }
    }

    pub fn from_purchase(purchase: &Purchase) -> Self {
        Self {
            product_name: purchase.product_name.clone(),
            category: purchase.category,
            supplier_id: Some(purchase.supplier_id),
            unit: purchase.unit.clone(),
            purchase_date: purchase.purchase_date,
            invoice_number: purchase.invoice_number.clone().unwrap_or_default(),
            notes: purchase.notes.clone(),
            quantity: purchase.quantity,
            price_per_unit: purchase.purchase_price_per_unit,
            total: purchase.quantity * purchase.purchase_price_per_unit,
        }
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price_per_unit(&self) -> f64 {
        self.price_per_unit
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.recompute_total();
    }

    pub fn set_price_per_unit(&mut self, price: f64) {
        self.price_per_unit = price;
        self.recompute_total();
    }

    pub fn set_quantity_input(&mut self, input: &str) {
        self.set_quantity(parse_number(input));
    }

    pub fn set_price_input(&mut self, input: &str) {
        self.set_price_per_unit(parse_number(input));
    }

    fn recompute_total(&mut self) {
        self.total = self.quantity * self.price_per_unit;
    }

    /// Restores the blank "add" state dated `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn validate(&self, created_by: &str) -> Result<NewPurchase, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require_text(&mut errors, FormField::ProductName, &self.product_name);
        if !PURCHASE_CATEGORIES.contains(&self.category) {
            errors.push(FormField::Category, "category is not offered for purchases");
        }
        if self.supplier_id.is_none() {
            errors.push(FormField::Supplier, "supplier must be selected");
        }
        require_positive(&mut errors, FormField::Quantity, self.quantity);
        require_text(&mut errors, FormField::Unit, &self.unit);
        require_positive(&mut errors, FormField::UnitPrice, self.price_per_unit);

        let (true, Some(supplier_id)) = (errors.is_empty(), self.supplier_id) else {
            return Err(errors);
        };
        Ok(NewPurchase {
            product_name: self.product_name.trim().to_string(),
            category: self.category,
            supplier_id,
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            purchase_price_per_unit: self.price_per_unit,
            total_purchase_cost: self.total,
            purchase_date: self.purchase_date,
            invoice_number: optional_text(&self.invoice_number),
            notes: self.notes.trim().to_string(),
            created_by: created_by.to_string(),
        })
    }
}
