use chrono::NaiveDate;

use crate::domain::{Category, NewSale, PaymentMethod, Purchase, Sale};

use super::validation::{
    optional_text, parse_number, require_positive, require_text, FormField, ValidationErrors,
};

/// Markup applied to the last purchase price when suggesting a sale price.
pub const SUGGESTED_MARKUP: f64 = 1.4;

/// Input state for the "add sale" and "edit sale" forms.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleForm {
    pub product_name: String,
    pub category: Category,
    pub unit: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    pub sale_date: NaiveDate,
    pub notes: String,
    quantity: f64,
    price_per_unit: f64,
    total: f64,
}

impl SaleForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            product_name: String::new(),
            category: Category::PreparedFood,
            unit: String::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            payment_method: PaymentMethod::Cash,
            sale_date: today,
            notes: String::new(),
            quantity: 0.0,
            price_per_unit: 0.0,
            total: 0.0,
        }
    }

    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            product_name: sale.product_name.clone(),
            category: sale.category,
            unit: sale.unit.clone(),
            customer_name: sale.customer_name.clone().unwrap_or_default(),
            customer_phone: sale.customer_phone.clone().unwrap_or_default(),
            payment_method: sale.payment_method,
            sale_date: sale.sale_date,
            notes: sale.notes.clone(),
            quantity: sale.quantity,
            price_per_unit: sale.sale_price_per_unit,
            total: sale.quantity * sale.sale_price_per_unit,
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
        self.total = self.quantity * self.price_per_unit;
    }

    pub fn set_price_per_unit(&mut self, price: f64) {
        self.price_per_unit = price;
        self.total = self.quantity * self.price_per_unit;
    }

    pub fn set_quantity_input(&mut self, input: &str) {
        self.set_quantity(parse_number(input));
    }

    pub fn set_price_input(&mut self, input: &str) {
        self.set_price_per_unit(parse_number(input));
    }

    /// Picks a product for the sale. A previously purchased product also
    /// pre-fills category, unit and a marked-up price from its latest purchase.
    pub fn select_product(&mut self, product_name: &str, purchases: &[Purchase]) {
        match ProductSuggestion::from_history(product_name, purchases) {
            Some(suggestion) => {
                self.product_name = product_name.to_string();
                self.category = suggestion.category;
                self.unit = suggestion.unit;
                self.set_price_per_unit(suggestion.sale_price_per_unit);
            }
            None => self.product_name = product_name.to_string(),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn validate(&self, created_by: &str) -> Result<NewSale, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require_text(&mut errors, FormField::ProductName, &self.product_name);
        require_positive(&mut errors, FormField::Quantity, self.quantity);
        require_text(&mut errors, FormField::Unit, &self.unit);
        require_positive(&mut errors, FormField::UnitPrice, self.price_per_unit);
        errors.into_result()?;

        Ok(NewSale {
            product_name: self.product_name.trim().to_string(),
            category: self.category,
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            sale_price_per_unit: self.price_per_unit,
            total_sale_amount: self.total,
            sale_date: self.sale_date,
            customer_name: optional_text(&self.customer_name),
            customer_phone: optional_text(&self.customer_phone),
            payment_method: self.payment_method,
            notes: self.notes.trim().to_string(),
            created_by: created_by.to_string(),
        })
    }
}

/// Defaults derived from the latest purchase of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSuggestion {
    pub category: Category,
    pub unit: String,
    pub sale_price_per_unit: f64,
}

impl ProductSuggestion {
    /// Uses the most recent purchase of `product_name`; the first one listed wins ties.
    pub fn from_history(product_name: &str, purchases: &[Purchase]) -> Option<Self> {
        let mut latest: Option<&Purchase> = None;
        for purchase in purchases.iter().filter(|p| p.product_name == product_name) {
            match latest {
                Some(current) if purchase.purchase_date <= current.purchase_date => {}
                _ => latest = Some(purchase),
            }
        }
        latest.map(|purchase| Self {
            category: purchase.category,
            unit: purchase.unit.clone(),
            sale_price_per_unit: (purchase.purchase_price_per_unit * SUGGESTED_MARKUP).round(),
        })
    }
}

/// Unique product names seen in purchases, sorted.
pub fn purchased_products(purchases: &[Purchase]) -> Vec<String> {
    let mut names: Vec<String> = purchases
        .iter()
        .map(|purchase| purchase.product_name.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPurchase;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn purchase(name: &str, date: NaiveDate, price: f64, unit: &str) -> Purchase {
        Purchase::from_new(NewPurchase {
            product_name: name.into(),
            category: Category::Dairy,
            supplier_id: Uuid::new_v4(),
            quantity: 1.0,
            unit: unit.into(),
            purchase_price_per_unit: price,
            total_purchase_cost: price,
            purchase_date: date,
            invoice_number: None,
            notes: String::new(),
            created_by: "tester".into(),
        })
    }

    #[test]
    fn zero_quantity_blocks_submission() {
        let mut form = SaleForm::new(day(1));
        form.product_name = "Veg Biryani".into();
        form.unit = "plates".into();
        form.set_price_per_unit(180.0);
        let errors = form.validate("Ravi").expect_err("zero quantity is rejected");
        assert_eq!(errors.messages(), vec!["quantity must be greater than 0"]);
        assert!(errors.has(FormField::Quantity));
    }

    #[test]
    fn optional_customer_fields_become_none() {
        let mut form = SaleForm::new(day(1));
        form.product_name = "Lassi".into();
        form.unit = "pieces".into();
        form.customer_name = "  ".into();
        form.customer_phone = " 98765 ".into();
        form.set_quantity(2.0);
        form.set_price_per_unit(60.0);
        let data = form.validate("Ravi").unwrap();
        assert_eq!(data.customer_name, None);
        assert_eq!(data.customer_phone.as_deref(), Some("98765"));
        assert_eq!(data.total_sale_amount, 120.0);
    }

    #[test]
    fn selecting_purchased_product_suggests_marked_up_price() {
        let purchases = vec![
            purchase("Paneer", day(2), 300.0, "kg"),
            purchase("Paneer", day(9), 320.0, "g"),
            purchase("Curd", day(10), 50.0, "liters"),
        ];
        let mut form = SaleForm::new(day(11));
        form.set_quantity(2.0);
        form.select_product("Paneer", &purchases);
        assert_eq!(form.unit, "g");
        assert_eq!(form.category, Category::Dairy);
        assert_eq!(form.price_per_unit(), 448.0);
        assert_eq!(form.total(), 896.0);
    }

    #[test]
    fn selecting_unknown_product_only_sets_name() {
        let mut form = SaleForm::new(day(11));
        form.select_product("Masala Dosa", &[]);
        assert_eq!(form.product_name, "Masala Dosa");
        assert_eq!(form.category, Category::PreparedFood);
        assert_eq!(form.price_per_unit(), 0.0);
    }

    #[test]
    fn latest_purchase_ties_keep_first_listed() {
        let purchases = vec![
            purchase("Milk", day(5), 40.0, "liters"),
            purchase("Milk", day(5), 60.0, "ml"),
        ];
        let suggestion = ProductSuggestion::from_history("Milk", &purchases).unwrap();
        assert_eq!(suggestion.unit, "liters");
        assert_eq!(suggestion.sale_price_per_unit, 56.0);
    }

    #[test]
    fn purchased_products_are_unique_and_sorted() {
        let purchases = vec![
            purchase("Tomato", day(1), 1.0, "kg"),
            purchase("Onion", day(1), 1.0, "kg"),
            purchase("Tomato", day(2), 1.0, "kg"),
        ];
        assert_eq!(purchased_products(&purchases), vec!["Onion", "Tomato"]);
    }
}
