use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Product categories shared by purchases and sales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Vegetables,
    Meat,
    Dairy,
    Spices,
    Grains,
    Other,
    PreparedFood,
    Beverages,
}

/// Categories offered when logging a purchase.
pub const PURCHASE_CATEGORIES: [Category; 6] = [
    Category::Vegetables,
    Category::Meat,
    Category::Dairy,
    Category::Spices,
    Category::Grains,
    Category::Other,
];

/// Categories offered when logging a sale, prepared goods first.
pub const SALE_CATEGORIES: [Category; 8] = [
    Category::PreparedFood,
    Category::Beverages,
    Category::Vegetables,
    Category::Meat,
    Category::Dairy,
    Category::Spices,
    Category::Grains,
    Category::Other,
];

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Vegetables,
        Category::Meat,
        Category::Dairy,
        Category::Spices,
        Category::Grains,
        Category::Other,
        Category::PreparedFood,
        Category::Beverages,
    ];

    /// Stable keyword used in filters, CSV rows and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Meat => "meat",
            Category::Dairy => "dairy",
            Category::Spices => "spices",
            Category::Grains => "grains",
            Category::Other => "other",
            Category::PreparedFood => "prepared_food",
            Category::Beverages => "beverages",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::Spices => "Spices",
            Category::Grains => "Grains",
            Category::Other => "Other",
            Category::PreparedFood => "Prepared Food",
            Category::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// How a sale was paid for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
    Upi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Online,
        PaymentMethod::Upi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Online => "online",
            PaymentMethod::Upi => "upi",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == normalized)
            .ok_or_else(|| UnknownPaymentMethod(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_and_labels() {
        assert_eq!("prepared_food".parse::<Category>(), Ok(Category::PreparedFood));
        assert_eq!("Prepared Food".parse::<Category>(), Ok(Category::PreparedFood));
        assert_eq!(" DAIRY ".parse::<Category>(), Ok(Category::Dairy));
        assert!("fruit".parse::<Category>().is_err());
    }

    #[test]
    fn purchase_catalog_excludes_prepared_goods() {
        assert!(!PURCHASE_CATEGORIES.contains(&Category::PreparedFood));
        assert!(!PURCHASE_CATEGORIES.contains(&Category::Beverages));
        assert_eq!(SALE_CATEGORIES[0], Category::PreparedFood);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Category::PreparedFood).unwrap();
        assert_eq!(json, "\"prepared_food\"");
        let method: PaymentMethod = serde_json::from_str("\"upi\"").unwrap();
        assert_eq!(method, PaymentMethod::Upi);
    }
}
