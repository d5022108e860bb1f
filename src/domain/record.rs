use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{category::Category, purchase::Purchase, sale::Sale};

/// Which of the two record collections a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Purchase,
    Sale,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Purchase => "purchase",
            RecordKind::Sale => "sale",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Purchase => "purchases",
            RecordKind::Sale => "sales",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view over either record type with uniform accessors.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Purchase(&'a Purchase),
    Sale(&'a Sale),
}

impl<'a> RecordRef<'a> {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRef::Purchase(_) => RecordKind::Purchase,
            RecordRef::Sale(_) => RecordKind::Sale,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            RecordRef::Purchase(purchase) => purchase.id,
            RecordRef::Sale(sale) => sale.id,
        }
    }

    /// The purchase date or sale date, whichever applies.
    pub fn effective_date(&self) -> NaiveDate {
        match self {
            RecordRef::Purchase(purchase) => purchase.purchase_date,
            RecordRef::Sale(sale) => sale.sale_date,
        }
    }

    pub fn product_name(&self) -> &'a str {
        match self {
            RecordRef::Purchase(purchase) => &purchase.product_name,
            RecordRef::Sale(sale) => &sale.product_name,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            RecordRef::Purchase(purchase) => purchase.category,
            RecordRef::Sale(sale) => sale.category,
        }
    }

    /// Stored total cost (purchases) or amount (sales).
    pub fn total(&self) -> f64 {
        match self {
            RecordRef::Purchase(purchase) => purchase.total_purchase_cost,
            RecordRef::Sale(sale) => sale.total_sale_amount,
        }
    }
}

/// Implemented by record types that the filter and aggregate engine can consume.
pub trait Record {
    fn entry(&self) -> RecordRef<'_>;
}

impl Record for Purchase {
    fn entry(&self) -> RecordRef<'_> {
        RecordRef::Purchase(self)
    }
}

impl Record for Sale {
    fn entry(&self) -> RecordRef<'_> {
        RecordRef::Sale(self)
    }
}

impl<T: Record> Record for &T {
    fn entry(&self) -> RecordRef<'_> {
        (**self).entry()
    }
}
