//! Record types for purchases, sales and suppliers.

pub mod category;
pub mod purchase;
pub mod record;
pub mod sale;
pub mod supplier;

pub use category::{Category, PaymentMethod, PURCHASE_CATEGORIES, SALE_CATEGORIES};
pub use purchase::{NewPurchase, Purchase, PurchasePatch};
pub use record::{Record, RecordKind, RecordRef};
pub use sale::{NewSale, Sale, SalePatch};
pub use supplier::{supplier_name, Supplier, UNKNOWN_SUPPLIER};
