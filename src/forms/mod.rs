//! Transient form state for adding and editing records.
//!
//! Each form owns its raw input, keeps the derived total (quantity × unit
//! price) in step with its factors, and validates synchronously before
//! anything reaches a store.

pub mod modal;
pub mod purchase_form;
pub mod sale_form;
pub mod validation;

pub use modal::FormModal;
pub use purchase_form::PurchaseForm;
pub use sale_form::{purchased_products, ProductSuggestion, SaleForm, SUGGESTED_MARKUP};
pub use validation::{parse_number, FieldError, FormField, ValidationErrors};
