pub mod purchase_service;
pub mod sale_service;
pub mod summary_service;
pub mod supplier_service;

pub use purchase_service::PurchaseService;
pub use sale_service::SaleService;
pub use summary_service::SummaryService;
pub use supplier_service::SupplierService;

use crate::domain::RecordKind;

/// Asks the operator to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a delete request that needed confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome<T> {
    Removed(T),
    Cancelled,
}

impl<T> RemoveOutcome<T> {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed(_))
    }
}

/// Confirmation wording shown before deleting a record.
pub fn delete_prompt(kind: RecordKind, product_name: &str) -> String {
    format!("Are you sure you want to delete this {kind} record for \"{product_name}\"?")
}
