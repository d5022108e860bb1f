use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNKNOWN_SUPPLIER: &str = "Unknown Supplier";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }
}

/// Resolves a supplier id to its display name, falling back to a placeholder.
pub fn supplier_name(suppliers: &[Supplier], id: Uuid) -> &str {
    suppliers
        .iter()
        .find(|supplier| supplier.id == id)
        .map(|supplier| supplier.name.as_str())
        .unwrap_or(UNKNOWN_SUPPLIER)
}

/// Suppliers offered in selection lists; inactive ones are hidden.
pub fn selectable(suppliers: &[Supplier]) -> impl Iterator<Item = &Supplier> {
    suppliers.iter().filter(|supplier| supplier.is_active)
}
