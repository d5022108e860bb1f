//! Filtering, aggregation and the services that sit between forms and stores.

pub mod aggregate;
pub mod clock;
pub mod filter;
pub mod identity;
pub mod manager;
pub mod services;

pub use manager::RecordsManager;
