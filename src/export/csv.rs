//! CSV rendering for purchase and sale lists.
//!
//! Free-text columns (product, supplier/customer name, notes) are wrapped in
//! double quotes so embedded commas survive. Quote characters inside those
//! fields are written through as-is and are not doubled, so a value such as
//! `He said "great"` yields a malformed field for strict CSV readers.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::core::filter::DateRange;
use crate::domain::{supplier_name, Purchase, RecordKind, Sale, Supplier};

pub const CSV_MIME_TYPE: &str = "text/csv";

pub const PURCHASE_HEADER: &str = "Date,Product Name,Category,Supplier,Quantity,Unit,Price Per Unit,Total Cost,Invoice Number,Notes,Created By";
pub const SALE_HEADER: &str = "Date,Product Name,Category,Quantity,Unit,Price Per Unit,Total Amount,Customer Name,Customer Phone,Payment Method,Notes,Created By";

/// A rendered export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
    pub row_count: usize,
}

/// `purchases_this_week_2024-05-15.csv` style names.
pub fn export_filename(kind: RecordKind, range: &DateRange, today: NaiveDate) -> String {
    format!(
        "{}_{}_{}.csv",
        kind.plural(),
        range.keyword(),
        today.format("%Y-%m-%d")
    )
}

pub fn export_purchases(
    purchases: &[&Purchase],
    suppliers: &[Supplier],
    range: &DateRange,
    today: NaiveDate,
) -> CsvExport {
    let mut content = String::from(PURCHASE_HEADER);
    content.push('\n');
    for purchase in purchases {
        let _ = writeln!(
            content,
            "{},{},{},{},{},{},{},{},{},{},{}",
            purchase.purchase_date.format("%Y-%m-%d"),
            quoted(&purchase.product_name),
            purchase.category,
            quoted(supplier_name(suppliers, purchase.supplier_id)),
            purchase.quantity,
            purchase.unit,
            purchase.purchase_price_per_unit,
            purchase.total_purchase_cost,
            purchase.invoice_number.as_deref().unwrap_or(""),
            quoted(&purchase.notes),
            purchase.created_by,
        );
    }
    CsvExport {
        filename: export_filename(RecordKind::Purchase, range, today),
        mime_type: CSV_MIME_TYPE,
        content,
        row_count: purchases.len(),
    }
}

pub fn export_sales(sales: &[&Sale], range: &DateRange, today: NaiveDate) -> CsvExport {
    let mut content = String::from(SALE_HEADER);
    content.push('\n');
    for sale in sales {
        let _ = writeln!(
            content,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            sale.sale_date.format("%Y-%m-%d"),
            quoted(&sale.product_name),
            sale.category,
            sale.quantity,
            sale.unit,
            sale.sale_price_per_unit,
            sale.total_sale_amount,
            quoted(sale.customer_name.as_deref().unwrap_or("")),
            sale.customer_phone.as_deref().unwrap_or(""),
            sale.payment_method,
            quoted(&sale.notes),
            sale.created_by,
        );
    }
    CsvExport {
        filename: export_filename(RecordKind::Sale, range, today),
        mime_type: CSV_MIME_TYPE,
        content,
        row_count: sales.len(),
    }
}

// Embedded quotes are not escaped; see the module docs.
fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}
