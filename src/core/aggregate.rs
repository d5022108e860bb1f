//! Totals, profit/margin and per-category breakdowns over filtered records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Category, Purchase, Record, Sale};

/// Sum of stored totals (purchase cost or sale amount).
pub fn total<T: Record>(records: &[T]) -> f64 {
    records.iter().map(|record| record.entry().total()).sum()
}

/// Headline numbers shown above the record tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitSummary {
    pub total_purchases: f64,
    pub total_sales: f64,
    pub profit: f64,
    /// Percentage of sales revenue; 0 when there were no sales.
    pub margin: f64,
    pub purchase_count: usize,
    pub sale_count: usize,
}

impl ProfitSummary {
    pub fn compute(purchases: &[&Purchase], sales: &[&Sale]) -> Self {
        let total_purchases = total(purchases);
        let total_sales = total(sales);
        Self::from_totals(total_purchases, total_sales, purchases.len(), sales.len())
    }

    pub fn from_totals(
        total_purchases: f64,
        total_sales: f64,
        purchase_count: usize,
        sale_count: usize,
    ) -> Self {
        let profit = total_sales - total_purchases;
        Self {
            total_purchases,
            total_sales,
            profit,
            margin: percentage(profit, total_sales),
            purchase_count,
            sale_count,
        }
    }

    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub subtotal: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Per-category subtotals of a record list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub total: f64,
    pub shares: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    /// Largest subtotal first; ties keep category order.
    pub fn compute<T: Record>(records: &[T]) -> Self {
        let mut buckets: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
        for record in records {
            let entry = record.entry();
            let bucket = buckets.entry(entry.category()).or_insert((0.0, 0));
            bucket.0 += entry.total();
            bucket.1 += 1;
        }
        let total: f64 = buckets.values().map(|(subtotal, _)| subtotal).sum();
        let mut shares: Vec<CategoryShare> = buckets
            .into_iter()
            .map(|(category, (subtotal, count))| CategoryShare {
                category,
                subtotal,
                count,
                percentage: percentage(subtotal, total),
            })
            .collect();
        shares.sort_by(|a, b| b.subtotal.total_cmp(&a.subtotal));
        Self { total, shares }
    }

    pub fn share(&self, category: Category) -> Option<&CategoryShare> {
        self.shares.iter().find(|share| share.category == category)
    }
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPurchase, NewSale, PaymentMethod};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn purchase(category: Category, quantity: f64, price: f64) -> Purchase {
        Purchase::from_new(NewPurchase {
            product_name: format!("{category} lot"),
            category,
            supplier_id: Uuid::new_v4(),
            quantity,
            unit: "kg".into(),
            purchase_price_per_unit: price,
            total_purchase_cost: quantity * price,
            purchase_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            invoice_number: None,
            notes: String::new(),
            created_by: "tester".into(),
        })
    }

    fn sale(amount: f64) -> Sale {
        Sale::from_new(NewSale {
            product_name: "Thali".into(),
            category: Category::PreparedFood,
            quantity: 1.0,
            unit: "plates".into(),
            sale_price_per_unit: amount,
            total_sale_amount: amount,
            sale_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            customer_name: None,
            customer_phone: None,
            payment_method: PaymentMethod::Upi,
            notes: String::new(),
            created_by: "tester".into(),
        })
    }

    #[test]
    fn margin_is_zero_without_sales() {
        let purchases = [purchase(Category::Meat, 2.0, 400.0)];
        let refs: Vec<&Purchase> = purchases.iter().collect();
        let summary = ProfitSummary::compute(&refs, &[]);
        assert_eq!(summary.total_purchases, 800.0);
        assert_eq!(summary.profit, -800.0);
        assert_eq!(summary.margin, 0.0);
        assert!(summary.is_loss());
    }

    #[test]
    fn margin_is_profit_over_sales() {
        let purchases = [purchase(Category::Vegetables, 10.0, 30.0)];
        let sales = [sale(500.0), sale(500.0)];
        let p: Vec<&Purchase> = purchases.iter().collect();
        let s: Vec<&Sale> = sales.iter().collect();
        let summary = ProfitSummary::compute(&p, &s);
        assert_eq!(summary.profit, 700.0);
        assert!((summary.margin - 70.0).abs() < 1e-9);
        assert_eq!(summary.sale_count, 2);
    }

    #[test]
    fn breakdown_subtotals_sum_to_total() {
        let purchases = [
            purchase(Category::Vegetables, 3.0, 33.3),
            purchase(Category::Dairy, 7.0, 12.1),
            purchase(Category::Vegetables, 1.5, 80.0),
            purchase(Category::Spices, 0.25, 999.0),
        ];
        let breakdown = CategoryBreakdown::compute(&purchases);
        let sum: f64 = breakdown.shares.iter().map(|share| share.subtotal).sum();
        assert!((sum - total(&purchases)).abs() < 1e-9);
        let pct: f64 = breakdown.shares.iter().map(|share| share.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
        assert_eq!(breakdown.share(Category::Vegetables).unwrap().count, 2);
        assert_eq!(breakdown.shares[0].category, Category::Spices);
    }

    #[test]
    fn empty_breakdown_reports_zero_percentages() {
        let purchases = [purchase(Category::Grains, 0.0, 10.0)];
        let breakdown = CategoryBreakdown::compute(&purchases);
        assert_eq!(breakdown.total, 0.0);
        assert_eq!(breakdown.shares[0].percentage, 0.0);
    }
}
