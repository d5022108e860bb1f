use crate::core::aggregate::{CategoryBreakdown, ProfitSummary};
use crate::core::filter::{FilterContext, FilterCriteria};
use crate::domain::{Purchase, Record, Sale};

/// Aggregates over the records that pass the active filter.
pub struct SummaryService;

impl SummaryService {
    /// Profit summary; the same criteria narrow both purchases and sales.
    pub fn profit(
        purchases: &[Purchase],
        sales: &[Sale],
        criteria: &FilterCriteria,
        context: &FilterContext,
    ) -> ProfitSummary {
        let purchases = criteria.apply(purchases, context);
        let sales = criteria.apply(sales, context);
        ProfitSummary::compute(&purchases, &sales)
    }

    pub fn breakdown<T: Record>(
        records: &[T],
        criteria: &FilterCriteria,
        context: &FilterContext,
    ) -> CategoryBreakdown {
        CategoryBreakdown::compute(&criteria.apply(records, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{CategoryFilter, DateRange, WeekStart};
    use crate::domain::{Category, NewSale, PaymentMethod};
    use chrono::NaiveDate;

    fn sale(name: &str, category: Category, amount: f64, date: NaiveDate) -> Sale {
        Sale::from_new(NewSale {
            product_name: name.into(),
            category,
            quantity: 1.0,
            unit: "plates".into(),
            sale_price_per_unit: amount,
            total_sale_amount: amount,
            sale_date: date,
            customer_name: None,
            customer_phone: None,
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
            created_by: "Asha".into(),
        })
    }

    #[test]
    fn summary_only_counts_filtered_records() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let sales = vec![
            sale("Thali", Category::PreparedFood, 150.0, today),
            sale("Lassi", Category::Beverages, 60.0, today),
            sale("Thali", Category::PreparedFood, 150.0, earlier),
        ];
        let criteria = FilterCriteria {
            date_range: DateRange::Today,
            ..FilterCriteria::default()
        };
        let context = FilterContext::new(today, WeekStart::Sunday);

        let summary = SummaryService::profit(&[], &sales, &criteria, &context);
        assert_eq!(summary.total_sales, 210.0);
        assert_eq!(summary.margin, 100.0);

        let drinks = FilterCriteria {
            category: CategoryFilter::Only(Category::Beverages),
            ..criteria
        };
        let breakdown = SummaryService::breakdown(&sales, &drinks, &context);
        assert_eq!(breakdown.total, 60.0);
        assert_eq!(breakdown.shares.len(), 1);
    }
}
