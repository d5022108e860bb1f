//! Record filtering by product text, category and date range.
//!
//! Filtering is a pure, order-preserving pass: the output keeps the relative
//! order of the input and filtering an already-filtered list with the same
//! criteria yields the same list.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Record, RecordRef};

/// First day of the calendar week used by the `this_week` range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Most recent date on or before `date` that opens a week.
    pub fn week_start_for(&self, date: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date - Duration::days(offset as i64)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!("unknown week start `{other}` (use sunday or monday)")),
        }
    }
}

/// Date window options offered by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    Custom(NaiveDate),
}

impl DateRange {
    /// Keyword used in export file names.
    pub fn keyword(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Yesterday => "yesterday",
            DateRange::ThisWeek => "this_week",
            DateRange::ThisMonth => "this_month",
            DateRange::Custom(_) => "custom",
        }
    }

    pub fn contains(&self, date: NaiveDate, context: &FilterContext) -> bool {
        let today = context.today;
        match self {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::Yesterday => date == today - Duration::days(1),
            DateRange::ThisWeek => {
                let start = context.week_start.week_start_for(today);
                date >= start && date < start + Duration::days(7)
            }
            DateRange::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            DateRange::Custom(day) => date == *day,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::Custom(day) => write!(f, "custom:{}", day.format("%Y-%m-%d")),
            other => f.write_str(other.keyword()),
        }
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let parse_day = |raw: &str| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| format!("invalid date `{raw}` (use YYYY-MM-DD)"))
        };
        match normalized.as_str() {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "yesterday" => Ok(DateRange::Yesterday),
            "this_week" | "week" => Ok(DateRange::ThisWeek),
            "this_month" | "month" => Ok(DateRange::ThisMonth),
            other => match other.strip_prefix("custom:") {
                Some(raw) => parse_day(raw).map(DateRange::Custom),
                None => parse_day(other).map(DateRange::Custom),
            },
        }
    }
}

/// Either every category or one exact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        value
            .parse::<Category>()
            .map(CategoryFilter::Only)
            .map_err(|err| err.to_string())
    }
}

/// Reference point for relative date ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    pub today: NaiveDate,
    pub week_start: WeekStart,
}

impl FilterContext {
    pub fn new(today: NaiveDate, week_start: WeekStart) -> Self {
        Self { today, week_start }
    }
}

/// Conjunction of the three predicates the screen exposes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub category: CategoryFilter,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category == CategoryFilter::All
            && self.date_range == DateRange::All
    }

    pub fn matches(&self, record: RecordRef<'_>, context: &FilterContext) -> bool {
        matches_search(record.product_name(), &self.search)
            && self.category.matches(record.category())
            && self.date_range.contains(record.effective_date(), context)
    }

    /// Stable filter; keeps the input order.
    pub fn apply<'a, T: Record>(&self, records: &'a [T], context: &FilterContext) -> Vec<&'a T> {
        records
            .iter()
            .filter(|record| self.matches(record.entry(), context))
            .collect()
    }
}

fn matches_search(product_name: &str, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    product_name
        .to_lowercase()
        .contains(&search.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewSale, PaymentMethod, Sale};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(name: &str, category: Category, date: NaiveDate) -> Sale {
        Sale::from_new(NewSale {
            product_name: name.into(),
            category,
            quantity: 1.0,
            unit: "plates".into(),
            sale_price_per_unit: 50.0,
            total_sale_amount: 50.0,
            sale_date: date,
            customer_name: None,
            customer_phone: None,
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
            created_by: "tester".into(),
        })
    }

    // 2024-05-15 is a Wednesday.
    fn context(week_start: WeekStart) -> FilterContext {
        FilterContext::new(day(2024, 5, 15), week_start)
    }

    #[test]
    fn week_start_is_configurable() {
        let wednesday = day(2024, 5, 15);
        assert_eq!(WeekStart::Sunday.week_start_for(wednesday), day(2024, 5, 12));
        assert_eq!(WeekStart::Monday.week_start_for(wednesday), day(2024, 5, 13));
        let sunday = day(2024, 5, 12);
        assert_eq!(WeekStart::Sunday.week_start_for(sunday), sunday);
        assert_eq!(WeekStart::Monday.week_start_for(sunday), day(2024, 5, 6));
    }

    #[test]
    fn this_week_depends_on_week_start() {
        let sunday = day(2024, 5, 12);
        assert!(DateRange::ThisWeek.contains(sunday, &context(WeekStart::Sunday)));
        assert!(!DateRange::ThisWeek.contains(sunday, &context(WeekStart::Monday)));
    }

    #[test]
    fn relative_ranges_follow_the_clock() {
        let ctx = context(WeekStart::Sunday);
        assert!(DateRange::Today.contains(day(2024, 5, 15), &ctx));
        assert!(DateRange::Yesterday.contains(day(2024, 5, 14), &ctx));
        assert!(!DateRange::Yesterday.contains(day(2024, 5, 15), &ctx));
        assert!(DateRange::ThisMonth.contains(day(2024, 5, 1), &ctx));
        assert!(!DateRange::ThisMonth.contains(day(2023, 5, 15), &ctx));
        assert!(DateRange::Custom(day(2024, 1, 2)).contains(day(2024, 1, 2), &ctx));
        assert!(!DateRange::Custom(day(2024, 1, 2)).contains(day(2024, 1, 3), &ctx));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let sales = vec![
            sale("Paneer Tikka", Category::PreparedFood, day(2024, 5, 15)),
            sale("Masala Chai", Category::Beverages, day(2024, 5, 15)),
        ];
        let criteria = FilterCriteria {
            search: "TIKKA".into(),
            ..FilterCriteria::default()
        };
        let filtered = criteria.apply(&sales, &context(WeekStart::Sunday));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product_name, "Paneer Tikka");
    }

    #[test]
    fn filtering_is_stable_and_idempotent() {
        let sales = vec![
            sale("Chai", Category::Beverages, day(2024, 5, 15)),
            sale("Samosa", Category::PreparedFood, day(2024, 5, 15)),
            sale("Lassi", Category::Beverages, day(2024, 5, 10)),
            sale("Cold Coffee", Category::Beverages, day(2024, 5, 14)),
        ];
        let criteria = FilterCriteria {
            search: String::new(),
            category: CategoryFilter::Only(Category::Beverages),
            date_range: DateRange::ThisWeek,
        };
        let ctx = context(WeekStart::Sunday);
        let once: Vec<Sale> = criteria.apply(&sales, &ctx).into_iter().cloned().collect();
        let names: Vec<&str> = once.iter().map(|s| s.product_name.as_str()).collect();
        assert_eq!(names, vec!["Chai", "Cold Coffee"]);

        let twice: Vec<Sale> = criteria.apply(&once, &ctx).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn parses_filter_keywords() {
        assert_eq!("this_week".parse::<DateRange>(), Ok(DateRange::ThisWeek));
        assert_eq!(
            "custom:2024-02-29".parse::<DateRange>(),
            Ok(DateRange::Custom(day(2024, 2, 29)))
        );
        assert_eq!(
            "2024-02-29".parse::<DateRange>(),
            Ok(DateRange::Custom(day(2024, 2, 29)))
        );
        assert!("someday".parse::<DateRange>().is_err());
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "meat".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Meat))
        );
    }
}
