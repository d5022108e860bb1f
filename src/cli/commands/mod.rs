pub mod config;
pub mod filter;
pub mod purchase;
pub mod report;
pub mod sale;
pub mod supplier;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;
use crate::domain::Category;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        filter::definitions(),
        purchase::definitions(),
        sale::definitions(),
        supplier::definitions(),
        report::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

pub(crate) fn parse_category(raw: &str, allowed: &[Category]) -> Result<Category, CommandError> {
    let category: Category = raw
        .parse()
        .map_err(|err| CommandError::InvalidArguments(format!("{err}")))?;
    if allowed.contains(&category) {
        Ok(category)
    } else {
        Err(CommandError::InvalidArguments(format!(
            "category `{category}` is not offered here; expected one of: {}",
            join(allowed.iter().map(Category::as_str))
        )))
    }
}

/// Matches `raw` against the configured unit catalog, ignoring case.
pub(crate) fn check_unit(raw: &str, catalog: &[String]) -> Result<String, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() || catalog.is_empty() {
        return Ok(raw.to_string());
    }
    catalog
        .iter()
        .find(|unit| unit.eq_ignore_ascii_case(raw))
        .cloned()
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown unit `{raw}`; expected one of: {}",
                join(catalog.iter().map(String::as_str))
            ))
        })
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PURCHASE_CATEGORIES;

    #[test]
    fn purchase_categories_exclude_prepared_food() {
        assert_eq!(
            parse_category("dairy", &PURCHASE_CATEGORIES).unwrap(),
            Category::Dairy
        );
        assert!(parse_category("prepared_food", &PURCHASE_CATEGORIES).is_err());
    }

    #[test]
    fn units_come_from_the_catalog() {
        let catalog = vec!["kg".to_string(), "plates".to_string()];
        assert_eq!(check_unit("KG", &catalog).unwrap(), "kg");
        assert_eq!(check_unit("", &catalog).unwrap(), "");
        assert!(check_unit("bowls", &catalog).is_err());
    }
}
