use crate::cli::core::{parse_value, CommandError, CommandResult, FieldArgs, ShellContext};
use crate::cli::output::{self, raw};
use crate::cli::registry::CommandEntry;
use crate::core::filter::{CategoryFilter, DateRange};
use crate::domain::RecordKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "tab",
            "Switch between the purchases and sales views",
            "tab <purchases|sales>",
            cmd_tab,
        ),
        CommandEntry::new(
            "filter",
            "Show, set or clear the active filters",
            "filter [search=<text>] [category=<category|all>] [date=<all|today|yesterday|this_week|this_month|YYYY-MM-DD>] | filter clear",
            cmd_filter,
        ),
    ]
}

pub(crate) fn parse_kind(raw: &str) -> Result<RecordKind, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "purchase" | "purchases" => Ok(RecordKind::Purchase),
        "sale" | "sales" => Ok(RecordKind::Sale),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown view `{other}`; use purchases or sales"
        ))),
    }
}

fn cmd_tab(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw_kind) = args.first() else {
        output::info(format!("Active view: {}", context.active_tab.plural()));
        return Ok(());
    };
    context.active_tab = parse_kind(raw_kind)?;
    output::success(format!("Showing {}.", context.active_tab.plural()));
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = FieldArgs::parse(args);
    if parsed
        .positional
        .first()
        .is_some_and(|word| word.eq_ignore_ascii_case("clear"))
    {
        context.manager.clear_filters();
        output::success("Filters cleared.");
        return Ok(());
    }
    if let Some(word) = parsed.positional.first() {
        return Err(CommandError::InvalidArguments(format!(
            "unexpected argument `{word}`"
        )));
    }
    parsed.ensure_known(&["search", "category", "date"])?;

    let category = parsed
        .get("category")
        .map(|value| parse_value::<CategoryFilter>("category", value))
        .transpose()?;
    let date_range = parsed
        .get("date")
        .map(|value| parse_value::<DateRange>("date", value))
        .transpose()?;

    let criteria = context.manager.criteria_mut();
    if let Some(search) = parsed.get("search") {
        criteria.search = search.to_string();
    }
    if let Some(category) = category {
        criteria.category = category;
    }
    if let Some(date_range) = date_range {
        criteria.date_range = date_range;
    }
    print_filters(context);
    Ok(())
}

pub(crate) fn print_filters(context: &ShellContext) {
    let criteria = context.manager.criteria();
    let search = if criteria.search.trim().is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", criteria.search)
    };
    raw(format!(
        "Filters: search={} category={} date={}",
        search, criteria.category, criteria.date_range
    ));
}
