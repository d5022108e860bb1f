use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, raw, section, signed_amount};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn};

use super::filter::{parse_kind, print_filters};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show purchase and sale totals with profit and margin",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "breakdown",
            "Show category subtotals for the active or given view",
            "breakdown [purchases|sales]",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "export",
            "Write the filtered records of the active view to a CSV file",
            "export [directory]",
            cmd_export,
        ),
        CommandEntry::new(
            "products",
            "List product names seen in purchase history",
            "products",
            cmd_products,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: summary".into()));
    }
    let summary = context.manager.summary()?;
    let config = &context.config;
    section("Summary");
    print_filters(context);
    raw(format!(
        "{:<17}{} ({} records)",
        "Total Purchases:",
        config.format_amount(summary.total_purchases),
        summary.purchase_count
    ));
    raw(format!(
        "{:<17}{} ({} records)",
        "Total Sales:",
        config.format_amount(summary.total_sales),
        summary.sale_count
    ));
    let label = if summary.is_loss() { "Loss:" } else { "Profit:" };
    raw(format!(
        "{:<17}{}",
        label,
        signed_amount(config.format_amount(summary.profit.abs()), summary.is_loss())
    ));
    raw(format!("{:<17}{:.1}%", "Margin:", summary.margin));
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.config.show_analytics {
        output::info("Analytics are turned off. Use `config set show_analytics on`.");
        return Ok(());
    }
    let kind = match args.first() {
        Some(raw_kind) => parse_kind(raw_kind)?,
        None => context.active_tab,
    };
    let breakdown = context.manager.breakdown(kind)?;
    section(format!("{} by category", capitalize(kind.plural())));
    if breakdown.shares.is_empty() {
        output::info(format!("No {} match the current filters.", kind.plural()));
        return Ok(());
    }

    let config = &context.config;
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Count"),
        TableColumn::right("Subtotal"),
        TableColumn::right("Share"),
    ]);
    for share in &breakdown.shares {
        table.push(vec![
            share.category.label().to_string(),
            share.count.to_string(),
            config.format_amount(share.subtotal),
            format!("{:.1}%", share.percentage),
        ]);
    }
    raw(table.render());
    raw(format!("Total: {}", config.format_amount(breakdown.total)));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => context.export_dir(),
        [path] => PathBuf::from(*path),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: export [directory]".into(),
            ))
        }
    };
    let kind = context.active_tab;
    let export = context.manager.export(kind)?;
    let path = crate::export::write_export(&export, &dir)?;
    output::success(format!(
        "Exported {} {} to {}",
        export.row_count,
        kind.plural(),
        path.display()
    ));
    Ok(())
}

fn cmd_products(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let products = context.manager.purchased_products()?;
    if products.is_empty() {
        output::info("No purchases recorded yet.");
        return Ok(());
    }
    for product in products {
        raw(product);
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
