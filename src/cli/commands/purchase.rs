use uuid::Uuid;

use crate::cli::commands::{check_unit, parse_category};
use crate::cli::core::{
    match_id, parse_date, short_id, CommandError, CommandResult, FieldArgs, ShellContext,
};
use crate::cli::io::{prompt_fields, FieldPrompt};
use crate::cli::output::{self, raw};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::PromptConfirm;
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::aggregate::total;
use crate::core::services::RemoveOutcome;
use crate::domain::supplier::selectable;
use crate::domain::{supplier_name, RecordKind, PURCHASE_CATEGORIES};
use crate::errors::LedgerError;

use super::filter::print_filters;

const FIELDS: &[&str] = &[
    "name", "category", "supplier", "qty", "unit", "price", "date", "invoice", "notes",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "purchase",
        "Add, edit, delete or list purchase records",
        "purchase add name=<text> supplier=<name|id> qty=<n> unit=<unit> price=<n> [category=<category>] [date=YYYY-MM-DD] [invoice=<text>] [notes=<text>] | purchase edit <id> <field=value>... | purchase delete <id> [--yes] | purchase list",
        cmd_purchase,
    )]
}

fn cmd_purchase(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_purchases(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "add" => add_purchase(context, rest),
        "edit" => edit_purchase(context, rest),
        "delete" | "remove" => delete_purchase(context, rest),
        "list" => list_purchases(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown purchase action `{other}`"
        ))),
    }
}

fn add_purchase(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut fields = FieldArgs::parse(args);
    if fields.is_empty() && context.can_prompt() {
        let suppliers = context.manager.suppliers()?;
        fields = prompt_fields(
            &context.theme,
            &[
                FieldPrompt::text("name", "Product name"),
                FieldPrompt::choice(
                    "supplier",
                    "Supplier",
                    selectable(&suppliers).map(|s| s.name.clone()).collect(),
                ),
                FieldPrompt::choice(
                    "category",
                    "Category",
                    PURCHASE_CATEGORIES.iter().map(|c| c.as_str().to_string()).collect(),
                ),
                FieldPrompt::text("qty", "Quantity"),
                FieldPrompt::choice("unit", "Unit", context.config.purchase_units.clone()),
                FieldPrompt::text("price", "Price per unit"),
            ],
        )?;
    }
    fields.ensure_known(FIELDS)?;

    context.manager.open_new_purchase();
    apply_fields(context, &fields, false)?;
    let purchase = context.manager.submit_purchase()?;
    output::success(format!(
        "Recorded purchase {} of {} {} {} for {}.",
        short_id(purchase.id),
        purchase.quantity,
        purchase.unit,
        purchase.product_name,
        context.config.format_amount(purchase.total_purchase_cost)
    ));
    Ok(())
}

fn edit_purchase(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = FieldArgs::parse(args);
    fields.ensure_known(FIELDS)?;
    let id = resolve_id(context, fields.positional.first())?;

    context.manager.open_edit_purchase(id)?;
    apply_fields(context, &fields, true)?;
    let purchase = context.manager.submit_purchase()?;
    output::success(format!(
        "Updated purchase {} ({}); total {}.",
        short_id(purchase.id),
        purchase.product_name,
        context.config.format_amount(purchase.total_purchase_cost)
    ));
    Ok(())
}

fn delete_purchase(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = FieldArgs::parse(args);
    let id = resolve_id(context, fields.positional.first())?;
    let mut confirm = PromptConfirm::new(context.mode, fields.has_flag("yes"), &context.theme);
    match context.manager.delete_purchase(id, &mut confirm)? {
        RemoveOutcome::Removed(purchase) => {
            output::success(format!("Deleted purchase of {}.", purchase.product_name));
        }
        RemoveOutcome::Cancelled => output::info("Delete cancelled."),
    }
    Ok(())
}

fn list_purchases(context: &mut ShellContext) -> CommandResult {
    let purchases = context.manager.filtered_purchases()?;
    let suppliers = context.manager.suppliers()?;
    print_filters(context);
    if purchases.is_empty() {
        output::info("No purchases match the current filters.");
        return Ok(());
    }

    let config = &context.config;
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Product").truncate_at(24),
        TableColumn::left("Category"),
        TableColumn::left("Supplier").truncate_at(20),
        TableColumn::right("Qty"),
        TableColumn::left("Unit"),
        TableColumn::right("Price"),
        TableColumn::right("Total"),
        TableColumn::left("Invoice"),
        TableColumn::left("By").truncate_at(16),
    ]);
    for purchase in &purchases {
        table.push(vec![
            short_id(purchase.id),
            purchase.purchase_date.format("%Y-%m-%d").to_string(),
            purchase.product_name.clone(),
            purchase.category.label().to_string(),
            supplier_name(&suppliers, purchase.supplier_id).to_string(),
            purchase.quantity.to_string(),
            purchase.unit.clone(),
            config.format_amount(purchase.purchase_price_per_unit),
            config.format_amount(purchase.total_purchase_cost),
            purchase.invoice_number.clone().unwrap_or_else(|| "-".into()),
            purchase.created_by.clone(),
        ]);
    }
    raw(table.render());
    raw(format!(
        "{} purchase(s), total {}",
        purchases.len(),
        config.format_amount(total(&purchases))
    ));
    Ok(())
}

fn resolve_id(context: &ShellContext, reference: Option<&String>) -> Result<Uuid, CommandError> {
    let reference = reference.ok_or_else(|| {
        CommandError::InvalidArguments("purchase id is required".into())
    })?;
    let purchases = context.manager.store().list_purchases()?;
    match_id("purchase", reference, purchases.iter().map(|p| p.id))
}

/// Copies field arguments onto the open purchase form.
fn apply_fields(context: &mut ShellContext, fields: &FieldArgs, editing: bool) -> CommandResult {
    let supplier = fields
        .get("supplier")
        .map(|reference| context.manager.resolve_supplier(reference))
        .transpose()?;
    if let Some(supplier) = &supplier {
        if !supplier.is_active && !editing {
            return Err(CommandError::InvalidArguments(format!(
                "supplier `{}` is inactive",
                supplier.name
            )));
        }
    }
    let category = fields
        .get("category")
        .map(|raw| parse_category(raw, &PURCHASE_CATEGORIES))
        .transpose()?;
    let unit = fields
        .get("unit")
        .map(|raw| check_unit(raw, &context.config.purchase_units))
        .transpose()?;
    let date = fields.get("date").map(parse_date).transpose()?;

    let form = context
        .manager
        .purchase_form_mut()
        .ok_or(LedgerError::FormClosed(RecordKind::Purchase))?;
    if let Some(name) = fields.get("name") {
        form.product_name = name.to_string();
    }
    if let Some(supplier) = supplier {
        form.supplier_id = Some(supplier.id);
    }
    if let Some(category) = category {
        form.category = category;
    }
    if let Some(unit) = unit {
        form.unit = unit;
    }
    if let Some(date) = date {
        form.purchase_date = date;
    }
    if let Some(qty) = fields.get("qty") {
        form.set_quantity_input(qty);
    }
    if let Some(price) = fields.get("price") {
        form.set_price_input(price);
    }
    if let Some(invoice) = fields.get("invoice") {
        form.invoice_number = invoice.to_string();
    }
    if let Some(notes) = fields.get("notes") {
        form.notes = notes.to_string();
    }
    Ok(())
}
