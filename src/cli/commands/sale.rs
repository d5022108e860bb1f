use uuid::Uuid;

use crate::cli::commands::{check_unit, parse_category};
use crate::cli::core::{
    match_id, parse_date, parse_value, short_id, CommandError, CommandResult, FieldArgs,
    ShellContext,
};
use crate::cli::io::{prompt_fields, FieldPrompt};
use crate::cli::output::{self, raw};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::PromptConfirm;
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::aggregate::total;
use crate::core::services::RemoveOutcome;
use crate::domain::{PaymentMethod, RecordKind, SALE_CATEGORIES};
use crate::errors::LedgerError;
use crate::forms::ProductSuggestion;

use super::filter::print_filters;

const FIELDS: &[&str] = &[
    "name", "category", "qty", "unit", "price", "date", "customer", "phone", "payment", "notes",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "sale",
        "Add, edit, delete or list sale records",
        "sale add name=<text> qty=<n> unit=<unit> price=<n> [category=<category>] [date=YYYY-MM-DD] [customer=<text>] [phone=<text>] [payment=<cash|card|online|upi>] [notes=<text>] | sale edit <id> <field=value>... | sale delete <id> [--yes] | sale list | sale suggest <product>",
        cmd_sale,
    )]
}

fn cmd_sale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_sales(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "add" => add_sale(context, rest),
        "edit" => edit_sale(context, rest),
        "delete" | "remove" => delete_sale(context, rest),
        "list" => list_sales(context),
        "suggest" => suggest(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown sale action `{other}`"
        ))),
    }
}

fn add_sale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut fields = FieldArgs::parse(args);
    if fields.is_empty() && context.can_prompt() {
        fields = prompt_fields(
            &context.theme,
            &[
                FieldPrompt::text("name", "Product name"),
                FieldPrompt::text("qty", "Quantity"),
                FieldPrompt::text("unit", "Unit (blank keeps suggestion)"),
                FieldPrompt::text("price", "Price per unit (blank keeps suggestion)"),
                FieldPrompt::text("customer", "Customer name"),
                FieldPrompt::choice(
                    "payment",
                    "Payment method",
                    PaymentMethod::ALL.iter().map(|m| m.as_str().to_string()).collect(),
                ),
            ],
        )?;
    }
    fields.ensure_known(FIELDS)?;

    context.manager.open_new_sale();
    apply_fields(context, &fields, false)?;
    let sale = context.manager.submit_sale()?;
    output::success(format!(
        "Recorded sale {} of {} {} {} for {} ({}).",
        short_id(sale.id),
        sale.quantity,
        sale.unit,
        sale.product_name,
        context.config.format_amount(sale.total_sale_amount),
        sale.payment_method
    ));
    Ok(())
}

fn edit_sale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = FieldArgs::parse(args);
    fields.ensure_known(FIELDS)?;
    let id = resolve_id(context, fields.positional.first())?;

    context.manager.open_edit_sale(id)?;
    apply_fields(context, &fields, true)?;
    let sale = context.manager.submit_sale()?;
    output::success(format!(
        "Updated sale {} ({}); total {}.",
        short_id(sale.id),
        sale.product_name,
        context.config.format_amount(sale.total_sale_amount)
    ));
    Ok(())
}

fn delete_sale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = FieldArgs::parse(args);
    let id = resolve_id(context, fields.positional.first())?;
    let mut confirm = PromptConfirm::new(context.mode, fields.has_flag("yes"), &context.theme);
    match context.manager.delete_sale(id, &mut confirm)? {
        RemoveOutcome::Removed(sale) => {
            output::success(format!("Deleted sale of {}.", sale.product_name));
        }
        RemoveOutcome::Cancelled => output::info("Delete cancelled."),
    }
    Ok(())
}

fn list_sales(context: &mut ShellContext) -> CommandResult {
    let sales = context.manager.filtered_sales()?;
    print_filters(context);
    if sales.is_empty() {
        output::info("No sales match the current filters.");
        return Ok(());
    }

    let config = &context.config;
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Product").truncate_at(24),
        TableColumn::left("Category"),
        TableColumn::right("Qty"),
        TableColumn::left("Unit"),
        TableColumn::right("Price"),
        TableColumn::right("Total"),
        TableColumn::left("Customer").truncate_at(20),
        TableColumn::left("Payment"),
        TableColumn::left("By").truncate_at(16),
    ]);
    for sale in &sales {
        table.push(vec![
            short_id(sale.id),
            sale.sale_date.format("%Y-%m-%d").to_string(),
            sale.product_name.clone(),
            sale.category.label().to_string(),
            sale.quantity.to_string(),
            sale.unit.clone(),
            config.format_amount(sale.sale_price_per_unit),
            config.format_amount(sale.total_sale_amount),
            sale.customer_name.clone().unwrap_or_else(|| "-".into()),
            sale.payment_method.to_string(),
            sale.created_by.clone(),
        ]);
    }
    raw(table.render());
    raw(format!(
        "{} sale(s), total {}",
        sales.len(),
        config.format_amount(total(&sales))
    ));
    Ok(())
}

fn suggest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let product = args.join(" ");
    if product.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: sale suggest <product>".into(),
        ));
    }
    let purchases = context.manager.store().list_purchases()?;
    match ProductSuggestion::from_history(product.trim(), &purchases) {
        Some(suggestion) => raw(format!(
            "{}: category={} unit={} price={}",
            product.trim(),
            suggestion.category,
            suggestion.unit,
            context.config.format_amount(suggestion.sale_price_per_unit)
        )),
        None => output::info(format!("No purchase history for `{}`.", product.trim())),
    }
    Ok(())
}

fn resolve_id(context: &ShellContext, reference: Option<&String>) -> Result<Uuid, CommandError> {
    let reference =
        reference.ok_or_else(|| CommandError::InvalidArguments("sale id is required".into()))?;
    let sales = context.manager.store().list_sales()?;
    match_id("sale", reference, sales.iter().map(|s| s.id))
}

/// Copies field arguments onto the open sale form.
///
/// When adding, a product name is applied first so that its purchase-history
/// defaults can be overridden by explicit fields on the same line. Editing
/// only renames.
fn apply_fields(context: &mut ShellContext, fields: &FieldArgs, editing: bool) -> CommandResult {
    let category = fields
        .get("category")
        .map(|raw| parse_category(raw, &SALE_CATEGORIES))
        .transpose()?;
    let unit = fields
        .get("unit")
        .map(|raw| check_unit(raw, &context.config.sale_units))
        .transpose()?;
    let date = fields.get("date").map(parse_date).transpose()?;
    let payment = fields
        .get("payment")
        .map(|raw| parse_value::<PaymentMethod>("payment method", raw))
        .transpose()?;

    if let Some(name) = fields.get("name").filter(|_| !editing) {
        context.manager.select_sale_product(name)?;
    }
    let form = context
        .manager
        .sale_form_mut()
        .ok_or(LedgerError::FormClosed(RecordKind::Sale))?;
    if let Some(name) = fields.get("name").filter(|_| editing) {
        form.product_name = name.to_string();
    }
    if let Some(category) = category {
        form.category = category;
    }
    if let Some(unit) = unit {
        form.unit = unit;
    }
    if let Some(date) = date {
        form.sale_date = date;
    }
    if let Some(payment) = payment {
        form.payment_method = payment;
    }
    if let Some(qty) = fields.get("qty") {
        form.set_quantity_input(qty);
    }
    if let Some(price) = fields.get("price") {
        form.set_price_input(price);
    }
    if let Some(customer) = fields.get("customer") {
        form.customer_name = customer.to_string();
    }
    if let Some(phone) = fields.get("phone") {
        form.customer_phone = phone.to_string();
    }
    if let Some(notes) = fields.get("notes") {
        form.notes = notes.to_string();
    }
    Ok(())
}
