use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, raw};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "supplier",
        "Add or list suppliers",
        "supplier add <name> | supplier list",
        cmd_supplier,
    )]
}

fn cmd_supplier(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_suppliers(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "add" => {
            let name = rest.join(" ");
            let supplier = context.manager.add_supplier(&name)?;
            output::success(format!(
                "Added supplier {} ({}).",
                supplier.name,
                short_id(supplier.id)
            ));
            Ok(())
        }
        "list" => list_suppliers(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown supplier action `{other}`"
        ))),
    }
}

fn list_suppliers(context: &mut ShellContext) -> CommandResult {
    let suppliers = context.manager.suppliers()?;
    if suppliers.is_empty() {
        output::info("No suppliers yet. Use `supplier add <name>`.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Name").truncate_at(32),
        TableColumn::left("Active"),
    ]);
    for supplier in &suppliers {
        table.push(vec![
            short_id(supplier.id),
            supplier.name.clone(),
            if supplier.is_active { "yes" } else { "no" }.to_string(),
        ]);
    }
    raw(table.render());
    Ok(())
}
