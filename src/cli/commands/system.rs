use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output::{self, raw, section};
use crate::cli::registry::CommandEntry;
use crate::storage::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "status",
            "Show record counts and store health",
            "status",
            cmd_status,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    section(format!("Shop Ledger {}", meta.version));
    raw(format!("  Schema ver : v{CURRENT_SCHEMA_VERSION}"));
    raw(format!("  Build hash : {} ({})", meta.git_hash, meta.git_status));
    raw(format!("  Built at   : {}", meta.timestamp));
    raw(format!("  Target     : {}", meta.target));
    raw(format!("  Profile    : {}", meta.profile));
    raw(format!("  Rustc      : {}", meta.rustc));
    raw(format!("  Data dir   : {}", context.data_dir().display()));
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = context.manager.store();
    let purchases = store.list_purchases()?.len();
    let sales = store.list_sales()?.len();
    let suppliers = store.list_suppliers()?.len();
    let status = context.manager.status();

    section("Store");
    raw(format!("  Purchases  : {purchases}"));
    raw(format!("  Sales      : {sales}"));
    raw(format!("  Suppliers  : {suppliers}"));
    raw(format!("  Operator   : {}", context.manager.identity().display_name()));
    match status.error {
        Some(err) => output::warning(format!("Store reported an error: {err}")),
        None if status.loading => output::info("Store is still loading."),
        None => output::success("Store is healthy."),
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
