use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, raw, section};
use crate::cli::registry::CommandEntry;
use crate::config::Config;

const USAGE: &str = "usage: config [show|set <key> <value>|reset]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shop preferences",
        "config [show|set <locale|currency|week_start|show_analytics|purchase_units|sale_units|operator|export_dir> <value>|reset]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(USAGE.into()));
            }
            let key = args[1].to_ascii_lowercase();
            let value = args[2..].join(" ");
            context.config.set(&key, &value)?;
            context.persist_config()?;
            context.apply_config();
            output::success(format!("Updated {key}."));
            Ok(())
        }
        "reset" => {
            context.config = Config::default();
            context.persist_config()?;
            context.apply_config();
            output::success("Preferences reset to defaults.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(USAGE.into())),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    section("Preferences");
    raw(format!("locale:          {}", config.locale));
    raw(format!("currency:        {}", config.currency_symbol));
    raw(format!("week_start:      {}", config.week_start.as_str()));
    raw(format!(
        "show_analytics:  {}",
        if config.show_analytics { "on" } else { "off" }
    ));
    raw(format!("purchase_units:  {}", config.purchase_units.join(", ")));
    raw(format!("sale_units:      {}", config.sale_units.join(", ")));
    raw(format!(
        "operator:        {}",
        config.operator.as_deref().unwrap_or("(none)")
    ));
    raw(format!("export_dir:      {}", context.export_dir().display()));
    raw(format!("file:            {}", context.config_manager.path().display()));
}
