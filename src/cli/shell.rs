use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::utils::build_info;

/// Environment variable that switches the shell to line-per-command stdin mode.
pub const SCRIPT_ENV: &str = "SHOP_LEDGER_CLI_SCRIPT";

const HISTORY_FILE: &str = "history.txt";

/// Second-word completions for commands that take an action or a view.
const ACTIONS: &[(&str, &[&str])] = &[
    ("purchase", &["add", "edit", "delete", "list"]),
    ("sale", &["add", "edit", "delete", "list", "suggest"]),
    ("supplier", &["add", "list"]),
    ("filter", &["clear", "search=", "category=", "date="]),
    ("tab", &["purchases", "sales"]),
    ("breakdown", &["purchases", "sales"]),
    ("config", &["show", "set", "reset"]),
];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('\t'), Cmd::Complete);

    let history = context.data_dir().join(HISTORY_FILE);
    if history.exists() {
        if let Err(err) = editor.load_history(&history) {
            tracing::warn!(error = %err, "could not load shell history");
        }
    }

    output::info(format!("Shop Ledger {}", build_info::current().short()));
    output::info("Type `help` to list commands.");
    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        tracing::warn!(error = %err, "could not save shell history");
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                tracing::debug!(line = index + 1, "script command failed");
                context.report_error(err)?;
            }
        }
    }
    Ok(())
}

/// Tokenizes and dispatches one input line. Blank lines and `#` comments are skipped.
pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let tokens = match shell_words::split(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse `{trimmed}`: {err}"));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(trimmed.to_string());
    tracing::debug!(command = %command, args = args.len(), "dispatching");

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Replacement start and candidates for the text before the cursor.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let leading = prefix.len() - prefix.trim_start().len();
        let words: Vec<&str> = prefix[leading..].split_whitespace().collect();
        let typing_new_word = prefix.ends_with(char::is_whitespace);

        match (words.as_slice(), typing_new_word) {
            ([], _) => (leading, self.commands.clone()),
            ([first], false) => {
                let needle = first.to_ascii_lowercase();
                let matches = self
                    .commands
                    .iter()
                    .filter(|name| name.starts_with(&needle))
                    .cloned()
                    .collect();
                (leading, matches)
            }
            ([command], true) => (prefix.len(), actions_for(command, "")),
            ([command, partial], false) => {
                (prefix.len() - partial.len(), actions_for(command, partial))
            }
            _ => (prefix.len(), Vec::new()),
        }
    }
}

fn actions_for(command: &str, partial: &str) -> Vec<String> {
    let command = command.to_ascii_lowercase();
    let partial = partial.to_ascii_lowercase();
    ACTIONS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, actions)| {
            actions
                .iter()
                .filter(|action| action.starts_with(&partial))
                .map(|action| action.to_string())
                .collect()
        })
        .unwrap_or_default()
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn script_context(dir: &tempfile::TempDir) -> ShellContext {
        ShellContext::with_base_dir(CliMode::Script, dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let mut context = script_context(&dir);
        assert_eq!(handle_line(&mut context, "   ").unwrap(), LoopControl::Continue);
        assert_eq!(
            handle_line(&mut context, "# purchase delete abc").unwrap(),
            LoopControl::Continue
        );
        assert!(context.last_command.is_none());
    }

    #[test]
    fn commands_dispatch_and_exit_stops_the_loop() {
        let dir = tempdir().unwrap();
        let mut context = script_context(&dir);
        handle_line(&mut context, "tab sales").unwrap();
        assert_eq!(context.prompt(), "shop[sales]> ");

        handle_line(&mut context, "supplier add \"Spice Route\"").unwrap();
        assert_eq!(context.manager.suppliers().unwrap()[0].name, "Spice Route");

        assert_eq!(handle_line(&mut context, "EXIT").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn completes_command_names_then_actions() {
        let helper = CommandHelper::new(vec!["sale", "summary", "supplier", "sale"]);
        assert_eq!(helper.commands, vec!["sale", "summary", "supplier"]);

        assert_eq!(
            helper.candidates("su"),
            (0, vec!["summary".to_string(), "supplier".to_string()])
        );
        assert_eq!(
            helper.candidates("sale s"),
            (5, vec!["suggest".to_string()])
        );
        assert_eq!(helper.candidates("supplier ").1, vec!["add", "list"]);
        assert!(helper.candidates("sale add name=x").1.is_empty());
    }
}
