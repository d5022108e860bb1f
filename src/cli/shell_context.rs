use std::path::{Path, PathBuf};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::cli::commands;
use crate::cli::core::{CliError, CommandError, CommandResult, LoopControl};
use crate::cli::io as prompts;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::config::{Config, ConfigManager};
use crate::core::identity::Identity;
use crate::core::manager::RecordsManager;
use crate::core::services::Confirm;
use crate::domain::RecordKind;
use crate::errors::LedgerError;
use crate::storage::JsonStore;
use crate::utils::{paths, persistence::ensure_dir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: RecordsManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub data_dir: PathBuf,
    pub active_tab: RecordKind,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, paths::app_data_dir())
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        ensure_dir(&base)?;
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let store = JsonStore::open(paths::records_file_in(&base))?;
        let manager = RecordsManager::new(Box::new(store));

        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
            quiet_mode: false,
        });

        let mut context = ShellContext {
            mode,
            registry,
            manager,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            data_dir: base,
            active_tab: RecordKind::Purchase,
            last_command: None,
            running: true,
        };
        context.apply_config();
        tracing::info!(dir = %context.data_dir.display(), ?mode, "shell ready");
        Ok(context)
    }

    /// Pushes operator and week-start settings into the records manager.
    pub(crate) fn apply_config(&mut self) {
        self.manager
            .set_identity(Identity::new(self.config.operator.clone()));
        self.manager.set_week_start(self.config.week_start);
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn export_dir(&self) -> PathBuf {
        self.config
            .export_dir
            .clone()
            .unwrap_or_else(|| paths::export_dir_in(&self.data_dir))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        format!("shop[{}]> ", self.active_tab.plural())
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(prompts::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(LedgerError::Validation(errors)) => {
                for error in errors.iter() {
                    output::error(error);
                }
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

/// Asks through dialoguer when interactive; scripts must pass `--yes`.
pub(crate) struct PromptConfirm<'a> {
    mode: CliMode,
    assume_yes: bool,
    theme: &'a ColorfulTheme,
}

impl<'a> PromptConfirm<'a> {
    pub(crate) fn new(mode: CliMode, assume_yes: bool, theme: &'a ColorfulTheme) -> Self {
        Self {
            mode,
            assume_yes,
            theme,
        }
    }
}

impl Confirm for PromptConfirm<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.mode {
            CliMode::Script => {
                output::warning(format!("{prompt} Pass --yes to confirm."));
                false
            }
            CliMode::Interactive => prompts::confirm_action(self.theme, prompt, false)
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "confirmation prompt failed");
                    false
                }),
        }
    }
}
