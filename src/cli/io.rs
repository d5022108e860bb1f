//! Terminal prompts used by interactive commands.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::{CommandError, FieldArgs};

/// One question asked by [`prompt_fields`]; `choices` turns it into a picker.
pub(crate) struct FieldPrompt {
    pub key: &'static str,
    pub label: &'static str,
    pub choices: Vec<String>,
}

impl FieldPrompt {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            choices: Vec::new(),
        }
    }

    pub fn choice(key: &'static str, label: &'static str, choices: Vec<String>) -> Self {
        Self {
            key,
            label,
            choices,
        }
    }
}

pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Free text; an empty answer is allowed.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Picker over `options`; `None` when dismissed with Esc.
pub fn choose(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[String],
) -> Result<Option<String>, CommandError> {
    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact_opt()?;
    Ok(picked.and_then(|index| options.get(index).cloned()))
}

/// Asks each prompt in turn and collects the answers as `key=value` fields.
/// Blank or dismissed answers are left out so form defaults apply.
pub(crate) fn prompt_fields(
    theme: &ColorfulTheme,
    prompts: &[FieldPrompt],
) -> Result<FieldArgs, CommandError> {
    let mut fields = FieldArgs::default();
    for prompt in prompts {
        let answer = if prompt.choices.is_empty() {
            Some(prompt_text(theme, prompt.label)?)
        } else {
            choose(theme, prompt.label, &prompt.choices)?
        };
        if let Some(answer) = answer.filter(|value| !value.trim().is_empty()) {
            fields.fields.push((prompt.key.to_string(), answer));
        }
    }
    Ok(fields)
}
