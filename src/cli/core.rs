//! Error types, loop control and argument parsing shared by CLI commands.

use std::{io, str::FromStr};

use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::LedgerError;

pub use crate::cli::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that abort the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(LedgerError::Io(err))
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

/// Failures of a single command; reported and the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Tokens of one command line split into positionals, `key=value` fields and `--flags`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FieldArgs {
    pub positional: Vec<String>,
    pub fields: Vec<(String, String)>,
    pub flags: Vec<String>,
}

impl FieldArgs {
    pub fn parse(args: &[&str]) -> Self {
        let mut parsed = FieldArgs::default();
        for arg in args {
            if let Some(flag) = arg.strip_prefix("--") {
                parsed.flags.push(flag.to_ascii_lowercase());
            } else if let Some((key, value)) = arg.split_once('=') {
                parsed
                    .fields
                    .push((key.trim().to_ascii_lowercase(), value.to_string()));
            } else {
                parsed.positional.push(arg.to_string());
            }
        }
        parsed
    }

    /// Last value given for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|value| value == flag)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn ensure_known(&self, allowed: &[&str]) -> CommandResult {
        match self
            .fields
            .iter()
            .find(|(key, _)| !allowed.contains(&key.as_str()))
        {
            Some((key, _)) => Err(CommandError::InvalidArguments(format!(
                "unknown field `{key}`; expected one of: {}",
                allowed.join(", ")
            ))),
            None => Ok(()),
        }
    }
}

pub(crate) fn parse_value<T>(key: &str, raw: &str) -> Result<T, CommandError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| CommandError::InvalidArguments(format!("invalid {key}: {err}")))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{raw}`; expected YYYY-MM-DD"))
    })
}

/// Resolves a full id or a unique id prefix against `ids`.
pub(crate) fn match_id(
    kind: &str,
    reference: &str,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<Uuid, CommandError> {
    let needle = reference.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(CommandError::InvalidArguments(format!("{kind} id is required")));
    }
    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CommandError::Message(format!("no {kind} matches id `{reference}`"))),
        _ => Err(CommandError::InvalidArguments(format!(
            "id `{reference}` is ambiguous; type more characters"
        ))),
    }
}

pub(crate) fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fields_flags_and_positionals() {
        let args = FieldArgs::parse(&["abc123", "name=Red Chilli", "QTY=2", "--yes", "qty=3"]);
        assert_eq!(args.positional, vec!["abc123"]);
        assert_eq!(args.get("name"), Some("Red Chilli"));
        assert_eq!(args.get("qty"), Some("3"));
        assert!(args.has_flag("yes"));
        assert!(args.ensure_known(&["name", "qty"]).is_ok());
        assert!(args.ensure_known(&["name"]).is_err());
    }

    #[test]
    fn ids_resolve_by_unique_prefix() {
        let first = Uuid::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap();
        let second = Uuid::parse_str("aaab2222-0000-4000-8000-000000000000").unwrap();
        assert_eq!(match_id("sale", "aaaa", [first, second]).unwrap(), first);
        assert!(matches!(
            match_id("sale", "aaa", [first, second]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            match_id("sale", "ffff", [first, second]),
            Err(CommandError::Message(_))
        ));
        assert_eq!(short_id(first), "aaaa1111");
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("29/02/2024").is_err());
    }
}
