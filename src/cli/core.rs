use std::{io, path::PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::cli::{commands, output, registry::CommandRegistry};
use crate::config::{Config, ConfigManager};
use crate::core::FinanceTracker;
use crate::currency::MoneyFormat;
use crate::errors::FinanceError;
use crate::ledger::{FixedExpense, Transaction, YearMonth};

const HISTORY_FILE: &str = "history.txt";

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    pub(crate) tracker: FinanceTracker,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) money: MoneyFormat,
    pub(crate) registry: CommandRegistry,
    pub(crate) last_command: Option<String>,
    /// Rows shown by the latest `list`, so later commands can refer to them by
    /// number. Deleted rows stay as `None` so the remaining numbers keep matching
    /// what is on screen.
    pub(crate) listed_transactions: Vec<Option<Uuid>>,
    pub(crate) listed_fixed_expenses: Vec<Option<Uuid>>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = config.open_storage(config_manager.base_dir())?;
        let tracker = FinanceTracker::new(storage);
        Ok(Self::with_parts(mode, tracker, config, config_manager))
    }

    pub fn with_parts(
        mode: CliMode,
        tracker: FinanceTracker,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        if mode == CliMode::Script {
            colored::control::set_override(false);
        }
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            running: true,
            tracker,
            money: config.money_format(),
            config,
            config_manager,
            registry,
            last_command: None,
            listed_transactions: Vec::new(),
            listed_fixed_expenses: Vec::new(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("finflow [{}]> ", self.tracker.current_month())
    }

    /// Every name and alias paired with the usage line of its command.
    pub fn command_usages(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .names()
            .filter_map(|name| self.registry.get(name).map(|entry| (name, entry.usage)))
            .collect()
    }

    pub fn history_path(&self) -> PathBuf {
        self.config_manager.base_dir().join(HISTORY_FILE)
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
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(self.confirm("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        debug!(command = ?self.last_command, error = %err, "command failed");
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(err) => {
                output::error(err);
                Ok(())
            }
            CommandError::Io(err) => Err(CliError::Io(err)),
            CommandError::Dialoguer(err) => {
                output::error(err);
                Ok(())
            }
        }
    }

    /// Month argument `YYYY-MM`, or the current month when absent.
    pub(crate) fn month_arg(&self, arg: Option<&&str>) -> Result<YearMonth, CommandError> {
        match arg {
            Some(raw) => Ok(raw.parse::<YearMonth>()?),
            None => Ok(self.tracker.current_month()),
        }
    }

    pub(crate) fn parse_amount(&self, raw: &str) -> Result<i64, CommandError> {
        let cents = self.money.parse(raw)?;
        if cents <= 0 {
            return Err(CommandError::InvalidArguments(format!(
                "amount must be positive, got `{}`",
                raw
            )));
        }
        Ok(cents)
    }

    /// Resolves a row number from the latest `list` or a (prefix of a) transaction id.
    pub(crate) fn resolve_transaction(&self, reference: &str) -> Result<Transaction, CommandError> {
        let id = resolve_reference(reference, &self.listed_transactions, || {
            Ok(self
                .tracker
                .transactions()?
                .into_iter()
                .map(|txn| txn.id)
                .collect())
        })?;
        Ok(self.tracker.transaction(id)?)
    }

    pub(crate) fn resolve_fixed_expense(
        &self,
        reference: &str,
    ) -> Result<FixedExpense, CommandError> {
        let id = resolve_reference(reference, &self.listed_fixed_expenses, || {
            Ok(self
                .tracker
                .fixed_expenses()?
                .into_iter()
                .map(|expense| expense.id)
                .collect())
        })?;
        self.tracker
            .fixed_expenses()?
            .into_iter()
            .find(|expense| expense.id == id)
            .ok_or(CommandError::Core(FinanceError::NotFound(id)))
    }

    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        self.money = self.config.money_format();
        Ok(())
    }
}

/// Marks the row holding `id` as deleted without renumbering the others.
pub(crate) fn forget_listed(listed: &mut [Option<Uuid>], id: Uuid) {
    for slot in listed.iter_mut().filter(|slot| **slot == Some(id)) {
        *slot = None;
    }
}

/// Row numbers from the last listing win; anything else, including digits past
/// the end of the listing, is matched as an id prefix.
fn resolve_reference(
    reference: &str,
    listed: &[Option<Uuid>],
    all_ids: impl FnOnce() -> Result<Vec<Uuid>, CommandError>,
) -> Result<Uuid, CommandError> {
    let row = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| listed.get(index));
    match row {
        Some(Some(id)) => return Ok(*id),
        Some(None) => {
            return Err(CommandError::InvalidArguments(format!(
                "row {} was deleted; run `list` again",
                reference
            )))
        }
        None => {}
    }
    let needle = reference.to_lowercase();
    let matches: Vec<Uuid> = all_ids()?
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(CommandError::InvalidArguments(format!(
            "no entry matches `{}`",
            reference
        ))),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` matches more than one entry",
            reference
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_resolve_rows_and_prefixes() {
        let listed = vec![Some(Uuid::from_u128(1)), Some(Uuid::from_u128(2))];
        let all = || Ok(vec![Uuid::from_u128(1), Uuid::from_u128(0xabc << 116)]);

        assert_eq!(resolve_reference("2", &listed, all).unwrap(), Uuid::from_u128(2));
        assert!(resolve_reference("3", &listed, all).is_err());
        assert_eq!(
            resolve_reference("abc", &listed, all).unwrap(),
            Uuid::from_u128(0xabc << 116)
        );
        assert!(resolve_reference("ffff", &listed, all).is_err());
    }

    #[test]
    fn digit_only_prefixes_fall_back_to_ids() {
        let listed = vec![Some(Uuid::from_u128(1))];
        let numeric = Uuid::from_u128(0x1234_5678 << 96);
        let all = || Ok(vec![Uuid::from_u128(1), numeric]);

        assert_eq!(resolve_reference("12345678", &listed, all).unwrap(), numeric);
        assert_eq!(resolve_reference("1", &listed, all).unwrap(), Uuid::from_u128(1));
    }

    #[test]
    fn deleted_rows_keep_the_other_numbers_stable() {
        let mut listed = vec![
            Some(Uuid::from_u128(1)),
            Some(Uuid::from_u128(2)),
            Some(Uuid::from_u128(3)),
        ];
        let all = || Ok(vec![Uuid::from_u128(2), Uuid::from_u128(3)]);

        forget_listed(&mut listed, Uuid::from_u128(1));

        assert_eq!(resolve_reference("2", &listed, all).unwrap(), Uuid::from_u128(2));
        assert_eq!(resolve_reference("3", &listed, all).unwrap(), Uuid::from_u128(3));
        let err = resolve_reference("1", &listed, all).unwrap_err();
        assert!(err.to_string().contains("was deleted"));
    }
}
