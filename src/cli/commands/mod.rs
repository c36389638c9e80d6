pub mod budget;
pub mod fixed;
pub mod system;
pub mod transaction;

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::ledger::{dates::parse_anchor, Category};

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "add",
        "Record an income or an expense, optionally split into monthly installments",
        transaction::ADD_USAGE,
        transaction::cmd_add,
    ));
    registry.register(CommandEntry::new(
        "list",
        "List a month's transactions (or `all`) newest first, optionally filtered by a search term",
        transaction::LIST_USAGE,
        transaction::cmd_list,
    )
    .with_aliases(&["ls"]));
    registry.register(CommandEntry::new(
        "edit",
        "Change one field of a transaction; installments update their whole group",
        transaction::EDIT_USAGE,
        transaction::cmd_edit,
    ));
    registry.register(CommandEntry::new(
        "delete",
        "Delete a transaction",
        transaction::DELETE_USAGE,
        transaction::cmd_delete,
    )
    .with_aliases(&["rm"]));
    registry.register(CommandEntry::new(
        "fixed-add",
        "Define a recurring monthly fixed expense",
        fixed::FIXED_ADD_USAGE,
        fixed::cmd_fixed_add,
    ));
    registry.register(CommandEntry::new(
        "fixed-list",
        "List fixed expense definitions",
        "fixed-list",
        fixed::cmd_fixed_list,
    ));
    registry.register(CommandEntry::new(
        "fixed-delete",
        "Remove a fixed expense definition (generated transactions are kept)",
        fixed::FIXED_DELETE_USAGE,
        fixed::cmd_fixed_delete,
    ));
    registry.register(CommandEntry::new(
        "generate",
        "Generate the month's missing fixed-expense transactions",
        "generate [YYYY-MM]",
        fixed::cmd_generate,
    ));
    registry.register(CommandEntry::new(
        "budget-set",
        "Create or replace the monthly budget of a category",
        budget::BUDGET_SET_USAGE,
        budget::cmd_budget_set,
    ));
    registry.register(CommandEntry::new(
        "budgets",
        "Show spending against each budget for a month",
        "budgets [YYYY-MM]",
        budget::cmd_budgets,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show income, expenses and balance for a month",
        "summary [YYYY-MM]",
        budget::cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show configuration or set a key (locale, currency, storage, data_file)",
        system::CONFIG_USAGE,
        system::cmd_config,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        system::cmd_version,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List commands or show usage for one",
        "help [command]",
        system::cmd_help,
    ));
    registry.register(CommandEntry::new(
        "exit",
        "Leave the shell",
        "exit",
        system::cmd_exit,
    )
    .with_aliases(&["quit"]));
}

pub(crate) fn require_args(args: &[&str], count: usize, usage: &str) -> Result<(), CommandError> {
    if args.len() < count {
        return Err(CommandError::InvalidArguments(format!("usage: {}", usage)));
    }
    Ok(())
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, CommandError> {
    raw.parse::<Category>().map_err(|_| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        CommandError::InvalidArguments(format!(
            "unknown category `{}` (expected one of: {})",
            raw,
            names.join(", ")
        ))
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    Ok(parse_anchor(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_usages_match_the_handlers_messages() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        let usage = |name: &str| registry.get(name).map(|entry| entry.usage);
        assert_eq!(usage("add"), Some(transaction::ADD_USAGE));
        assert_eq!(usage("ls"), Some(transaction::LIST_USAGE));
        assert_eq!(usage("edit"), Some(transaction::EDIT_USAGE));
        assert_eq!(usage("rm"), Some(transaction::DELETE_USAGE));
        assert_eq!(usage("fixed-add"), Some(fixed::FIXED_ADD_USAGE));
        assert_eq!(usage("fixed-delete"), Some(fixed::FIXED_DELETE_USAGE));
        assert_eq!(usage("budget-set"), Some(budget::BUDGET_SET_USAGE));
        assert_eq!(usage("config"), Some(system::CONFIG_USAGE));
    }

    #[test]
    fn missing_arguments_report_the_registered_usage() {
        let err = require_args(&["1"], 3, transaction::EDIT_USAGE).unwrap_err();
        assert_eq!(err.to_string(), format!("usage: {}", transaction::EDIT_USAGE));
    }
}
