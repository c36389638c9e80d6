use crate::cli::core::{forget_listed, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::Period;
use crate::ledger::{
    AmountMode, InstallmentPlan, Transaction, TransactionDraft, TransactionKind, YearMonth,
};

use super::{parse_category, parse_date, require_args};

pub(crate) const ADD_USAGE: &str =
    "add <expense|income> <amount> <category> <YYYY-MM-DD> <description> [installments] [total|each]";
pub(crate) const LIST_USAGE: &str = "list [YYYY-MM|current|next|all] [search]";
pub(crate) const EDIT_USAGE: &str = "edit <row|id> <amount|category|date|description|type> <value>";
pub(crate) const DELETE_USAGE: &str = "delete <row|id>";

fn parse_kind(raw: &str) -> Result<TransactionKind, CommandError> {
    match raw.to_lowercase().as_str() {
        "expense" | "out" => Ok(TransactionKind::Expense),
        "income" | "in" => Ok(TransactionKind::Income),
        other => Err(CommandError::InvalidArguments(format!(
            "type must be `expense` or `income`, got `{}`",
            other
        ))),
    }
}

fn parse_plan(count: Option<&&str>, mode: Option<&&str>) -> Result<InstallmentPlan, CommandError> {
    let count = match count {
        Some(raw) => raw.parse::<u32>().ok().filter(|n| *n >= 1).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "installments must be a whole number of at least 1, got `{}`",
                raw
            ))
        })?,
        None => 1,
    };
    let mode = match mode.map(|raw| raw.to_lowercase()) {
        None => AmountMode::Total,
        Some(raw) if raw == "total" => AmountMode::Total,
        Some(raw) if raw == "each" => AmountMode::PerInstallment,
        Some(raw) => {
            return Err(CommandError::InvalidArguments(format!(
                "amount mode must be `total` or `each`, got `{}`",
                raw
            )))
        }
    };
    Ok(InstallmentPlan::new(count, mode))
}

pub fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 5, ADD_USAGE)?;
    let kind = parse_kind(args[0])?;
    let amount_cents = context.parse_amount(args[1])?;
    let category = parse_category(args[2])?;
    let date = parse_date(args[3])?;
    let description = args[4].trim().to_string();
    if description.is_empty() {
        return Err(CommandError::InvalidArguments("description cannot be empty".into()));
    }
    let plan = parse_plan(args.get(5), args.get(6))?;

    let draft = TransactionDraft {
        kind,
        category,
        amount_cents,
        description,
        date,
    };
    let created = context.tracker.add_transaction(draft, plan)?;
    match created.as_slice() {
        [single] => output::success(format!(
            "Recorded {} of {} on {}.",
            single.kind.label(),
            context.money.format(single.amount_cents),
            single.date
        )),
        members => {
            output::success(format!("Recorded {} installments.", members.len()));
            for member in members {
                output::info(format!(
                    "{}  {}  {}",
                    member.date,
                    context.money.format(member.amount_cents),
                    member.description
                ));
            }
        }
    }
    Ok(())
}

fn installment_label(txn: &Transaction) -> String {
    match (txn.installment_info, txn.fixed_expense_id) {
        (Some(info), _) => format!("{}/{}", info.current, info.total),
        (None, Some(_)) => "fixed".into(),
        (None, None) => String::new(),
    }
}

/// Splits `list` arguments into a period and an optional search term. A leading
/// word that is not a period keyword or `YYYY-MM` starts the search term.
fn parse_list_args(current: YearMonth, args: &[&str]) -> (Period, Option<String>) {
    let (period, rest) = match args.first().map(|raw| raw.to_lowercase()) {
        Some(word) if word == "current" => (Period::Month(current), &args[1..]),
        Some(word) if word == "next" => (Period::Month(current.offset(1)), &args[1..]),
        Some(word) if word == "all" => (Period::All, &args[1..]),
        Some(word) => match word.parse::<YearMonth>() {
            Ok(month) => (Period::Month(month), &args[1..]),
            Err(_) => (Period::Month(current), args),
        },
        None => (Period::Month(current), args),
    };
    let term = rest.join(" ");
    let term = term.trim();
    (period, (!term.is_empty()).then(|| term.to_string()))
}

pub fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (period, search) = parse_list_args(context.tracker.current_month(), args);
    let transactions = context.tracker.find_transactions(period, search.as_deref())?;
    context.listed_transactions = transactions.iter().map(|txn| Some(txn.id)).collect();

    let title = match period {
        Period::Month(month) => format!("Transactions {}", month),
        Period::All => "All transactions".to_string(),
    };
    match &search {
        Some(term) => output::section(format!("{} matching `{}`", title, term)),
        None => output::section(title),
    }
    if transactions.is_empty() {
        output::info("No matching transactions.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .enumerate()
        .map(|(index, txn)| {
            vec![
                (index + 1).to_string(),
                txn.date.to_string(),
                txn.kind.label().to_string(),
                txn.category.to_string(),
                context.money.format(txn.amount_cents),
                txn.description.clone(),
                installment_label(txn),
            ]
        })
        .collect();
    output::table(
        &["#", "Date", "Type", "Category", "Amount", "Description", "Plan"],
        &rows,
    );
    Ok(())
}

pub fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, EDIT_USAGE)?;
    let existing = context.resolve_transaction(args[0])?;
    let value = args[2..].join(" ");
    let mut edited = existing.clone();
    match args[1].to_lowercase().as_str() {
        "amount" => edited.amount_cents = context.parse_amount(&value)?,
        "category" => edited.category = parse_category(&value)?,
        "date" => edited.date = parse_date(&value)?,
        "description" => edited.description = value.trim().to_string(),
        "type" => edited.kind = parse_kind(&value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{}`; usage: {}",
                other, EDIT_USAGE
            )))
        }
    }

    let written = context.tracker.update_transaction(edited)?;
    if written.len() > 1 {
        output::success(format!(
            "Updated {} installments of the group.",
            written.len()
        ));
    } else {
        output::success("Transaction updated.");
    }
    Ok(())
}

pub fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, DELETE_USAGE)?;
    let target = context.resolve_transaction(args[0])?;
    if !context.confirm(&format!("Delete `{}`?", target.description))? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    context.tracker.delete_transaction(target.id)?;
    forget_listed(&mut context.listed_transactions, target.id);
    output::success(format!("Deleted `{}`.", target.description));
    Ok(())
}
