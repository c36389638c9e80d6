use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::utils::build_info;

pub(crate) const CONFIG_USAGE: &str = "config [key value]";

pub fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.registry.get(&name.to_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("no command named `{}`", name))
        })?;
        output::info(format!("{}: {}", entry.name, entry.description));
        output::info(format!("usage: {}", entry.usage));
        if !entry.aliases.is_empty() {
            output::info(format!("aliases: {}", entry.aliases.join(", ")));
        }
        return Ok(());
    }

    output::section("Commands");
    let rows: Vec<Vec<String>> = context
        .registry
        .list()
        .into_iter()
        .map(|entry| vec![entry.name.to_string(), entry.description.to_string()])
        .collect();
    output::table(&["Command", "Description"], &rows);
    Ok(())
}

pub fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            output::info(format!("locale    = {}", context.config.locale));
            output::info(format!("currency  = {}", context.config.currency));
            output::info(format!("storage   = {:?}", context.config.storage).to_lowercase());
            output::info(format!(
                "data_file = {}",
                context
                    .config
                    .data_path(context.config_manager.base_dir())
                    .display()
            ));
            Ok(())
        }
        [key, value @ ..] if !value.is_empty() => {
            let storage_before = context.config.storage;
            context.config.set_value(key, &value.join(" "))?;
            context.persist_config()?;
            output::success("Configuration updated.");
            if context.config.storage != storage_before || key.eq_ignore_ascii_case("data_file") {
                output::info("Storage changes take effect the next time the shell starts.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", CONFIG_USAGE))),
    }
}

pub fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let build = build_info::current();
    output::info(format!(
        "finflow {} ({} {}, built {})",
        build.version, build.git_hash, build.profile, build.timestamp
    ));
    Ok(())
}

pub fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
