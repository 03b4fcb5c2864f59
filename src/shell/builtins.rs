#![forbid(unsafe_code)]

//! Built-in commands: model, clear, help, print, quit

use super::command::{CommandContext, CommandSpec, HandlerError};
use super::token::ArgumentToken;

/// Provider for the built-in command set
pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("model", command_model)
            .help("Lists models or copies a model from one path to another")
            .min_args(1)
            .max_args(3),
        CommandSpec::new("clear", command_clear)
            .help("Clears the Command Console")
            .max_args(0),
        CommandSpec::new("help", command_help)
            .help("Lists all Commands or displays help documentation of a Command")
            .max_args(1),
        CommandSpec::new("print", command_print)
            .help("Outputs message")
            .unbounded(),
        CommandSpec::new("quit", command_quit)
            .help("Quits running Application")
            .max_args(0),
    ]
}

fn command_model(ctx: &mut CommandContext<'_>, args: &[ArgumentToken]) -> Result<(), HandlerError> {
    let mode = args
        .first()
        .map(|arg| arg.as_str().to_lowercase())
        .unwrap_or_default();

    match mode.as_str() {
        "list" => {
            ctx.log("Listing all models...");
            Ok(())
        }
        _ => Err(HandlerError::new(format!(
            "Unknown mode '{}' for the Model command.",
            mode
        ))),
    }
}

fn command_clear(ctx: &mut CommandContext<'_>, _: &[ArgumentToken]) -> Result<(), HandlerError> {
    ctx.host.clear_display();
    Ok(())
}

fn command_help(ctx: &mut CommandContext<'_>, args: &[ArgumentToken]) -> Result<(), HandlerError> {
    let registry = ctx.registry;

    let Some(target) = args.first() else {
        for spec in registry.enumerate() {
            let line = format!("{:<16}: {}", spec.name(), spec.help_text().unwrap_or_default());
            ctx.log(&line);
        }
        return Ok(());
    };

    let name = target.as_str().to_uppercase();
    let Ok(spec) = registry.lookup(&name) else {
        return Err(HandlerError::new(format!("Command {} could not be found.", name)));
    };

    match spec.help_text() {
        Some(help) => ctx.log(help),
        None => ctx.log_formatted("{0} does not provide any help documentation.", &[&name]),
    }
    Ok(())
}

fn command_print(ctx: &mut CommandContext<'_>, args: &[ArgumentToken]) -> Result<(), HandlerError> {
    let words: Vec<&str> = args.iter().map(ArgumentToken::as_str).collect();
    ctx.log(&words.join(" "));
    Ok(())
}

fn command_quit(ctx: &mut CommandContext<'_>, _: &[ArgumentToken]) -> Result<(), HandlerError> {
    ctx.host.quit();
    Ok(())
}
