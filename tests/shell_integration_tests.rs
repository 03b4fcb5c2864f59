//! Integration tests for the command shell
//!
//! This test suite drives the public API end to end:
//! - Tokenizing raw lines into typed arguments
//! - Registering commands from providers
//! - Dispatching lines through a terminal and reading the display buffer

use cmdterm::config::ShellConfig;
use cmdterm::output::{OutputSink, Severity, TextBuffer};
use cmdterm::shell::{
    ArgumentKind, ArgumentToken, ArityBound, CommandContext, CommandRegistry, CommandSpec,
    DispatchError, Dispatcher, HandlerError, Host, Outcome, RegistryError, Terminal, tokenize,
};

#[derive(Default)]
struct RecordingHost {
    clears: usize,
    quits: usize,
}

impl Host for RecordingHost {
    fn clear_display(&mut self) {
        self.clears += 1;
    }

    fn quit(&mut self) {
        self.quits += 1;
    }
}

fn terminal() -> Terminal {
    Terminal::new(&ShellConfig::default()).unwrap()
}

fn lines(terminal: &Terminal) -> Vec<(Severity, String)> {
    terminal
        .buffer()
        .entries()
        .map(|entry| (entry.severity, entry.text.clone()))
        .collect()
}

fn sum(ctx: &mut CommandContext<'_>, args: &[ArgumentToken]) -> Result<(), HandlerError> {
    let mut total = 0.0;
    for arg in args {
        let Some(value) = arg.as_float() else {
            return Err(HandlerError::new(format!(
                "SUM: '{}' is a {}, expected a number",
                arg,
                arg.kind()
            )));
        };
        total += value;
    }
    ctx.log_formatted("sum = {0}", &[&total]);
    Ok(())
}

fn math_commands() -> Vec<CommandSpec> {
    vec![CommandSpec::new("sum", sum).help("Adds numbers").min_args(1)]
}

#[test]
fn test_tokenize_kinds_follow_priority_order() {
    let tokens = tokenize("-5 true TRUE truee 1.5 \"two words\"");
    let kinds: Vec<ArgumentKind> = tokens.iter().map(ArgumentToken::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ArgumentKind::Int,
            ArgumentKind::Bool,
            ArgumentKind::Bool,
            ArgumentKind::String,
            ArgumentKind::Float,
            ArgumentKind::String,
        ]
    );
    assert_eq!(tokens[5].as_str(), "two words");
}

#[test]
fn test_empty_line_produces_nothing() {
    let mut terminal = terminal();
    assert_eq!(terminal.execute(""), Outcome::Empty);
    assert!(terminal.buffer().is_empty());
}

#[test]
fn test_print_appends_one_line() {
    let mut terminal = terminal();
    terminal.execute("print a b c");
    assert_eq!(lines(&terminal), vec![(Severity::Message, "a b c".to_string())]);
}

#[test]
fn test_help_enumerates_registered_commands_in_order() {
    let mut registry = CommandRegistry::new();
    for spec in cmdterm::shell::builtins::commands() {
        if ["CLEAR", "HELP", "PRINT"].contains(&spec.name()) {
            registry.register(spec).unwrap();
        }
    }
    let mut terminal = Terminal::with_registry(registry, &ShellConfig::default());

    terminal.execute("help");
    let names: Vec<String> = terminal
        .buffer()
        .entries()
        .map(|entry| entry.text.split(':').next().unwrap_or_default().trim().to_string())
        .collect();
    assert_eq!(names, vec!["CLEAR", "HELP", "PRINT"]);
}

#[test]
fn test_clear_with_argument_is_arity_violation() {
    let registry = CommandRegistry::from_providers(cmdterm::shell::PROVIDERS).unwrap();
    let mut buffer = TextBuffer::new(16);
    let mut host = RecordingHost::default();

    let outcome = Dispatcher::new(&registry).execute("clear extra", &mut buffer, &mut host);
    match outcome {
        Outcome::Failed(DispatchError::Arity(violation)) => {
            assert_eq!(violation.command, "CLEAR");
            assert_eq!(violation.bound, ArityBound::TooMany);
            assert_eq!(violation.actual, 1);
        }
        other => panic!("expected arity violation, got {other:?}"),
    }
    assert_eq!(host.clears, 0);
    assert_eq!(
        buffer.last_error().map(|e| e.text.as_str()),
        Some("CLEAR: too many arguments (got 1, expected exactly 0)")
    );
}

#[test]
fn test_model_unknown_mode_is_handler_error() {
    let mut terminal = terminal();
    let outcome = terminal.execute("model bogus");
    assert!(matches!(
        outcome,
        Outcome::Failed(DispatchError::Handler { .. })
    ));
    assert_eq!(
        lines(&terminal),
        vec![(
            Severity::Error,
            "Unknown mode 'bogus' for the Model command.".to_string()
        )]
    );
}

#[test]
fn test_unknown_command_leaves_shell_usable() {
    let mut terminal = terminal();
    let outcome = terminal.execute("unknowncmd");
    assert!(matches!(
        outcome,
        Outcome::Failed(DispatchError::CommandNotFound { .. })
    ));

    let outcome = terminal.execute("print still works");
    assert_eq!(
        outcome,
        Outcome::Completed {
            command: "PRINT".to_string()
        }
    );
    assert_eq!(
        lines(&terminal),
        vec![
            (Severity::Error, "Command not found: UNKNOWNCMD".to_string()),
            (Severity::Message, "still works".to_string()),
        ]
    );
}

#[test]
fn test_duplicate_names_differing_in_case_fail_startup() {
    fn noop(_: &mut CommandContext<'_>, _: &[ArgumentToken]) -> Result<(), HandlerError> {
        Ok(())
    }
    fn shadowing_provider() -> Vec<CommandSpec> {
        vec![CommandSpec::new("Print", noop)]
    }

    let result = CommandRegistry::from_providers(&[
        cmdterm::shell::builtins::commands,
        shadowing_provider,
    ]);
    assert_eq!(
        result.unwrap_err(),
        RegistryError::DuplicateCommand("PRINT".to_string())
    );
}

#[test]
fn test_custom_provider_uses_typed_arguments() {
    let registry =
        CommandRegistry::from_providers(&[cmdterm::shell::builtins::commands, math_commands])
            .unwrap();
    let mut terminal = Terminal::with_registry(registry, &ShellConfig::default());

    terminal.execute("sum 1 2.5 -0.5");
    terminal.execute("SUM 1 two");
    terminal.execute("help sum");

    assert_eq!(
        lines(&terminal),
        vec![
            (Severity::Message, "sum = 3".to_string()),
            (
                Severity::Error,
                "SUM: 'two' is a string, expected a number".to_string()
            ),
            (Severity::Message, "Adds numbers".to_string()),
        ]
    );
}

#[test]
fn test_external_sink_receives_output() {
    #[derive(Default)]
    struct Collect(Vec<String>);

    impl OutputSink for Collect {
        fn append_line(&mut self, severity: Severity, text: &str) {
            self.0.push(format!("[{}] {}", severity, text));
        }
    }

    let registry = CommandRegistry::from_providers(cmdterm::shell::PROVIDERS).unwrap();
    let mut sink = Collect::default();
    let mut host = RecordingHost::default();
    let dispatcher = Dispatcher::new(&registry);

    dispatcher.execute("print hi", &mut sink, &mut host);
    dispatcher.execute("nope", &mut sink, &mut host);
    dispatcher.execute("quit", &mut sink, &mut host);

    assert_eq!(
        sink.0,
        vec!["[message] hi", "[error] Command not found: NOPE"]
    );
    assert_eq!(host.quits, 1);
}
