//! Library integration tests.

use quizctl::QuizctlError;

#[test]
fn error_types_are_public() {
    let err = QuizctlError::ToolMissing {
        tool: "docker".into(),
        message: "not on PATH".into(),
    };
    assert!(err.to_string().contains("docker"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> quizctl::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use quizctl::cli::{Cli, Commands};

    // Actually test parsing with parse_from
    let cli = Cli::parse_from(["quizctl", "status", "--json"]);
    assert!(cli.command.is_some());

    if let Some(Commands::Status(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Status command");
    }
}
