//! Library integration tests.

use puzzle_reqs::{PuzzleReqError, RegistryError};

#[test]
fn error_types_are_public() {
    let err = PuzzleReqError::ConfigValidationError {
        message: "duplicate id".into(),
    };
    assert!(err.to_string().contains("duplicate id"));
}

#[test]
fn registry_errors_convert() {
    let err: PuzzleReqError = RegistryError::AlreadyResolved.into();
    assert!(matches!(err, PuzzleReqError::Registry(_)));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> puzzle_reqs::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use puzzle_reqs::cli::{Cli, Commands};

    let cli = Cli::parse_from(["puzzle-reqs", "check", "levels/r1a1.yml", "--json"]);

    if let Commands::Check(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Check command");
    }
}
