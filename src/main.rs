use std::process::ExitCode;

use anyhow::{Context, Result};

use allotment::{
    cli::{CliArgs, CliCommand, EXIT_FEASIBLE, USAGE, Verdict, evaluate_document, exit_status},
    config::Config,
    logging::init_tracing,
};

fn main() -> ExitCode {
    let result = CliCommand::from_env().and_then(|command| match command {
        CliCommand::Help => {
            println!("{USAGE}");
            Ok(None)
        }
        CliCommand::Evaluate(args) => run(&args).map(Some),
    });

    let status = match result {
        Ok(None) => EXIT_FEASIBLE,
        Ok(Some(verdict)) => {
            println!("{}", verdict.label());
            exit_status(&Ok(verdict))
        }
        Err(err) => {
            eprintln!("Error: {err:?}");
            exit_status(&Err(err))
        }
    };

    ExitCode::from(status)
}

fn run(args: &CliArgs) -> Result<Verdict> {
    let config = Config::discover(args.config_path.as_deref()).context("failed to load config")?;
    let logging = init_tracing(&config.logging).context("failed to initialize logging")?;

    let _evaluation = logging.evaluation_span(&args.document_path).entered();
    evaluate_document(&args.document_path)
}
