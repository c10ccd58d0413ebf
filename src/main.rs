//! privacy-onboarding CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use privacy_onboarding::cli::{Cli, Commands};
use privacy_onboarding::commands::{
    run_browse, run_dismiss, run_home, run_messages, run_status, CommandContext,
};
use privacy_onboarding::OnboardingConfig;

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> privacy_onboarding::Result<String> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => OnboardingConfig::load_from(path)?,
        None => OnboardingConfig::load()?,
    };
    init_logging(&config, cli.verbose);

    let ctx = CommandContext::from_cli(&cli, &config)?;
    match &cli.command {
        Commands::Home => run_home(&ctx),
        Commands::Browse(args) => run_browse(args, &ctx),
        Commands::Dismiss => run_dismiss(&ctx),
        Commands::Status => run_status(&ctx),
        Commands::Messages => run_messages(&ctx),
    }
}

/// Logs go to stderr; `RUST_LOG` adds to the configured level.
fn init_logging(config: &OnboardingConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let mut filter = EnvFilter::from_default_env();
    match format!("privacy_onboarding={}", level).parse::<Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level {:?}: {}", level, e),
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
