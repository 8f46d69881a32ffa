mod cli;
mod output;
mod shell;

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use plates_core::{AppState, Command, ResolvedConfig, execute_command, store};

use crate::cli::{Cli, CliCommand};
use crate::output::OutputHandler;

/// Logs go to stderr. `RUST_LOG` wins over the verbosity default.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run_once(command: &Command, config: &ResolvedConfig) -> plates_core::Result<()> {
    let mut registry = store::load_working(&config.working_file)?;
    let effect = execute_command(&mut registry, command, config, &OutputHandler)?;
    if effect.mutated() {
        store::write_working(&registry, &config.working_file)?;
    }
    Ok(())
}

fn run_shell(load: Option<&Path>, config: &ResolvedConfig) -> plates_core::Result<()> {
    let output = OutputHandler;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    // the session owns the stdin lock; confirmations read through it too
    let shell_io = shell::ShellIo::new(&output, stdin.lock(), interactive);
    let mut session = shell::Session::new(config, &shell_io);
    if let Some(path) = load {
        session.execute(&Command::Import {
            path: path.to_path_buf(),
        })?;
    }

    if interactive {
        eprintln!(
            "plates {} - type 'help' for commands",
            env!("CARGO_PKG_VERSION")
        );
    }
    shell::run(session, &shell_io)?;
    Ok(())
}

fn run(cli: Cli) -> plates_core::Result<()> {
    let app = AppState::load(cli.home.clone())?;
    let config = app.resolve_config(&cli.overrides());
    init_logging(config.verbose);
    log::debug!("working file: {}", config.working_file.display());

    match (&cli.command, cli.command.to_command()) {
        (_, Some(command)) => run_once(&command, &config),
        (CliCommand::Shell { load, .. }, None) => run_shell(load.as_deref(), &config),
        (_, None) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
