use std::io::{self, Read};
use std::process::ExitCode;

use plates_core::{AppState, OutputSink, execute_command, store};

mod input;
mod output;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(output: &output::JsonOutputSink) -> plates_core::Result<()> {
    // Read JSON from stdin
    let mut json_str = String::new();
    io::stdin().read_to_string(&mut json_str)?;

    let json_input: input::JsonInput = serde_json::from_str(&json_str).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid JSON input: {}", e),
        )
    })?;

    let app = AppState::load(json_input.home.clone())?;
    let config = app.resolve_config(&json_input.overrides());
    init_logging(config.verbose);
    log::debug!("working file: {}", config.working_file.display());

    let mut registry = store::load_working(&config.working_file)?;
    let effect = execute_command(&mut registry, &json_input.command, &config, output)?;
    if effect.mutated() {
        store::write_working(&registry, &config.working_file)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // --json-schema: print input schema and exit
    if args.iter().any(|a| a == "--json-schema") {
        let schema = schemars::schema_for!(input::JsonInput);
        return match serde_json::to_string_pretty(&schema) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to render schema: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // --version
    if args.iter().any(|a| a == "--version") {
        println!("plates-json {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let output = output::JsonOutputSink;
    let result = run(&output);
    output.emit_done(&result);
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
