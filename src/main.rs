use std::fs::File;

use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use tagsinput::cli::commands::Cli;
use tagsinput::cli::handlers;

/// Diagnostics go to stderr for subcommands. The TUI owns the terminal, so
/// there they go to `--log-file`, or nowhere unless RUST_LOG asks for them.
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(ref path) = cli.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    } else if cli.command.is_none() && std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Off);
    }
    builder.init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli)?;
    match cli.command {
        None => {
            // No subcommand → launch TUI, then print the host as left
            let config = handlers::load_config(&cli)?;
            let host = tagsinput::tui::run(&config)?;
            println!("{}", host.to_html());
            Ok(())
        }
        Some(_) => handlers::dispatch(cli),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
