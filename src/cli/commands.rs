use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tags", about = concat!("tags v", env!("CARGO_PKG_VERSION"), " - a tags editor kept in sync with a multi-select"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: tags.toml in the current directory)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Accept any typed text as a tag
    #[arg(long, global = true)]
    pub free_input: bool,

    /// Placeholder shown in the empty entry
    #[arg(long, global = true)]
    pub placeholder: Option<String>,

    /// Key that turns the entry text into a tag, by name or key code (repeatable)
    #[arg(long = "confirm-key", global = true)]
    pub confirm_keys: Vec<String>,

    /// Write diagnostics to this file
    #[arg(long, global = true)]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply scripted operations, then print the container and host HTML
    Render(ScriptArgs),
    /// Apply scripted operations, then print the items
    Items(ScriptArgs),
}

#[derive(Args)]
pub struct ScriptArgs {
    /// Operations: add:TEXT, value:VALUE, remove:VALUE, clear, type:TEXT, key:NAME
    pub ops: Vec<String>,
    /// Also print the notifications the operations emitted
    #[arg(long)]
    pub events: bool,
}
