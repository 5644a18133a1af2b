use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::config::TagsInputConfig;
use crate::ops::events::TagEvent;
use crate::widget::{Key, TagsInput};

// ---------------------------------------------------------------------------
// Scripted operations
// ---------------------------------------------------------------------------

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    /// `add:TEXT`, resolved like typed text
    Add(String),
    /// `value:VALUE`, looked up among the allowed items
    Value(String),
    /// `remove:VALUE`
    Remove(String),
    /// `clear`
    Clear,
    /// `type:TEXT`, typed into the entry and then confirmed with Enter
    Type(String),
    /// `key:NAME`
    Key(Key),
}

impl FromStr for ScriptOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "clear" {
            return Ok(ScriptOp::Clear);
        }
        let (op, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid operation '{}' (expected OP:ARG or clear)", s))?;
        match op {
            "add" => Ok(ScriptOp::Add(arg.to_string())),
            "value" => Ok(ScriptOp::Value(arg.to_string())),
            "remove" => Ok(ScriptOp::Remove(arg.to_string())),
            "type" => Ok(ScriptOp::Type(arg.to_string())),
            "key" => Key::from_name(arg)
                .map(ScriptOp::Key)
                .ok_or_else(|| format!("unknown key '{}'", arg)),
            _ => Err(format!("unknown operation '{}'", op)),
        }
    }
}

/// Apply `ops` in order.
pub fn run_script(input: &mut TagsInput, ops: &[ScriptOp]) {
    for op in ops {
        log::debug!("script: {:?}", op);
        match op {
            ScriptOp::Add(text) => {
                input.add(text.as_str());
            }
            ScriptOp::Value(value) => {
                input.add_by_value(value);
            }
            ScriptOp::Remove(value) => {
                input.remove(value);
            }
            ScriptOp::Clear => input.remove_all(),
            ScriptOp::Type(text) => {
                input.focus();
                input.type_text(text);
                input.handle_key(Key::Enter);
            }
            ScriptOp::Key(key) => {
                input.focus();
                input.handle_key(*key);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Parse a `--confirm-key` argument: a key code, or a key name.
pub fn parse_confirm_key(s: &str) -> Result<u32, String> {
    if let Ok(code) = s.parse::<u32>() {
        return Ok(code);
    }
    Key::from_name(s)
        .map(Key::code)
        .ok_or_else(|| format!("unknown confirm key '{}'", s))
}

/// Apply command-line overrides on top of the file config.
pub fn apply_overrides(config: &mut TagsInputConfig, cli: &Cli) -> Result<(), String> {
    if cli.free_input {
        config.free_input = true;
    }
    if let Some(ref placeholder) = cli.placeholder {
        config.placeholder = placeholder.clone();
    }
    if !cli.confirm_keys.is_empty() {
        config.confirm_keys = cli
            .confirm_keys
            .iter()
            .map(|k| parse_confirm_key(k))
            .collect::<Result<_, _>>()?;
    }
    Ok(())
}

/// Load the config named by `-c`, or tags.toml in the working directory,
/// with command-line overrides applied.
pub fn load_config(cli: &Cli) -> Result<TagsInputConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;
    apply_overrides(&mut config, cli)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let json = cli.json;

    match cli.command {
        None => Err("no subcommand given".into()),
        Some(Commands::Render(args)) => cmd_render(&config, args),
        Some(Commands::Items(args)) => cmd_items(&config, args, json),
    }
}

/// Build the widget, run the script, and return it with the events it emitted.
fn run_session(
    config: &TagsInputConfig,
    args: &ScriptArgs,
) -> Result<(TagsInput, Vec<TagEvent>), Box<dyn std::error::Error>> {
    let ops = args
        .ops
        .iter()
        .map(|s| s.parse::<ScriptOp>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut input = TagsInput::new(config);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let id = input.subscribe(move |e: &TagEvent| sink.borrow_mut().push(e.clone()));

    run_script(&mut input, &ops);
    input.unsubscribe(id);

    let events = events.take();
    Ok((input, events))
}

fn cmd_render(config: &TagsInputConfig, args: ScriptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (input, events) = run_session(config, &args)?;
    if args.events {
        for event in &events {
            println!("{}", format_event(event));
        }
    }
    println!("{}", input.to_html());
    println!("{}", input.host().to_html());
    Ok(())
}

fn cmd_items(
    config: &TagsInputConfig,
    args: ScriptArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (input, events) = run_session(config, &args)?;

    if json {
        let state = StateJson {
            items: input.items().iter().map(item_to_json).collect(),
            options: input.options().map(option_to_json).collect(),
            events: args
                .events
                .then(|| events.iter().map(event_to_json).collect()),
        };
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        if args.events {
            for event in &events {
                println!("{}", format_event(event));
            }
        }
        for item in input.items() {
            println!("{}", format_item(item));
        }
    }
    Ok(())
}
