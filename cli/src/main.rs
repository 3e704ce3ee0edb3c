use std::process::ExitCode;

use argbind_core::{Commands, HandlerResult, Options, Schema, parse_options_from_args};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Default)]
struct AddOptions {
    operands: Vec<i64>,
}

impl Options for AddOptions {
    fn schema() -> Schema<Self> {
        Schema::new().positional("Operands", |o: &mut Self| &mut o.operands)
    }
}

#[derive(Debug)]
struct HelloOptions {
    language: String,
    name: String,
}

impl Default for HelloOptions {
    fn default() -> Self {
        Self {
            language: String::new(),
            name: "World".to_string(),
        }
    }
}

impl Options for HelloOptions {
    fn schema() -> Schema<Self> {
        Schema::new()
            .option("Language", "lang,l", |o: &mut Self| &mut o.language)
            .positional("Name", |o: &mut Self| &mut o.name)
    }
}

/// Settings a server would start from.
#[derive(Debug, Serialize)]
struct ConfigOptions {
    host: String,
    port: u16,
    verbose: bool,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            verbose: false,
        }
    }
}

impl Options for ConfigOptions {
    fn schema() -> Schema<Self> {
        Schema::new()
            .option("Host", "host,h", |o: &mut Self| &mut o.host)
            .option("Port", "port,p", |o: &mut Self| &mut o.port)
            .option("Verbose", "verbose,v", |o: &mut Self| &mut o.verbose)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let commands = Commands::new()
        .command("add", run_add)
        .command("config", run_config)
        .command("hello", run_hello)
        .default_command(run_hello);

    match commands.handle_commands() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_add(args: &[String]) -> HandlerResult {
    let mut options = AddOptions::default();
    parse_options_from_args(&mut options, args.iter().cloned())?;

    let total: i64 = options.operands.iter().sum();
    let operands: Vec<String> = options.operands.iter().map(ToString::to_string).collect();
    println!("{} = {total}", operands.join(" + "));
    Ok(())
}

fn run_hello(args: &[String]) -> HandlerResult {
    let mut options = HelloOptions::default();
    parse_options_from_args(&mut options, args.iter().cloned())?;

    match options.language.as_str() {
        "fr" => println!("Bonjour {} !", options.name),
        _ => println!("Hello {}!", options.name),
    }
    Ok(())
}

fn run_config(args: &[String]) -> HandlerResult {
    let mut options = ConfigOptions::default();
    parse_options_from_args(&mut options, args.iter().cloned())?;

    if options.verbose {
        info!(host = %options.host, port = options.port, "Loaded configuration");
    }
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
