use std::io::{self, Write};
use std::path::{Path, PathBuf};

use argp_core::{
    OptionDef, OptionTable, ParseFailure, ParseOutcome, parse, write_option_list, write_usage,
};
use clap::{Args, Parser, Subcommand};
use tracing::{Level, debug};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status for arguments rejected by an option table.
const EXIT_PARSE_FAILURE: i32 = 2;

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argp", version, disable_help_subcommand = true)]
#[command(about = "Parse arguments and render help from argp option tables")]
struct Cli {
    /// Emit debug logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments against an option table file.
    Parse(ParseArgs),
    /// Render the help listing of an option table file.
    Help(HelpArgs),
    /// Load and validate an option table file.
    Check(CheckArgs),
    /// Parse arguments against the built-in demo table.
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Option table file (YAML, or JSON with a .json extension).
    #[arg(long)]
    table: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse; put them after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Option table file (YAML, or JSON with a .json extension).
    #[arg(long)]
    table: PathBuf,
    /// Program name for the usage banner; without it only the option list
    /// is printed.
    #[arg(long)]
    program: Option<String>,
    /// Positional usage text shown after `[options...]`.
    #[arg(long, default_value = "")]
    usage: String,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Option table file (YAML, or JSON with a .json extension).
    #[arg(long)]
    table: PathBuf,
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Arguments to parse; put them after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Check(args) => run_check(args),
        Command::Demo(args) => run_demo(args),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn load_table(path: &Path) -> Result<OptionTable, String> {
    OptionTable::load(path).map_err(|err| format!("'{}': {err}", path.display()))
}

fn run_parse(args: ParseArgs) -> Result<i32, String> {
    let table = load_table(&args.table)?;
    debug!(args = ?args.args, "parsing arguments");

    match parse(&table, &args.args) {
        Ok(outcome) => {
            println!("{}", format_outcome(&outcome, args.format)?);
            Ok(0)
        }
        Err(failure) => {
            report_failure(&failure);
            Ok(EXIT_PARSE_FAILURE)
        }
    }
}

fn run_help(args: HelpArgs) -> Result<i32, String> {
    let table = load_table(&args.table)?;
    let mut stdout = io::stdout().lock();

    let written = match &args.program {
        Some(program) => write_usage(&mut stdout, &table, program, &args.usage),
        None => write_option_list(&mut stdout, &table),
    };
    written
        .and_then(|()| stdout.flush())
        .map_err(|err| format!("Failed to write help: {err}"))?;
    Ok(0)
}

fn run_check(args: CheckArgs) -> Result<i32, String> {
    let table = load_table(&args.table)?;
    let entries = table.entries();
    let aliases = entries.iter().filter(|e| e.is_alias()).count();
    let docs = entries.iter().filter(|e| e.is_doc_entry()).count();
    let options = entries.len() - aliases - docs;

    println!(
        "'{}' is valid: {options} option(s), {aliases} alias(es), {docs} doc line(s).",
        args.table.display()
    );
    Ok(0)
}

fn run_demo(args: DemoArgs) -> Result<i32, String> {
    let table = demo_table()?;

    let outcome = match parse(&table, &args.args) {
        Ok(outcome) => outcome,
        Err(failure) => {
            report_failure(&failure);
            return Ok(EXIT_PARSE_FAILURE);
        }
    };

    if outcome.has_opt("help") {
        let mut stdout = io::stdout().lock();
        write_usage(&mut stdout, &table, "argp demo", "ARG1 ARG2...")
            .and_then(|()| stdout.flush())
            .map_err(|err| format!("Failed to write help: {err}"))?;
        return Ok(0);
    }
    if outcome.has_opt("version") {
        println!("{PACKAGE_VERSION}");
        return Ok(0);
    }

    for matched in &outcome.options {
        println!("{}: {}", matched.input, matched.arg);
    }
    println!("args: {:?}", outcome.args);
    Ok(0)
}

fn demo_table() -> Result<OptionTable, String> {
    OptionTable::new(vec![
        OptionDef::header("OPTIONS:"),
        OptionDef::short('a').with_doc("enable option a"),
        OptionDef::new('b', "bb").with_doc("run in mode b"),
        OptionDef::new('s', "silent").with_doc("run in silent mode"),
        OptionDef::short('q').alias(),
        OptionDef::new('o', "output")
            .with_arg("<file>")
            .with_doc("write output to <file>"),
        OptionDef::new('k', "kind")
            .with_arg("<kind>")
            .optional()
            .with_doc("select a kind\n(attached only: -kKIND or --kind=KIND)"),
        OptionDef::short('1').with_doc("run only once"),
        OptionDef::spacer(),
        OptionDef::new('h', "help").with_doc("print help"),
        OptionDef::new('V', "version").with_doc("print version"),
    ])
    .map_err(|err| format!("Invalid demo table: {err}"))
}

fn format_outcome(outcome: &ParseOutcome, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(outcome)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(outcome).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

fn report_failure(failure: &ParseFailure) {
    eprintln!("error: {failure}");
    if !failure.args.is_empty() {
        eprintln!("arguments before the error: {}", failure.args.join(" "));
    }
}
