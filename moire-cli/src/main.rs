//! Command-line interface for moire
//! This binary converts moire documents into publication dialects and inspects their parse.
//!
//! Usage:
//!   moire convert `<path>` --to `<format>` [--output `<file>`]          - Render one document
//!   moire build `<source-root>` `<output-root>` [--dialect `<name>`]... - Render a source tree
//!   moire inspect `<path>` [--format `<transform>`]                   - Dump tokens or the AST
//!   moire formats                                                   - List formats and commands
//!
//! Settings come from the built-in defaults, then `moire.toml` in the working directory if
//! present, then the file given with `--config`.

mod transforms;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use moire_babel::publish::{publish_with, PublishArtifact, PublishSpec};
use moire_babel::{build, BuildSpec, Format, FormatRegistry};
use moire_config::{Loader, MoireConfig};
use moire_parser::moire::ast::format_source_context;
use moire_parser::moire::registry::COMMANDS;
use moire_parser::parse_document;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Project configuration picked up from the working directory
const PROJECT_CONFIG: &str = "moire.toml";

fn cli() -> Command {
    Command::new("moire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert moire documents to Markdown, HTML and wiki markup")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("convert")
                .about("Render one document to one format")
                .arg(
                    Arg::new("path")
                        .help("Path to the moire file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .required(true)
                        .help("Output format (markdown, html, wiki)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Render every document under a directory in every dialect")
                .arg(
                    Arg::new("source")
                        .help("Directory holding moire sources")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .help("Directory receiving one subdirectory per dialect")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(2),
                )
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .short('d')
                        .action(ArgAction::Append)
                        .help("Dialect to produce; repeat for several (default: from config)"),
                )
                .arg(
                    Arg::new("jobs")
                        .long("jobs")
                        .short('j')
                        .value_parser(value_parser!(usize))
                        .help("Worker threads (default: from config, 0 = one per core)"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the tokens or the parsed tree of a document")
                .arg(
                    Arg::new("path")
                        .help("Path to the moire file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(transforms::AVAILABLE_TRANSFORMS.to_vec())
                        .default_value("ast-treeviz")
                        .help("Inspection view"),
                ),
        )
        .subcommand(Command::new("formats").about("List output formats and markup commands"))
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let result = load_config(matches.get_one::<PathBuf>("config")).and_then(|config| {
        match matches.subcommand() {
            Some(("convert", sub)) => handle_convert_command(sub, &config),
            Some(("build", sub)) => handle_build_command(sub, &config),
            Some(("inspect", sub)) => handle_inspect_command(sub, &config),
            Some(("formats", _)) => handle_formats_command(&config),
            _ => Err("no command given (see --help)".to_string()),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step above warn
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<MoireConfig, String> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .map_err(|e| format!("invalid configuration: {}", e))
}

fn registry_for(config: &MoireConfig) -> FormatRegistry {
    FormatRegistry::configured(|name| config.render_options(name))
}

fn read_source(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &MoireConfig) -> Result<(), String> {
    let path = required(matches, "path")?;
    let format = required(matches, "to")?;

    let registry = registry_for(config);
    if !registry.has(format) {
        return Err(format!(
            "format '{}' not found (available: {})",
            format,
            registry.list_formats().join(", ")
        ));
    }

    let source = read_source(path)?;
    let document = parse_document(&source).map_err(|e| {
        format!(
            "{}:{}\n{}",
            path,
            e,
            format_source_context(&source, e.position()).trim_end()
        )
    })?;

    let mut spec = PublishSpec::new(&document, format);
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        spec = spec.with_output_path(output);
    }
    let result = publish_with(&registry, spec).map_err(|e| format!("{}:{}", path, e))?;

    if let PublishArtifact::InMemory(text) = result.artifact {
        print!("{}", text);
    }
    Ok(())
}

/// Handle the build command
fn handle_build_command(matches: &ArgMatches, config: &MoireConfig) -> Result<(), String> {
    let source = required_path(matches, "source")?;
    let output = required_path(matches, "output")?;

    let dialects: Vec<String> = match matches.get_many::<String>("dialect") {
        Some(values) => values.cloned().collect(),
        None => config.build.dialects.clone(),
    };
    let jobs = matches
        .get_one::<usize>("jobs")
        .copied()
        .unwrap_or(config.build.jobs);

    let spec = BuildSpec::new(source, output)
        .with_dialects(dialects)
        .with_extension(config.build.source_extension.clone())
        .with_jobs(jobs);
    let report = build(&spec, &registry_for(config)).map_err(|e| e.to_string())?;

    for failure in &report.failures {
        eprintln!("{}", failure);
    }
    println!(
        "{} document(s): {} succeeded, {} failed",
        report.documents,
        report.succeeded(),
        report.failed()
    );

    if report.is_success() {
        Ok(())
    } else {
        Err(format!("{} output(s) failed", report.failed()))
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, config: &MoireConfig) -> Result<(), String> {
    let path = required(matches, "path")?;
    let format = required(matches, "format")?;
    let source = read_source(path)?;

    let output = transforms::execute_transform(&source, format, config.inspect.show_line_numbers)
        .map_err(|e| format!("{}: {}", path, e))?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Handle the formats command
fn handle_formats_command(config: &MoireConfig) -> Result<(), String> {
    let registry = registry_for(config);
    println!("Output formats:\n");
    for name in registry.list_formats() {
        let format = registry.get(&name).map_err(|e| e.to_string())?;
        println!(
            "  {:<10} .{:<6} {}",
            name,
            format.file_extension(),
            format.description()
        );
    }

    println!("\nCommands:\n");
    for spec in COMMANDS {
        println!(
            "  \\{:<8} {:<10} {}",
            spec.name,
            spec.arity(),
            spec.description
        );
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument <{}>", name))
}

fn required_path<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a Path, String> {
    matches
        .get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .ok_or_else(|| format!("missing argument <{}>", name))
}
