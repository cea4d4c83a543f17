//! argdoc: inspect docstrings the way a generated command-line interface
//! sees them, and try out type-driven value parsers.
//!
//! - `argdoc doc FILES...` prints the description, parameters and raised
//!   errors of each docstring file (or stdin)
//! - `argdoc normalize FILES...` prints the canonical field-list form
//! - `argdoc convert --type 'int or str' VALUE...` converts values

mod render;

use anyhow::{Context, Result};
use argdoc::types::resolve_param_type;
use argdoc::{synthesize, DocConfig, DocParser, NormalizeConfig, ParserOverrides, TypeRegistry};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "argdoc",
    about = "Extract parameter documentation from docstrings and convert values by type"
)]
struct Cli {
    /// Log debug output (ARGDOC_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed documentation of docstring files
    Doc {
        /// Input files (glob patterns and directories supported). If omitted
        /// or `-`, reads from stdin.
        files: Vec<String>,

        /// Output format: text (default), json
        #[arg(short = 'f', long, default_value = "text")]
        format: String,

        /// Do not rewrite Google or NumPy sections
        #[arg(long)]
        raw: bool,

        /// Strip inline display markers from text output
        #[arg(long)]
        plain: bool,
    },

    /// Print the canonical field-list form of docstring files
    Normalize {
        /// Input files. If omitted or `-`, reads from stdin.
        files: Vec<String>,
    },

    /// Convert values with a parser built from a type expression
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Type expression, e.g. "int or str", "tuple[int, str]"
        #[arg(short = 't', long = "type")]
        type_expr: String,

        /// Register an enumeration. Can be specified multiple times.
        #[arg(long = "enum", value_name = "NAME=MEMBER,...")]
        enums: Vec<String>,

        /// Values to convert
        values: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Doc {
            files,
            format,
            raw,
            plain,
        } => doc(&files, &format, raw, plain),
        Command::Normalize { files } => normalize(&files),
        Command::Convert {
            type_expr,
            enums,
            values,
        } => convert(&type_expr, &enums, &values),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ARGDOC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// doc: parse each input and render it.
fn doc(files: &[String], format: &str, raw: bool, plain: bool) -> Result<ExitCode> {
    let config = if raw {
        DocConfig {
            normalize: NormalizeConfig {
                google: false,
                numpy: false,
            },
            ..DocConfig::default()
        }
    } else {
        DocConfig::default()
    };
    let parser = DocParser::new(config);
    let renderer = render::create_renderer(format, plain)?;
    let inputs = read_inputs(files)?;
    let headers = format != "json" && inputs.len() > 1;

    let mut failed = 0;
    for (i, (source, content)) in inputs.iter().enumerate() {
        match parser.parse(Some(content)) {
            Ok(parsed) => {
                if headers {
                    if i > 0 {
                        println!();
                    }
                    println!("==> {} <==", source);
                }
                print!("{}", renderer.render(source, &parsed));
            }
            Err(e) => {
                eprintln!("warning: skipping {}: {}", source, e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} docstring(s) failed to parse", failed, inputs.len());
    }
    Ok(ExitCode::SUCCESS)
}

/// normalize: print the canonical field-list form.
fn normalize(files: &[String]) -> Result<ExitCode> {
    let parser = DocParser::default();
    let inputs = read_inputs(files)?;
    for (i, (source, content)) in inputs.iter().enumerate() {
        if inputs.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("==> {} <==", source);
        }
        println!("{}", parser.canonical(content));
    }
    Ok(ExitCode::SUCCESS)
}

/// convert: exit code 2 with a one-line usage error when a value is rejected.
fn convert(type_expr: &str, enums: &[String], values: &[String]) -> Result<ExitCode> {
    let mut registry = TypeRegistry::default();
    for spec in enums {
        let (name, members) = spec
            .split_once('=')
            .with_context(|| format!("invalid --enum {}: expected NAME=MEMBER,...", spec))?;
        let members: Vec<&str> = members
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect();
        registry.register_enum(name.trim(), &members);
    }

    let descriptor = resolve_param_type("VALUE", Some(type_expr), None, &registry)?;
    let parser = synthesize(&descriptor, &registry, &ParserOverrides::default())?;
    tracing::debug!(descriptor = %descriptor, nargs = ?parser.nargs(), "synthesized parser");

    let tokens: Vec<&str> = values.iter().map(String::as_str).collect();
    match parser.parse_tokens(&tokens) {
        Ok(value) => {
            println!("{}", serde_json::to_string(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: argument VALUE: {}", e);
            Ok(ExitCode::from(2))
        }
    }
}

/// Read every input as `(source name, content)`. No files, or `-`, means stdin.
fn read_inputs(files: &[String]) -> Result<Vec<(String, String)>> {
    if files.is_empty() || files == ["-"] {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(vec![("-".to_string(), input)]);
    }
    expand_globs(files)?
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), content))
        })
        .collect()
}

/// File extensions recognized as docstring files when scanning directories
/// or expanding globs.
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "rst"];

/// Expand file, directory and glob arguments into a sorted, deduplicated list
/// of docstring files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let found = docstring_files(pattern)?;
        if found.is_empty() {
            eprintln!("warning: no docstring files matched: {}", pattern);
        }
        files.extend(found);
    }
    Ok(files.into_iter().collect())
}

/// An explicit file is taken as is. Directories (non-recursive) and glob
/// matches keep only supported extensions.
fn docstring_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let candidates: Vec<PathBuf> = if path.is_dir() {
        fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect()
    } else {
        glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .collect()
    };
    Ok(candidates
        .into_iter()
        .filter(|p| p.is_file() && has_supported_extension(p))
        .collect())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
