use std::fs::File;
use std::io::{self, BufReader};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rewind::{script, Document, HistoryConfig, TextBuffer};

struct Args {
    config: Option<PathBuf>,
    max_depth: Option<NonZeroUsize>,
    script: Option<PathBuf>,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: None,
        max_depth: None,
        script: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires an argument");
                    std::process::exit(1);
                }
            }
            "-m" | "--max-depth" => {
                if i + 1 < args.len() {
                    parsed.max_depth = Some(parse_depth(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --max-depth requires an argument");
                    std::process::exit(1);
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
            _ => {
                parsed.script = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    parsed
}

fn parse_depth(s: &str) -> NonZeroUsize {
    match s.parse::<NonZeroUsize>() {
        Ok(depth) => depth,
        Err(_) => {
            eprintln!("Invalid depth: '{}'. Use a positive integer.", s);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    eprintln!("rewind - replay an edit script against a text buffer with undo/redo");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rewind [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <FILE>    Load history settings from a TOML file");
    eprintln!("    -m, --max-depth <N>    Keep at most N undo steps (overrides config)");
    eprintln!("    -h, --help             Print this help message");
    eprintln!();
    eprintln!("SCRIPT lines: type <text>, delete <text>, insert <idx> <text>,");
    eprintln!("remove <idx> <text>, undo, redo, clear, print, status.");
    eprintln!("Quote text with \"...\" to keep surrounding spaces. Reads stdin without SCRIPT.");
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = parse_args();

    let mut config = match &args.config {
        Some(path) => HistoryConfig::from_file(path).map_err(|e| {
            error!(error = %e, path = %path.display(), "Failed to load config");
            io::Error::new(io::ErrorKind::InvalidData, e)
        })?,
        None => HistoryConfig::default(),
    };
    if args.max_depth.is_some() {
        config.max_history_depth = args.max_depth;
    }
    info!(max_history_depth = ?config.max_history_depth, "rewind started");

    let mut doc = Document::with_config(TextBuffer::new(), &config);
    let mut out = io::stdout().lock();

    match &args.script {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                error!(error = %e, path = %path.display(), "Failed to open script");
                e
            })?;
            script::run(&mut doc, BufReader::new(file), &mut out)
        }
        None => script::run(&mut doc, io::stdin().lock(), &mut out),
    }
}
