//! cpw-autoroute CLI
//!
//! Usage:
//!   cpw-autoroute [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>    Write output to a file instead of stdout
//!   -f, --format <FORMAT>  Output format: svg (default) or report
//!   -l, --lint             Print routing assumption warnings to stderr
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cpw_autoroute::{render_report, render_svg, route, SvgConfig};

#[derive(Parser)]
#[command(name = "cpw-autoroute")]
#[command(about = "Route straight-segment CPW connectors between component pins")]
struct Cli {
    /// Design file in TOML (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Print routing assumption warnings to stderr
    #[arg(short, long)]
    lint: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// SVG preview of the routed design
    Svg,
    /// Plain-text summary of every connector
    Report,
}

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let routed = match route(&source) {
        Ok(routed) => routed,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    if cli.lint {
        for warning in &routed.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    let output = match cli.format {
        Format::Svg => render_svg(&routed.design, &SvgConfig::default()),
        Format::Report => render_report(&routed.connectors),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, output) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", output),
    }
}

fn print_intro() {
    println!(
        r#"cpw-autoroute - route CPW connectors between component pins

USAGE:
    cpw-autoroute [OPTIONS] [FILE]
    cat design.toml | cpw-autoroute

OPTIONS:
    -o, --output <FILE>    Write output to a file
    -f, --format <FORMAT>  svg (default) or report
    -l, --lint             Print routing assumption warnings
    -h, --help             Print help

DESIGN FILE:
    [[components]]
    name = "Q1"
    bounds = [0.0, 0.0, 2.0, 2.0]
    pins = [{{ name = "a", position = [2.0, 1.0], normal = [1.0, 0.0] }}]

    [[connectors]]
    name = "cpw1"
    start = {{ component = "Q1", pin = "a" }}
    end = {{ component = "Q2", pin = "b" }}"#
    );
}
