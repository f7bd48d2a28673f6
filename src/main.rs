//! mccolors - highlight Minecraft color markup from the command line

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use mccolors::error::{Error, Result};
use mccolors::{markup, preview, terminal, Highlighter, ParserSettings};

/// What to print for the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// Styled text on the terminal
    Terminal,
    /// One SVG preview per line
    Svg,
    /// One data URI per line
    DataUri,
    /// Live-highlighting spans grouped by style key
    Spans,
}

#[derive(Debug)]
struct Options {
    config: Option<PathBuf>,
    output: Output,
    file: Option<PathBuf>,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings by default)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let settings = match &options.config {
        Some(path) => ParserSettings::load_from(path)?,
        None => ParserSettings::load()?,
    };

    let input = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    tracing::debug!(bytes = input.len(), output = ?options.output, "read input");

    match options.output {
        Output::Terminal => {
            let mut stdout = io::stdout().lock();
            for line in input.lines() {
                terminal::write_segments(&mut stdout, &markup::segments(line, &settings))?;
            }
        }
        Output::Svg => {
            for line in input.lines() {
                println!("{}", preview::render_svg(line, &settings).unwrap_or_default());
            }
        }
        Output::DataUri => {
            for line in input.lines() {
                println!("{}", preview::render_data_uri(line, &settings).unwrap_or_default());
            }
        }
        Output::Spans => {
            let highlights = Highlighter::new(settings).highlight_document(&input);
            for (key, ranges) in highlights.iter() {
                let ranges: Vec<String> = ranges
                    .iter()
                    .map(|r| format!("{}:{}-{}", r.line + 1, r.start, r.end))
                    .collect();
                println!("{} {}", key, ranges.join(" "));
            }
        }
    }

    Ok(())
}

/// Parse command line arguments
///
/// Returns `None` when the arguments asked for help or version output,
/// which has already been printed.
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options {
        config: None,
        output: Output::Terminal,
        file: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| Error::Message(format!("{} needs a path", arg)))?;
                options.config = Some(PathBuf::from(path));
            }
            "--svg" => options.output = Output::Svg,
            "--data-uri" => options.output = Output::DataUri,
            "--spans" => options.output = Output::Spans,
            "-" => options.file = None,
            other if other.starts_with('-') => {
                return Err(Error::Message(format!("unknown option: {}", other)));
            }
            path => {
                if options.file.is_some() {
                    return Err(Error::Message("only one input file is supported".to_string()));
                }
                options.file = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    println!("mccolors {} - highlight Minecraft color markup", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: mccolors [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin) and renders every line with its colors.");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!("  -c, --config PATH  Read settings from PATH instead of ~/.mccolors.toml");
    println!("      --svg          Print an SVG preview per line");
    println!("      --data-uri     Print an SVG data URI per line");
    println!("      --spans        Print highlight ranges grouped by style");
    println!();
    println!("Markup:");
    println!("  &0-&9, &a-&f       Legacy colors");
    println!("  &k &l &m &n &o &r  Obfuscated, bold, strikethrough, underline, italic, reset");
    println!("  &#RRGGBB           Legacy hex color");
    println!("  <red>, <#RRGGBB>   MiniMessage colors (close with </red>, </#RRGGBB>)");
    println!("  <bold>, <b>, ...   MiniMessage formats");
    println!("  <gradient:#RRGGBB:#RRGGBB>...</gradient>");
    println!();
    println!("Set RUST_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("mccolors {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(&[]).unwrap().unwrap();
        assert_eq!(options.output, Output::Terminal);
        assert!(options.file.is_none());
        assert!(options.config.is_none());
    }

    #[test]
    fn test_parse_options() {
        let options = parse_args(&args(&["--spans", "-c", "my.toml", "lang.yml"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.output, Output::Spans);
        assert_eq!(options.config, Some(PathBuf::from("my.toml")));
        assert_eq!(options.file, Some(PathBuf::from("lang.yml")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["a.txt", "b.txt"])).is_err());
    }
}
