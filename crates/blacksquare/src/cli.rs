//! Command-line interface.
//!
//! ```text
//! blacksquare [--config <path>] [-v...] [build|print|classes]
//! ```
//!
//! Without a subcommand the stylesheet is built and written, which is what
//! a build script normally wants.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use blacksquare_grammar::ClassToken;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::builder::Builder;
use crate::config::{Config, DEFAULT_CONFIG_FILE};

/// Compile BlackSquare utility classes into a design-token stylesheet.
#[derive(Debug, Parser)]
#[command(name = "blacksquare")]
#[command(version)]
#[command(about = "Compile BlackSquare utility classes into a design-token stylesheet")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Write the stylesheet to {sourceDir}/{outputFile}
    Build,
    /// Print the stylesheet to stdout instead of writing it
    Print,
    /// List the class names found in the sources
    Classes,
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. If a global subscriber
/// is already installed a warning is printed and the existing one is kept.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        eprintln!("warning: could not install log subscriber: {}", e);
    }
}

/// Runs the parsed command, writing user-facing output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let builder = Builder::new(&config);

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let report = builder.write()?;
            writeln!(
                out,
                "Wrote {} ({} classes, {} rules, {} skipped)",
                report.output.display(),
                report.classes,
                report.rules,
                report.skipped
            )?;
        }
        Command::Print => {
            let css = builder.css()?;
            writeln!(out, "{}", css)?;
        }
        Command::Classes => {
            for name in builder.class_names()? {
                let family = match ClassToken::parse(&name) {
                    Some(ClassToken::Structured(_)) => "structured",
                    Some(ClassToken::Enumerated(_)) => "enumerated",
                    None => "other",
                };
                writeln!(out, "{}\t{}", family, name)?;
            }
        }
    }
    Ok(())
}
