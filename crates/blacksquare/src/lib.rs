//! # BlackSquare - Utility Classes to Design-Token CSS
//!
//! `blacksquare` is the build-time side of BlackSquare UI. It scans a
//! project's markup for BlackSquare utility classes and writes a stylesheet
//! that declares the design tokens they use and the rules that consume them.
//!
//! The class grammar and CSS synthesis live in [`blacksquare_grammar`];
//! this crate supplies everything around it:
//!
//! - [`Config`]: the `BlackSquareUI.json` file (sources, output, tokens)
//! - [`sources`]: directory walking and text collection
//! - [`Builder`]: synthesis plus writing the output file
//! - [`cli`]: the `blacksquare` command
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blacksquare::{Builder, Config};
//!
//! let config = Config::load("BlackSquareUI.json")?;
//! let report = Builder::new(&config).write()?;
//! println!("wrote {} rules to {}", report.rules, report.output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Errors
//!
//! A missing or malformed configuration, an unreadable source tree and an
//! unwritable output file are errors. Classes that match nothing are not:
//! they are left out of the stylesheet.

mod builder;
pub mod cli;
mod config;
mod error;
pub mod sources;

pub use builder::{BuildReport, Builder};
pub use config::{Config, ContentConfig, DEFAULT_CONFIG_FILE};
pub use error::{BuildError, ConfigError, SourceError};

pub use blacksquare_grammar as grammar;
