//! Stylesheet build: sources in, CSS file out.

use std::path::PathBuf;

use blacksquare_grammar::{extract_class_names, Stylesheet, Synthesizer};
use tracing::info;

use crate::config::Config;
use crate::error::{BuildError, SourceError};
use crate::sources::collect_text;

/// Summary of a written stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Where the stylesheet was written.
    pub output: PathBuf,
    /// Distinct class names found in the sources.
    pub classes: usize,
    /// Custom properties declared in `:root`.
    pub root_declarations: usize,
    /// Class rules emitted.
    pub rules: usize,
    /// Utility classes that produced no rule.
    pub skipped: usize,
}

/// Runs one build against a loaded configuration.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'c> {
    config: &'c Config,
}

impl<'c> Builder<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Distinct class names across every source root, in first-seen order.
    pub fn class_names(&self) -> Result<Vec<String>, SourceError> {
        let text = collect_text(
            &self.config.source_roots(),
            &self.config.content.file_extension,
        )?;
        Ok(extract_class_names(&text))
    }

    /// Synthesizes the stylesheet without writing it.
    pub fn stylesheet(&self) -> Result<Stylesheet, SourceError> {
        let class_names = self.class_names()?;
        let synth = Synthesizer::new(&self.config.registry, &self.config.settings);
        Ok(synth.build(&class_names))
    }

    /// The stylesheet text.
    pub fn css(&self) -> Result<String, SourceError> {
        self.stylesheet().map(|sheet| sheet.css)
    }

    /// Writes the stylesheet verbatim to `{sourceDir}/{outputFile}`.
    ///
    /// Missing parent directories of the output file are created.
    pub fn write(&self) -> Result<BuildReport, BuildError> {
        let class_names = self.class_names()?;
        let synth = Synthesizer::new(&self.config.registry, &self.config.settings);
        let sheet = synth.build(&class_names);

        let output = self.config.output_path();
        let write_err = |source| BuildError::Write {
            path: output.clone(),
            source,
        };
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&output, &sheet.css).map_err(write_err)?;

        info!(
            output = %output.display(),
            rules = sheet.rules,
            skipped = sheet.skipped.len(),
            "wrote stylesheet"
        );

        Ok(BuildReport {
            classes: class_names.len(),
            root_declarations: sheet.root_declarations,
            rules: sheet.rules,
            skipped: sheet.skipped.len(),
            output,
        })
    }
}
