//! `franklin convert` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use franklin_config::{CliSettings, Config};
use franklin_renderer::Converter;

use crate::error::CliError;
use crate::output::Output;

/// Input path that reads from stdin.
const STDIN_PATH: &str = "-";

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (`-` reads stdin).
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover franklin.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend: `franklin` or `html5` (overrides config).
    #[arg(short, long, env = "FRANKLIN_BACKEND")]
    backend: Option<String>,

    /// Render a full document with header (overrides config).
    #[arg(long)]
    standalone: bool,

    /// Render embedded content only (overrides config).
    #[arg(long, conflicts_with = "standalone")]
    embedded: bool,

    /// Suffix stripped from internal link targets (overrides config).
    #[arg(long, value_name = "SUFFIX")]
    document_suffix: Option<String>,

    /// Emit converted content without the page shell.
    #[arg(long)]
    no_page: bool,

    /// Set a document attribute (`KEY=VALUE`, or `KEY` for an empty value).
    #[arg(short, long = "attribute", value_name = "KEY=VALUE", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, conversion or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            backend: self.backend.clone(),
            standalone: self.resolve_standalone(),
            document_suffix: self.document_suffix.clone(),
            attributes: self.attributes.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let source = read_input(&self.input)?;
        let converter = Converter::new(config.convert_options())?;
        tracing::debug!(
            input = %self.input.display(),
            backend = %config.convert.backend,
            "Converting document"
        );

        let result = converter.convert_markdown(&source)?;
        output.warnings(&result.warnings);

        let html = if self.no_page {
            result.html
        } else {
            converter.options().page.wrap(&result.html)
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, html).map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }

        if let Some(title) = &result.title {
            output.info(&format!("Title: {title}"));
        }

        Ok(())
    }

    /// Resolve standalone mode from --standalone/--embedded flags.
    fn resolve_standalone(&self) -> Option<bool> {
        self.embedded
            .then_some(false)
            .or(self.standalone.then_some(true))
    }
}

/// Read the input document from a file or stdin.
fn read_input(path: &Path) -> Result<String, CliError> {
    let to_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new(STDIN_PATH) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(to_error)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(to_error)
}

/// Parse a `KEY=VALUE` attribute argument.
fn parse_attribute(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg.split_once('=').unwrap_or((arg, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute name missing in '{arg}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
