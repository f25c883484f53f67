//! `relnotes link` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use relnotes_config::{CliSettings, Config};
use relnotes_reflink::Reflinker;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the link command.
#[derive(Args)]
pub(crate) struct LinkArgs {
    /// Markdown file to read (default: stdin; `-` also reads stdin).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover relnotes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository URL, e.g. `https://github.com/owner/repo` (overrides config).
    #[arg(short, long, env = "RELNOTES_REPOSITORY")]
    repo: Option<String>,

    /// File to write the linked markdown to (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (debug logs on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl LinkArgs {
    /// Execute the link command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or reading/writing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            repository_url: self.repo,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let linker = build_linker(&config)?;
        let markdown = read_input(self.input.as_deref())?;
        tracing::debug!(
            input = ?self.input,
            bytes = markdown.len(),
            config = ?config.config_path,
            "Linking references"
        );
        let linked = linker.link(&markdown);

        match self.output.as_deref() {
            Some(path) => {
                std::fs::write(path, linked)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(linked.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Build a linker for the configured repository and autolinks.
fn build_linker(config: &Config) -> Result<Reflinker, CliError> {
    let mut builder = Reflinker::builder(config.require_repository_url()?);
    for autolink in &config.autolinks {
        builder.external_reference(&autolink.prefix, &autolink.url, autolink.alphanumeric)?;
    }
    Ok(builder.build()?)
}

/// Read the whole document from `path`, or stdin when absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    let (name, bytes) = match path {
        Some(path) if path != Path::new("-") => {
            (path.display().to_string(), std::fs::read(path)?)
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            ("stdin".to_owned(), buf)
        }
    };
    String::from_utf8(bytes)
        .map_err(|_| CliError::Validation(format!("{name}: input is not valid UTF-8")))
}
