// src/cli.rs

//! Command-line front end.
//!
//! Global flags are declared with the clap derive API. Per-algorithm flags
//! (`--<name>.<field>`) come from every registered algorithm's
//! [`register_args`](crate::Algorithm::register_args) and are added to the
//! derived command with the builder API at parse time.

use crate::algorithm::{RawArgs, Registry};
use crate::consts::DEFAULT_TEXT_ENCODING;
use crate::error::BullcryptError;
use crate::logging::level_for_verbosity;
use crate::options::{Mode, Options, PlaintextEncoding};
use crate::orchestrator::{ConsoleSink, Summary};
use anyhow::Result;
use clap::{Arg, ArgAction, Args, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "bullcrypt", version)]
#[command(about = "Try every configured key on ciphertext extracted from files", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub mode: ModeArgs,

    #[command(flatten)]
    pub plaintext: PlaintextArgs,

    /// Text codec used to read chunked and line input and to print results
    #[arg(long, value_name = "LABEL", default_value = DEFAULT_TEXT_ENCODING)]
    pub encoding: String,

    /// Descend into directories
    #[arg(short, long)]
    pub recursive: bool,

    /// Only print resolved units; logging drops to errors unless -v is given
    #[arg(short, long)]
    pub quiet: bool,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Name of the decryption algorithm
    pub algorithm: String,

    /// Files (and, with --recursive, directories) to decrypt
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// How each file is sliced into ciphertext units.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct ModeArgs {
    /// The whole file is one unit (default)
    #[arg(long)]
    pub raw: bool,
    /// All lines joined into one unit
    #[arg(long)]
    pub chunked: bool,
    /// Every non-blank line is a unit
    #[arg(long)]
    pub line: bool,
}

impl ModeArgs {
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.chunked {
            Mode::Chunked
        } else if self.line {
            Mode::Line
        } else {
            Mode::Raw
        }
    }
}

/// Transport encoding of units in chunked and line modes.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct PlaintextArgs {
    #[arg(long)]
    pub plain: bool,
    #[arg(long)]
    pub base16: bool,
    #[arg(long)]
    pub base32: bool,
    #[arg(long)]
    pub base32hex: bool,
    #[arg(long)]
    pub base64: bool,
    #[arg(long)]
    pub base64url: bool,
}

impl PlaintextArgs {
    #[must_use]
    pub fn encoding(&self) -> Option<PlaintextEncoding> {
        let selected = [
            (self.plain, PlaintextEncoding::Plain),
            (self.base16, PlaintextEncoding::Base16),
            (self.base32, PlaintextEncoding::Base32),
            (self.base32hex, PlaintextEncoding::Base32Hex),
            (self.base64, PlaintextEncoding::Base64),
            (self.base64url, PlaintextEncoding::Base64Url),
        ];
        selected
            .into_iter()
            .find_map(|(set, encoding)| set.then_some(encoding))
    }
}

/// Parsed command line: global flags plus raw per-algorithm values.
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub raw_args: RawArgs,
}

impl Invocation {
    /// Parse `args` (program name first) against the flags of `registry`.
    ///
    /// # Errors
    ///
    /// The clap error for bad usage, `--help` and `--version`.
    pub fn parse_from<I, T>(registry: &Registry, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let surface = registry.surface();

        let mut command = Cli::command();
        for spec in surface.specs() {
            let action = if spec.repeatable {
                ArgAction::Append
            } else {
                ArgAction::Set
            };
            command = command.arg(
                Arg::new(spec.id.clone())
                    .long(spec.id.clone())
                    .value_name("VALUE")
                    .help(spec.help.clone())
                    .help_heading(spec.group.clone())
                    .action(action),
            );
        }

        let matches = command.try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;

        let mut raw_args = RawArgs::new();
        for spec in surface.specs() {
            for value in matches.get_many::<String>(&spec.id).into_iter().flatten() {
                raw_args.push(spec.id.as_str(), value.as_str());
            }
        }

        Ok(Self { cli, raw_args })
    }

    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.cli.verbose
    }

    /// Default log filter: `-q` alone keeps only errors, otherwise `-v` decides.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        if self.cli.quiet && self.cli.verbose == 0 {
            "error"
        } else {
            level_for_verbosity(self.cli.verbose)
        }
    }

    /// Validate configuration, then decrypt every input path.
    ///
    /// # Errors
    ///
    /// Only configuration errors (unknown algorithm, invalid algorithm
    /// arguments, unknown text encoding). They are raised before any file is
    /// opened; everything after that is isolated and reported through the
    /// returned [`Summary`] and `stderr`.
    pub fn execute<W: Write, E: Write>(
        self,
        registry: &Registry,
        stdout: W,
        stderr: E,
    ) -> Result<Summary> {
        let name = self.cli.algorithm.as_str();
        let algorithm = registry.get(name).ok_or_else(|| {
            let available = registry.names().collect::<Vec<_>>().join(", ");
            BullcryptError::Configuration(format!(
                "Unknown algorithm {name} (available: {available})"
            ))
        })?;

        let algorithm_options = algorithm.extract_args(name, &self.raw_args)?;
        let options = Options::builder()
            .with_mode(self.cli.mode.mode())
            .with_plaintext_encoding(self.cli.plaintext.encoding())
            .with_text_encoding(self.cli.encoding.as_str())
            .with_recursive(self.cli.recursive)
            .with_algorithm_options(algorithm_options)
            .build()?;
        debug!(algorithm = name, ?options, "Configuration accepted");

        let mut sink =
            ConsoleSink::new(stdout, stderr, options.text_encoding()).quiet(self.cli.quiet);

        #[cfg(feature = "batch-ops")]
        let summary = crate::batch_ops::decrypt_batch(algorithm, &options, &self.cli.paths, &mut sink);
        #[cfg(not(feature = "batch-ops"))]
        let summary = crate::orchestrator::Orchestrator::new(algorithm, &options)
            .run(&self.cli.paths, &mut sink);

        info!(?summary, "Done");
        Ok(summary)
    }
}

/// Parse `args` and run with the built-in algorithms.
///
/// # Errors
///
/// Usage errors from clap and configuration errors; see
/// [`Invocation::execute`].
pub fn run<I, T, W, E>(args: I, stdout: W, stderr: E) -> Result<Summary>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let registry = Registry::builtin();
    let invocation = Invocation::parse_from(&registry, args)?;
    invocation.execute(&registry, stdout, stderr)
}
