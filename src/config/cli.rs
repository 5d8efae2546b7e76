//! Command-line arguments

use super::{Config, ConfigFile, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE};
use crate::types::SyncError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// One-way folder synchronization: keeps a replica identical to a source
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "replika", version, about, long_about = None)]
pub struct Cli {
    /// Path to the source folder (prompted for when missing)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Path to the replica folder (prompted for when missing)
    #[arg(short, long)]
    pub replica: Option<PathBuf>,

    /// Sync interval in seconds [default: 30]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Path to the log file [default: log.txt]
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// TOML file providing defaults for any of the options above
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run a single sync cycle and exit
    #[arg(long)]
    pub once: bool,

    /// More console output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only warnings and errors on the console
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolve into a `Config`, prompting on the terminal for missing paths
    ///
    /// Does not validate; see `Config::validate`.
    pub fn resolve(self) -> Result<Config, SyncError> {
        self.resolve_with(prompt_line)
    }

    /// Merge command line, config file and interactive answers into a `Config`
    ///
    /// Precedence: command line, then config file, then a terminal prompt
    /// (source and replica only), then built-in defaults.
    pub fn resolve_with<F>(self, mut prompt: F) -> Result<Config, SyncError>
    where
        F: FnMut(&str) -> Result<String, SyncError>,
    {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let source = match self.source.or(file.source) {
            Some(path) => path,
            None => PathBuf::from(prompt("Enter source folder path: ")?),
        };
        let replica = match self.replica.or(file.replica) {
            Some(path) => path,
            None => PathBuf::from(prompt("Enter replica folder path: ")?),
        };

        let interval_secs = self
            .interval
            .or(file.interval_secs)
            .unwrap_or(DEFAULT_INTERVAL_SECS);

        Ok(Config {
            source,
            replica,
            interval: Duration::from_secs(interval_secs),
            log_file: self
                .log
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            once: self.once,
            verbosity: self.verbose,
            quiet: self.quiet,
        })
    }
}

/// Ask for a line on the terminal
fn prompt_line(question: &str) -> Result<String, SyncError> {
    let term = console::Term::stdout();
    term.write_str(question)?;
    let answer = term.read_line()?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(SyncError::Config(format!(
            "No answer given to \"{}\"",
            question.trim_end_matches([':', ' '])
        )));
    }
    Ok(answer.to_string())
}
