//! Runtime configuration assembled from flags and `ROSTER_*` environment variables.

use crate::clipboard::CommandClipboard;
use anyhow::{bail, Result};
use clap::Args;
use rand::rngs::StdRng;
use roster_core::{parse_count, Generator, SystemClock, DEFAULT_COUNT};
use std::path::PathBuf;

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Number of employees to generate
    #[arg(
        short = 'n',
        long,
        env = "ROSTER_COUNT",
        default_value_t = DEFAULT_COUNT,
        value_parser = count_arg,
        global = true
    )]
    pub count: i64,

    /// Seed for reproducible data
    #[arg(long, env = "ROSTER_SEED", global = true)]
    pub seed: Option<u64>,

    /// Directory exports are written to
    #[arg(long, env = "ROSTER_EXPORT_DIR", default_value = ".", global = true)]
    pub export_dir: PathBuf,

    /// Command that receives clipboard text on stdin (e.g. "xclip -selection clipboard")
    #[arg(long, env = "ROSTER_CLIPBOARD", global = true)]
    pub clipboard_command: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

fn count_arg(value: &str) -> Result<i64, String> {
    parse_count(value).map_err(|e| e.to_string())
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub count: i64,
    pub seed: Option<u64>,
    pub export_dir: PathBuf,
    pub clipboard_command: Option<Vec<String>>,
}

impl Config {
    pub fn from_cli(args: &GlobalArgs) -> Result<Self> {
        let clipboard_command = match args.clipboard_command.as_deref() {
            Some(command) => {
                let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
                if parts.is_empty() {
                    bail!("clipboard command is empty");
                }
                Some(parts)
            }
            None => None,
        };

        if args.export_dir.exists() && !args.export_dir.is_dir() {
            bail!(
                "export directory is not a directory: {}",
                args.export_dir.display()
            );
        }

        Ok(Self {
            count: args.count,
            seed: args.seed,
            export_dir: args.export_dir.clone(),
            clipboard_command,
        })
    }

    /// Generator for the snapshot: seeded when a seed is configured.
    pub fn generator(&self) -> Generator<StdRng, SystemClock> {
        match self.seed {
            Some(seed) => Generator::seeded(seed, SystemClock),
            None => Generator::from_entropy(),
        }
    }

    /// Clipboard capability for the current platform or the configured command.
    pub fn clipboard(&self) -> CommandClipboard {
        match self.clipboard_command.as_deref() {
            Some([program, args @ ..]) => CommandClipboard::new(program, args.to_vec()),
            _ => CommandClipboard::platform_default(),
        }
    }
}
