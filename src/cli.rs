//! CLI interface for dayreport.
//!
//! `dayreport` opens an in-memory reporting session. Each input line is one
//! action: edit the form, submit it, filter the table, list, or export.
//! Nothing is kept once the session ends; export to CSV to keep a copy.

mod format;
mod session;

use std::fs;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use jiff::Zoned;

use crate::config::Config;
use crate::controller::Controller;

/// dayreport — submit and review daily work reports.
#[derive(Debug, Parser)]
#[command(name = "dayreport", version, after_long_help = SESSION_HELP)]
pub struct Cli {
    /// Config file to load instead of `~/.dayreport/config.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replay session commands from this file instead of reading stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// More log output on stderr (`-v` info, `-vv` debug). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

const SESSION_HELP: &str = r#"Session commands (one per line, `help` lists them):
  set department Engineering
  set team Backend
  set manager Alice
  set employee "Bob Smith"
  set date 2024-01-15
  set tasks Fixed the login redirect
  set status Completed
  submit

  filter set department Engineering
  list
  export --out reports.csv
  quit"#;

/// Run a session, returning an error message on failure.
pub fn run(cli: &Cli, config: Config) -> Result<(), String> {
    let Config {
        export_file,
        date_format,
        hierarchy,
    } = config;
    let mut controller = Controller::new(hierarchy, date_format, &Zoned::now());

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let result = match &cli.script {
        Some(path) => {
            let file = fs::File::open(path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            tracing::debug!(script = %path.display(), "replaying script");
            session::run(
                &mut controller,
                &export_file,
                BufReader::new(file),
                &mut stdout,
                &mut stderr,
                false,
            )
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            session::run(
                &mut controller,
                &export_file,
                stdin.lock(),
                &mut stdout,
                &mut stderr,
                interactive,
            )
        }
    };

    result.map_err(|e| format!("I/O error: {e}"))
}
