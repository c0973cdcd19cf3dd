//! Session commands: one line of input, one user action.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Zoned;

use crate::controller::Controller;
use crate::export;
use crate::form::FormField;
use crate::selection::Level;
use crate::store::ReportStore;

use super::format::{format_filter, format_form, format_notice, format_table, status_choices};

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    /// Set a form field. Omit the value to clear it.
    ///
    /// Choosing a department clears team and manager; choosing a team
    /// clears the manager.
    Set {
        field: FieldArg,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Show the form and the choices each empty select offers.
    Form,

    /// List the choices for a form field.
    Options { field: FieldArg },

    /// Validate the form and submit it as a report.
    Submit,

    /// Narrow the report table.
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Show the reports passing the current filter.
    List {
        /// Print the reports as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Write the visible reports (or all, if none are visible) to CSV.
    Export {
        /// Write here instead of the configured export file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show the current notice, if it has not expired.
    Notice,

    /// Dismiss the current notice.
    Dismiss,

    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
enum FilterAction {
    /// Set a filter level. Omit the value to clear it.
    Set {
        level: LevelArg,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// List the choices for a filter level.
    Options { level: LevelArg },

    /// Show the current filter.
    Show,

    /// Remove every filter.
    Clear,
}

/// Session-facing form field, mapped to the domain `FormField`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldArg {
    Department,
    Team,
    Manager,
    Employee,
    Date,
    Tasks,
    Status,
}

impl FieldArg {
    fn to_domain(self) -> FormField {
        match self {
            Self::Department => FormField::Department,
            Self::Team => FormField::Team,
            Self::Manager => FormField::ReportingManager,
            Self::Employee => FormField::EmployeeName,
            Self::Date => FormField::Date,
            Self::Tasks => FormField::Tasks,
            Self::Status => FormField::Status,
        }
    }
}

/// Session-facing filter level, mapped to the domain `Level`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Department,
    Team,
    Manager,
}

impl LevelArg {
    fn to_domain(self) -> Level {
        match self {
            Self::Department => Level::Department,
            Self::Team => Level::Team,
            Self::Manager => Level::Manager,
        }
    }
}

/// What the loop should do after a command.
enum Reply {
    Silent,
    Text(String),
    Quit,
}

/// Read commands from `input` until `quit` or end of input.
///
/// Command output goes to `out`, command errors to `err`; an error never
/// ends the session.
pub(super) fn run<S: ReportStore>(
    controller: &mut Controller<S>,
    export_file: &Path,
    mut input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
    interactive: bool,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            writeln!(err, "error: line is not valid UTF-8; skipped")?;
            continue;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match execute(controller, export_file, line) {
            Ok(Reply::Silent) => {}
            Ok(Reply::Text(text)) => writeln!(out, "{text}")?,
            Ok(Reply::Quit) => return Ok(()),
            Err(e) => writeln!(err, "error: {e}")?,
        }
    }
}

fn execute<S: ReportStore>(
    controller: &mut Controller<S>,
    export_file: &Path,
    line: &str,
) -> Result<Reply, String> {
    // Values of `set` and `filter set` are taken from the line as typed;
    // only the command words go through shell splitting.
    let (head, raw_value) = split_value(line);
    let words = shlex::split(head).ok_or("unbalanced quotes")?;
    let parsed = match SessionLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    Ok(Reply::Text(e.to_string().trim_end().to_string()))
                }
                _ => Err(e
                    .to_string()
                    .trim_start_matches("error: ")
                    .trim_end()
                    .to_string()),
            };
        }
    };

    match parsed.command {
        SessionCommand::Set { field, value } => {
            let value = raw_value.map_or_else(|| value.join(" "), String::from);
            controller
                .set_field(field.to_domain(), &value)
                .map_err(|e| e.to_string())?;
            Ok(Reply::Silent)
        }
        SessionCommand::Form => Ok(Reply::Text(format_form(controller))),
        SessionCommand::Options { field } => {
            let field = field.to_domain();
            let choices = match field {
                FormField::Status => status_choices(),
                _ => {
                    let level = field
                        .level()
                        .ok_or_else(|| format!("{field} is free text"))?;
                    join_options(&controller.form_options(level), level)?
                }
            };
            Ok(Reply::Text(choices))
        }
        SessionCommand::Submit => {
            let now = Zoned::now();
            let result = controller.submit(&now);
            let notice = controller
                .active_notice(now.timestamp())
                .map(format_notice)
                .unwrap_or_default();
            Ok(Reply::Text(match result {
                Ok(id) => format!("{notice}\nid: {id}"),
                Err(e) => format!("{notice}\n{e}"),
            }))
        }
        SessionCommand::Filter { action } => match action {
            FilterAction::Set { level, value } => {
                let value = raw_value.map_or_else(|| value.join(" "), String::from);
                controller
                    .set_filter(level.to_domain(), &value)
                    .map_err(|e| e.to_string())?;
                Ok(Reply::Silent)
            }
            FilterAction::Options { level } => {
                let level = level.to_domain();
                Ok(Reply::Text(join_options(&controller.filter_options(level), level)?))
            }
            FilterAction::Show => Ok(Reply::Text(format_filter(controller))),
            FilterAction::Clear => {
                controller.clear_filters();
                Ok(Reply::Silent)
            }
        },
        SessionCommand::List { json } => {
            let visible = controller.visible();
            if json {
                let json = serde_json::to_string_pretty(&visible)
                    .map_err(|e| format!("failed to serialize reports: {e}"))?;
                Ok(Reply::Text(json))
            } else {
                let mut text = format_table(&visible, controller.date_format());
                if !controller.filter().is_empty() {
                    let total = controller.store().reports().len();
                    text.push_str(&format!("\nShowing {} of {total} report(s)", visible.len()));
                }
                Ok(Reply::Text(text))
            }
        }
        SessionCommand::Export { out } => {
            let path = out.as_deref().unwrap_or(export_file);
            let document = controller.export_csv().map_err(|e| e.to_string())?;
            export::write_csv(path, &document)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), rows = document.rows, "exported reports");
            Ok(Reply::Text(format!(
                "Exported {} report(s) → {}",
                document.rows,
                path.display()
            )))
        }
        SessionCommand::Notice => Ok(Reply::Text(
            controller
                .active_notice(Zoned::now().timestamp())
                .map_or_else(|| "No notice".to_string(), format_notice),
        )),
        SessionCommand::Dismiss => {
            controller.dismiss_notice();
            Ok(Reply::Silent)
        }
        SessionCommand::Quit => Ok(Reply::Quit),
    }
}

/// Split `set <field> <value>` and `filter set <level> <value>` into the
/// command words and the verbatim value. Other lines have no raw value.
///
/// A value wrapped in one pair of double quotes is unwrapped.
fn split_value(line: &str) -> (&str, Option<&str>) {
    let command_words = match line.split_whitespace().take(2).collect::<Vec<_>>()[..] {
        ["set", ..] => 2,
        ["filter", "set"] => 3,
        _ => return (line, None),
    };

    let mut rest = line;
    for _ in 0..command_words {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }

    let head = &line[..line.len() - rest.len()];
    let value = rest.trim_start();
    if value.is_empty() {
        return (line, None);
    }

    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    (head, Some(value))
}

fn join_options(options: &[&str], level: Level) -> Result<String, String> {
    if options.is_empty() {
        return Err(match level.parent() {
            Some(parent) => format!("choose a {parent} first"),
            None => format!("no {level} options configured"),
        });
    }
    Ok(options.join(", "))
}
