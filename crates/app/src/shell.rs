//! Parsing of interactive input lines into commands.
//!
//! ```text
//! supplier <name>
//! add-supplier <name> = <code>
//! suppliers
//! date <dd/mm/yyyy | dd/mm/yy | yyyy-mm-dd | today>
//! add <description> | <cost> [| <location>]
//! remove
//! reset
//! show
//! export <csv | pdf | all>
//! help
//! quit
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use poforge_core::{Cost, DomainError};
use poforge_export::ExportFormat;
use poforge_purchasing::{
    AddItem, AddSupplier, RemoveLastItem, Reset, SelectDate, SelectSupplier, SessionCommand,
};

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Session(SessionCommand),
    Export(Vec<ExportFormat>),
    Show,
    Suppliers,
    Help,
    Quit,
    /// Blank line; re-renders the order.
    Nothing,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command '{0}' (type 'help' for the list)")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid date '{0}': use dd/mm/yyyy, dd/mm/yy, yyyy-mm-dd or 'today'")]
    InvalidDate(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Context needed to turn text into commands.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
    pub default_location: &'a str,
}

pub const USAGE_SUPPLIER: &str = "supplier <name>";
pub const USAGE_ADD_SUPPLIER: &str = "add-supplier <name> = <code>";
pub const USAGE_DATE: &str = "date <dd/mm/yyyy | dd/mm/yy | yyyy-mm-dd | today>";
pub const USAGE_ADD: &str = "add <description> | <cost> [| <location>]";
pub const USAGE_EXPORT: &str = "export <csv | pdf | all>";

pub fn parse_line(line: &str, ctx: &ParseContext<'_>) -> Result<Input, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Nothing);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "supplier" => {
            if rest.is_empty() {
                return Err(ShellError::Usage(USAGE_SUPPLIER));
            }
            Ok(Input::Session(SessionCommand::SelectSupplier(SelectSupplier {
                name: rest.to_string(),
                occurred_at: ctx.now,
            })))
        }
        "add-supplier" => {
            let (name, code) = rest
                .split_once('=')
                .ok_or(ShellError::Usage(USAGE_ADD_SUPPLIER))?;
            Ok(Input::Session(SessionCommand::AddSupplier(AddSupplier {
                name: name.trim().to_string(),
                code: code.trim().to_string(),
                occurred_at: ctx.now,
            })))
        }
        "suppliers" => Ok(Input::Suppliers),
        "date" => {
            if rest.is_empty() {
                return Err(ShellError::Usage(USAGE_DATE));
            }
            Ok(Input::Session(SessionCommand::SelectDate(SelectDate {
                date: parse_date(rest, ctx.today)?,
                occurred_at: ctx.now,
            })))
        }
        "add" => parse_add(rest, ctx),
        "remove" | "undo" => Ok(Input::Session(SessionCommand::RemoveLastItem(
            RemoveLastItem {
                occurred_at: ctx.now,
            },
        ))),
        "reset" | "new" => Ok(Input::Session(SessionCommand::Reset(Reset {
            occurred_at: ctx.now,
        }))),
        "show" => Ok(Input::Show),
        "export" => parse_export(rest),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(ShellError::UnknownCommand(other.to_string())),
    }
}

fn parse_add(rest: &str, ctx: &ParseContext<'_>) -> Result<Input, ShellError> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    let (description, cost, location) = match parts.as_slice() {
        [description, cost] => (*description, *cost, ctx.default_location),
        [description, cost, location] => (*description, *cost, *location),
        _ => return Err(ShellError::Usage(USAGE_ADD)),
    };

    let cost: Cost = cost.parse()?;
    Ok(Input::Session(SessionCommand::AddItem(AddItem {
        description: description.to_string(),
        cost,
        location: location.to_string(),
        occurred_at: ctx.now,
    })))
}

fn parse_export(rest: &str) -> Result<Input, ShellError> {
    match rest.to_ascii_lowercase().as_str() {
        "" | "all" => Ok(Input::Export(ExportFormat::ALL.to_vec())),
        other => other
            .parse::<ExportFormat>()
            .map(|format| Input::Export(vec![format]))
            .map_err(|_| ShellError::Usage(USAGE_EXPORT)),
    }
}

/// `today`, `dd/mm/yyyy`, `dd/mm/yy` or `yyyy-mm-dd`.
///
/// Years must be written with four digits, or two for `dd/mm/yy` (which
/// follows chrono's `%y` pivot, so `26` is 2026).
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ShellError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    let invalid = || ShellError::InvalidDate(raw.to_string());

    let format = if let Some((_, year)) = raw.rsplit_once('/') {
        match year.len() {
            4 => "%d/%m/%Y",
            2 => "%d/%m/%y",
            _ => return Err(invalid()),
        }
    } else {
        match raw.split_once('-') {
            Some((year, _)) if year.len() == 4 => "%Y-%m-%d",
            _ => return Err(invalid()),
        }
    };
    NaiveDate::parse_from_str(raw, format).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ParseContext<'static> {
        ParseContext {
            today: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            now: Utc::now(),
            default_location: "Location",
        }
    }

    fn session_command(line: &str) -> SessionCommand {
        match parse_line(line, &ctx()).unwrap() {
            Input::Session(cmd) => cmd,
            other => panic!("expected session command, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_line("   ", &ctx()).unwrap(), Input::Nothing);
    }

    #[test]
    fn parses_add_with_and_without_location() {
        match session_command("add Office chair | 25.00 | Shop A") {
            SessionCommand::AddItem(cmd) => {
                assert_eq!(cmd.description, "Office chair");
                assert_eq!(cmd.cost, Cost::from_pennies(2500));
                assert_eq!(cmd.location, "Shop A");
            }
            other => panic!("unexpected {other:?}"),
        }

        match session_command("ADD Table|75.5") {
            SessionCommand::AddItem(cmd) => {
                assert_eq!(cmd.cost, Cost::from_pennies(7550));
                assert_eq!(cmd.location, "Location");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn add_needs_description_and_cost() {
        assert_eq!(
            parse_line("add Chair", &ctx()),
            Err(ShellError::Usage(USAGE_ADD))
        );
        assert!(matches!(
            parse_line("add Chair | lots", &ctx()),
            Err(ShellError::Domain(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn non_positive_cost_reaches_the_session() {
        // Rejection of zero cost belongs to the session, not the parser.
        assert!(matches!(
            session_command("add Chair | 0"),
            SessionCommand::AddItem(_)
        ));
    }

    #[test]
    fn parses_supplier_commands() {
        match session_command("supplier  Local Shop ") {
            SessionCommand::SelectSupplier(cmd) => assert_eq!(cmd.name, "Local Shop"),
            other => panic!("unexpected {other:?}"),
        }
        match session_command("add-supplier Local Shop = ls") {
            SessionCommand::AddSupplier(cmd) => {
                assert_eq!(cmd.name, "Local Shop");
                assert_eq!(cmd.code, "ls");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            parse_line("add-supplier Local Shop", &ctx()),
            Err(ShellError::Usage(USAGE_ADD_SUPPLIER))
        );
        assert_eq!(
            parse_line("supplier", &ctx()),
            Err(ShellError::Usage(USAGE_SUPPLIER))
        );
    }

    #[test]
    fn parses_dates() {
        let today = ctx().today;
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(
            parse_date("01/11/2026", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
        assert_eq!(
            parse_date("2026-11-01", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
        assert_eq!(
            parse_date("31/02/2026", today),
            Err(ShellError::InvalidDate("31/02/2026".to_string()))
        );
    }

    #[test]
    fn two_digit_years_are_this_century_and_short_years_are_rejected() {
        let today = ctx().today;
        assert_eq!(
            parse_date("01/11/26", today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
        for raw in ["01/11/026", "01/11/6", "26-11-01", "0026-11-01x"] {
            assert_eq!(
                parse_date(raw, today),
                Err(ShellError::InvalidDate(raw.to_string()))
            );
        }
    }

    #[test]
    fn parses_export_targets() {
        assert_eq!(
            parse_line("export", &ctx()).unwrap(),
            Input::Export(vec![ExportFormat::Csv, ExportFormat::Pdf])
        );
        assert_eq!(
            parse_line("export PDF", &ctx()).unwrap(),
            Input::Export(vec![ExportFormat::Pdf])
        );
        assert_eq!(
            parse_line("export xlsx", &ctx()),
            Err(ShellError::Usage(USAGE_EXPORT))
        );
    }

    #[test]
    fn parses_simple_verbs() {
        assert!(matches!(
            session_command("remove"),
            SessionCommand::RemoveLastItem(_)
        ));
        assert!(matches!(session_command("reset"), SessionCommand::Reset(_)));
        assert_eq!(parse_line("show", &ctx()).unwrap(), Input::Show);
        assert_eq!(parse_line("suppliers", &ctx()).unwrap(), Input::Suppliers);
        assert_eq!(parse_line("help", &ctx()).unwrap(), Input::Help);
        assert_eq!(parse_line("quit", &ctx()).unwrap(), Input::Quit);
    }

    #[test]
    fn unknown_verb_is_reported() {
        assert_eq!(
            parse_line("frobnicate now", &ctx()),
            Err(ShellError::UnknownCommand("frobnicate".to_string()))
        );
    }
}
