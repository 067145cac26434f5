//! Interprets parsed input against the session it owns.
//!
//! Every line produces a [`Response`]: an [`Outcome`] describing what happened
//! plus an [`OrderView`] of the session afterwards. Rejected commands leave the
//! session untouched and come back as warnings.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};

use poforge_core::{AggregateRoot, DomainError};
use poforge_events::{Command, Event};
use poforge_export::{write_export, ExportError, ExportFormat, ExportTable};
use poforge_purchasing::{OrderSession, OrderView, SessionCommand, SessionEvent};

use crate::shell::{self, Input, ParseContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command was accepted; one message per resulting event.
    Updated(Vec<String>),
    /// The input was rejected; state is unchanged.
    Warning(String),
    /// Files written by an export.
    Exported(Vec<PathBuf>),
    /// An export failed while writing; state is unchanged. `written` lists the
    /// files finished before the failure.
    Failed { error: String, written: Vec<PathBuf> },
    /// Informational text (help, supplier list).
    Info(String),
    /// Nothing to report beyond the view.
    Shown,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub outcome: Outcome,
    pub view: OrderView,
}

/// Owns one user's session and the export settings.
#[derive(Debug)]
pub struct Dispatcher {
    session: OrderSession,
    output_dir: PathBuf,
    default_location: String,
}

impl Dispatcher {
    pub fn new(
        session: OrderSession,
        output_dir: impl Into<PathBuf>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            session,
            output_dir: output_dir.into(),
            default_location: default_location.into(),
        }
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    pub fn view(&self) -> OrderView {
        OrderView::from(&self.session)
    }

    /// Parse and dispatch one input line, using the local date as "today".
    pub fn handle_line(&mut self, line: &str) -> Response {
        self.handle_line_on(line, Local::now().date_naive())
    }

    pub fn handle_line_on(&mut self, line: &str, today: NaiveDate) -> Response {
        let ctx = ParseContext {
            today,
            now: Utc::now(),
            default_location: &self.default_location,
        };

        match shell::parse_line(line, &ctx) {
            Ok(input) => self.dispatch(input),
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session.id(),
                    input = line.trim(),
                    error = %err,
                    "input rejected"
                );
                self.respond(Outcome::Warning(err.to_string()))
            }
        }
    }

    pub fn dispatch(&mut self, input: Input) -> Response {
        let outcome = match input {
            Input::Session(cmd) => self.run_command(&cmd),
            Input::Export(formats) => self.export(&formats),
            Input::Suppliers => Outcome::Info(self.supplier_listing()),
            Input::Help => Outcome::Info(crate::render::help()),
            Input::Show | Input::Nothing => Outcome::Shown,
            Input::Quit => {
                tracing::info!(
                    session_id = %self.session.id(),
                    items = self.session.item_count(),
                    "session closed"
                );
                Outcome::Quit
            }
        };
        self.respond(outcome)
    }

    fn respond(&self, outcome: Outcome) -> Response {
        let view = self.view();
        tracing::debug!(
            state = ?view.state,
            items = view.items.len(),
            total = %view.total,
            "view rendered"
        );
        Response { outcome, view }
    }

    fn run_command(&mut self, cmd: &SessionCommand) -> Outcome {
        match poforge_events::execute(&mut self.session, cmd) {
            Ok(events) => {
                for event in &events {
                    tracing::info!(
                        session_id = %self.session.id(),
                        command = cmd.command_type(),
                        event = event.event_type(),
                        version = self.session.version(),
                        "command accepted"
                    );
                }
                let mut messages: Vec<String> = events.iter().map(describe).collect();
                if events.iter().any(adds_item_without_supplier) {
                    messages.push(NO_SUPPLIER_NOTE.to_string());
                }
                Outcome::Updated(messages)
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session.id(),
                    command = cmd.command_type(),
                    error = %err,
                    "command rejected"
                );
                Outcome::Warning(warning_for(cmd, &err))
            }
        }
    }

    fn export(&self, formats: &[ExportFormat]) -> Outcome {
        // One row set for every requested format.
        let table = match ExportTable::from_session(&self.session) {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(session_id = %self.session.id(), error = %err, "export rejected");
                return Outcome::Warning(err.to_string());
            }
        };

        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            match write_export(&self.output_dir, &table, *format) {
                Ok(path) => written.push(path),
                Err(err @ ExportError::EmptyOrder) => return Outcome::Warning(err.to_string()),
                Err(err) => {
                    tracing::error!(
                        session_id = %self.session.id(),
                        format = %format,
                        error = %err,
                        "export failed"
                    );
                    return Outcome::Failed {
                        error: err.to_string(),
                        written,
                    };
                }
            }
        }
        Outcome::Exported(written)
    }

    fn supplier_listing(&self) -> String {
        let mut listing = String::from("Suppliers:\n");
        for (name, code) in self.session.suppliers().iter() {
            listing.push_str(&format!("  {name} = {code}\n"));
        }
        listing
    }
}

const NO_SUPPLIER_NOTE: &str =
    "note: no supplier selected, so the SKU and export file name have an empty supplier code";

fn adds_item_without_supplier(event: &SessionEvent) -> bool {
    matches!(event, SessionEvent::ItemAdded(e) if e.item.supplier_code.is_empty())
}

fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::SupplierSelected(e) => {
            format!("Supplier set to {} ({})", e.name, e.code)
        }
        SessionEvent::DateSelected(e) => format!("Date set to {}", e.date.format("%d/%m/%Y")),
        SessionEvent::SupplierAdded(e) => format!("Saved supplier {} as {}", e.name, e.code),
        SessionEvent::ItemAdded(e) => {
            format!("Added item {} ({})", e.item.sequence, e.item.sku)
        }
        SessionEvent::LastItemRemoved(e) => {
            format!("Removed item {} ({})", e.item.sequence, e.item.description)
        }
        SessionEvent::OrderReset(_) => "Started a new purchase order".to_string(),
    }
}

fn warning_for(cmd: &SessionCommand, err: &DomainError) -> String {
    match (cmd, err) {
        (SessionCommand::AddItem(_), DomainError::Validation(reason)) => {
            format!("Please enter a description and cost ({reason})")
        }
        (SessionCommand::RemoveLastItem(_), DomainError::EmptyOrder) => {
            "Nothing to remove: the purchase order is empty".to_string()
        }
        _ => err.to_string(),
    }
}
