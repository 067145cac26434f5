//! Plain-text rendering of the order and command responses.

use std::fmt::Write;

use poforge_export::HEADERS;
use poforge_purchasing::OrderView;

use crate::dispatcher::{Outcome, Response};

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn banner() -> String {
    format!(
        "poforge {}: purchase order builder (type 'help' for commands)",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn help() -> String {
    [
        "Commands:",
        "  supplier <name>                       select supplier (known name or free text)",
        "  add-supplier <name> = <code>          save a supplier for this session",
        "  suppliers                             list known suppliers",
        "  date <dd/mm/yyyy | dd/mm/yy | yyyy-mm-dd | today>",
        "                                        set the order date",
        "  add <description> | <cost> [| <location>]",
        "                                        add a line item",
        "  remove                                remove the last item",
        "  reset                                 start a new purchase order",
        "  show                                  show the current order",
        "  export [csv | pdf | all]              write the order to disk",
        "  quit                                  leave",
        "",
    ]
    .join("\n")
}

/// Header line, item table and running total.
pub fn order(view: &OrderView) -> String {
    let mut out = String::new();
    let supplier = match &view.supplier_name {
        Some(name) => format!("{name} ({})", view.supplier_code),
        None => "(none selected)".to_string(),
    };
    let _ = writeln!(
        out,
        "Supplier: {supplier}   Date: {}",
        view.date.format(DISPLAY_DATE_FORMAT)
    );

    if view.is_empty() {
        let _ = writeln!(out, "No items yet. Total: £{}", view.total);
        return out;
    }

    // Date is implied by the header; show the other columns.
    let rows: Vec<[String; 6]> = view
        .items
        .iter()
        .map(|item| {
            [
                item.sequence.to_string(),
                item.description.clone(),
                item.cost.to_string(),
                item.location.clone(),
                item.supplier_code.clone(),
                item.sku.clone(),
            ]
        })
        .collect();

    let headers = [HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4], HEADERS[6]];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut out, headers.as_slice(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, rule.as_slice(), &widths);
    for row in &rows {
        write_row(&mut out, row.as_slice(), &widths);
    }
    let _ = writeln!(
        out,
        "Total: £{} ({} item{})",
        view.total,
        view.items.len(),
        if view.items.len() == 1 { "" } else { "s" }
    );
    out
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Message for the outcome, followed by the order where it may have changed.
pub fn response(response: &Response) -> String {
    let mut out = String::new();
    match &response.outcome {
        Outcome::Updated(messages) => {
            for message in messages {
                let _ = writeln!(out, "{message}");
            }
            out.push_str(&order(&response.view));
        }
        Outcome::Warning(message) => {
            let _ = writeln!(out, "warning: {message}");
        }
        Outcome::Failed { error, written } => {
            for path in written {
                let _ = writeln!(out, "Exported {}", path.display());
            }
            let _ = writeln!(out, "error: {error}");
        }
        Outcome::Exported(paths) => {
            for path in paths {
                let _ = writeln!(out, "Exported {}", path.display());
            }
        }
        Outcome::Info(text) => out.push_str(text),
        Outcome::Shown => out.push_str(&order(&response.view)),
        Outcome::Quit => out.push_str("Bye.\n"),
    }
    out
}
