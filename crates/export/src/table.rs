//! The row set shared by every export format.

use core::str::FromStr;

use chrono::NaiveDate;

use poforge_core::Cost;
use poforge_purchasing::{compact_date, LineItem, OrderSession};

use crate::error::ExportError;

/// Column headers, in export order.
pub const HEADERS: [&str; 7] = [
    "Item No.",
    "Description",
    "Cost (£)",
    "Location",
    "Supplier",
    "Date",
    "SKU",
];

/// Description of the synthetic trailing row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Date format of the `Date` column.
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl core::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One rendered row; every field is already formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub item_no: String,
    pub description: String,
    pub cost: String,
    pub location: String,
    pub supplier: String,
    pub date: String,
    pub sku: String,
}

impl ExportRow {
    fn from_item(item: &LineItem) -> Self {
        Self {
            item_no: item.sequence.to_string(),
            description: item.description.clone(),
            cost: item.cost.to_string(),
            location: item.location.clone(),
            supplier: item.supplier_code.clone(),
            date: item.date.format(ROW_DATE_FORMAT).to_string(),
            sku: item.sku.clone(),
        }
    }

    fn total(total: Cost) -> Self {
        Self {
            item_no: String::new(),
            description: TOTAL_LABEL.to_string(),
            cost: total.to_string(),
            location: String::new(),
            supplier: String::new(),
            date: String::new(),
            sku: String::new(),
        }
    }

    /// Fields in [`HEADERS`] order.
    pub fn fields(&self) -> [&str; 7] {
        [
            self.item_no.as_str(),
            self.description.as_str(),
            self.cost.as_str(),
            self.location.as_str(),
            self.supplier.as_str(),
            self.date.as_str(),
            self.sku.as_str(),
        ]
    }
}

/// Data rows plus the TOTAL row, and the naming inputs for export files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    supplier_code: String,
    supplier_name: Option<String>,
    date: NaiveDate,
    rows: Vec<ExportRow>,
    total_row: ExportRow,
}

impl ExportTable {
    /// Snapshot the session. Fails for an empty order.
    pub fn from_session(session: &OrderSession) -> Result<Self, ExportError> {
        if session.items().is_empty() {
            return Err(ExportError::EmptyOrder);
        }

        Ok(Self {
            supplier_code: session.supplier_code().to_string(),
            supplier_name: session.supplier_name().map(str::to_string),
            date: session.date(),
            rows: session.items().iter().map(ExportRow::from_item).collect(),
            total_row: ExportRow::total(session.running_total()),
        })
    }

    pub fn data_rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn total_row(&self) -> &ExportRow {
        &self.total_row
    }

    /// Data rows followed by the TOTAL row.
    pub fn rows(&self) -> impl Iterator<Item = &ExportRow> {
        self.rows.iter().chain(core::iter::once(&self.total_row))
    }

    pub fn supplier_code(&self) -> &str {
        &self.supplier_code
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `PO-{dateCompact}-{supplierCode}.{ext}`.
    ///
    /// Characters that cannot appear in a file name are replaced with `_`, so
    /// the result is always a single path component. Rows keep the code as is.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "PO-{}-{}.{}",
            compact_date(self.date),
            file_name_safe(&self.supplier_code),
            format.extension()
        )
    }
}

fn file_name_safe(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
