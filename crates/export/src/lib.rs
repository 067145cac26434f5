//! Export formatter: turns an order session into CSV and PDF documents.
//!
//! Both formats render the same [`ExportTable`], built once per export, so they
//! agree on every field except the display truncation the PDF applies.

pub mod csv_doc;
pub mod error;
pub mod pdf_doc;
pub mod table;
pub mod writer;

pub use csv_doc::render_csv;
pub use error::ExportError;
pub use pdf_doc::render_pdf;
pub use table::{ExportFormat, ExportRow, ExportTable, HEADERS, TOTAL_LABEL};
pub use writer::{render, write_export};
