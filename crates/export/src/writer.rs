//! Writing export files to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::csv_doc::render_csv;
use crate::error::ExportError;
use crate::pdf_doc::render_pdf;
use crate::table::{ExportFormat, ExportTable};

/// Render `table` in `format`.
pub fn render(table: &ExportTable, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => render_csv(table),
        ExportFormat::Pdf => Ok(render_pdf(table)),
    }
}

/// Render and write `dir/PO-{date}-{supplier}.{ext}`, creating `dir` if needed.
///
/// Returns the written path. Any IO failure aborts this export only.
pub fn write_export(
    dir: &Path,
    table: &ExportTable,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let bytes = render(table, format)?;

    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(table.file_name(format));
    fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        format = %format,
        bytes = bytes.len(),
        rows = table.data_rows().len(),
        "export written"
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::chair_and_table;

    #[test]
    fn writes_both_formats_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("orders");
        let table = ExportTable::from_session(&chair_and_table()).unwrap();

        let csv_path = write_export(&out, &table, ExportFormat::Csv).unwrap();
        let pdf_path = write_export(&out, &table, ExportFormat::Pdf).unwrap();

        assert_eq!(csv_path, out.join("PO-171026-AM.csv"));
        assert_eq!(pdf_path, out.join("PO-171026-AM.pdf"));
        assert!(fs::read_to_string(&csv_path).unwrap().starts_with("Item No.,"));
        assert!(fs::read(&pdf_path).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn unwritable_target_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();
        let table = ExportTable::from_session(&chair_and_table()).unwrap();

        let err = write_export(&blocker, &table, ExportFormat::Csv).unwrap_err();
        match err {
            ExportError::Io { path, .. } => assert!(path.starts_with(&blocker)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
