//! PDF rendering: a bordered, fixed-width table on landscape A4 pages.
//!
//! The document is written directly as PDF 1.4 using the standard Helvetica
//! fonts (no embedding) with WinAnsi encoding, so `£` renders without a font
//! file. Content streams are left uncompressed.

use std::io::Write as _;

use crate::table::{ExportRow, ExportTable, HEADERS};

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Landscape A4.
const PAGE_WIDTH_MM: f64 = 297.0;
const PAGE_HEIGHT_MM: f64 = 210.0;

/// Column widths, in mm, in [`HEADERS`] order.
pub const COLUMN_WIDTHS_MM: [f64; 7] = [20.0, 60.0, 25.0, 30.0, 40.0, 30.0, 60.0];

/// Maximum characters shown per column; longer values are cut.
pub const COLUMN_MAX_CHARS: [usize; 7] = [6, 30, 12, 15, 20, 15, 30];

const MARGIN_TOP_MM: f64 = 15.0;
const MARGIN_BOTTOM_MM: f64 = 15.0;
const TABLE_TOP_MM: f64 = 32.0;
const ROW_HEIGHT_MM: f64 = 8.0;
const CELL_PADDING_MM: f64 = 1.5;
const TEXT_BASELINE_MM: f64 = 2.8;

const TITLE_SIZE: f64 = 16.0;
const SUBTITLE_SIZE: f64 = 10.0;
const CELL_SIZE: f64 = 9.0;

/// Body rows (data + TOTAL) that fit under the header on one page.
pub fn rows_per_page() -> usize {
    let usable = PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM - TABLE_TOP_MM;
    ((usable / ROW_HEIGHT_MM).floor() as usize).saturating_sub(1).max(1)
}

/// Cut `value` to `max` characters for display.
pub fn truncate_for_display(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Render the table. One page unless the order outgrows it, in which case the
/// rows continue on further pages with the header repeated.
pub fn render_pdf(table: &ExportTable) -> Vec<u8> {
    let rows: Vec<&ExportRow> = table.rows().collect();
    let per_page = rows_per_page();
    let chunks: Vec<&[&ExportRow]> = rows.chunks(per_page).collect();
    let page_count = chunks.len();

    let title = "Purchase Order";
    let subtitle = format!(
        "Supplier: {}   Date: {}   Total: \u{a3}{}",
        subtitle_supplier(table),
        table.date().format("%d/%m/%Y"),
        table.total_row().cost
    );

    let contents: Vec<Vec<u8>> = chunks
        .iter()
        .enumerate()
        .map(|(index, page_rows)| {
            page_content(title, &subtitle, page_rows, index + 1, page_count)
        })
        .collect();

    let mut doc = PdfDocument::new();
    doc.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", page_object_id(i)))
        .collect();
    doc.object(
        2,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .as_bytes(),
    );
    doc.object(
        3,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    doc.object(
        4,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    let mut info = b"<< /Title (".to_vec();
    info.extend(encode_text(&table.file_name(crate::ExportFormat::Pdf)));
    info.extend_from_slice(b") /Producer (poforge) >>");
    doc.object(5, &info);

    for (index, content) in contents.iter().enumerate() {
        let page_id = page_object_id(index);
        let content_id = page_id + 1;
        doc.object(
            page_id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                mm(PAGE_WIDTH_MM),
                mm(PAGE_HEIGHT_MM),
                content_id
            )
            .as_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content);
        stream.extend_from_slice(b"\nendstream");
        doc.object(content_id, &stream);
    }

    doc.finish(1, 5)
}

fn subtitle_supplier(table: &ExportTable) -> String {
    match table.supplier_name() {
        Some(name) if name != table.supplier_code() => {
            format!("{} ({})", name, table.supplier_code())
        }
        _ => table.supplier_code().to_string(),
    }
}

fn page_object_id(page_index: usize) -> usize {
    6 + page_index * 2
}

fn mm(value: f64) -> f64 {
    value * MM_TO_PT
}

/// PDF y coordinate (from the bottom edge) for a distance from the top edge.
fn from_top(value_mm: f64) -> f64 {
    mm(PAGE_HEIGHT_MM - value_mm)
}

fn table_left_mm() -> f64 {
    let width: f64 = COLUMN_WIDTHS_MM.iter().sum();
    (PAGE_WIDTH_MM - width) / 2.0
}

fn page_content(
    title: &str,
    subtitle: &str,
    rows: &[&ExportRow],
    page: usize,
    page_count: usize,
) -> Vec<u8> {
    let mut out = Vec::new();
    let left = table_left_mm();

    text(&mut out, "F2", TITLE_SIZE, left, MARGIN_TOP_MM + 5.0, title);
    text(&mut out, "F1", SUBTITLE_SIZE, left, MARGIN_TOP_MM + 12.0, subtitle);
    if page_count > 1 {
        let marker = format!("Page {page} of {page_count}");
        let x = PAGE_WIDTH_MM - left - 30.0;
        text(&mut out, "F1", SUBTITLE_SIZE, x, MARGIN_TOP_MM + 12.0, &marker);
    }

    // Thin black borders.
    out.extend_from_slice(b"0.5 w 0 G\n");

    let mut top = TABLE_TOP_MM;
    row(&mut out, "F2", top, &HEADERS, true);
    for body in rows {
        top += ROW_HEIGHT_MM;
        row(&mut out, "F1", top, &body.fields(), false);
    }

    out
}

fn row(out: &mut Vec<u8>, font: &str, top_mm: f64, fields: &[&str; 7], header: bool) {
    let mut x = table_left_mm();
    for (column, value) in fields.iter().enumerate() {
        let width = COLUMN_WIDTHS_MM[column];
        let bottom = top_mm + ROW_HEIGHT_MM;

        if header {
            // Light grey header fill under the border.
            let _ = writeln!(
                out,
                "0.9 g {:.2} {:.2} {:.2} {:.2} re f 0 g",
                mm(x),
                from_top(bottom),
                mm(width),
                mm(ROW_HEIGHT_MM)
            );
        }
        let _ = writeln!(
            out,
            "{:.2} {:.2} {:.2} {:.2} re S",
            mm(x),
            from_top(bottom),
            mm(width),
            mm(ROW_HEIGHT_MM)
        );

        let shown = if header {
            value.to_string()
        } else {
            truncate_for_display(value, COLUMN_MAX_CHARS[column])
        };
        text(
            out,
            font,
            CELL_SIZE,
            x + CELL_PADDING_MM,
            bottom - TEXT_BASELINE_MM,
            &shown,
        );

        x += width;
    }
}

/// Emit one line of text with its baseline `baseline_mm` below the top edge.
fn text(out: &mut Vec<u8>, font: &str, size: f64, x_mm: f64, baseline_mm: f64, value: &str) {
    let _ = write!(
        out,
        "BT /{} {:.1} Tf {:.2} {:.2} Td (",
        font,
        size,
        mm(x_mm),
        from_top(baseline_mm)
    );
    out.extend(encode_text(value));
    out.extend_from_slice(b") Tj ET\n");
}

/// Encode a string as the body of a PDF literal string in WinAnsi.
///
/// Latin-1 characters map to themselves, `€` to 0x80, anything else to `?`.
pub fn encode_text(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            '\u{a0}'..='\u{ff}' => out.push(c as u32 as u8),
            '\u{20ac}' => out.push(0x80),
            c if c.is_control() => out.push(b' '),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Accumulates numbered objects and writes the cross-reference table.
struct PdfDocument {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfDocument {
    fn new() -> Self {
        let mut buf = b"%PDF-1.4\n".to_vec();
        // Binary marker so transfer tools treat the file as binary.
        buf.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        let _ = write!(self.buf, "{id} 0 obj\n");
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let size = self.offsets.last().map(|(id, _)| id + 1).unwrap_or(1);

        let xref_at = self.buf.len();
        let _ = write!(self.buf, "xref\n0 {size}\n0000000000 65535 f \n");
        let mut next = 1;
        for (id, offset) in &self.offsets {
            // Free entries for any gap in the numbering.
            while next < *id {
                self.buf.extend_from_slice(b"0000000000 65535 f \n");
                next += 1;
            }
            let _ = write!(self.buf, "{offset:010} 00000 n \n");
            next = id + 1;
        }
        let _ = write!(
            self.buf,
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.buf
    }
}
