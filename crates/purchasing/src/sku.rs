//! SKU formatting.
//!
//! `{dateCompact}-{sequence}-{truncatedCost}-{location}-{supplierCode}`, e.g.
//! `171026-2-75-ShopA-AM` for item 2 costing 75.50 on 17 Oct 2026.

use chrono::NaiveDate;

use poforge_core::Cost;

/// Compact date used in SKUs and export filenames: day, month, two-digit year.
pub const SKU_DATE_FORMAT: &str = "%d%m%y";

pub fn compact_date(date: NaiveDate) -> String {
    date.format(SKU_DATE_FORMAT).to_string()
}

/// Build the SKU for a line item.
///
/// The cost is truncated toward zero, not rounded. Location and supplier code
/// are inserted as given; embedded `-` is not escaped. Whitespace is removed
/// from the result.
pub fn format_sku(
    date: NaiveDate,
    sequence: u32,
    cost: Cost,
    location: &str,
    supplier_code: &str,
) -> String {
    let sku = format!(
        "{}-{}-{}-{}-{}",
        compact_date(date),
        sequence,
        cost.truncated(),
        location,
        supplier_code
    );
    sku.chars().filter(|c| !c.is_whitespace()).collect()
}
