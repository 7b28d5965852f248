//! # SKU Generation
//!
//! Generates human-readable SKUs for items entered without one.
//!
//! ## Format
//! `CAT-NAM-YY-NNN`
//! - `CAT`: first 3 alphanumeric characters of the category name, uppercased
//! - `NAM`: first 3 alphanumeric characters of the item name, uppercased
//! - `YY`: 2-digit year
//! - `NNN`: caller-supplied daily sequence, zero-padded to 3 digits
//!
//! ## Example
//! `PEN-BIC-26-001` for a Bic ballpoint in the Pens category, first item
//! entered that day in 2026.
//!
//! Uniqueness is enforced by the database constraint on `sku`; on a
//! collision the caller retries with the next sequence number.

use chrono::{Datelike, NaiveDate};

/// Generates a SKU from category and item names.
pub fn generate_sku(category_name: &str, item_name: &str, date: NaiveDate, seq: u32) -> String {
    let category_abbr = abbreviate(category_name);
    let name_abbr = abbreviate(item_name);
    let year_suffix = date.year() % 100;

    format!("{category_abbr}-{name_abbr}-{year_suffix:02}-{seq:03}")
}

/// First 3 alphanumeric characters, uppercased. Falls back to "XXX" for
/// names with no alphanumeric content.
fn abbreviate(name: &str) -> String {
    let abbr: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();

    if abbr.is_empty() {
        "XXX".to_string()
    } else {
        abbr
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
