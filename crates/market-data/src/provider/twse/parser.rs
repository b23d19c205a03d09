//! HTML parsing for the ISIN listing pages.

use scraper::{Html, Selector};
use tracing::warn;

use crate::errors::MarketDataError;
use crate::models::{ListedSecurity, ListingTier};

/// Separator between code and name in the first column (ideographic space).
const CODE_NAME_SEPARATOR: char = '\u{3000}';

/// Decode a listing page body.
///
/// The live pages are served as Big5; anything that already is valid UTF-8
/// is taken as-is.
pub fn decode_listing(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::BIG5.decode(bytes);
            if had_errors {
                warn!("[TWSE] Listing page contained bytes outside Big5; some names may be garbled");
            }
            text.into_owned()
        }
    }
}

fn selector(css: &str) -> Result<Selector, MarketDataError> {
    Selector::parse(css)
        .map_err(|e| MarketDataError::ParseError(format!("Invalid selector '{}': {}", css, e)))
}

/// Split `"2330\u{3000}台積電"` into its code and name.
fn split_code_name(cell: &str) -> Option<(&str, &str)> {
    let mut parts = cell.split(CODE_NAME_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(code), Some(name), None) => Some((code.trim(), name.trim())),
        _ => None,
    }
}

/// Parse the listing table into securities.
///
/// The header row is skipped, as are rows with fewer than four cells, rows
/// whose code does not start with a digit, and rows whose market column is
/// not one of the recognized tiers.
pub fn parse_listing_html(html: &str) -> Result<Vec<ListedSecurity>, MarketDataError> {
    let document = Html::parse_document(html);
    let table_selector = selector("table.h4")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| MarketDataError::ParseError("Listing table not found".to_string()))?;

    let mut securities = Vec::new();
    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        if cells.len() < 4 {
            continue;
        }

        let Some((code, name)) = split_code_name(&cells[0]) else {
            continue;
        };

        if !code.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        let Some(tier) = ListingTier::from_marker(&cells[3]) else {
            continue;
        };

        securities.push(ListedSecurity {
            code: code.to_string(),
            name: name.to_string(),
            tier,
        });
    }

    Ok(securities)
}
