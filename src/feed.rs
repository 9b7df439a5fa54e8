//! Product feed ingestion.
//!
//! Site owners point the generator at a published spreadsheet (CSV or
//! pipe-delimited) and the build pulls product rows from it. The feed is
//! third-party data of unknown shape, so this module does three jobs:
//!
//! 1. **URL rewriting** — a Google Sheets editor link is rewritten to the
//!    direct CSV export form, preserving the sheet (`gid`) selector.
//! 2. **Dialect detection** — the delimiter is sniffed from the first
//!    non-empty line (comma, pipe, semicolon, tab), and a recognized header
//!    row is skipped automatically.
//! 3. **Schema normalization** — rows map positionally onto the four-field
//!    [`Product`] schema; short rows pad with empty strings, long rows drop
//!    extra columns.
//!
//! ## Failure semantics
//!
//! Feed ingestion is never fatal. [`fetch_products`] degrades to an empty
//! vec on any transport error, non-success status, timeout, or parse
//! failure — a build must not break because a third-party sheet is
//! unreachable. The fetch is bounded by [`FETCH_TIMEOUT`].

use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on the feed fetch. The only blocking network call in a build.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// First-cell labels that mark a row as a header to skip.
const HEADER_SYNONYMS: &[&str] = &["name", "product", "title", "item", "service_name", "product_name"];

/// Delimiters considered by the sniffer, comma first (the tie-break winner).
const DELIMITER_CANDIDATES: &[u8] = &[b',', b'|', b';', b'\t'];

/// How many leading lines the pipe-presence fallback inspects when the
/// first line carries no candidate delimiter at all.
const SNIFF_FALLBACK_LINES: usize = 5;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One row of the ingested feed.
///
/// `price` is deliberately a string — currency-agnostic, never parsed or
/// validated here. Missing trailing columns are empty strings, never
/// absent fields. Built fresh per build cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

/// Fetch and normalize the product feed. Total: any failure yields an
/// empty vec, never an error.
pub fn fetch_products(feed_url: &str) -> Vec<Product> {
    try_fetch(feed_url).unwrap_or_default()
}

fn try_fetch(feed_url: &str) -> Result<Vec<Product>, FeedError> {
    let url = rewrite_sheet_url(feed_url);
    let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let response = client.get(&url).send()?;
    if !response.status().is_success() {
        return Ok(Vec::new());
    }
    let body = response.text()?;
    Ok(parse_feed(&body))
}

/// Rewrite a Google Sheets editor URL to its CSV export form.
///
/// `…/spreadsheets/d/<id>/edit#gid=0` becomes
/// `…/spreadsheets/d/<id>/export?format=csv&gid=0`. A `gid` selector is
/// preserved whether it appears in the query or the fragment. URLs that
/// don't look like a sheets editor link pass through unchanged.
pub fn rewrite_sheet_url(url: &str) -> String {
    if !url.contains("docs.google.com/spreadsheets") {
        return url.to_string();
    }
    let Some(edit_pos) = url.find("/edit") else {
        return url.to_string();
    };
    let base = &url[..edit_pos];
    let tail = &url[edit_pos..];

    let gid: Option<String> = tail.find("gid=").map(|i| {
        tail[i + 4..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect()
    });

    match gid.filter(|g| !g.is_empty()) {
        Some(gid) => format!("{base}/export?format=csv&gid={gid}"),
        None => format!("{base}/export?format=csv"),
    }
}

/// Sniff the field delimiter from the first non-empty line.
///
/// The most frequent candidate wins; comma wins ties and empty input. When
/// the first line carries no candidate at all, pipes anywhere in the first
/// few lines select pipe. A heuristic, not a contract — comma and pipe are
/// the two dialects the feed boundary promises to support.
pub fn detect_delimiter(text: &str) -> u8 {
    let first = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut best = b',';
    let mut best_count = 0;
    for &candidate in DELIMITER_CANDIDATES {
        let count = first.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    if best_count == 0
        && text
            .lines()
            .take(SNIFF_FALLBACK_LINES)
            .any(|line| line.contains('|'))
    {
        return b'|';
    }
    best
}

/// Parse delimited text into products: sniff the dialect, drop blank rows,
/// skip a recognized header, map the rest positionally.
pub fn parse_feed(text: &str) -> Vec<Product> {
    let delimiter = detect_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(cells);
    }

    let start = match rows.first() {
        Some(first) if is_header_row(first) => 1,
        _ => 0,
    };

    rows[start..].iter().map(|cells| row_to_product(cells)).collect()
}

fn is_header_row(cells: &[String]) -> bool {
    cells
        .first()
        .map(|cell| HEADER_SYNONYMS.contains(&cell.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Positional mapping: (name, price, description, image). Short rows pad
/// with empty strings; extra columns are discarded.
fn row_to_product(cells: &[String]) -> Product {
    let field = |i: usize| cells.get(i).cloned().unwrap_or_default();
    Product {
        name: field(0),
        price: field(1),
        description: field(2),
        image: field(3),
    }
}
