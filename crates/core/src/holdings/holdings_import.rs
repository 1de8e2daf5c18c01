//! CSV import of a full holdings table.
//!
//! Expected header: `Stock, Qty, Avg` with an optional `CMP` column, matched
//! case-insensitively. The import is all-or-nothing: one bad row rejects the
//! whole file and the store is left as it was.

use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use rust_decimal::Decimal;

use super::holdings_model::{Holding, NewHolding};
use super::holdings_store::HoldingsStore;
use crate::errors::{Error, Result, RowError};

const COL_STOCK: &str = "Stock";
const COL_QTY: &str = "Qty";
const COL_AVG: &str = "Avg";
const COL_CMP: &str = "CMP";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Positions of the known columns in the header row.
struct ColumnMap {
    stock: usize,
    qty: usize,
    avg: usize,
    cmp: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

        let missing: Vec<RowError> = [COL_STOCK, COL_QTY, COL_AVG]
            .into_iter()
            .filter(|name| find(*name).is_none())
            .map(|name| RowError {
                row: 1,
                column: Some(name.to_string()),
                message: format!("Missing required column '{}'", name),
            })
            .collect();
        if !missing.is_empty() {
            return Err(Error::ImportRejected(missing));
        }

        Ok(Self {
            stock: find(COL_STOCK).unwrap_or_default(),
            qty: find(COL_QTY).unwrap_or_default(),
            avg: find(COL_AVG).unwrap_or_default(),
            cmp: find(COL_CMP),
        })
    }

    /// Builds a holding from one record, or names the column that failed.
    fn holding_from(&self, record: &StringRecord) -> std::result::Result<Holding, (String, String)> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let quantity = parse_required(field(self.qty), COL_QTY)?;
        let average_cost = parse_required(field(self.avg), COL_AVG)?;
        let current_price = match self.cmp.map(field).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_decimal(raw, COL_CMP)?),
            None => None,
        };

        let input = NewHolding {
            symbol: field(self.stock).to_string(),
            quantity,
            average_cost,
            current_price,
        };
        Holding::try_from(input).map_err(|err| match err {
            Error::InvalidHolding(validation) => {
                let column = match validation.field() {
                    Some("quantity") => COL_QTY,
                    Some("averageCost") => COL_AVG,
                    Some("currentPrice") => COL_CMP,
                    _ => COL_STOCK,
                };
                (column.to_string(), validation.to_string())
            }
            other => (COL_STOCK.to_string(), other.to_string()),
        })
    }
}

fn parse_required(raw: &str, column: &str) -> std::result::Result<Decimal, (String, String)> {
    if raw.is_empty() {
        return Err((column.to_string(), format!("{} is required", column)));
    }
    parse_decimal(raw, column)
}

fn parse_decimal(raw: &str, column: &str) -> std::result::Result<Decimal, (String, String)> {
    Decimal::from_str(raw)
        .map_err(|_| (column.to_string(), format!("'{}' is not a valid number", raw)))
}

/// Parses a holdings CSV into a validated, de-duplicated list.
///
/// Rows with a repeated symbol follow upsert rules: the later row wins.
/// Empty or header-only input yields an empty list.
pub fn parse_holdings_csv(content: &[u8]) -> Result<Vec<Holding>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| {
            Error::ImportRejected(vec![RowError {
                row: 1,
                column: None,
                message: format!("Unreadable header row: {}", e),
            }])
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut parsed = HoldingsStore::new();
    let mut errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let fallback_row = idx as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                errors.push(RowError {
                    row: e.position().map(|p| p.line()).unwrap_or(fallback_row),
                    column: None,
                    message: format!("Unreadable row: {}", e),
                });
                continue;
            }
        };
        let row = record.position().map(|p| p.line()).unwrap_or(fallback_row);

        if record.iter().all(str::is_empty) {
            continue;
        }

        match columns.holding_from(&record) {
            Ok(holding) => {
                if parsed.upsert(holding.clone()).is_some() {
                    warn!(
                        "Row {} repeats symbol {}; keeping the later row",
                        row, holding.symbol
                    );
                }
            }
            Err((column, message)) => errors.push(RowError {
                row,
                column: Some(column),
                message,
            }),
        }
    }

    if !errors.is_empty() {
        warn!("Rejecting holdings import: {} invalid row(s)", errors.len());
        return Err(Error::ImportRejected(errors));
    }
    Ok(parsed.into_vec())
}

/// Replaces the store's contents with the holdings in a CSV file.
///
/// Returns the number of holdings imported. On error the store is untouched.
pub fn import_holdings_csv(store: &mut HoldingsStore, content: &[u8]) -> Result<usize> {
    let holdings = parse_holdings_csv(content)?;
    let count = holdings.len();
    store.replace_all(holdings);
    info!("Imported {} holdings from CSV", count);
    Ok(count)
}
