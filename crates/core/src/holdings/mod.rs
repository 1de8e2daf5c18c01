//! Holdings module - the session's table of equity positions.

mod holdings_import;
mod holdings_model;
mod holdings_store;

pub use holdings_import::{import_holdings_csv, parse_holdings_csv};
pub use holdings_model::{normalize_symbol, Holding, NewHolding, MAX_SYMBOL_LEN};
pub use holdings_store::HoldingsStore;
