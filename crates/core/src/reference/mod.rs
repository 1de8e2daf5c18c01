//! Reference data - baskets and rule thresholds loaded from JSON files.

mod reference_loader;

pub use reference_loader::{parse_baskets, parse_rules, ReferenceData};
