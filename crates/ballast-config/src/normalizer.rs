//! Settings for turning raw export symbols into canonical ones.

use std::collections::{BTreeMap, BTreeSet};

/// Canonical symbol used for every cash-like position.
pub const CASH_SYMBOL: &str = "CASH";

/// Alias and cash-symbol rules read from the target file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizerSettings {
    alias_map: BTreeMap<String, String>,
    cash_symbols: BTreeSet<String>,
}

impl NormalizerSettings {
    /// Creates settings from an alias map and a list of cash symbols.
    pub fn new(
        alias_map: BTreeMap<String, String>,
        cash_symbols: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            alias_map,
            cash_symbols: cash_symbols.into_iter().collect(),
        }
    }

    /// Returns the alias for a raw symbol, if one is configured.
    pub fn alias(&self, raw: &str) -> Option<&str> {
        self.alias_map.get(raw).map(String::as_str)
    }

    /// Returns true if the raw symbol is listed as cash.
    pub fn is_cash_symbol(&self, raw: &str) -> bool {
        self.cash_symbols.contains(raw)
    }

    /// Maps a raw export symbol to its canonical form.
    ///
    /// Cash detection wins over aliases: listed cash symbols and anything
    /// containing "cash" (any case) become [`CASH_SYMBOL`].
    pub fn canonical_symbol(&self, raw: &str) -> String {
        if self.is_cash_symbol(raw) || raw.to_lowercase().contains("cash") {
            return CASH_SYMBOL.to_string();
        }
        self.alias(raw).unwrap_or(raw).to_string()
    }
}
