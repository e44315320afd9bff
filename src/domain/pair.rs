//! Trading pair naming.

use std::fmt;

/// Base/quote pair named after the Move coin types of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradingPair {
    base: String,
    quote: String,
}

impl TradingPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Builds a pair from full type tags such as `0x2::sui::SUI`.
    ///
    /// The symbol is the last `::` segment with any generic arguments removed.
    #[must_use]
    pub fn from_type_tags(base_type: &str, quote_type: &str) -> Self {
        Self::new(symbol_of(base_type), symbol_of(quote_type))
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Symbol without separator, e.g. `SUIREALUSDC`.
    #[must_use]
    pub fn exchange_symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

fn symbol_of(type_tag: &str) -> &str {
    let without_generics = type_tag.split('<').next().unwrap_or(type_tag);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}
