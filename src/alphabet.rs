//! Module with the symbol alphabet type.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{GridrexError, GridrexErrorKind, Result};

/// The ordered set of symbols allowed in grid cells and pattern non-wildcards.
///
/// Every symbol carries a dense id given by its declaration position. The
/// wildcard marker `*` is reserved for patterns and cannot be declared as a
/// symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
    ids: FxHashMap<char, usize>,
}

impl Alphabet {
    /// Create an alphabet from the given symbols, in declaration order.
    /// Fails if the declaration is empty, repeats a symbol or declares `*`.
    pub fn new(symbols: &str) -> Result<Self> {
        let mut alphabet = Alphabet {
            symbols: Vec::new(),
            ids: FxHashMap::default(),
        };
        for symbol in symbols.chars() {
            if symbol == '*' {
                return Err(GridrexError::new(GridrexErrorKind::InvalidAlphabet(
                    "'*' is reserved for wildcards".to_string(),
                )));
            }
            if alphabet.ids.contains_key(&symbol) {
                return Err(GridrexError::new(GridrexErrorKind::InvalidAlphabet(
                    format!("duplicate symbol '{}'", symbol),
                )));
            }
            alphabet.ids.insert(symbol, alphabet.symbols.len());
            alphabet.symbols.push(symbol);
        }
        if alphabet.symbols.is_empty() {
            return Err(GridrexError::new(GridrexErrorKind::InvalidAlphabet(
                "empty symbol declaration".to_string(),
            )));
        }
        Ok(alphabet)
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// An alphabet is never empty; this exists for completeness.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The dense id of a symbol.
    pub fn id(&self, symbol: char) -> Result<usize> {
        self.ids
            .get(&symbol)
            .copied()
            .ok_or_else(|| GridrexError::unknown_key(symbol))
    }

    /// The symbol with the given dense id.
    pub fn symbol(&self, id: usize) -> Result<char> {
        self.symbols
            .get(id)
            .copied()
            .ok_or_else(|| GridrexError::unknown_key(format!("symbol id {}", id)))
    }

    /// Check if the alphabet declares the given symbol.
    pub fn contains(&self, symbol: char) -> bool {
        self.ids.contains_key(&symbol)
    }

    /// The symbols in declaration order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl TryFrom<String> for Alphabet {
    type Error = GridrexError;

    fn try_from(symbols: String) -> Result<Self> {
        Alphabet::new(&symbols)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_declaration_order() {
        let alphabet = Alphabet::new("BWREI").unwrap();
        assert_eq!(alphabet.len(), 5);
        assert_eq!(alphabet.id('B').unwrap(), 0);
        assert_eq!(alphabet.id('I').unwrap(), 4);
        assert_eq!(alphabet.symbol(1).unwrap(), 'W');
        assert!(alphabet.contains('R'));
        assert!(!alphabet.contains('X'));
    }

    #[test]
    fn test_rejects_bad_declarations() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("AA").is_err());
        assert!(Alphabet::new("A*").is_err());
    }

    #[test]
    fn test_unknown_symbol_lookup_fails() {
        let alphabet = Alphabet::new("BW").unwrap();
        assert!(alphabet.id('X').is_err());
        assert!(alphabet.symbol(2).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let alphabet = Alphabet::new("BW").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"BW\"");
        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id('W').unwrap(), 1);
    }
}
