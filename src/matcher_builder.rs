//! Module with the matcher builder.

use crate::{Alphabet, Pattern, PatternMatcher, Result};

/// A builder for creating a [PatternMatcher] from pattern strings.
///
/// Pattern ids are the indices of the patterns in the order they were added,
/// after deduplication by canonical key.
#[derive(Debug, Clone, Default)]
pub struct MatcherBuilder {
    symbols: String,
    pattern_texts: Vec<String>,
}

impl MatcherBuilder {
    /// Creates a new matcher builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the symbol alphabet, in id order.
    pub fn alphabet(mut self, symbols: &str) -> Self {
        self.symbols = symbols.to_string();
        self
    }

    /// Adds a pattern in string form (`/` separates rows, `*` is the
    /// wildcard).
    pub fn add_pattern(mut self, pattern: &str) -> Self {
        self.pattern_texts.push(pattern.to_string());
        self
    }

    /// Adds multiple patterns in string form.
    pub fn add_patterns<P, S>(mut self, patterns: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pattern_texts
            .extend(patterns.into_iter().map(|p| p.as_ref().to_string()));
        self
    }

    /// Builds the matcher from the builder.
    pub fn build(self) -> Result<PatternMatcher> {
        let alphabet = Alphabet::new(&self.symbols)?;
        let patterns = self
            .pattern_texts
            .iter()
            .map(|text| Pattern::parse(text))
            .collect::<Result<Vec<_>>>()?;
        PatternMatcher::new(alphabet, patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_strings() {
        let matcher = MatcherBuilder::new()
            .alphabet("BWR")
            .add_patterns(["RB", "W*/WW", "RB"])
            .build()
            .unwrap();
        assert_eq!(matcher.pattern_count(), 2);
    }

    #[test]
    fn test_build_reports_bad_inputs() {
        assert!(MatcherBuilder::new().add_pattern("A").build().is_err());
        assert!(MatcherBuilder::new()
            .alphabet("AB")
            .add_pattern("A/AB")
            .build()
            .is_err());
        assert!(MatcherBuilder::new()
            .alphabet("AB")
            .add_pattern("C")
            .build()
            .is_err());
    }
}
