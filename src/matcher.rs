//! Module with the compiled pattern matcher.

use std::sync::Arc;

use log::debug;

use crate::internal::{AcceptID, Dfa, IdMap, IntSet, Regex};
use crate::{Alphabet, MatcherState, Pattern, Result};

/// A catalogue of patterns compiled for incremental matching on grids.
///
/// Compilation builds two minimised DFAs. The row DFA reads grid symbols
/// right to left and accepts a row id at the leftmost cell of every matched
/// pattern row. The column DFA reads the row DFA's accept-set ids bottom to
/// top and accepts a pattern id at the top-left corner of every matched
/// pattern. Set differences between the column DFA's accept sets are
/// precomputed so a state change can report exactly the matches it created
/// and destroyed.
///
/// The matcher is immutable after construction and is shared by its
/// [MatcherState]s through an [Arc].
#[derive(Debug)]
pub struct PatternMatcher {
    alphabet: Alphabet,
    patterns: Vec<Pattern>,
    pattern_keys: IdMap<String>,
    row_dfa: Dfa,
    col_dfa: Dfa,
    /// `diffs[p * K + q]` lists the accept ids in set p but not in set q,
    /// with K the number of distinct column-DFA accept sets.
    diffs: Vec<Vec<AcceptID>>,
}

impl PatternMatcher {
    /// Compile a pattern catalogue over the given alphabet.
    ///
    /// Patterns are deduplicated by canonical key; the id of a pattern is its
    /// position in the deduplicated catalogue. Fails with an unknown-key
    /// error if a pattern uses a symbol the alphabet does not declare.
    pub fn new(alphabet: Alphabet, patterns: Vec<Pattern>) -> Result<Self> {
        let mut pattern_keys: IdMap<String> = IdMap::new();
        let mut catalogue: Vec<Pattern> = Vec::new();
        for pattern in patterns {
            let id = pattern_keys.get_or_insert(pattern.key());
            if id == catalogue.len() {
                catalogue.push(pattern);
            }
        }

        // Collect the distinct rows of the catalogue. Rows are width x 1
        // patterns compared by canonical key; their dense ids are the accept
        // labels of the row DFA.
        let mut row_keys: IdMap<String> = IdMap::new();
        let mut row_rasters: Vec<Vec<Option<usize>>> = Vec::new();
        let mut pattern_rows: Vec<Vec<usize>> = Vec::new();
        for pattern in &catalogue {
            let mut rows = Vec::with_capacity(pattern.height());
            for y in 0..pattern.height() {
                let row_id = row_keys.get_or_insert(pattern.row_key(y));
                if row_id == row_rasters.len() {
                    let mut raster = Vec::with_capacity(pattern.width());
                    for x in 0..pattern.width() {
                        raster.push(match pattern.cell(x, y) {
                            Some(symbol) => Some(alphabet.id(symbol)?),
                            None => None,
                        });
                    }
                    row_rasters.push(raster);
                }
                rows.push(row_id);
            }
            pattern_rows.push(rows);
        }

        let row_dfa = Self::compile_row_dfa(alphabet.len(), &row_rasters);
        let col_dfa =
            Self::compile_col_dfa(&row_dfa, row_rasters.len(), &pattern_rows, catalogue.len());
        let diffs = Self::precompute_diffs(&col_dfa);

        debug!(
            "compiled {} patterns ({} distinct rows): row DFA {} states / {} accept sets, \
             column DFA {} states / {} accept sets",
            catalogue.len(),
            row_rasters.len(),
            row_dfa.state_count(),
            row_dfa.accept_set_count(),
            col_dfa.state_count(),
            col_dfa.accept_set_count(),
        );

        Ok(PatternMatcher {
            alphabet,
            patterns: catalogue,
            pattern_keys,
            row_dfa,
            col_dfa,
            diffs,
        })
    }

    /// Build and compile the row regex over the symbol alphabet:
    /// an arbitrary prefix, then one alternative per row with its atoms
    /// reversed. Reading right to left, the DFA thereby accepts a row id at
    /// the leftmost cell of the matched row.
    fn compile_row_dfa(alphabet_len: usize, row_rasters: &[Vec<Option<usize>>]) -> Dfa {
        let alternatives = row_rasters
            .iter()
            .enumerate()
            .map(|(row_id, raster)| {
                let mut atoms: Vec<Regex> = raster
                    .iter()
                    .rev()
                    .map(|cell| match cell {
                        Some(symbol) => Regex::letter(alphabet_len, *symbol),
                        None => Regex::Wildcard,
                    })
                    .collect();
                atoms.push(Regex::Accept(AcceptID::from(row_id)));
                Regex::Concat(atoms)
            })
            .collect();
        let regex = Regex::Concat(vec![Regex::any_prefix(), Regex::Union(alternatives)]);
        Dfa::compile(alphabet_len, row_rasters.len(), &regex)
    }

    /// Build and compile the column regex over the row DFA's accept-set
    /// alphabet. The letter set of row r contains every accept-set id whose
    /// set includes r, i.e. every column letter indicating that row r is
    /// matched. Rows are reversed so the DFA, reading bottom to top, accepts
    /// a pattern id at its top row.
    fn compile_col_dfa(
        row_dfa: &Dfa,
        row_count: usize,
        pattern_rows: &[Vec<usize>],
        pattern_count: usize,
    ) -> Dfa {
        let column_alphabet_len = row_dfa.accept_set_count();
        let mut accepting_sets: Vec<IntSet> = (0..row_count)
            .map(|_| IntSet::new(column_alphabet_len))
            .collect();
        for set_id in 0..column_alphabet_len {
            for label in &row_dfa.accept_lists[set_id] {
                accepting_sets[label.as_usize()].insert(set_id);
            }
        }

        let alternatives = pattern_rows
            .iter()
            .enumerate()
            .map(|(pattern_id, rows)| {
                let mut atoms: Vec<Regex> = rows
                    .iter()
                    .rev()
                    .map(|&row_id| Regex::Letters(accepting_sets[row_id].clone()))
                    .collect();
                atoms.push(Regex::Accept(AcceptID::from(pattern_id)));
                Regex::Concat(atoms)
            })
            .collect();
        let regex = Regex::Concat(vec![Regex::any_prefix(), Regex::Union(alternatives)]);
        Dfa::compile(column_alphabet_len, pattern_count, &regex)
    }

    /// Precompute `diff[p][q] = acceptSet(p) \ acceptSet(q)` for every
    /// ordered pair of distinct column-DFA accept sets, as sorted accept-id
    /// lists. This lets a column state change list its created and destroyed
    /// matches in time proportional to the difference size.
    fn precompute_diffs(col_dfa: &Dfa) -> Vec<Vec<AcceptID>> {
        let k = col_dfa.accept_set_count();
        let mut diffs = Vec::with_capacity(k * k);
        for p in 0..k {
            for q in 0..k {
                let q_set = col_dfa.accept_set_map.value(q);
                diffs.push(
                    col_dfa.accept_lists[p]
                        .iter()
                        .copied()
                        .filter(|label| !q_set.contains(label.as_usize()))
                        .collect(),
                );
            }
        }
        diffs
    }

    /// The alphabet the matcher was compiled over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The deduplicated pattern catalogue, in id order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// The number of patterns in the catalogue.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// The id of a catalogue pattern, looked up by canonical key.
    pub fn pattern_id(&self, pattern: &Pattern) -> Result<usize> {
        self.pattern_keys.get(&pattern.key())
    }

    /// Create a matcher state for a fresh grid of the given size, with every
    /// cell holding symbol id 0 and all pattern matches materialised.
    pub fn make_state(self: Arc<Self>, width: usize, height: usize) -> MatcherState {
        MatcherState::new(self, width, height)
    }

    pub(crate) fn row_dfa(&self) -> &Dfa {
        &self.row_dfa
    }

    pub(crate) fn col_dfa(&self) -> &Dfa {
        &self.col_dfa
    }

    /// The accept ids in accept set p but not in accept set q.
    #[inline]
    pub(crate) fn diff(&self, p: usize, q: usize) -> &[AcceptID] {
        &self.diffs[p * self.col_dfa.accept_set_count() + q]
    }
}
