//! Module with the per-grid matcher state and the incremental recompute.

use std::sync::Arc;

use crate::internal::{SampleableSet, StateVec};
use crate::{Grid, GridrexError, Pattern, PatternMatcher, Rect, Result};

/// The mutable matching state of one grid against a compiled matcher.
///
/// Besides the grid itself the state holds two flat arrays memoising DFA
/// states per cell, plus one sampleable index of match positions per pattern:
///
/// - `row_states[x + y*W]` is the row DFA state after reading row y right to
///   left from the grid edge down to column x;
/// - `col_states[x + y*W]` is the column DFA state after reading the row
///   accept-set ids of column x bottom to top from the grid edge up to row y;
/// - pattern p matches at (x, y) iff the column DFA accepts p at
///   `col_states[x + y*W]`, and exactly those linear indices are held in p's
///   match index.
///
/// [MatcherState::recompute] is the only mutator of the three structures and
/// runs as the sole reaction to every grid edit.
pub struct MatcherState {
    matcher: Arc<PatternMatcher>,
    grid: Grid,
    row_states: StateVec,
    col_states: StateVec,
    match_indices: Vec<SampleableSet>,
}

impl MatcherState {
    /// Create the state for a fresh all-symbol-0 grid and establish the
    /// memoisation invariants with one full recompute.
    pub fn new(matcher: Arc<PatternMatcher>, width: usize, height: usize) -> Self {
        let cells = width * height;
        let row_states = StateVec::zeroed(matcher.row_dfa().state_count() - 1, cells);
        let col_states = StateVec::zeroed(matcher.col_dfa().state_count() - 1, cells);
        let match_indices = vec![SampleableSet::new(); matcher.pattern_count()];
        let grid = Grid::new(width, height, matcher.alphabet().len());
        let mut state = MatcherState {
            matcher,
            grid,
            row_states,
            col_states,
            match_indices,
        };
        state.recompute(Rect::new(0, 0, width, height));
        state
    }

    /// The grid width.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// The grid height.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The matcher this state was created from.
    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Read access to the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The symbol id at (x, y).
    pub fn cell(&self, x: usize, y: usize) -> Result<usize> {
        self.grid.get(x, y)
    }

    /// Register a grid change listener. Listeners run after the cells change
    /// but before the match indices catch up.
    pub fn listen(&mut self, listener: impl FnMut(Rect) + 'static) {
        self.grid.listen(listener);
    }

    /// Write one cell and recompute its 1x1 rectangle.
    pub fn set(&mut self, x: usize, y: usize, symbol: usize) -> Result<()> {
        self.grid.set(x, y, symbol)?;
        self.recompute(Rect::cell(x, y));
        Ok(())
    }

    /// Write the non-wildcard cells of a pattern with its top-left corner at
    /// (x, y), then recompute the tight rectangle of cells that actually
    /// changed. Wildcard cells are a no-op.
    pub fn put_pattern(&mut self, x: usize, y: usize, pattern: &Pattern) -> Result<()> {
        let matcher = self.matcher.clone();
        if let Some(dirty) = self.grid.put_pattern(x, y, pattern, matcher.alphabet())? {
            self.recompute(dirty);
        }
        Ok(())
    }

    /// The number of positions where the pattern currently matches. O(1).
    pub fn count_matches(&self, pattern_id: usize) -> Result<usize> {
        Ok(self.match_index(pattern_id)?.len())
    }

    /// A uniformly random match position of the pattern, or None when it has
    /// no match. O(1).
    pub fn random_match(&self, pattern_id: usize) -> Result<Option<(usize, usize)>> {
        let index = self.match_index(pattern_id)?;
        Ok(index
            .sample(&mut rand::thread_rng())
            .map(|i| self.to_position(i)))
    }

    /// All current match positions of the pattern, in unspecified order.
    pub fn matches(&self, pattern_id: usize) -> Result<Vec<(usize, usize)>> {
        let index = self.match_index(pattern_id)?;
        Ok(index.iter().map(|&i| self.to_position(i)).collect())
    }

    fn match_index(&self, pattern_id: usize) -> Result<&SampleableSet> {
        self.match_indices
            .get(pattern_id)
            .ok_or_else(|| GridrexError::unknown_key(format!("pattern id {}", pattern_id)))
    }

    fn to_position(&self, index: usize) -> (usize, usize) {
        (index % self.grid.width(), index / self.grid.width())
    }

    /// Re-establish the memoisation invariants after the cells inside `rect`
    /// changed. Coordinates are clamped to the grid.
    ///
    /// Phase 1 rescans each edited row right to left, seeding the row DFA
    /// from the memoised state just right of the rectangle (or the start
    /// state at the grid edge) and stopping once the scan re-synchronises
    /// left of the rectangle. Phase 2 rescans every column whose row states
    /// changed bottom to top, stepping the column DFA over row accept-set
    /// ids; each column state change applies the precomputed accept-set
    /// differences to the per-pattern match indices.
    pub fn recompute(&mut self, rect: Rect) {
        let width = self.grid.width();
        let height = self.grid.height();
        let start_x = rect.min_x.min(width);
        let end_x = rect.max_x.min(width);
        let start_y = rect.min_y.min(height);
        let end_y = rect.max_y.min(height);
        if start_x >= end_x || start_y >= end_y {
            return;
        }
        let matcher = self.matcher.clone();
        let row_dfa = matcher.row_dfa();
        let col_dfa = matcher.col_dfa();

        let mut min_changed_x = end_x;
        for y in start_y..end_y {
            let row = y * width;
            let mut state = if end_x == width {
                0
            } else {
                self.row_states.get(row + end_x)
            };
            for x in (0..end_x).rev() {
                state = row_dfa.step_unchecked(state, self.grid.cell(row + x));
                if self.row_states.get(row + x) != state {
                    self.row_states.set(row + x, state);
                    min_changed_x = min_changed_x.min(x);
                } else if x < start_x {
                    // Re-synchronised with the memoised states left of the
                    // edit; the rest of the row is already correct.
                    break;
                }
            }
        }

        for x in min_changed_x..end_x {
            let mut state = if end_y == height {
                0
            } else {
                self.col_states.get(x + end_y * width)
            };
            for y in (0..end_y).rev() {
                let index = x + y * width;
                let letter = row_dfa.accept_set_id(self.row_states.get(index));
                state = col_dfa.step_unchecked(state, letter);
                let old = self.col_states.get(index);
                if state != old {
                    self.col_states.set(index, state);
                    let old_set = col_dfa.accept_set_id(old);
                    let new_set = col_dfa.accept_set_id(state);
                    for label in matcher.diff(old_set, new_set) {
                        self.match_indices[label.as_usize()].remove(index);
                    }
                    for label in matcher.diff(new_set, old_set) {
                        self.match_indices[label.as_usize()].insert(index);
                    }
                } else if y < start_y {
                    break;
                }
            }
        }
    }
}

impl std::fmt::Debug for MatcherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherState")
            .field("grid", &self.grid)
            .field("match_counts", &self.match_indices.iter().map(|m| m.len()).collect::<Vec<_>>())
            .finish()
    }
}
