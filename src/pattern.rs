//! Module with the rectangular pattern type and its symmetry operators.

use serde::{Deserialize, Serialize};

use crate::{GridrexError, GridrexErrorKind, Rect, Result};

/// A rectangular pattern over symbol characters, possibly with wildcards.
///
/// The string form separates rows with `/` and marks wildcard cells with `*`;
/// all rows must have the same length. Patterns are alphabet-independent:
/// their characters are resolved to dense symbol ids when a
/// [crate::PatternMatcher] is built.
///
/// Patterns are immutable; the symmetry operators return new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    width: usize,
    height: usize,
    /// Row-major cells; None is the wildcard.
    cells: Vec<Option<char>>,
}

impl Pattern {
    /// Parse a pattern from its string form, e.g. `"RBB"` or `"W*/WW"`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut width = 0;
        let mut height = 0;
        let mut cells = Vec::new();
        for row in text.split('/') {
            let row_cells: Vec<Option<char>> = row
                .chars()
                .map(|symbol| if symbol == '*' { None } else { Some(symbol) })
                .collect();
            if height == 0 {
                width = row_cells.len();
            } else if row_cells.len() != width {
                return Err(GridrexError::new(GridrexErrorKind::MalformedPattern(
                    format!("rows of '{}' differ in length", text),
                )));
            }
            height += 1;
            cells.extend(row_cells);
        }
        if width == 0 {
            return Err(GridrexError::new(GridrexErrorKind::MalformedPattern(
                format!("empty row in '{}'", text),
            )));
        }
        Ok(Pattern {
            width,
            height,
            cells,
        })
    }

    /// The pattern width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The pattern height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at (x, y): the symbol character, or None for a wildcard.
    ///
    /// Panics if the coordinate is outside the pattern.
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        assert!(x < self.width && y < self.height);
        self.cells[x + y * self.width]
    }

    /// The non-wildcard cells as (x, y, symbol) triples, row-major.
    /// This is the write plan of [crate::MatcherState::put_pattern].
    pub fn write_plan(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.map(|symbol| (index % self.width, index / self.width, symbol))
        })
    }

    /// The bounding box of the non-wildcard cells. Collapses to the single
    /// point (0, 0) when the pattern is all wildcards.
    pub fn bounding_box(&self) -> Rect {
        let mut non_wildcards = self.write_plan().map(|(x, y, _)| (x, y));
        let Some((first_x, first_y)) = non_wildcards.next() else {
            return Rect::new(0, 0, 1, 1);
        };
        let mut bounds = Rect::new(first_x, first_y, first_x + 1, first_y + 1);
        for (x, y) in non_wildcards {
            bounds.min_x = bounds.min_x.min(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_x = bounds.max_x.max(x + 1);
            bounds.max_y = bounds.max_y.max(y + 1);
        }
        bounds
    }

    /// The canonical key of the pattern: its string form. Two patterns are
    /// the same catalogue entry iff their keys are equal.
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(self.cells.len() + self.height - 1);
        for y in 0..self.height {
            if y > 0 {
                key.push('/');
            }
            for x in 0..self.width {
                key.push(self.cell(x, y).unwrap_or('*'));
            }
        }
        key
    }

    /// The key of a single row, a width x 1 pattern in string form.
    pub(crate) fn row_key(&self, y: usize) -> String {
        (0..self.width)
            .map(|x| self.cell(x, y).unwrap_or('*'))
            .collect()
    }

    /// The pattern rotated 90 degrees clockwise.
    pub fn rotated(&self) -> Self {
        let width = self.height;
        let height = self.width;
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..height {
            for x in 0..width {
                cells.push(self.cell(y, self.height - 1 - x));
            }
        }
        Pattern {
            width,
            height,
            cells,
        }
    }

    /// The pattern mirrored horizontally.
    pub fn mirrored(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                cells.push(self.cell(self.width - 1 - x, y));
            }
        }
        Pattern {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// The distinct elements of the pattern's dihedral symmetry group: the
    /// four rotations and their mirror images, deduplicated by key, starting
    /// with the pattern itself.
    pub fn symmetries(&self) -> Vec<Pattern> {
        let mut variants: Vec<Pattern> = Vec::with_capacity(8);
        let mut keys: Vec<String> = Vec::with_capacity(8);
        let mut current = self.clone();
        for _ in 0..4 {
            for variant in [current.clone(), current.mirrored()] {
                let key = variant.key();
                if !keys.contains(&key) {
                    keys.push(key);
                    variants.push(variant);
                }
            }
            current = current.rotated();
        }
        variants
    }
}

impl TryFrom<String> for Pattern {
    type Error = GridrexError;

    fn try_from(text: String) -> Result<Self> {
        Pattern::parse(&text)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.key()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
