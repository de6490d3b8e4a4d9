//! Module with the mutable symbol grid and its change notifications.

use serde::{Deserialize, Serialize};

use crate::internal::StateVec;
use crate::{Alphabet, GridrexError, Pattern, Result};

/// An axis-aligned rectangle of grid cells, `min` inclusive, `max` exclusive.
/// x is the column (0 = leftmost), y is the row (0 = topmost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// The leftmost column.
    pub min_x: usize,
    /// The topmost row.
    pub min_y: usize,
    /// One past the rightmost column.
    pub max_x: usize,
    /// One past the bottommost row.
    pub max_y: usize,
}

impl Rect {
    /// Create a rectangle.
    pub fn new(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The 1x1 rectangle covering a single cell.
    pub fn cell(x: usize, y: usize) -> Self {
        Rect::new(x, y, x + 1, y + 1)
    }

    /// Grow the rectangle to cover the given cell.
    fn cover(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x + 1);
        self.max_y = self.max_y.max(y + 1);
    }
}

/// A listener invoked with the edited rectangle after cells change, before
/// the matcher state is recomputed.
pub type ChangeListener = Box<dyn FnMut(Rect)>;

/// A mutable 2D grid of symbol ids.
///
/// The grid is owned by a [crate::MatcherState]; all edits go through the
/// state so that match indices stay consistent. The reported rectangle of a
/// pattern write is some rectangle covering all cells whose value actually
/// changed, not necessarily the pattern's full bounding box.
pub struct Grid {
    width: usize,
    height: usize,
    alphabet_len: usize,
    cells: StateVec,
    listeners: Vec<ChangeListener>,
}

impl Grid {
    /// Create a grid with every cell holding symbol id 0.
    pub(crate) fn new(width: usize, height: usize, alphabet_len: usize) -> Self {
        Grid {
            width,
            height,
            alphabet_len,
            cells: StateVec::zeroed(alphabet_len.saturating_sub(1), width * height),
            listeners: Vec::new(),
        }
    }

    /// The grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The symbol id at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(GridrexError::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.cells.get(x + y * self.width))
    }

    /// The symbol id at the given linear index. Callers guarantee the index
    /// is in range.
    #[inline]
    pub(crate) fn cell(&self, index: usize) -> usize {
        self.cells.get(index)
    }

    /// Register a change listener. Listeners see the edited rectangle before
    /// the matcher state catches up, so they must not query match indices
    /// from within the callback.
    pub fn listen(&mut self, listener: impl FnMut(Rect) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, rect: Rect) {
        for listener in &mut self.listeners {
            listener(rect);
        }
    }

    /// Write one cell and notify listeners with its 1x1 rectangle.
    pub(crate) fn set(&mut self, x: usize, y: usize, symbol: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(GridrexError::out_of_bounds(x, y, self.width, self.height));
        }
        if symbol >= self.alphabet_len {
            return Err(GridrexError::unknown_key(format!("symbol id {}", symbol)));
        }
        self.cells.set(x + y * self.width, symbol);
        self.notify(Rect::cell(x, y));
        Ok(())
    }

    /// Write the non-wildcard cells of a pattern with its top-left corner at
    /// (x, y). Wildcard cells are a no-op. Returns the tight rectangle of
    /// cells whose value changed (and notifies listeners with it), or None
    /// when the write was a no-op. The grid is left unmodified on error.
    pub(crate) fn put_pattern(
        &mut self,
        x: usize,
        y: usize,
        pattern: &Pattern,
        alphabet: &Alphabet,
    ) -> Result<Option<Rect>> {
        if x + pattern.width() > self.width || y + pattern.height() > self.height {
            return Err(GridrexError::out_of_bounds(
                x + pattern.width() - 1,
                y + pattern.height() - 1,
                self.width,
                self.height,
            ));
        }
        // Resolve the whole write plan up front so an unknown symbol cannot
        // leave a partial write behind.
        let mut writes = Vec::new();
        for (dx, dy, symbol) in pattern.write_plan() {
            writes.push((x + dx, y + dy, alphabet.id(symbol)?));
        }
        let mut dirty: Option<Rect> = None;
        for (cell_x, cell_y, symbol) in writes {
            let index = cell_x + cell_y * self.width;
            if self.cells.get(index) == symbol {
                continue;
            }
            self.cells.set(index, symbol);
            match &mut dirty {
                Some(rect) => rect.cover(cell_x, cell_y),
                None => dirty = Some(Rect::cell(cell_x, cell_y)),
            }
        }
        if let Some(rect) = dirty {
            self.notify(rect);
        }
        Ok(dirty)
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cells", &self.cells)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
