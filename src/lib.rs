#![forbid(missing_docs)]
//! # `gridrex`
//! The `gridrex` crate is an incremental two-dimensional pattern matching
//! engine. Given a fixed alphabet of symbols, a catalogue of rectangular
//! patterns (possibly containing wildcards), and a mutable 2D grid of
//! symbols, it continuously maintains the set of positions at which each
//! pattern matches. Every grid edit updates the match sets in time
//! proportional to the edited area (padded by the largest pattern dimension)
//! plus the number of matches created or destroyed, never to the grid size.
//!
//! The engine compiles the catalogue into two minimised DFAs. A row DFA reads
//! grid symbols right to left and reports which pattern rows start at each
//! cell; a column DFA reads those reports bottom to top and reports which
//! patterns have their top-left corner at each cell. Per-cell DFA states are
//! memoised, so an edit only rescans until the automata re-synchronise, and
//! a per-pattern index supports O(1) match counting and uniform sampling.
//! This is the matching core of grid rewriting systems, which repeatedly pick
//! a random match of some pattern and stamp a replacement over it.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//!
//! use gridrex::MatcherBuilder;
//!
//! fn main() -> gridrex::Result<()> {
//!     let matcher = MatcherBuilder::new()
//!         .alphabet("BW")
//!         .add_patterns(["WW/WW", "B"])
//!         .build()?;
//!     let mut state = Arc::new(matcher).make_state(3, 3);
//!
//!     // The grid starts with every cell holding symbol 0, here 'B'.
//!     assert_eq!(state.count_matches(1)?, 9);
//!     assert_eq!(state.count_matches(0)?, 0);
//!
//!     // Fill the grid with 'W': every 2x2 placement of the square matches.
//!     let w = state.matcher().alphabet().id('W')?;
//!     for y in 0..3 {
//!         for x in 0..3 {
//!             state.set(x, y, w)?;
//!         }
//!     }
//!     assert_eq!(state.count_matches(0)?, 4);
//!     assert_eq!(state.count_matches(1)?, 0);
//!
//!     // Breaking one corner destroys exactly the square match there.
//!     let b = state.matcher().alphabet().id('B')?;
//!     state.set(2, 2, b)?;
//!     assert_eq!(state.count_matches(0)?, 3);
//!     assert!(state.random_match(0)?.is_some());
//!     Ok(())
//! }
//! ```

/// Module with the symbol alphabet type.
mod alphabet;
pub use alphabet::Alphabet;

/// Module with error definitions.
mod errors;
pub use errors::{GridrexError, GridrexErrorKind, Result};

/// Module with the grid and its change notifications.
mod grid;
pub use grid::{ChangeListener, Grid, Rect};

/// The module with internal implementation details.
mod internal;

/// The module with the compiled pattern matcher.
mod matcher;
pub use matcher::PatternMatcher;

/// The module with the matcher builder.
mod matcher_builder;
pub use matcher_builder::MatcherBuilder;

/// The module with the per-grid matcher state.
mod matcher_state;
pub use matcher_state::MatcherState;

/// Module with the pattern type and its symmetry operators.
mod pattern;
pub use pattern::Pattern;
