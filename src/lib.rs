//! Whole-string regular expression matching by Brzozowski derivatives.
//!
//! There is no automaton. Matching takes the derivative of the pattern by each input symbol in
//! turn, giving a new pattern for "what's left to match", and accepts iff the final pattern
//! matches the empty sequence.
//!
//! ```
//! use pattern_deriv::PatternArena;
//!
//! let arena = PatternArena::new();
//! let a = arena.symbol('a');
//! let b = arena.symbol('b');
//! let ab_or_ba = arena.or(arena.concat(a, b), arena.concat(b, a));
//! let pattern = arena.star(ab_or_ba);
//!
//! assert!(pattern.is_match("abba"));
//! assert!(!pattern.is_match("aaaa"));
//! ```

mod combinators;
mod derivative;
mod dump;
mod error;
mod matcher;
mod pattern;
mod snapshot;

pub use combinators::Builder;
pub use dump::Tree;
pub use error::BuildError;
pub use matcher::{whole_match, MatchOptions, Matcher};
pub use pattern::{Contents, Pattern, PatternArena};
