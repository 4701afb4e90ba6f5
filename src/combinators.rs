//! Combinators for assembling patterns without writing out the tree by hand.
//!
//! Everything here is built from the _raw_ constructors on [`PatternArena`], so the resulting
//! trees have exactly the shape described on each function. Simplification only happens later,
//! while taking derivatives.
//!
//! ```
//! use pattern_deriv::PatternArena;
//!
//! let arena = PatternArena::new();
//! let conference = arena
//!     .builder()
//!     .literal("iOS")
//!     .optionally(|dc| dc.literal("DC"))
//!     .build();
//!
//! assert!(conference.is_match("iOS"));
//! assert!(conference.is_match("iOSDC"));
//! assert!(!conference.is_match("WWDC"));
//! ```

use std::iter;
use std::ops::RangeInclusive;

use crate::error::BuildError;
use crate::pattern::{Pattern, PatternArena};

/*************/
/* Functions */
/*************/

impl<'a, S: Copy> PatternArena<'a, S> {
    /// Concatenate `parts` in order, nesting to the right. No parts gives `Epsilon`, and a single
    /// part is returned as is.
    pub fn sequence<I>(&'a self, parts: I) -> Pattern<'a, S>
    where
        I: IntoIterator<Item = Pattern<'a, S>>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut parts = parts.into_iter().rev();
        match parts.next() {
            None => self.epsilon(),
            Some(last) => parts.fold(last, |rest, part| self.concat(part, rest)),
        }
    }

    /// Match `symbols` one after the other.
    pub fn symbols<I>(&'a self, symbols: I) -> Pattern<'a, S>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.sequence(symbols.into_iter().map(|s| self.symbol(s)))
    }

    /// Either `pattern` or nothing: `ε|pattern`.
    pub fn optional(&'a self, pattern: Pattern<'a, S>) -> Pattern<'a, S> {
        self.or(self.epsilon(), pattern)
    }

    pub fn zero_or_more(&'a self, pattern: Pattern<'a, S>) -> Pattern<'a, S> {
        self.star(pattern)
    }

    /// `pattern pattern*`
    pub fn one_or_more(&'a self, pattern: Pattern<'a, S>) -> Pattern<'a, S> {
        self.concat(pattern, self.star(pattern))
    }

    /// Exactly `count` copies of `pattern`.
    pub fn repeat(&'a self, pattern: Pattern<'a, S>, count: usize) -> Pattern<'a, S> {
        self.sequence(iter::repeat(pattern).take(count).collect::<Vec<_>>())
    }

    /// Between `min` and `max` copies of `pattern`, inclusive, as
    /// `pattern{min} | (pattern{min+1} | ... (pattern{max} | ∅))`.
    pub fn try_repeat_range(
        &'a self,
        pattern: Pattern<'a, S>,
        range: RangeInclusive<usize>,
    ) -> Result<Pattern<'a, S>, BuildError> {
        let (min, max) = (*range.start(), *range.end());
        if min > max {
            return Err(BuildError::InvertedRange { min, max });
        }
        Ok(range
            .rev()
            .fold(self.empty(), |rest, count| self.or(self.repeat(pattern, count), rest)))
    }

    /// Like [`try_repeat_range`](PatternArena::try_repeat_range), but an inverted range is a bug
    /// in the caller.
    ///
    /// # Panics
    ///
    /// If `range.start() > range.end()`.
    pub fn repeat_range(
        &'a self,
        pattern: Pattern<'a, S>,
        range: RangeInclusive<usize>,
    ) -> Pattern<'a, S> {
        match self.try_repeat_range(pattern, range) {
            Ok(pattern) => pattern,
            Err(err) => panic!("{}", err),
        }
    }

    /// Any one of `alternatives`, nesting to the right. No alternatives gives `Empty`.
    pub fn choice_of<I>(&'a self, alternatives: I) -> Pattern<'a, S>
    where
        I: IntoIterator<Item = Pattern<'a, S>>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut alternatives = alternatives.into_iter().rev();
        match alternatives.next() {
            None => self.empty(),
            Some(last) => alternatives.fold(last, |rest, alt| self.or(alt, rest)),
        }
    }

    pub fn builder(&'a self) -> Builder<'a, S> {
        Builder::new(self)
    }
}

impl<'a> PatternArena<'a, char> {
    /// Match `text` exactly. The empty string gives `Epsilon`.
    pub fn literal(&'a self, text: &str) -> Pattern<'a, char> {
        self.symbols(text.chars())
    }
}

/***********/
/* Builder */
/***********/

/// Collects the parts of a pattern in order and concatenates them on [`build`](Builder::build).
///
/// Nested blocks (`optionally`, `zero_or_more`, ...) are given a fresh builder and their result
/// becomes a single part of the enclosing one.
pub struct Builder<'a, S = char> {
    arena: &'a PatternArena<'a, S>,
    parts: Vec<Pattern<'a, S>>,
}

impl<'a, S: Copy> Builder<'a, S> {
    pub fn new(arena: &'a PatternArena<'a, S>) -> Builder<'a, S> {
        Builder {
            arena,
            parts: vec![],
        }
    }

    pub fn then(mut self, pattern: Pattern<'a, S>) -> Builder<'a, S> {
        self.parts.push(pattern);
        self
    }

    pub fn symbol(self, symbol: S) -> Builder<'a, S> {
        let pattern = self.arena.symbol(symbol);
        self.then(pattern)
    }

    pub fn optionally<F>(self, block: F) -> Builder<'a, S>
    where
        F: FnOnce(Builder<'a, S>) -> Builder<'a, S>,
    {
        let pattern = self.arena.optional(self.nested(block));
        self.then(pattern)
    }

    pub fn zero_or_more<F>(self, block: F) -> Builder<'a, S>
    where
        F: FnOnce(Builder<'a, S>) -> Builder<'a, S>,
    {
        let pattern = self.arena.zero_or_more(self.nested(block));
        self.then(pattern)
    }

    pub fn one_or_more<F>(self, block: F) -> Builder<'a, S>
    where
        F: FnOnce(Builder<'a, S>) -> Builder<'a, S>,
    {
        let pattern = self.arena.one_or_more(self.nested(block));
        self.then(pattern)
    }

    pub fn repeat<F>(self, count: usize, block: F) -> Builder<'a, S>
    where
        F: FnOnce(Builder<'a, S>) -> Builder<'a, S>,
    {
        let pattern = self.arena.repeat(self.nested(block), count);
        self.then(pattern)
    }

    /// # Panics
    ///
    /// If `range.start() > range.end()`.
    pub fn repeat_range<F>(self, range: RangeInclusive<usize>, block: F) -> Builder<'a, S>
    where
        F: FnOnce(Builder<'a, S>) -> Builder<'a, S>,
    {
        let pattern = self.arena.repeat_range(self.nested(block), range);
        self.then(pattern)
    }

    pub fn choice_of<I>(self, alternatives: I) -> Builder<'a, S>
    where
        I: IntoIterator<Item = Pattern<'a, S>>,
        I::IntoIter: DoubleEndedIterator,
    {
        let pattern = self.arena.choice_of(alternatives);
        self.then(pattern)
    }

    pub fn build(self) -> Pattern<'a, S> {
        self.arena.sequence(self.parts)
    }

    fn nested<F>(&self, block: F) -> Pattern<'a, S>
    where
        F: FnOnce(Builder<'a, S>) -> Builder<'a, S>,
    {
        block(Builder::new(self.arena)).build()
    }
}

impl<'a> Builder<'a, char> {
    pub fn literal(self, text: &str) -> Builder<'a, char> {
        let pattern = self.arena.literal(text);
        self.then(pattern)
    }
}
