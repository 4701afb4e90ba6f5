use std::fmt;

use tracing::{debug, trace};

use crate::pattern::{Pattern, PatternArena};
use crate::snapshot::Snapshot;

/// A scratch arena is compacted once it holds this many times the residual's size.
const GROWTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Stop as soon as the residual pattern is `Empty`. Doesn't change any result.
    pub short_circuit: bool,
    /// Scratch operands allowed before the residual is copied into a fresh arena and the old
    /// one dropped. Raised to a multiple of the residual's size when that is larger.
    pub arena_limit: usize,
}

impl Default for MatchOptions {
    fn default() -> MatchOptions {
        MatchOptions {
            short_circuit: true,
            arena_limit: 4096,
        }
    }
}

/// Tests whole inputs against a base pattern.
///
/// Derivatives are allocated in scratch arenas owned by each call to
/// [`whole_match`](Matcher::whole_match). When one fills up, only the current residual is carried
/// into the next, so memory is bounded by the residual rather than by the input. The base
/// pattern is only ever read, and a single `Matcher` may be shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'p, S = char> {
    pattern: Pattern<'p, S>,
    options: MatchOptions,
}

struct Run {
    matched: bool,
    peak_allocated: usize,
    compactions: usize,
}

enum Leg<S> {
    Done(bool),
    Full(Snapshot<S>),
}

impl<'p, S: Copy + Eq + fmt::Debug> Matcher<'p, S> {
    pub fn new(pattern: Pattern<'p, S>) -> Matcher<'p, S> {
        Matcher {
            pattern,
            options: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Matcher<'p, S> {
        self.options = options;
        self
    }

    pub fn pattern(&self) -> Pattern<'p, S> {
        self.pattern
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Does the pattern match the _entire_ input? There is no searching for a match somewhere
    /// inside it.
    pub fn whole_match<I: IntoIterator<Item = S>>(&self, input: I) -> bool {
        self.run(input).matched
    }

    fn run<I: IntoIterator<Item = S>>(&self, input: I) -> Run {
        let mut input = input.into_iter().enumerate();
        let mut carried: Option<Snapshot<S>> = None;
        let mut run = Run {
            matched: false,
            peak_allocated: 0,
            compactions: 0,
        };
        loop {
            let scratch = PatternArena::new();
            let residual = match &carried {
                None => self.pattern,
                Some(snapshot) => scratch.restore(snapshot),
            };
            let leg = self.leg(&scratch, residual, &mut input);
            run.peak_allocated = run.peak_allocated.max(scratch.allocated());
            match leg {
                Leg::Done(matched) => {
                    run.matched = matched;
                    debug!(
                        matched,
                        peak_allocated = run.peak_allocated,
                        compactions = run.compactions,
                        "whole match finished"
                    );
                    return run;
                }
                Leg::Full(snapshot) => {
                    run.compactions += 1;
                    carried = Some(snapshot);
                }
            }
        }
    }

    /// Take derivatives in `scratch` until the input runs out or the arena needs compacting.
    /// Always consumes at least one symbol before asking for compaction.
    fn leg<'s, I>(
        &self,
        scratch: &'s PatternArena<'s, S>,
        mut residual: Pattern<'s, S>,
        input: &mut I,
    ) -> Leg<S>
    where
        'p: 's,
        I: Iterator<Item = (usize, S)>,
    {
        let limit = self
            .options
            .arena_limit
            .max(GROWTH * residual.size())
            .max(scratch.allocated() + 1);
        for (step, symbol) in input {
            residual = scratch.derivative(residual, symbol);
            trace!(
                step,
                ?symbol,
                allocated = scratch.allocated(),
                accepts_empty = residual.accepts_empty(),
                "derivative"
            );
            if self.options.short_circuit && residual.is_dead() {
                debug!(step, ?symbol, "residual is empty, rejecting early");
                return Leg::Done(false);
            }
            if scratch.allocated() > limit {
                let snapshot = Snapshot::of(residual);
                debug!(
                    step,
                    allocated = scratch.allocated(),
                    kept = snapshot.len(),
                    "compacting residual"
                );
                return Leg::Full(snapshot);
            }
        }
        Leg::Done(residual.accepts_empty())
    }
}

/// Does `pattern` match the whole of `input`?
pub fn whole_match<S, I>(pattern: Pattern<'_, S>, input: I) -> bool
where
    S: Copy + Eq + fmt::Debug,
    I: IntoIterator<Item = S>,
{
    Matcher::new(pattern).whole_match(input)
}

impl<'p> Pattern<'p, char> {
    pub fn is_match(&self, input: &str) -> bool {
        whole_match(*self, input.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max_len {
            let mut next = vec![];
            for prefix in &frontier {
                for &c in alphabet {
                    let mut s = prefix.clone();
                    s.push(c);
                    next.push(s);
                }
            }
            all.extend(next.iter().cloned());
            frontier = next;
        }
        all
    }

    /// Patterns paired with an anchored `regex` crate equivalent.
    fn family<'a>(arena: &'a PatternArena<'a>) -> Vec<(Pattern<'a>, &'static str)> {
        let a = arena.symbol('a');
        let b = arena.symbol('b');
        let c = arena.symbol('c');
        let ab = arena.concat(a, b);
        let ba = arena.concat(b, a);
        let ab_or_ba_star = arena.star(arena.or(ab, ba));
        vec![
            (a, "a"),
            (ab, "ab"),
            (arena.or(ab, ba), "ab|ba"),
            (ab_or_ba_star, "(ab|ba)*"),
            (arena.concat(c, ab_or_ba_star), "c(ab|ba)*"),
            (arena.or(ab, arena.star(c)), "ab|c*"),
            (arena.concat(a, arena.star(b)), "ab*"),
            (arena.star(arena.star(arena.or(a, arena.concat(b, c)))), "(a|bc)*"),
            (
                arena.concat(arena.star(arena.or(a, b)), arena.concat(a, arena.or(a, b))),
                "(a|b)*a(a|b)",
            ),
        ]
    }

    #[test]
    fn ab() {
        let arena = PatternArena::new();
        let ab = arena.concat(arena.symbol('a'), arena.symbol('b'));

        assert!(ab.is_match("ab"));
        assert!(!ab.is_match(""));
        assert!(!ab.is_match("a"));
        assert!(!ab.is_match("ba"));
        assert!(!ab.is_match("abb"));
    }

    #[test]
    fn ab_or_ba_star() {
        let arena = PatternArena::new();
        let a = arena.symbol('a');
        let b = arena.symbol('b');
        let ab_or_ba = arena.or(arena.concat(a, b), arena.concat(b, a));
        let pattern = arena.star(ab_or_ba);

        assert!(!ab_or_ba.is_match(""));
        assert!(ab_or_ba.is_match("ab"));
        assert!(ab_or_ba.is_match("ba"));
        assert!(!ab_or_ba.is_match("aa"));

        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("a"));
        assert!(!pattern.is_match("b"));
        assert!(pattern.is_match("abab"));
        assert!(pattern.is_match("abba"));
        assert!(pattern.is_match("baab"));
        assert!(pattern.is_match("baba"));
        assert!(!pattern.is_match("aaaa"));
        assert!(!pattern.is_match("bbbb"));

        let c_pattern = arena.concat(arena.symbol('c'), pattern);
        assert!(c_pattern.is_match("c"));
        assert!(!c_pattern.is_match("a"));
        assert!(!c_pattern.is_match("ab"));
        assert!(!c_pattern.is_match("bc"));
        assert!(!c_pattern.is_match("ca"));
        assert!(c_pattern.is_match("cab"));
    }

    #[test]
    fn non_ascii_symbols() {
        let arena = PatternArena::new();
        let ora = arena.star(arena.concat(arena.symbol('オ'), arena.symbol('ラ')));

        assert!(ora.is_match("オラオラオラオラオラオラオラオラ"));
        assert!(!ora.is_match("オラオ"));
    }

    #[test]
    fn byte_symbols() {
        let arena = PatternArena::new();
        let digit = arena.or(arena.symbol(b'0'), arena.symbol(b'1'));
        let number = arena.concat(arena.symbol(b'1'), arena.star(digit));

        assert!(whole_match(number, b"1".iter().copied()));
        assert!(whole_match(number, b"10110".iter().copied()));
        assert!(!whole_match(number, b"0110".iter().copied()));
        assert!(!whole_match(number, Vec::new()));
    }

    #[test]
    fn empty_input_checks_epsilon() {
        let arena = PatternArena::new();
        for (pattern, _) in family(&arena) {
            assert_eq!(pattern.is_match(""), pattern.accepts_empty());
        }
        assert!(!arena.empty().is_match(""));
        assert!(arena.epsilon().is_match(""));
        assert!(arena.star(arena.empty()).is_match(""));
    }

    #[test]
    fn agrees_with_regex_crate() {
        let arena = PatternArena::new();
        let inputs = strings(&['a', 'b', 'c'], 6);
        for (pattern, source) in family(&arena) {
            let regex = regex::Regex::new(&format!("^(?:{})$", source)).unwrap();
            for input in &inputs {
                assert_eq!(
                    pattern.is_match(input),
                    regex.is_match(input),
                    "pattern {} on {:?}",
                    source,
                    input
                );
            }
        }
    }

    #[test]
    fn derivative_coherence() {
        let arena = PatternArena::new();
        let scratch = PatternArena::new();
        let inputs = strings(&['a', 'b', 'c'], 4);
        for (pattern, _) in family(&arena) {
            for &c in &['a', 'b', 'c'] {
                let residual = scratch.derivative(pattern, c);
                for input in &inputs {
                    let prefixed = format!("{}{}", c, input);
                    assert_eq!(pattern.is_match(&prefixed), residual.is_match(input));
                }
            }
        }
    }

    #[test]
    fn short_circuit_is_unobservable() {
        let arena = PatternArena::new();
        let inputs = strings(&['a', 'b', 'c'], 5);
        let eager = MatchOptions::default();
        let patient = MatchOptions {
            short_circuit: false,
            ..MatchOptions::default()
        };
        for (pattern, _) in family(&arena) {
            let eager = Matcher::new(pattern).with_options(eager);
            let patient = Matcher::new(pattern).with_options(patient);
            for input in &inputs {
                assert_eq!(
                    eager.whole_match(input.chars()),
                    patient.whole_match(input.chars())
                );
            }
        }
    }

    #[test]
    fn long_input_runs_in_bounded_memory() {
        let arena = PatternArena::new();
        let a = arena.symbol('a');
        let b = arena.symbol('b');
        let matcher = Matcher::new(arena.star(arena.or(arena.concat(a, b), arena.concat(b, a))));
        let limit = matcher.options().arena_limit;

        let short = matcher.run("ab".repeat(1_000).chars());
        let long = matcher.run("ab".repeat(200_000).chars());
        assert!(short.matched && long.matched);
        assert!(long.compactions > 0);
        assert!(long.peak_allocated <= limit + 8, "{}", long.peak_allocated);
        assert!(long.peak_allocated <= short.peak_allocated.max(limit) + 8);

        let odd = matcher.run("ab".repeat(200_000).chars().chain(Some('a')));
        assert!(!odd.matched);
        assert!(odd.peak_allocated <= limit + 8);
    }

    #[test]
    fn compaction_is_unobservable() {
        let arena = PatternArena::new();
        let inputs = strings(&['a', 'b', 'c'], 5);
        let cramped = MatchOptions {
            short_circuit: false,
            arena_limit: 0,
        };
        for (pattern, _) in family(&arena) {
            let roomy = Matcher::new(pattern);
            let cramped = Matcher::new(pattern).with_options(cramped);
            assert_eq!(cramped.pattern(), roomy.pattern());
            assert_eq!(cramped.options().arena_limit, 0);
            for input in &inputs {
                assert_eq!(
                    cramped.whole_match(input.chars()),
                    roomy.whole_match(input.chars()),
                    "{:?}",
                    input
                );
            }
        }

        let a = arena.symbol('a');
        let b = arena.symbol('b');
        let ends_in_a = Matcher::new(arena.concat(arena.star(arena.or(a, b)), a))
            .with_options(cramped);
        let input = "ab".repeat(5_000) + "a";
        assert!(ends_in_a.whole_match(input.chars()));
        assert!(ends_in_a.run(input.chars()).compactions > 0);
    }

    #[test]
    fn shared_between_threads() {
        let arena = PatternArena::new();
        let a = arena.symbol('a');
        let b = arena.symbol('b');
        let matcher = Matcher::new(arena.star(arena.or(arena.concat(a, b), arena.concat(b, a))));

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|n| scope.spawn(move || matcher.whole_match("ab".repeat(n * 100).chars())))
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
        assert!(!matcher.whole_match("aab".chars()));
    }
}
