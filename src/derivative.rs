use crate::pattern::{Contents, Pattern, PatternArena};

impl<'a, S: Copy + Eq> PatternArena<'a, S> {
    /// The pattern matching `w` exactly when `pattern` matches `symbol` followed by `w`.
    ///
    /// Every compound result goes through [`simplify_or`](PatternArena::simplify_or) and
    /// [`simplify_concat`](PatternArena::simplify_concat), which keeps repeated derivatives of
    /// `Or`- and `Star`-heavy patterns from growing without bound.
    pub fn derivative(&'a self, pattern: Pattern<'a, S>, symbol: S) -> Pattern<'a, S> {
        use Contents::*;

        match *pattern.contents() {
            Symbol(s) if s == symbol => self.epsilon(),
            Symbol(_) | Epsilon | Empty => self.empty(),
            Concat(x, y) => {
                let within_x = self.simplify_concat(self.derivative(*x, symbol), *y);
                let head = self.delta(*x);
                // ∅·r = ∅ and r|∅ = r, so the second branch can only matter when x is nullable.
                if head.is_dead() {
                    within_x
                } else {
                    let within_y = self.simplify_concat(head, self.derivative(*y, symbol));
                    self.simplify_or(within_x, within_y)
                }
            }
            Or(x, y) => self.simplify_or(self.derivative(*x, symbol), self.derivative(*y, symbol)),
            Star(x) => self.simplify_concat(self.derivative(*x, symbol), pattern),
        }
    }

    /// `x|y`, rewritten by `r|r = r` and `r|∅ = ∅|r = r`. Single level only.
    pub fn simplify_or(&'a self, x: Pattern<'a, S>, y: Pattern<'a, S>) -> Pattern<'a, S> {
        if x == y {
            x
        } else if x.is_dead() {
            y
        } else if y.is_dead() {
            x
        } else {
            self.or(x, y)
        }
    }

    /// `x·y`, rewritten by `ε·r = r·ε = r` and `∅·r = r·∅ = ∅`. Single level only.
    pub fn simplify_concat(&'a self, x: Pattern<'a, S>, y: Pattern<'a, S>) -> Pattern<'a, S> {
        use Contents::*;

        match (x.contents(), y.contents()) {
            (Epsilon, _) => y,
            (Empty, _) => x,
            (_, Epsilon) => x,
            (_, Empty) => y,
            (_, _) => self.concat(x, y),
        }
    }
}
