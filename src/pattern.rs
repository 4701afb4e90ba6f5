use typed_arena::Arena;

/// Owns the nodes of every pattern built from it.
///
/// Patterns are `Copy` handles; their operands are allocated here and borrowed for `'a`. Nothing
/// in the arena is ever mutated after allocation.
pub struct PatternArena<'a, S = char>(Arena<Pattern<'a, S>>);

/// A pattern over symbols of type `S`. Equality and hashing are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern<'a, S = char> {
    nullable: bool,
    contents: Contents<'a, S>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contents<'a, S = char> {
    Symbol(S),
    Epsilon,
    Empty,
    Concat(&'a Pattern<'a, S>, &'a Pattern<'a, S>),
    Or(&'a Pattern<'a, S>, &'a Pattern<'a, S>),
    Star(&'a Pattern<'a, S>),
}

impl<'a, S> Pattern<'a, S> {
    /// Does this pattern match the empty sequence?
    pub fn accepts_empty(&self) -> bool {
        self.nullable
    }

    pub fn contents(&self) -> &Contents<'a, S> {
        &self.contents
    }

    /// Is this the empty language? `Empty` stays `Empty` under every derivative.
    pub fn is_dead(&self) -> bool {
        matches!(self.contents, Contents::Empty)
    }

    /// Number of nodes in the tree as if it were unshared. Derivatives share operands, so this
    /// can exceed the number of nodes actually allocated, and it walks every one of them.
    pub fn size(&self) -> usize {
        use Contents::*;

        match self.contents {
            Symbol(_) | Epsilon | Empty => 1,
            Concat(x, y) | Or(x, y) => 1 + x.size() + y.size(),
            Star(x) => 1 + x.size(),
        }
    }
}

impl<'a, S> Contents<'a, S> {
    fn accepts_empty(&self) -> bool {
        use Contents::*;

        match self {
            Symbol(_) => false,
            Epsilon => true,
            Empty => false,
            Concat(x, y) => x.nullable && y.nullable,
            Or(x, y) => x.nullable || y.nullable,
            Star(_) => true,
        }
    }
}

impl<'a, S> From<Contents<'a, S>> for Pattern<'a, S> {
    fn from(contents: Contents<'a, S>) -> Pattern<'a, S> {
        Pattern {
            nullable: contents.accepts_empty(),
            contents,
        }
    }
}

impl<'a, S> Default for PatternArena<'a, S> {
    fn default() -> PatternArena<'a, S> {
        PatternArena::new()
    }
}

impl<'a, S> PatternArena<'a, S> {
    pub fn new() -> PatternArena<'a, S> {
        PatternArena(Arena::new())
    }

    /// Number of operands allocated so far. Leaves stored inline in a handle aren't counted.
    pub fn allocated(&self) -> usize {
        self.0.len()
    }

    pub fn symbol(&self, symbol: S) -> Pattern<'a, S> {
        Contents::Symbol(symbol).into()
    }

    pub fn epsilon(&self) -> Pattern<'a, S> {
        Contents::Epsilon.into()
    }

    pub fn empty(&self) -> Pattern<'a, S> {
        Contents::Empty.into()
    }

    pub fn concat(&'a self, x: Pattern<'a, S>, y: Pattern<'a, S>) -> Pattern<'a, S> {
        let x = self.0.alloc(x);
        let y = self.0.alloc(y);
        Contents::Concat(x, y).into()
    }

    pub fn or(&'a self, x: Pattern<'a, S>, y: Pattern<'a, S>) -> Pattern<'a, S> {
        let x = self.0.alloc(x);
        let y = self.0.alloc(y);
        Contents::Or(x, y).into()
    }

    pub fn star(&'a self, x: Pattern<'a, S>) -> Pattern<'a, S> {
        let x = self.0.alloc(x);
        Contents::Star(x).into()
    }

    /// `Epsilon` if `pattern` accepts the empty sequence, `Empty` otherwise.
    pub fn delta(&self, pattern: Pattern<'a, S>) -> Pattern<'a, S> {
        if pattern.accepts_empty() {
            self.epsilon()
        } else {
            self.empty()
        }
    }
}
