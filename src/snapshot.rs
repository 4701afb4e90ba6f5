use crate::pattern::{Contents, Pattern, PatternArena};

/// A pattern copied out of its arena, in prefix order, so the arena can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot<S>(Vec<Op<S>>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op<S> {
    Symbol(S),
    Epsilon,
    Empty,
    Concat,
    Or,
    Star,
}

impl<S: Copy> Snapshot<S> {
    pub(crate) fn of(pattern: Pattern<'_, S>) -> Snapshot<S> {
        let mut ops = Vec::with_capacity(pattern.size());
        write_ops(&mut ops, &pattern);
        Snapshot(ops)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

fn write_ops<S: Copy>(ops: &mut Vec<Op<S>>, pattern: &Pattern<'_, S>) {
    use Contents::*;

    match *pattern.contents() {
        Symbol(s) => ops.push(Op::Symbol(s)),
        Epsilon => ops.push(Op::Epsilon),
        Empty => ops.push(Op::Empty),
        Concat(x, y) => {
            ops.push(Op::Concat);
            write_ops(ops, x);
            write_ops(ops, y);
        }
        Or(x, y) => {
            ops.push(Op::Or);
            write_ops(ops, x);
            write_ops(ops, y);
        }
        Star(x) => {
            ops.push(Op::Star);
            write_ops(ops, x);
        }
    }
}

impl<'a, S: Copy> PatternArena<'a, S> {
    /// Rebuild a snapshot here with the raw constructors. The result is structurally equal to
    /// the pattern the snapshot was taken of.
    pub(crate) fn restore(&'a self, snapshot: &Snapshot<S>) -> Pattern<'a, S> {
        let mut next = 0;
        self.read_ops(&snapshot.0, &mut next)
    }

    fn read_ops(&'a self, ops: &[Op<S>], next: &mut usize) -> Pattern<'a, S> {
        let op = ops[*next];
        *next += 1;
        match op {
            Op::Symbol(s) => self.symbol(s),
            Op::Epsilon => self.epsilon(),
            Op::Empty => self.empty(),
            Op::Concat => {
                let x = self.read_ops(ops, next);
                let y = self.read_ops(ops, next);
                self.concat(x, y)
            }
            Op::Or => {
                let x = self.read_ops(ops, next);
                let y = self.read_ops(ops, next);
                self.or(x, y)
            }
            Op::Star => {
                let x = self.read_ops(ops, next);
                self.star(x)
            }
        }
    }
}
