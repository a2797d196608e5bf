//! Ordered bracket tables shared by every threshold lookup.
//!
//! A table is a list of `(upper_bound, payload)` pairs in ascending bound
//! order plus an overflow payload for values past the last bound. Lookup
//! walks the list once and returns the first bracket the value falls
//! under, so each set of boundaries lives in exactly one place.

/// How a value lying exactly on an upper bound is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `value < upper`: a boundary value belongs to the next bracket up.
    Exclusive,
    /// `value <= upper`: a boundary value stays in the lower bracket.
    Inclusive,
}

impl Edge {
    fn below(self, value: f64, upper: f64) -> bool {
        match self {
            Self::Exclusive => value < upper,
            Self::Inclusive => value <= upper,
        }
    }
}

/// Step function from a scalar to a fixed payload.
#[derive(Debug)]
pub struct BracketTable<T: 'static> {
    brackets: &'static [(f64, T)],
    overflow: T,
    edge: Edge,
}

impl<T: 'static> BracketTable<T> {
    /// Table whose boundary values fall into the higher bracket.
    pub const fn new(brackets: &'static [(f64, T)], overflow: T) -> Self {
        Self {
            brackets,
            overflow,
            edge: Edge::Exclusive,
        }
    }

    /// Table whose boundary values stay in the lower bracket.
    pub const fn upper_inclusive(brackets: &'static [(f64, T)], overflow: T) -> Self {
        Self {
            brackets,
            overflow,
            edge: Edge::Inclusive,
        }
    }

    pub fn lookup(&self, value: f64) -> &T {
        self.brackets
            .iter()
            .find(|(upper, _)| self.edge.below(value, *upper))
            .map(|(_, payload)| payload)
            .unwrap_or(&self.overflow)
    }

    /// Upper bounds in table order.
    pub fn bounds(&self) -> impl Iterator<Item = f64> + '_ {
        self.brackets.iter().map(|(upper, _)| *upper)
    }

    /// Number of brackets, overflow included.
    pub fn len(&self) -> usize {
        self.brackets.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Whether the bounds are strictly ascending.
    pub fn is_ordered(&self) -> bool {
        self.brackets.windows(2).all(|pair| pair[0].0 < pair[1].0)
    }
}
