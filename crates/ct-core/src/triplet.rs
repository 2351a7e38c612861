//! A generic immutable three-value tuple with named accessors.

/// Three values `A`, `B`, `C`, readable but not mutable after construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triplet<A, B, C> {
    a: A,
    b: B,
    c: C,
}

impl<A, B, C> Triplet<A, B, C> {
    pub fn new(a: A, b: B, c: C) -> Self {
        Self { a, b, c }
    }

    pub fn a(&self) -> &A {
        &self.a
    }

    pub fn b(&self) -> &B {
        &self.b
    }

    pub fn c(&self) -> &C {
        &self.c
    }

    /// Consume the triplet and return its parts as a plain tuple.
    pub fn into_parts(self) -> (A, B, C) {
        (self.a, self.b, self.c)
    }
}
