//! Dihedral transforms for square patterns and tile symmetry classes

use crate::io::error::{Result, invalid_parameter};

/// A square pattern of palette indices, stored row-major (`x + y * n`)
pub type Pattern = Vec<usize>;

/// Build an `n`×`n` pattern from a cell function `f(x, y)`
pub fn pattern_from_fn(n: usize, f: impl Fn(usize, usize) -> usize) -> Pattern {
    let mut pattern = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            pattern.push(f(x, y));
        }
    }
    pattern
}

/// Quarter turn: `rotate(p)(x, y) = p[n-1-y + x*n]`
pub fn rotate_pattern(pattern: &[usize], n: usize) -> Pattern {
    pattern_from_fn(n, |x, y| {
        pattern.get(n - 1 - y + x * n).copied().unwrap_or(0)
    })
}

/// Mirror across the vertical axis: `reflect(p)(x, y) = p[n-1-x + y*n]`
pub fn reflect_pattern(pattern: &[usize], n: usize) -> Pattern {
    pattern_from_fn(n, |x, y| {
        pattern.get(n - 1 - x + y * n).copied().unwrap_or(0)
    })
}

/// All eight orientations in canonical order
///
/// `[p, reflect(p), rotate(p), reflect(rotate(p)), rotate²(p), ...]`, so taking the
/// first `k` entries yields the orientations a symmetry count of `k` admits.
pub fn orientations(pattern: &[usize], n: usize) -> [Pattern; 8] {
    let p0 = pattern.to_vec();
    let p1 = reflect_pattern(&p0, n);
    let p2 = rotate_pattern(&p0, n);
    let p3 = reflect_pattern(&p2, n);
    let p4 = rotate_pattern(&p2, n);
    let p5 = reflect_pattern(&p4, n);
    let p6 = rotate_pattern(&p4, n);
    let p7 = reflect_pattern(&p6, n);
    [p0, p1, p2, p3, p4, p5, p6, p7]
}

/// Rotational and reflective equivalence group of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymmetryClass {
    /// Invariant under every transform (`X`)
    X,
    /// Two orientations, mirror symmetric (`I`)
    I,
    /// Two orientations, diagonal (`\`)
    Backslash,
    /// Four orientations, corner-like (`L`)
    L,
    /// Four orientations, mirror symmetric (`T`)
    T,
}

impl SymmetryClass {
    /// Parse a catalog symmetry tag; an empty tag means `X`
    ///
    /// # Errors
    ///
    /// Returns an error for tags outside `X`, `I`, `\`, `L`, `T`
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "" | "X" => Ok(Self::X),
            "I" => Ok(Self::I),
            "\\" => Ok(Self::Backslash),
            "L" => Ok(Self::L),
            "T" => Ok(Self::T),
            other => Err(invalid_parameter(
                "symmetry",
                &other,
                &"expected one of X, I, \\, L, T",
            )),
        }
    }

    /// Number of distinct oriented variants
    pub const fn cardinality(self) -> usize {
        match self {
            Self::X => 1,
            Self::I | Self::Backslash => 2,
            Self::L | Self::T => 4,
        }
    }

    /// Variant reached by one quarter turn
    pub const fn rotate(self, i: usize) -> usize {
        match self {
            Self::X => i,
            Self::I | Self::Backslash => 1 - i,
            Self::L | Self::T => (i + 1) % 4,
        }
    }

    /// Variant reached by one reflection
    pub const fn reflect(self, i: usize) -> usize {
        match self {
            Self::X | Self::I => i,
            Self::Backslash => 1 - i,
            Self::L => {
                if i % 2 == 0 {
                    i + 1
                } else {
                    i - 1
                }
            }
            Self::T => {
                if i % 2 == 0 {
                    i
                } else {
                    4 - i
                }
            }
        }
    }

    /// Action table rows for a tile whose variants start at state `base`
    ///
    /// Row `t` lists the states reached from variant `t` by 0–3 quarter turns,
    /// then by the same turns followed by a reflection.
    pub fn action_rows(self, base: usize) -> Vec<[usize; 8]> {
        let a = |i| self.rotate(i);
        let b = |i| self.reflect(i);
        (0..self.cardinality())
            .map(|t| {
                [
                    base + t,
                    base + a(t),
                    base + a(a(t)),
                    base + a(a(a(t))),
                    base + b(t),
                    base + b(a(t)),
                    base + b(a(a(t))),
                    base + b(a(a(a(t)))),
                ]
            })
            .collect()
    }
}
