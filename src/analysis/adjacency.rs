//! Overlap agreement between patterns

use crate::analysis::patterns::PatternCatalog;

/// Test whether `p2`, shifted by `(dx, dy)` against `p1`, agrees on every shared pixel
pub fn agrees(p1: &[usize], p2: &[usize], n: usize, dx: isize, dy: isize) -> bool {
    let size = n as isize;
    let (x_min, x_max) = if dx < 0 { (0, size + dx) } else { (dx, size) };
    let (y_min, y_max) = if dy < 0 { (0, size + dy) } else { (dy, size) };

    for y in y_min..y_max {
        for x in x_min..x_max {
            let first = p1.get((x + size * y) as usize);
            let second = p2.get((x - dx + size * (y - dy)) as usize);
            if first != second {
                return false;
            }
        }
    }
    true
}

/// Sparse compatibility lists for every pattern and offset
///
/// Offsets span the `(2N-1)×(2N-1)` window centered on the pattern; the list at
/// `(t, dx, dy)` holds every pattern that agrees with `t` when placed at `(dx, dy)`.
#[derive(Clone, Debug)]
pub struct OverlapTable {
    n: usize,
    span: usize,
    lists: Vec<Vec<usize>>,
}

impl OverlapTable {
    /// Precompute agreement lists for all pattern pairs
    pub fn build(catalog: &PatternCatalog) -> Self {
        let n = catalog.pattern_size();
        let span = 2 * n - 1;
        let patterns = catalog.patterns();
        let mut lists = Vec::with_capacity(patterns.len() * span * span);

        for p1 in patterns {
            for ox in 0..span {
                for oy in 0..span {
                    let dx = ox as isize - (n as isize - 1);
                    let dy = oy as isize - (n as isize - 1);
                    let compatible = patterns
                        .iter()
                        .enumerate()
                        .filter(|(_, p2)| agrees(p1, p2, n, dx, dy))
                        .map(|(t2, _)| t2)
                        .collect();
                    lists.push(compatible);
                }
            }
        }

        Self { n, span, lists }
    }

    /// Pattern edge length
    pub const fn pattern_size(&self) -> usize {
        self.n
    }

    /// Patterns compatible with `pattern` at offset `(dx, dy)`, `|dx|, |dy| < N`
    pub fn compatible(&self, pattern: usize, dx: isize, dy: isize) -> &[usize] {
        let reach = self.n as isize - 1;
        if dx.abs() > reach || dy.abs() > reach {
            return &[];
        }
        let ox = (dx + reach) as usize;
        let oy = (dy + reach) as usize;
        self.lists
            .get((pattern * self.span + ox) * self.span + oy)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
