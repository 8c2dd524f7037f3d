use serde::Serialize;

use super::Color;

/// Number of edges in a K4; a counter reaching this magnitude means a monochromatic K4.
pub const MONOCHROMATIC: i8 = 6;

/// The state of one 4-subset of vertices.
///
/// `Count(k)` means all colored edges of the subset so far share one color, with `k = #blue - #red`.
/// Once both colors are present the subset can never become monochromatic and the cell is
/// `Blocked` for good.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CellState {
    Count(i8),
    Blocked,
}

impl Default for CellState {
    fn default() -> Self {
        CellState::Count(0)
    }
}

impl CellState {
    /// The contribution of this cell to an edge weight, in units of 1/8.
    ///
    /// A cell with counter `k != 0` contributes `sign(k) * 2^(|k| - 4)`, i.e. `sign(k) * 2^(|k| - 1)`
    /// eighths, so cells closer to monochromatic dominate the sum. Empty and blocked cells
    /// contribute nothing.
    pub fn weight_eighths(self) -> i64 {
        match self {
            CellState::Blocked | CellState::Count(0) => 0,
            CellState::Count(k) => i64::from(k.signum()) << (k.unsigned_abs() - 1),
        }
    }

    /// The state after one more edge of the subset is colored `color`.
    pub fn apply(self, color: Color) -> Self {
        match self {
            CellState::Blocked => CellState::Blocked,
            CellState::Count(k) => {
                let unit = color.unit();
                if k * unit < 0 {
                    CellState::Blocked
                } else {
                    CellState::Count(k + unit)
                }
            }
        }
    }

    pub fn is_blocked(self) -> bool {
        self == CellState::Blocked
    }

    /// The color of all six edges, if the subset is a monochromatic K4.
    pub fn monochromatic(self) -> Option<Color> {
        match self {
            CellState::Count(MONOCHROMATIC) => Some(Color::Blue),
            CellState::Count(k) if k == -MONOCHROMATIC => Some(Color::Red),
            _ => None,
        }
    }
}

/// One [CellState] per 4-subset of `0..n`, stored densely in colexicographic order of the
/// ascending-sorted subsets.
#[derive(Clone, Debug)]
pub struct K4Cells {
    n: usize,
    // choose[x][k] = C(x, k) for k <= 4
    choose: Vec<[usize; 5]>,
    cells: Vec<CellState>,
}

impl K4Cells {
    pub fn new(n: usize) -> Self {
        let choose = (0..=n)
            .map(|x| {
                let mut row = [0usize; 5];
                for (k, c) in row.iter_mut().enumerate() {
                    *c = binomial(x, k);
                }
                row
            })
            .collect::<Vec<_>>();
        let ncells = choose[n][4];
        Self {
            n,
            choose,
            cells: vec![CellState::default(); ncells],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Colex rank of a key; `key` must be strictly ascending and below `n`.
    pub fn index(&self, key: [usize; 4]) -> usize {
        self.choose[key[0]][1]
            + self.choose[key[1]][2]
            + self.choose[key[2]][3]
            + self.choose[key[3]][4]
    }

    pub fn get(&self, index: usize) -> CellState {
        self.cells[index]
    }

    /// Indices of the `C(n-2, 2)` cells containing both `a` and `b`.
    pub fn containing(&self, a: usize, b: usize) -> Vec<usize> {
        let others = (0..self.n).filter(|&v| v != a && v != b).collect::<Vec<_>>();
        let mut ret = Vec::with_capacity(binomial(others.len(), 2));
        for (i, &x) in others.iter().enumerate() {
            for &y in &others[i + 1..] {
                let mut key = [a, b, x, y];
                key.sort_unstable();
                ret.push(self.index(key));
            }
        }
        ret
    }

    /// Sum of [CellState::weight_eighths] over the given cells.
    pub fn weight_eighths(&self, indices: &[usize]) -> i64 {
        indices.iter().map(|&i| self.cells[i].weight_eighths()).sum()
    }

    /// Apply `color` to the given cells, returning how many became blocked.
    pub fn apply(&mut self, indices: &[usize], color: Color) -> usize {
        let mut nblocked = 0;
        for &i in indices {
            let before = self.cells[i];
            let after = before.apply(color);
            if after.is_blocked() && !before.is_blocked() {
                nblocked += 1;
            }
            self.cells[i] = after;
        }
        nblocked
    }

    /// All cells with their keys, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 4], CellState)> + '_ {
        let n = self.n;
        (0..n)
            .flat_map(move |d| {
                (0..d).flat_map(move |c| (0..c).flat_map(move |b| (0..b).map(move |a| [a, b, c, d])))
            })
            .zip(self.cells.iter().copied())
    }
}

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
