use std::cmp::Ordering;
use std::fmt;

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::error::{ColoringError, CombsolError, GraphError};
use crate::graph::Graph;
use crate::{coloring_error, graph_error};

pub mod cells;

pub use cells::{CellState, K4Cells, MONOCHROMATIC};

/// The two edge colors, in decision order: a positive edge weight picks the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Blue];

    /// Counter contribution of an edge of this color: red counts down, blue counts up.
    pub fn unit(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Blue => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Default)]
pub struct ColoringStatistics {
    pub number_of_edges_colored: usize,
    pub number_of_random_choices: usize,
    pub number_of_cells_blocked: usize,
}

/// The colors given to a sequence of edges.
#[derive(Clone, Debug, Default)]
pub struct EdgeColoring {
    /// Every edge with its color, in coloring order.
    pub colors: Vec<((usize, usize), Color)>,
    /// Positions in `colors` of the red edges.
    pub red: Vec<usize>,
    /// Positions in `colors` of the blue edges.
    pub blue: Vec<usize>,
}

impl EdgeColoring {
    fn push(&mut self, edge: (usize, usize), color: Color) {
        let index = self.colors.len();
        match color {
            Color::Red => self.red.push(index),
            Color::Blue => self.blue.push(index),
        }
        self.colors.push((edge, color));
    }
}

/// Online 2-coloring of the edges of the complete graph on `n` vertices that tries to avoid
/// monochromatic K4s.
///
/// The engine keeps one [CellState] per 4-subset of vertices. To color an edge `(a, b)` it sums the
/// weights of the cells containing both endpoints (see [CellState::weight_eighths]). Cells leaning
/// blue give a positive weight and the edge is colored red, cells leaning red give a negative weight
/// and the edge is colored blue; a zero weight is broken uniformly at random using the generator
/// passed to [K4ColoringEngine::new]. The color is then applied to every touched cell, blocking
/// those that now hold both colors.
///
/// With fewer than 4 vertices there are no cells, and every edge is colored at random.
///
/// # Example
///
/// ```
/// use combsol::K4ColoringEngine;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut engine = K4ColoringEngine::new(6, StdRng::seed_from_u64(0));
/// let coloring = engine.color_complete_graph().unwrap();
/// assert_eq!(coloring.colors.len(), 15);
/// println!("monochromatic K4 num: {}", engine.monochromatic_count());
/// ```
pub struct K4ColoringEngine<R: Rng> {
    cells: K4Cells,
    // indexed by edge rank, see `edge_rank`
    edge_colors: Vec<Option<Color>>,
    rng: R,
    statistics: ColoringStatistics,
}

impl<R: Rng> K4ColoringEngine<R> {
    pub fn new(n: usize, rng: R) -> Self {
        if n < 4 {
            warn!("K4 coloring engine created with {n} vertices, edges will be colored at random");
        }
        Self {
            cells: K4Cells::new(n),
            edge_colors: vec![None; n * n.saturating_sub(1) / 2],
            rng,
            statistics: ColoringStatistics::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.cells.vertex_count()
    }

    /// False when there are fewer than 4 vertices, and so no K4 to track.
    pub fn is_applicable(&self) -> bool {
        self.vertex_count() >= 4
    }

    pub fn get_statistics(&self) -> &ColoringStatistics {
        &self.statistics
    }

    /// The current weight of edge `(a, b)`.
    pub fn edge_weight(&self, a: usize, b: usize) -> Result<f64, CombsolError> {
        self.check_edge(a, b)?;
        let eighths = self.cells.weight_eighths(&self.cells.containing(a, b));
        Ok(eighths as f64 / 8.0)
    }

    /// The color given to edge `(a, b)`, if it has been colored.
    pub fn edge_color(&self, a: usize, b: usize) -> Result<Option<Color>, CombsolError> {
        self.check_edge(a, b)?;
        Ok(self.edge_colors[edge_rank(a, b)])
    }

    /// Choose a color for edge `(a, b)`, update the cells containing it and return the color.
    ///
    /// Each edge can be colored once; coloring it again is an error and leaves the cells unchanged.
    pub fn color_edge(&mut self, a: usize, b: usize) -> Result<Color, CombsolError> {
        let rank = self.check_uncolored(a, b)?;
        let color = if self.is_applicable() {
            let indices = self.cells.containing(a, b);
            let color = match self.cells.weight_eighths(&indices).cmp(&0) {
                Ordering::Greater => Color::Red,
                Ordering::Less => Color::Blue,
                Ordering::Equal => self.random_color(),
            };
            self.update(&indices, color);
            color
        } else {
            self.random_color()
        };
        self.edge_colors[rank] = Some(color);
        self.statistics.number_of_edges_colored += 1;
        debug!(
            "{} color {a} {b} {color}",
            self.statistics.number_of_edges_colored
        );
        Ok(color)
    }

    /// Color edge `(a, b)` with a given color, bypassing the weight decision.
    pub fn assign_color(&mut self, a: usize, b: usize, color: Color) -> Result<(), CombsolError> {
        let rank = self.check_uncolored(a, b)?;
        let indices = self.cells.containing(a, b);
        self.update(&indices, color);
        self.edge_colors[rank] = Some(color);
        self.statistics.number_of_edges_colored += 1;
        Ok(())
    }

    /// Color each edge in turn with [K4ColoringEngine::color_edge].
    pub fn color_edges(
        &mut self,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<EdgeColoring, CombsolError> {
        let mut coloring = EdgeColoring::default();
        for (a, b) in edges {
            let color = self.color_edge(a, b)?;
            coloring.push((a, b), color);
        }
        info!(
            "colored {} edges ({} red, {} blue), {} monochromatic K4",
            coloring.colors.len(),
            coloring.red.len(),
            coloring.blue.len(),
            self.monochromatic_count()
        );
        Ok(coloring)
    }

    /// Color every edge of the complete graph, in its lexicographic edge order.
    pub fn color_complete_graph(&mut self) -> Result<EdgeColoring, CombsolError> {
        let graph = Graph::complete(self.vertex_count());
        self.color_edges(graph.edges())
    }

    /// The state of the cell for four distinct vertices, given in any order.
    pub fn cell(&self, key: [usize; 4]) -> Result<CellState, CombsolError> {
        if !self.is_applicable() {
            return Err(coloring_error!(EngineNotApplicable {
                vertex_count: self.vertex_count()
            }));
        }
        let mut sorted = key;
        sorted.sort_unstable();
        if let Some(&v) = sorted.iter().find(|&&v| v >= self.vertex_count()) {
            return Err(graph_error!(InvalidVertex {
                vertex: v,
                vertex_count: self.vertex_count()
            }));
        }
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(coloring_error!(InvalidCell { key }));
        }
        Ok(self.cells.get(self.cells.index(sorted)))
    }

    /// All cells with their ascending keys.
    pub fn cells(&self) -> impl Iterator<Item = ([usize; 4], CellState)> + '_ {
        self.cells.iter()
    }

    /// Number of 4-subsets whose six edges all have the same color.
    pub fn monochromatic_count(&self) -> usize {
        let (red, blue) = self.monochromatic_counts();
        red + blue
    }

    /// Number of all-red and all-blue 4-subsets.
    pub fn monochromatic_counts(&self) -> (usize, usize) {
        let mut red = 0;
        let mut blue = 0;
        for (_, state) in self.cells.iter() {
            match state.monochromatic() {
                Some(Color::Red) => red += 1,
                Some(Color::Blue) => blue += 1,
                None => {}
            }
        }
        (red, blue)
    }

    fn update(&mut self, indices: &[usize], color: Color) {
        self.statistics.number_of_cells_blocked += self.cells.apply(indices, color);
    }

    fn random_color(&mut self) -> Color {
        self.statistics.number_of_random_choices += 1;
        if self.rng.gen_bool(0.5) {
            Color::Red
        } else {
            Color::Blue
        }
    }

    fn check_uncolored(&self, a: usize, b: usize) -> Result<usize, CombsolError> {
        self.check_edge(a, b)?;
        let rank = edge_rank(a, b);
        if self.edge_colors[rank].is_some() {
            return Err(coloring_error!(EdgeAlreadyColored { a, b }));
        }
        Ok(rank)
    }

    fn check_edge(&self, a: usize, b: usize) -> Result<(), CombsolError> {
        let n = self.vertex_count();
        for v in [a, b] {
            if v >= n {
                return Err(graph_error!(InvalidVertex {
                    vertex: v,
                    vertex_count: n
                }));
            }
        }
        if a == b {
            return Err(coloring_error!(InvalidEdge { a, b }));
        }
        Ok(())
    }
}

/// Colex rank of the edge `{a, b}`, `a != b`.
fn edge_rank(a: usize, b: usize) -> usize {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    hi * (hi - 1) / 2 + lo
}
