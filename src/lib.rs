//! # Combsol
//!
//! Combsol runs two small combinatorial graph experiments: greedy construction of a dominating set of an undirected graph,
//! and an online 2-coloring of the edges of a complete graph that tries to avoid monochromatic K4 subgraphs.
//! Both are heuristics; they make no claim of optimality, but they are deterministic for a fixed input (and, for the coloring,
//! a fixed random seed) so that experiments can be reproduced.
//!
//! ## Graphs
//!
//! The [Graph] struct is an undirected simple graph on the vertices `0..n`, built on a [petgraph] stable graph so that deleting
//! edges keeps both the vertex ids and the creation order of the remaining edges. Graphs can be created from a list of edges
//! ([Graph::from_edges]), read from a plain text edge list ([read_edge_list], [parse_edge_list]), or generated ([Graph::complete],
//! [Graph::random_geometric]).
//!
//! ## Dominating sets
//!
//! A dominating set heuristic is a stepping solver implementing [DominatingSetMethod]. Each call to [DominatingSetMethod::step]
//! performs one iteration and the current sets can be viewed with [DominatingSetMethod::state], which makes it easy to record or
//! render every step of a run. Use [DominatingSetMethod::solve] to run to completion. Two heuristics are provided:
//! - [GreedySolver]: repeatedly select the vertex of maximum degree and delete its edges (on a private copy of the graph).
//! - [DfsGuidedSolver]: after handling isolated and pendant vertices, repeatedly select the vertex reachable from the previous
//!   selection that covers the most undominated vertices.
//!
//! The caps on the number of iterations are set using [GreedyConfig] and [DfsGuidedConfig]. A run that hits its cap finishes with
//! [Termination::IterationCap] and its sets may not cover the graph.
//!
//! ## K4-avoiding edge coloring
//!
//! The [K4ColoringEngine] colors the edges of a complete graph one at a time, red or blue. It keeps a counter per 4-subset of
//! vertices ([CellState]) and colors each edge so as to spoil the subsets closest to becoming monochromatic. Ties are broken by a
//! random number generator given to the engine, so seeding it reproduces a run.
//!
//! ## Logging
//!
//! Combsol logs through the [log] facade: every solver step and colored edge at `debug` level and a summary of each run at `info`
//! level. Install a logger such as `env_logger` to see them.

pub mod dominating_set;
pub mod error;
pub mod graph;
pub mod k4_coloring;

pub use dominating_set::{
    solve_dominating_set, DfsGuidedConfig, DfsGuidedSolver, DominatingPolicy, DominatingSetMethod,
    DominatingSetSolution, DominatingSetState, DominatingSetStatistics, DominatingSetStopReason,
    GreedyConfig, GreedySolver, Termination, VertexSet,
};
pub use error::{ColoringError, CombsolError, GraphError};
pub use graph::{
    edge_list::{
        parse_edge_list, read_edge_list, save_edge_list, write_edge_list, MAX_EDGE_LIST_VERTICES,
    },
    Graph,
};
pub use k4_coloring::{
    CellState, Color, ColoringStatistics, EdgeColoring, K4ColoringEngine, MONOCHROMATIC,
};
