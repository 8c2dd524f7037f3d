//! Command line runner for the combsol experiments.
//!
//! ```text
//! combsol dominate --policy greedy --vertices 20 --radius 0.4 --seed 1 --save-edges grg20_edge.txt
//! combsol dominate --policy dfs-guided --edges grg20_edge.txt
//! combsol color --vertices 10 --seed 1 --log two_coloring.txt
//! ```
//!
//! Every step is printed to stdout, and appended to the `--log` file when given.
//! Set `RUST_LOG=debug` for the library's per-step logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use combsol::{
    read_edge_list, save_edge_list, DfsGuidedConfig, DfsGuidedSolver, DominatingSetMethod,
    DominatingSetStopReason, Graph, GreedyConfig, GreedySolver, K4ColoringEngine,
};

#[derive(Parser, Debug)]
#[command(name = "combsol", version, about = "Dominating set and K4-avoiding coloring experiments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a dominating set of a graph
    Dominate(DominateArgs),
    /// Color the edges of a complete graph avoiding monochromatic K4s
    Color(ColorArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Policy {
    /// Select the max degree vertex and delete its edges
    Greedy,
    /// Select along depth-first traversals
    DfsGuided,
}

#[derive(clap::Args, Debug)]
struct DominateArgs {
    #[arg(long, value_enum, default_value = "greedy")]
    policy: Policy,

    /// Read the graph from this edge list instead of generating one
    #[arg(long)]
    edges: Option<PathBuf>,

    /// Number of vertices of the generated random geometric graph
    #[arg(long, default_value_t = 20)]
    vertices: usize,

    /// Connection radius of the generated random geometric graph
    #[arg(long, default_value_t = 0.4)]
    radius: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Override the policy's iteration cap
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Save the graph as an edge list before solving
    #[arg(long)]
    save_edges: Option<PathBuf>,

    /// Append the step log to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ColorArgs {
    /// Number of vertices of the complete graph
    #[arg(long, default_value_t = 10)]
    vertices: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Append the step log to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

struct StepLog {
    file: Option<BufWriter<File>>,
}

impl StepLog {
    fn open(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open log file {}", path.display()))?;
                Some(BufWriter::new(file))
            }
            None => None,
        };
        Ok(Self { file })
    }

    fn line(&mut self, line: &str) -> Result<()> {
        println!("{line}");
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

fn run_steps(solver: &mut impl DominatingSetMethod, log: &mut StepLog) -> Result<()> {
    let mut count = 0;
    loop {
        let reason = solver.step()?;
        let state = solver.state();
        match reason {
            DominatingSetStopReason::Selected(v) => {
                count += 1;
                log.line(&format!(
                    "{count} select {v} dominating {:?} dominated {}",
                    state.dominating.as_slice(),
                    state.dominated.len()
                ))?;
            }
            DominatingSetStopReason::Reseeded(v) => {
                count += 1;
                log.line(&format!("{count} restart from {v}"))?;
            }
            DominatingSetStopReason::Finished(_) => return Ok(()),
        }
    }
}

fn dominate(args: DominateArgs) -> Result<()> {
    let graph = match &args.edges {
        Some(path) => read_edge_list(path)
            .with_context(|| format!("failed to read edge list {}", path.display()))?,
        None => {
            let mut rng = StdRng::seed_from_u64(args.seed);
            Graph::random_geometric(args.vertices, args.radius, &mut rng)
        }
    };
    if let Some(path) = &args.save_edges {
        save_edge_list(&graph, path)
            .with_context(|| format!("failed to save edge list {}", path.display()))?;
    }

    let mut log = StepLog::open(args.log.as_deref())?;
    let solution = match args.policy {
        Policy::Greedy => {
            let mut config = GreedyConfig::default();
            if let Some(m) = args.max_iterations {
                config.maximum_iterations = m;
            }
            let mut solver = GreedySolver::new_with_config(&graph, config);
            run_steps(&mut solver, &mut log)?;
            solver.solve()?
        }
        Policy::DfsGuided => {
            let mut config = DfsGuidedConfig::default();
            if let Some(m) = args.max_iterations {
                config.maximum_iterations = m;
            }
            let mut solver = DfsGuidedSolver::new_with_config(&graph, config);
            run_steps(&mut solver, &mut log)?;
            solver.solve()?
        }
    };

    log.line(&format!(
        "dominating set ({} of {} vertices, {:?}): {:?}",
        solution.dominating.len(),
        graph.vertex_count(),
        solution.termination,
        solution.dominating
    ))?;
    log.line(&format!(
        "valid dominating set: {}",
        graph.is_dominating_set(&solution.dominating)
    ))?;
    log.finish()
}

fn color(args: ColorArgs) -> Result<()> {
    let mut engine = K4ColoringEngine::new(args.vertices, StdRng::seed_from_u64(args.seed));
    let mut log = StepLog::open(args.log.as_deref())?;
    let graph = Graph::complete(args.vertices);
    for (count, (a, b)) in graph.edges().enumerate() {
        let color = engine.color_edge(a, b)?;
        log.line(&format!("{} color {a} {b} {color}", count + 1))?;
    }
    log.line(&format!(
        "monochromatic K4 num: {}",
        engine.monochromatic_count()
    ))?;
    log.finish()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Dominate(args) => dominate(args),
        Command::Color(args) => color(args),
    }
}
