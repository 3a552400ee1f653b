mod a_star;
mod backtracking;
mod bfs;
mod dfs;
mod gbfs;
mod stats;
mod ucs;

pub(crate) mod deadlock;
pub(crate) mod heuristic;
pub(crate) mod rules;

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::time::{Duration, Instant};

use log::debug;
use separator::Separatable;

use crate::config::{Limits, Method};
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;
use crate::Solve;

pub use self::a_star::AStar;
pub use self::bfs::Bfs;
pub use self::dfs::Dfs;
pub use self::gbfs::Gbfs;
pub use self::stats::Stats;
pub use self::ucs::Ucs;

/// How a search ended.
#[derive(Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Moves),
    /// The reachable space was exhausted or the node cap was hit
    NoSolution,
    TimeOut,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Solved(ref moves) => write!(f, "{}", moves),
            Outcome::NoSolution => write!(f, "NoSol"),
            Outcome::TimeOut => write!(f, "TimeOut"),
        }
    }
}

impl Debug for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub struct SolverOk {
    pub method: Method,
    /// States created by the search, the start state included, so always at least 1
    pub nodes_generated: usize,
    /// Sum of the move costs of the solution, 0 without one
    pub total_cost: u64,
    pub outcome: Outcome,
    pub stats: Stats,
}

impl SolverOk {
    fn new(method: Method, total_cost: u64, outcome: Outcome, stats: Stats) -> Self {
        SolverOk {
            method,
            nodes_generated: stats.total_created(),
            total_cost,
            outcome,
            stats,
        }
    }

    pub(crate) fn solved(method: Method, moves: Moves, total_cost: u64, stats: Stats) -> Self {
        Self::new(method, total_cost, Outcome::Solved(moves), stats)
    }

    pub(crate) fn no_solution(method: Method, stats: Stats) -> Self {
        Self::new(method, 0, Outcome::NoSolution, stats)
    }

    pub(crate) fn time_out(method: Method, stats: Stats) -> Self {
        Self::new(method, 0, Outcome::TimeOut, stats)
    }

    pub fn moves(&self) -> Option<&Moves> {
        match self.outcome {
            Outcome::Solved(ref moves) => Some(moves),
            Outcome::NoSolution | Outcome::TimeOut => None,
        }
    }

    /// `(nodes generated, total cost, moves or "NoSol" / "TimeOut")`
    pub fn to_tuple(&self) -> (usize, u64, String) {
        (self.nodes_generated, self.total_cost, self.outcome.to_string())
    }
}

impl Display for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes generated: {}", (self.nodes_generated as u64).separated_string())?;
        writeln!(f, "Total cost: {}", self.total_cost.separated_string())?;
        writeln!(f, "Solution: {}", self.outcome)?;
        if let Some(moves) = self.moves() {
            writeln!(f, "Moves: {}", moves.move_cnt())?;
            writeln!(f, "Pushes: {}", moves.push_cnt())?;
        }
        Ok(())
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.method, self.outcome)?;
        write!(f, "{:?}", self.stats)
    }
}

/// One search strategy over one level.
///
/// Each `runner` call owns its frontier and visited states, nothing is kept between calls.
pub trait Solver {
    fn method(&self) -> Method;

    fn runner(&self) -> SolverOk;
}

pub fn solver_for<'a>(level: &'a Level, method: Method, limits: Limits) -> Box<dyn Solver + 'a> {
    match method {
        Method::Bfs => Box::new(Bfs::new(level, limits)),
        Method::Dfs => Box::new(Dfs::new(level, limits)),
        Method::Ucs => Box::new(Ucs::new(level, limits)),
        Method::Gbfs => Box::new(Gbfs::new(level, limits)),
        Method::AStar => Box::new(AStar::new(level, limits)),
    }
}

impl Solve for Level {
    fn solve(&self, method: Method, limits: Limits) -> SolverOk {
        debug!("Solving using {}, limits: {:?}", method, limits);
        let ok = solver_for(self, method, limits).runner();
        debug!(
            "{} finished: {}, nodes generated: {}",
            method, ok.outcome, ok.nodes_generated
        );
        ok
    }
}

/// Time and node limits of one search run.
#[derive(Debug, Clone, Copy)]
struct Budget {
    started: Instant,
    limits: Limits,
}

impl Budget {
    fn start(limits: Limits) -> Self {
        Budget {
            started: Instant::now(),
            limits,
        }
    }

    fn out_of_time(&self) -> bool {
        self.limits
            .time
            .map_or(false, |limit| self.started.elapsed() >= limit)
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Checked before a new state is created.
    fn node_cap_reached(&self, stats: &Stats) -> bool {
        self.limits
            .nodes
            .map_or(false, |cap| stats.total_created() >= cap)
    }
}

/// Priority queue entry shared by the best-first searches.
///
/// Ordered by priority, then by insertion so ties are resolved first in first out.
#[derive(Debug)]
struct SearchNode<'a> {
    state: &'a State,
    /// Moves from the start
    dist: usize,
    /// Accumulated move cost
    cost: u64,
    h: u64,
    priority: u64,
    seq: u64,
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode<'_> {}

impl PartialOrd for SearchNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        (other.priority, other.seq).cmp(&(self.priority, self.seq))
    }
}
