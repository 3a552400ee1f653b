use std::collections::VecDeque;

use fnv::FnvHashSet;
use log::{debug, info, warn};
use typed_arena::Arena;

use crate::config::{Limits, Method};
use crate::level::Level;
use crate::state::State;

use super::backtracking::{self, Prevs, Step};
use super::deadlock;
use super::rules::{self, Successor};
use super::stats::Stats;
use super::{Budget, Solver, SolverOk};

/// Breadth-first search over single moves.
///
/// Finds a solution with the fewest moves, its cost is whatever those moves add up to.
#[derive(Debug)]
pub struct Bfs<'a> {
    level: &'a Level,
    limits: Limits,
}

impl<'a> Bfs<'a> {
    pub fn new(level: &'a Level, limits: Limits) -> Self {
        Bfs { level, limits }
    }
}

impl Solver for Bfs<'_> {
    fn method(&self) -> Method {
        Method::Bfs
    }

    fn runner(&self) -> SolverOk {
        let board = &self.level.board;
        let weights = &self.level.weights;
        let budget = Budget::start(self.limits);
        let mut stats = Stats::new();

        let arena = Arena::new();
        let mut visited = FnvHashSet::default();
        let mut prevs = Prevs::default();
        let mut to_visit = VecDeque::new();

        let start: &State = arena.alloc(self.level.state.clone());
        visited.insert(start);
        stats.add_created(0);
        to_visit.push_back((start, 0));

        while let Some((cur_state, dist)) = to_visit.pop_front() {
            if budget.out_of_time() {
                info!("BFS ran out of time at depth {}", dist);
                return SolverOk::time_out(self.method(), stats);
            }

            if board.is_solved(cur_state) {
                let (moves, cost) = backtracking::reconstruct_moves(&prevs, cur_state);
                debug!("BFS solved in {:?}", budget.elapsed());
                return SolverOk::solved(self.method(), moves, cost, stats);
            }

            if deadlock::is_deadlocked(board, cur_state) {
                continue;
            }
            stats.add_unique_visited(dist);

            for Successor { state, mov, cost } in rules::successors(board, weights, cur_state) {
                if visited.contains(&state) {
                    stats.add_reached_duplicate(dist + 1);
                    continue;
                }
                if budget.node_cap_reached(&stats) {
                    warn!("BFS hit the node limit");
                    return SolverOk::no_solution(self.method(), stats);
                }

                let next_state: &State = arena.alloc(state);
                visited.insert(next_state);
                prevs.insert(
                    next_state,
                    Step {
                        prev: cur_state,
                        mov,
                        cost,
                    },
                );
                if stats.add_created(dist + 1) {
                    debug!("BFS reached depth {}", dist + 1);
                }
                to_visit.push_back((next_state, dist + 1));
            }
        }

        debug!("BFS exhausted the search space in {:?}", budget.elapsed());
        SolverOk::no_solution(self.method(), stats)
    }
}
