use std::collections::BinaryHeap;

use fnv::FnvHashMap;
use log::{debug, info, warn};
use typed_arena::Arena;

use crate::config::{Limits, Method};
use crate::level::Level;
use crate::state::State;

use super::backtracking::{self, Prevs, Step};
use super::deadlock;
use super::heuristic;
use super::rules::{self, Successor};
use super::stats::Stats;
use super::{Budget, SearchNode, Solver, SolverOk};

/// A* ordered by cost so far plus the weighted box-goal assignment.
///
/// The assignment never overestimates when there are as many goals as boxes
/// (with a different number the level can't be solved anyway) so the first solution is the cheapest.
#[derive(Debug)]
pub struct AStar<'a> {
    level: &'a Level,
    limits: Limits,
}

impl<'a> AStar<'a> {
    pub fn new(level: &'a Level, limits: Limits) -> Self {
        AStar { level, limits }
    }
}

impl Solver for AStar<'_> {
    fn method(&self) -> Method {
        Method::AStar
    }

    fn runner(&self) -> SolverOk {
        let board = &self.level.board;
        let weights = &self.level.weights;
        let budget = Budget::start(self.limits);
        let mut stats = Stats::new();

        let arena = Arena::new();
        let mut best_costs = FnvHashMap::default();
        let mut prevs = Prevs::default();
        let mut to_visit = BinaryHeap::new();
        let mut seq = 0;

        let start: &State = arena.alloc(self.level.state.clone());
        let start_h = heuristic::assignment(board, weights, start);
        debug!("Initial estimate: {}", start_h);
        best_costs.insert(start, 0);
        stats.add_created(0);
        to_visit.push(SearchNode {
            state: start,
            dist: 0,
            cost: 0,
            h: start_h,
            priority: start_h,
            seq,
        });

        while let Some(cur_node) = to_visit.pop() {
            if budget.out_of_time() {
                info!("A* ran out of time at estimate {}", cur_node.priority);
                return SolverOk::time_out(self.method(), stats);
            }

            if best_costs
                .get(cur_node.state)
                .map_or(false, |&best| cur_node.cost > best)
            {
                stats.add_reached_duplicate(cur_node.dist);
                continue;
            }

            if board.is_solved(cur_node.state) {
                let (moves, cost) = backtracking::reconstruct_moves(&prevs, cur_node.state);
                debug_assert_eq!(cost, cur_node.cost);
                debug!("A* solved in {:?}", budget.elapsed());
                return SolverOk::solved(self.method(), moves, cost, stats);
            }

            if deadlock::is_deadlocked(board, cur_node.state) {
                continue;
            }
            stats.add_unique_visited(cur_node.dist);

            for Successor { state, mov, cost } in rules::successors(board, weights, cur_node.state) {
                let next_cost = cur_node.cost + u64::from(cost);
                let known = best_costs
                    .get_key_value(&state)
                    .map(|(&known_state, &known_cost)| (known_state, known_cost));
                if let Some((_, known_cost)) = known {
                    if next_cost >= known_cost {
                        stats.add_reached_duplicate(cur_node.dist + 1);
                        continue;
                    }
                }
                if budget.node_cap_reached(&stats) {
                    warn!("A* hit the node limit");
                    return SolverOk::no_solution(self.method(), stats);
                }

                // steps don't move boxes so the estimate stays the same
                let h = if mov.is_push {
                    heuristic::assignment(board, weights, &state)
                } else {
                    cur_node.h
                };
                let next_state: &State = match known {
                    Some((known_state, _)) => known_state,
                    None => arena.alloc(state),
                };
                best_costs.insert(next_state, next_cost);
                prevs.insert(
                    next_state,
                    Step {
                        prev: cur_node.state,
                        mov,
                        cost,
                    },
                );
                if stats.add_created(cur_node.dist + 1) {
                    debug!("A* reached depth {}", cur_node.dist + 1);
                }
                seq += 1;
                to_visit.push(SearchNode {
                    state: next_state,
                    dist: cur_node.dist + 1,
                    cost: next_cost,
                    h,
                    priority: next_cost + h,
                    seq,
                });
            }
        }

        debug!("A* exhausted the search space in {:?}", budget.elapsed());
        SolverOk::no_solution(self.method(), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Solve;

    #[test]
    fn same_cost_as_ucs() {
        let level: Level = r"
2 3
#########
#       #
# $   $ #
#   @   #
#.     .#
#########
"
        .parse()
        .unwrap();
        let a_star = AStar::new(&level, Limits::unlimited()).runner();
        let ucs = level.solve(Method::Ucs, Limits::unlimited());
        assert!(a_star.moves().is_some());
        assert_eq!(a_star.total_cost, ucs.total_cost);
    }

    #[test]
    fn corridor() {
        let level: Level = "3\n#####\n#@$.#\n#####\n".parse().unwrap();
        let ok = AStar::new(&level, Limits::unlimited()).runner();
        assert_eq!(ok.to_tuple(), (2, 3, "R".to_string()));
    }
}
