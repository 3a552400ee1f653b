use fnv::FnvHashMap;

use crate::moves::{Move, Moves};
use crate::state::State;

/// How a state was reached.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step<'a> {
    pub(crate) prev: &'a State,
    pub(crate) mov: Move,
    pub(crate) cost: u32,
}

/// Parent pointers, the start state has no entry.
pub(crate) type Prevs<'a> = FnvHashMap<&'a State, Step<'a>>;

/// Walks the parent pointers back to the start,
/// returns the moves in execution order and their total cost.
pub(crate) fn reconstruct_moves(prevs: &Prevs<'_>, final_state: &State) -> (Moves, u64) {
    let mut moves = Vec::new();
    let mut cost = 0;

    let mut cur = final_state;
    while let Some(step) = prevs.get(cur) {
        moves.push(step.mov);
        cost += u64::from(step.cost);
        cur = step.prev;
    }

    moves.reverse();
    (Moves::new(moves), cost)
}
