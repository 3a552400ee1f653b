use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

/// Counts of search states by depth (number of moves from the start).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<usize>,
    visited_states: Vec<usize>,
    duplicate_states: Vec<usize>,
    /// Sum of `created_states`, read after every created state
    created_total: usize,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    /// Every state the search allocated, including the start and deadlocked ones
    pub fn total_created(&self) -> usize {
        self.created_total
    }

    pub fn created_by_depth(&self) -> &[usize] {
        &self.created_states
    }

    pub fn total_unique_visited(&self) -> usize {
        self.visited_states.iter().sum()
    }

    /// Rediscovered states and, for cost-ordered searches, stale queue entries
    pub fn total_reached_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    /// Returns true if this is the first state created at `depth`.
    pub(crate) fn add_created(&mut self, depth: usize) -> bool {
        self.created_total += 1;
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_unique_visited(&mut self, depth: usize) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: usize) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    fn add(counts: &mut Vec<usize>, depth: usize) -> bool {
        let mut ret = false;

        // while because some depths might be skipped
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }
}

fn sep(n: usize) -> String {
    (n as u64).separated_string()
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "total created: {}", sep(self.total_created()))?;
        writeln!(f, "total reached duplicates: {}", sep(self.total_reached_duplicates()))?;
        writeln!(f, "total unique visited: {}", sep(self.total_unique_visited()))
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let duplicates = self.total_reached_duplicates();
        let visited = self.total_unique_visited();
        writeln!(f, "States created total: {}", sep(created))?;
        writeln!(f, "Unique states visited total: {}", sep(visited))?;
        writeln!(f, "Reached duplicates total: {}", sep(duplicates))?;
        writeln!(f)?;

        writeln!(f, "Depth / created states:")?;
        writeln!(f, "|                   Depth / unique visited states:")?;
        writeln!(f, "|                   |                   Depth / reached duplicates:")?;
        // duplicates can be one level deeper than anything created
        let depths = self.created_states.len().max(self.duplicate_states.len());
        for i in 0..depths {
            let depth = format!("{}: ", i);
            let created = self.created_states.get(i).cloned().unwrap_or(0);
            let visited = self.visited_states.get(i).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(i).cloned().unwrap_or(0);
            writeln!(
                f,
                "{0:<5}{1:<15}{0:<5}{2:<15}{0:<5}{3:<15}",
                depth,
                sep(created),
                sep(visited),
                sep(duplicates)
            )?;
        }
        Ok(())
    }
}
