use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Breadth-first - fewest moves, cost not minimized
    Bfs,
    /// Depth-first - first solution found
    Dfs,
    /// Uniform cost - minimal total cost
    Ucs,
    /// Greedy best-first - fast, not optimal
    Gbfs,
    /// A* with an assignment heuristic - minimal total cost
    AStar,
}

pub const METHODS: [Method; 5] = [Method::Bfs, Method::Dfs, Method::Ucs, Method::Gbfs, Method::AStar];

impl Method {
    /// The safeguards each method has by default:
    /// a time budget for BFS, a node cap for GBFS, nothing for the rest.
    pub fn default_limits(self) -> Limits {
        match self {
            Method::Bfs => Limits {
                time: Some(Limits::BFS_TIME),
                nodes: None,
            },
            Method::Gbfs => Limits {
                time: None,
                nodes: Some(Limits::GBFS_NODES),
            },
            Method::Dfs | Method::Ucs | Method::AStar => Limits::unlimited(),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::Bfs => write!(f, "bfs"),
            Method::Dfs => write!(f, "dfs"),
            Method::Ucs => write!(f, "ucs"),
            Method::Gbfs => write!(f, "gbfs"),
            Method::AStar => write!(f, "astar"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl Display for UnknownMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown method '{}'", self.0)
    }
}

impl Error for UnknownMethod {}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Method::Bfs),
            "dfs" => Ok(Method::Dfs),
            "ucs" => Ok(Method::Ucs),
            "gbfs" => Ok(Method::Gbfs),
            "astar" | "a*" => Ok(Method::AStar),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Resource limits, honored by every solver.
///
/// Time is checked each time a state is taken from the frontier,
/// the node cap each time a new state is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub time: Option<Duration>,
    pub nodes: Option<usize>,
}

impl Limits {
    pub const BFS_TIME: Duration = Duration::from_secs(1800);
    pub const GBFS_NODES: usize = 500_000;

    pub fn unlimited() -> Self {
        Limits {
            time: None,
            nodes: None,
        }
    }
}
