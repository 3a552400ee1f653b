use std::process;
use std::time::{Duration, Instant};

use clap::{value_t, App, Arg, ArgMatches};
use log::{debug, LevelFilter};
use prettytable::{format, Cell, Row, Table};
use separator::Separatable;

use weighted_sokoban::config::{Limits, Method, METHODS};
use weighted_sokoban::level::Level;
use weighted_sokoban::solver::SolverOk;
use weighted_sokoban::{LoadLevel, Solve};

fn main() {
    let matches = App::new("weighted-sokoban")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .possible_values(&["bfs", "dfs", "ucs", "gbfs", "astar", "all"])
                .default_value("astar")
                .help("search method, all runs each of them and prints a comparison"),
        )
        .arg(
            Arg::with_name("time-limit")
                .long("time-limit")
                .takes_value(true)
                .value_name("SECS")
                .validator(|s| validate_secs(&s))
                .help("give up after this many seconds (default: 1800 for bfs, none otherwise)"),
        )
        .arg(
            Arg::with_name("no-time-limit")
                .long("no-time-limit")
                .conflicts_with("time-limit")
                .help("never give up because of time, not even with bfs"),
        )
        .arg(
            Arg::with_name("node-limit")
                .long("node-limit")
                .takes_value(true)
                .value_name("N")
                .validator(|s| validate::<usize>(&s))
                .help("stop after creating this many states (default: 500,000 for gbfs, none otherwise)"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("print the number of states by depth"),
        )
        .arg(
            Arg::with_name("timing")
                .short("t")
                .long("timing")
                .help("print how long each search took"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("log search progress to stderr, same as RUST_LOG=debug"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("level file - a line of box weights followed by the map in XSB format"),
        )
        .get_matches();

    init_logging(matches.is_present("verbose"));

    // can't fail - required arg
    let path = matches.value_of("file").unwrap_or_default();
    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });
    debug!("Level:\n{}", level);

    let stats = matches.is_present("stats");
    let timing = matches.is_present("timing");
    match matches.value_of("method") {
        Some("all") => {
            let results: Vec<_> = METHODS
                .iter()
                .map(|&method| run(&level, method, limits(&matches, method)))
                .collect();
            print!("{}", comparison_table(&results, timing));
            if stats {
                for (ok, _) in &results {
                    print!("\n{}:\n{}", ok.method, ok.stats);
                }
            }
        }
        method => {
            let method = method.unwrap_or_default().parse().unwrap_or_else(|err| {
                eprintln!("{}", err);
                process::exit(1);
            });
            println!("Solving {} using {}...", path, method);
            let (ok, elapsed) = run(&level, method, limits(&matches, method));
            print!("{}", ok);
            if timing {
                println!("Elapsed: {} ms", millis(elapsed));
            }
            if stats {
                print!("\n{}", ok.stats);
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if verbose {
        builder.filter(None, LevelFilter::Debug);
    }
    builder.init();
}

fn validate<T: std::str::FromStr>(value: &str) -> Result<(), String> {
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a valid number", value))
}

fn validate_secs(value: &str) -> Result<(), String> {
    parse_secs(value).map(|_| ())
}

/// Rejects negative, non-finite and too large values instead of panicking on them.
fn parse_secs(value: &str) -> Result<Duration, String> {
    value
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("'{}' is not a valid number of seconds", value))
}

/// The method's own safeguards with command line overrides.
fn limits(matches: &ArgMatches<'_>, method: Method) -> Limits {
    let mut limits = method.default_limits();
    if matches.is_present("no-time-limit") {
        limits.time = None;
    }
    if let Some(secs) = matches.value_of("time-limit") {
        let time = parse_secs(secs).unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        });
        limits.time = Some(time);
    }
    if matches.is_present("node-limit") {
        let nodes = value_t!(matches, "node-limit", usize).unwrap_or_else(|e| e.exit());
        limits.nodes = Some(nodes);
    }
    limits
}

fn run(level: &Level, method: Method, limits: Limits) -> (SolverOk, Duration) {
    // measured here so the library doesn't have to report wall time
    let started = Instant::now();
    let ok = level.solve(method, limits);
    (ok, started.elapsed())
}

fn millis(elapsed: Duration) -> String {
    // separator doesn't support u128
    (elapsed.as_millis() as u64).separated_string()
}

fn comparison_table(results: &[(SolverOk, Duration)], timing: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let mut titles = vec!["Method", "Nodes", "Cost", "Moves", "Pushes", "Solution"];
    if timing {
        titles.push("Time (ms)");
    }
    table.set_titles(Row::new(titles.into_iter().map(Cell::new).collect()));

    for (ok, elapsed) in results {
        let (moves, pushes) = match ok.moves() {
            Some(moves) => (moves.move_cnt().to_string(), moves.push_cnt().to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        let mut cells = vec![
            Cell::new(&ok.method.to_string()),
            Cell::new(&(ok.nodes_generated as u64).separated_string()),
            Cell::new(&ok.total_cost.separated_string()),
            Cell::new(&moves),
            Cell::new(&pushes),
            Cell::new(&ok.outcome.to_string()),
        ];
        if timing {
            cells.push(Cell::new(&millis(*elapsed)));
        }
        table.add_row(Row::new(cells));
    }
    table
}
