use assert_cmd::prelude::*;
use std::process::Command;

fn binary() -> Command {
    let mut cmd = Command::cargo_bin("weighted-sokoban").unwrap();
    // warnings would end up in stderr
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stderr).unwrap(), "");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn run_corridor_ucs() {
    let output = r"Solving levels/corridor.txt using ucs...
Nodes generated: 2
Total cost: 3
Solution: R
Moves: 1
Pushes: 1
";

    binary()
        .arg("--method")
        .arg("ucs")
        .arg("levels/corridor.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_corner_deadlock() {
    let output = r"Solving levels/corner-deadlock.txt using bfs...
Nodes generated: 1
Total cost: 0
Solution: NoSol
";

    binary()
        .arg("-m")
        .arg("bfs")
        .arg("levels/corner-deadlock.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_time_limit() {
    let output = r"Solving levels/corridor.txt using dfs...
Nodes generated: 1
Total cost: 0
Solution: TimeOut
";

    binary()
        .arg("-m")
        .arg("dfs")
        .arg("--time-limit")
        .arg("0")
        .arg("levels/corridor.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_node_limit() {
    let output = r"Solving levels/corridor.txt using gbfs...
Nodes generated: 1
Total cost: 0
Solution: NoSol
";

    binary()
        .arg("-m")
        .arg("gbfs")
        .arg("--node-limit")
        .arg("1")
        .arg("levels/corridor.txt")
        .assert()
        .success()
        .stdout(output)
        .stderr("");
}

#[test]
fn run_weighted_astar() {
    // default method
    let stdout = stdout_of(binary().arg("levels/walled-perimeter.txt"));
    assert!(stdout.starts_with("Solving levels/walled-perimeter.txt using astar...\n"));
    assert!(stdout.contains("Total cost: 6\n"));
    assert!(stdout.contains("Solution: RR\n"));
    assert!(stdout.ends_with("Moves: 2\nPushes: 2\n"));
}

#[test]
fn run_stats() {
    let stdout = stdout_of(
        binary()
            .arg("-m")
            .arg("bfs")
            .arg("--stats")
            .arg("levels/corridor.txt"),
    );
    assert!(stdout.contains("States created total: 2\n"));
    assert!(stdout.contains("Unique states visited total: 1\n"));
}

#[test]
fn run_all_methods() {
    let stdout = stdout_of(binary().arg("-m").arg("all").arg("levels/two-boxes.txt"));
    for method in &["bfs", "dfs", "ucs", "gbfs", "astar"] {
        assert!(stdout.contains(method), "{} missing:\n{}", method, stdout);
    }
    assert!(stdout.contains("Solution"));
    assert!(!stdout.contains("NoSol"));
    assert!(!stdout.contains("TimeOut"));
}

#[test]
fn run_bad_method() {
    binary()
        .arg("--method")
        .arg("ida")
        .arg("levels/corridor.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_conflicting_limits() {
    binary()
        .arg("--time-limit")
        .arg("5")
        .arg("--no-time-limit")
        .arg("levels/corridor.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_huge_time_limit() {
    binary()
        .arg("--time-limit")
        .arg("1e30")
        .arg("levels/corridor.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_missing_file() {
    let output = binary().arg("levels/does-not-exist.txt").output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .starts_with("Can't load level levels/does-not-exist.txt"));
}
