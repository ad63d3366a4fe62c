use std::fs;
use std::process::Command;

fn yh_bin() -> String {
    // Provided by Cargo for integration tests of binaries.
    env!("CARGO_BIN_EXE_yh").to_string()
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(yh_bin()).args(args).output().unwrap()
}

#[test]
fn score_lists_every_category() {
    let out = run(&["score", "--dice", "2,3,4,5,6"]);
    assert!(
        out.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    for name in ["ACES", "SMALL_STRAIGHT", "LARGE_STRAIGHT", "CHANCE"] {
        assert!(stdout.contains(name), "missing {name}:\n{stdout}");
    }
    let large = stdout
        .lines()
        .find(|l| l.contains("LARGE_STRAIGHT"))
        .unwrap();
    assert!(large.contains("ForPoints") && large.trim_end().ends_with("40"));
}

#[test]
fn bad_dice_exit_nonzero() {
    for dice in ["1,2,3", "1,2,3,4,7", "a,b,c,d,e"] {
        let out = run(&["score", "--dice", dice]);
        assert!(!out.status.success(), "accepted {dice}");
        assert!(!out.stderr.is_empty());
    }
}

#[test]
fn decide_on_final_roll_scores() {
    let out = run(&["decide", "--dice", "1,2,3,4,5", "--roll", "3"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Action: score LARGE_STRAIGHT"), "{stdout}");
}

#[test]
fn decide_rejects_fourth_roll() {
    let out = run(&["decide", "--dice", "1,2,3,4,5", "--roll", "4"]);
    assert!(!out.status.success());
}

#[test]
fn sim_writes_events_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("decisions.ndjson");

    let out = run(&[
        "sim",
        "--games",
        "2",
        "--seed",
        "5",
        "--trials",
        "10",
        "--players",
        "2",
        "--log",
        log.to_str().unwrap(),
    ]);
    assert!(
        out.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Score: mean="), "{stdout}");
    assert!(stdout.contains("Wins"), "{stdout}");

    let text = fs::read_to_string(&log).unwrap();
    let events: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let finished: Vec<_> = events
        .iter()
        .filter(|e| e["event"] == "game_finished")
        .collect();
    assert_eq!(finished.len(), 2);
    assert_eq!(finished[0]["turns"], 26);
    let decisions = events
        .iter()
        .filter(|e| e["event"] == "turn_decision")
        .count();
    assert!(decisions >= 52);

    let m: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("run.json")).unwrap()).unwrap();
    assert_eq!(m["games_completed"], 2);
    assert_eq!(m["seed"], 5);
    assert!(m["mean_score"].is_number());
}

#[test]
fn sim_is_reproducible() {
    let args = ["sim", "--games", "1", "--seed", "11", "--trials", "10"];
    let a = run(&args);
    let b = run(&args);
    assert!(a.status.success());
    let tail = |o: &std::process::Output| {
        String::from_utf8_lossy(&o.stdout)
            .lines()
            .filter(|l| l.contains("Score:"))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    assert_eq!(tail(&a), tail(&b));
}

#[test]
fn unknown_command_fails() {
    let out = run(&["frobnicate"]);
    assert!(!out.status.success());
}
