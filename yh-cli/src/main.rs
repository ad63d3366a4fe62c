//! yh: command-line driver for the Yahtzee engine and Monte Carlo bots.
//!
//! Subcommands:
//! - sim      play seeded bot games and summarize the scores
//! - decide   show the planner's decision for a given roll
//! - score    classify a roll against every category of an empty card

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use yh_core::{classify, realized_score, Category, Config, Game, Player, Roll, ScorecardView};
use yh_logging::{
    CandidateV1, GameFinishedEventV1, NdjsonError, NdjsonWriter, PlayerResultV1, RunManifestV1,
    TurnDecisionEventV1, VersionInfoV1,
};
use yh_mc::{DecisionEvent, DecisionSink, MonteCarloBot, TurnPlanner};

fn die(msg: impl Display) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => die(format!("Missing value for {flag}")),
    }
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let v = value_of(args, i, flag);
    v.parse()
        .unwrap_or_else(|_| die(format!("Invalid {flag} value: {v}")))
}

fn parse_dice(s: &str) -> Roll {
    let faces: Vec<u8> = s
        .split(',')
        .map(|t| {
            t.trim()
                .parse()
                .unwrap_or_else(|_| die(format!("Invalid die value: {t}")))
        })
        .collect();
    Roll::from_slice(&faces).unwrap_or_else(|e| die(format!("Invalid --dice: {e}")))
}

fn load_config(path: Option<&str>) -> (Config, Option<String>) {
    let Some(path) = path else {
        return (Config::default(), None);
    };
    let bytes =
        std::fs::read(path).unwrap_or_else(|e| die(format!("Failed to read config {path}: {e}")));
    let text = String::from_utf8_lossy(&bytes);
    let cfg = Config::from_yaml(&text)
        .unwrap_or_else(|e| die(format!("Failed to load config {path}: {e}")));
    (cfg, Some(yh_logging::hash_config_bytes(&bytes)))
}

/// Shared NDJSON log for every bot at the table.
struct EventLog {
    writer: NdjsonWriter,
    game_id: u64,
    error: Option<NdjsonError>,
}

impl EventLog {
    fn write<T: serde::Serialize>(&mut self, ev: &T) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_event(ev) {
            self.error = Some(e);
        }
    }

    fn check(&mut self) {
        if let Some(e) = self.error.take() {
            die(format!("Failed to write event log: {e}"));
        }
    }
}

struct LogSink(Rc<RefCell<EventLog>>);

impl DecisionSink for LogSink {
    fn on_decision(&mut self, ev: &DecisionEvent<'_>) {
        let d = ev.plan.decision;
        let mut log = self.0.borrow_mut();
        let event = TurnDecisionEventV1 {
            event: TurnDecisionEventV1::EVENT,
            ts_ms: yh_logging::now_ms(),
            v: VersionInfoV1::default(),
            game_id: log.game_id,
            player: ev.player.to_string(),
            turn: ev.turn,
            roll_number: ev.roll_number,
            dice: ev.roll.dice(),
            score_before: ev.view.total_score(),
            category: d.category.name().to_string(),
            reroll: d.reroll.positions().collect(),
            end_turn: d.end_turn,
            candidates: ev
                .plan
                .candidates
                .iter()
                .map(|c| CandidateV1 {
                    category: c.category.name().to_string(),
                    reroll: c.reroll.positions().collect(),
                    value: c.value,
                })
                .collect(),
        };
        log.write(&event);
    }
}

fn cmd_sim(args: &[String]) {
    let mut games: u64 = 10;
    let mut seed: Option<u64> = None;
    let mut trials: Option<u32> = None;
    let mut num_players: Option<usize> = None;
    let mut parallel = false;
    let mut config_path: Option<String> = None;
    let mut log_path: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh sim

USAGE:
    yh sim [--games N] [--seed S] [--trials T] [--players K] [--parallel] [--config PATH] [--log PATH]

OPTIONS:
    --games N       Number of games to play (default: 10)
    --seed S        Base seed; game g uses S+g (default: config game.seed)
    --trials T      Simulation trials per reroll candidate (default: config simulation.trials)
    --players K     Number of bots at the table (default: config game.players)
    --parallel      Run simulations on the rayon pool
    --config PATH   YAML config (see configs/default.yaml)
    --log PATH      Append NDJSON decision/game events here; writes run.json next to it
"#
                );
                return;
            }
            "--games" => {
                games = parse_value(args, i, "--games");
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_value(args, i, "--seed"));
                i += 2;
            }
            "--trials" => {
                trials = Some(parse_value(args, i, "--trials"));
                i += 2;
            }
            "--players" => {
                num_players = Some(parse_value(args, i, "--players"));
                i += 2;
            }
            "--parallel" => {
                parallel = true;
                i += 1;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--log" => {
                log_path = Some(value_of(args, i, "--log").to_string());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yh sim`: {other}");
                die("Run `yh sim --help` for usage.");
            }
        }
    }

    let (mut cfg, config_hash) = load_config(config_path.as_deref());
    if let Some(s) = seed {
        cfg.game.seed = s;
    }
    if let Some(t) = trials {
        cfg.simulation.trials = t;
    }
    if parallel {
        cfg.simulation.parallel = true;
    }
    if let Some(p) = log_path.as_ref() {
        cfg.logging.decisions_path = Some(p.clone());
    }
    if let Some(k) = num_players {
        if k == 0 {
            die("--players must be at least 1");
        }
        let base = cfg.game.players.clone();
        cfg.game.players = (0..k)
            .map(|j| match base.get(j) {
                Some(name) => name.clone(),
                None => format!("Monte{}", j + 1),
            })
            .collect();
    }
    if let Err(e) = cfg.validate() {
        die(format!("Invalid config: {e}"));
    }

    let log = cfg.logging.decisions_path.as_ref().map(|p| {
        let writer = NdjsonWriter::open_append_with_flush(p, cfg.logging.flush_every_lines)
            .unwrap_or_else(|e| die(format!("Failed to open event log {p}: {e}")));
        Rc::new(RefCell::new(EventLog {
            writer,
            game_id: 0,
            error: None,
        }))
    });

    let run_json = cfg
        .logging
        .decisions_path
        .as_ref()
        .map(|p| Path::new(p).with_file_name("run.json"));
    let mut manifest = RunManifestV1 {
        run_manifest_version: yh_logging::RUN_MANIFEST_VERSION,
        run_id: format!("sim-{}", yh_logging::now_ms()),
        created_ts_ms: yh_logging::now_ms(),
        ruleset_id: yh_logging::RULESET_ID.to_string(),
        git_hash: yh_logging::try_git_hash(),
        config_hash,
        seed: cfg.game.seed,
        trials: cfg.simulation.trials,
        parallel: cfg.simulation.parallel,
        players: cfg.game.players.clone(),
        decisions_path: cfg.logging.decisions_path.clone(),
        games_planned: games,
        games_completed: 0,
        mean_score: None,
        finished_ts_ms: None,
    };
    write_manifest(run_json.as_ref(), &manifest);

    println!(
        "Playing {games} game(s): players={} trials={} parallel={} seed={}",
        cfg.game.players.join(","),
        cfg.simulation.trials,
        cfg.simulation.parallel,
        cfg.game.seed
    );

    let mut scores: Vec<u32> = Vec::new();
    let mut bonus_cards = 0u64;
    let mut yahtzee_bonuses = 0u64;
    let mut wins: BTreeMap<String, u64> = BTreeMap::new();

    for g in 0..games {
        let game_seed = cfg.game.seed.wrapping_add(g);
        let players: Vec<Box<dyn Player>> = cfg
            .game
            .players
            .iter()
            .map(|name| {
                let planner = TurnPlanner::new(cfg.simulation.clone());
                let bot = MonteCarloBot::new(name.clone(), planner);
                let bot = match log.as_ref() {
                    Some(l) => bot.with_sink(Box::new(LogSink(Rc::clone(l)))),
                    None => bot,
                };
                Box::new(bot) as Box<dyn Player>
            })
            .collect();

        if let Some(l) = log.as_ref() {
            l.borrow_mut().game_id = g;
        }
        let mut game = Game::new(players, game_seed).unwrap_or_else(|e| die(e));
        let turns = game.play().unwrap_or_else(|e| die(format!("Game {g} failed: {e}")));
        let winners = game.winners().unwrap_or_else(|e| die(e));
        let breakdowns = game.breakdowns();

        for (name, b) in &breakdowns {
            scores.push(b.grand_total);
            if b.upper_bonus > 0 {
                bonus_cards += 1;
            }
            yahtzee_bonuses += u64::from(b.yahtzee_bonus_count);
            wins.entry(name.clone()).or_insert(0);
        }
        for w in &winners {
            *wins.entry(w.clone()).or_insert(0) += 1;
        }

        if let Some(l) = log.as_ref() {
            let mut l = l.borrow_mut();
            l.write(&GameFinishedEventV1 {
                event: GameFinishedEventV1::EVENT,
                ts_ms: yh_logging::now_ms(),
                v: VersionInfoV1::default(),
                game_id: g,
                seed: game_seed,
                turns: turns.len() as u32,
                results: breakdowns
                    .iter()
                    .map(|(name, b)| PlayerResultV1 {
                        player: name.clone(),
                        total: b.grand_total,
                        upper_total: b.upper_total,
                        upper_bonus: b.upper_bonus,
                        lower_total: b.lower_total,
                        yahtzee_bonus_count: b.yahtzee_bonus_count,
                    })
                    .collect(),
                winners,
            });
            l.check();
        }
        manifest.games_completed = g + 1;
    }

    if let Some(l) = log.as_ref() {
        let mut l = l.borrow_mut();
        if let Err(e) = l.writer.flush() {
            die(format!("Failed to flush event log: {e}"));
        }
    }

    println!();
    println!("Results:");
    println!("  - Games: {games}");
    if scores.is_empty() {
        println!("  - No games played");
    } else {
        let n = scores.len() as f64;
        let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
        let min = scores.iter().copied().min().unwrap_or(0);
        let max = scores.iter().copied().max().unwrap_or(0);
        println!("  - Score: mean={mean:.2}, min={min}, max={max}");
        println!(
            "  - Upper bonus rate: {:.1}%",
            bonus_cards as f64 / n * 100.0
        );
        println!("  - Yahtzee bonuses: {yahtzee_bonuses}");
        manifest.mean_score = Some(mean);
    }
    if cfg.game.players.len() > 1 {
        println!("  - Wins (ties credit every winner):");
        for (name, w) in &wins {
            println!("      {name}: {w}");
        }
    }

    manifest.finished_ts_ms = Some(yh_logging::now_ms());
    write_manifest(run_json.as_ref(), &manifest);
}

fn write_manifest(path: Option<&PathBuf>, m: &RunManifestV1) {
    if let Some(p) = path {
        yh_logging::write_manifest_atomic(p, m)
            .unwrap_or_else(|e| die(format!("Failed to write run manifest: {e}")));
    }
}

fn cmd_decide(args: &[String]) {
    let mut dice: Option<Roll> = None;
    let mut roll_number: u8 = 1;
    let mut seed: u64 = 0;
    let mut trials: Option<u32> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh decide

USAGE:
    yh decide --dice a,b,c,d,e [--roll R] [--seed S] [--trials T]

OPTIONS:
    --dice a,b,c,d,e   The current five dice
    --roll R           Draw number within the turn, 1..=3 (default: 1)
    --seed S           Simulation seed (default: 0)
    --trials T         Simulation trials per candidate (default: 75)
"#
                );
                return;
            }
            "--dice" => {
                dice = Some(parse_dice(value_of(args, i, "--dice")));
                i += 2;
            }
            "--roll" => {
                roll_number = parse_value(args, i, "--roll");
                i += 2;
            }
            "--seed" => {
                seed = parse_value(args, i, "--seed");
                i += 2;
            }
            "--trials" => {
                trials = Some(parse_value(args, i, "--trials"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yh decide`: {other}");
                die("Run `yh decide --help` for usage.");
            }
        }
    }
    let Some(roll) = dice else {
        die("Missing --dice (e.g. --dice 1,2,3,4,6)");
    };

    let mut sim = Config::default().simulation;
    if let Some(t) = trials {
        sim.trials = t;
    }
    let planner = TurnPlanner::new(sim);
    let view = ScorecardView::empty();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let plan = planner
        .plan(&view, &roll, roll_number, &mut rng)
        .unwrap_or_else(|e| die(e));

    let d = plan.decision;
    println!("Roll {roll_number}: {roll}");
    println!("  - Target: {}", d.category);
    if d.end_turn {
        println!("  - Action: score {}", d.category);
    } else {
        println!(
            "  - Action: redraw positions {} (keep {:?})",
            d.reroll,
            roll.kept(d.reroll)
        );
    }
    println!("  - Candidates:");
    for c in &plan.candidates {
        println!("      {:<16} {:>8.3}  redraw {}", c.category.name(), c.value, c.reroll);
    }
}

fn cmd_score(args: &[String]) {
    let mut dice: Option<Roll> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh score

USAGE:
    yh score --dice a,b,c,d,e
"#
                );
                return;
            }
            "--dice" => {
                dice = Some(parse_dice(value_of(args, i, "--dice")));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yh score`: {other}");
                die("Run `yh score --help` for usage.");
            }
        }
    }
    let Some(roll) = dice else {
        die("Missing --dice (e.g. --dice 1,2,3,4,6)");
    };

    let view = ScorecardView::empty();
    println!("Roll: {roll}");
    for c in Category::ALL {
        let class = classify(c, &roll, &view);
        let points = realized_score(c, &roll, &view).unwrap_or(0);
        println!("  {:<16} {:<10} {points:>3}", c.name(), format!("{class:?}"));
    }
}

fn print_help() {
    eprintln!(
        r#"yh - Yahtzee engine and Monte Carlo bots

USAGE:
    yh <COMMAND> [OPTIONS]

COMMANDS:
    sim         Play seeded bot games and print score statistics
    decide      Show the bot's decision for a roll on an empty card
    score       Classify a roll against every category

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `yh <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("yh {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "-V" | "--version" => print_version(),
        "sim" => cmd_sim(&args[2..]),
        "decide" => cmd_decide(&args[2..]),
        "score" => cmd_score(&args[2..]),
        cmd => {
            eprintln!("Unknown command: {cmd}");
            die("Run `yh --help` for usage.");
        }
    }
}
