//! yh-logging: append-only NDJSON event logs and run manifests.
//!
//! Events are plain serializable records; this crate does not depend on the rule engine.
//! Callers convert their own types into the `*V1` schemas below.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run manifest schema version.
pub const RUN_MANIFEST_VERSION: u32 = 1;

/// Event schema version stamped on every event.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

pub const RULESET_ID: &str = "yahtzee_13cat_joker_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifestV1 {
    pub run_manifest_version: u32,

    pub run_id: String,
    pub created_ts_ms: u64,
    pub ruleset_id: String,

    // Hashes for reproducibility.
    pub git_hash: Option<String>,
    pub config_hash: Option<String>,

    // Run parameters.
    pub seed: u64,
    pub trials: u32,
    pub parallel: bool,
    pub players: Vec<String>,
    pub decisions_path: Option<String>,

    // Counters.
    pub games_planned: u64,
    pub games_completed: u64,
    pub mean_score: Option<f64>,
    pub finished_ts_ms: Option<u64>,
}

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

pub fn try_git_hash() -> Option<String> {
    use std::process::Command;

    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<RunManifestV1, NdjsonError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice::<RunManifestV1>(&bytes)?)
}

/// Write via a sibling `.json.tmp` file and rename, so readers never see a torn manifest.
pub fn write_manifest_atomic(path: impl AsRef<Path>, m: &RunManifestV1) -> Result<(), NdjsonError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(m)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub event_schema: u32,
    pub ruleset_id: &'static str,
}

impl Default for VersionInfoV1 {
    fn default() -> Self {
        Self {
            event_schema: EVENT_SCHEMA_VERSION,
            ruleset_id: RULESET_ID,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateV1 {
    pub category: String,
    /// Redrawn die positions.
    pub reroll: Vec<usize>,
    pub value: f64,
}

/// One planner decision (one per draw).
#[derive(Debug, Clone, Serialize)]
pub struct TurnDecisionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub player: String,
    pub turn: u32,
    pub roll_number: u8,
    pub dice: [u8; 5],
    pub score_before: u32,

    pub category: String,
    pub reroll: Vec<usize>,
    pub end_turn: bool,
    pub candidates: Vec<CandidateV1>,
}

impl TurnDecisionEventV1 {
    pub const EVENT: &'static str = "turn_decision";
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerResultV1 {
    pub player: String,
    pub total: u32,
    pub upper_total: u32,
    pub upper_bonus: u32,
    pub lower_total: u32,
    pub yahtzee_bonus_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameFinishedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub seed: u64,
    pub turns: u32,
    pub results: Vec<PlayerResultV1>,
    pub winners: Vec<String>,
}

impl GameFinishedEventV1 {
    pub const EVENT: &'static str = "game_finished";
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Parse every complete JSON line, skipping blanks and a torn trailing line.
pub fn read_ndjson_lenient(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect())
}
