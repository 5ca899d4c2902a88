//! Score store — persisted ranked list of (name, score) pairs.
//!
//! Plain-text file next to the executable, one `name,score` per line,
//! rewritten in full on every save, sorted descending by score. A missing
//! file is an empty board; malformed lines are skipped. The file is
//! accessed as a whole-file read-modify-write with no concurrent-writer
//! protection (single local player).

use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// FILE I/O
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn default_score_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("highscores.txt")
}

#[cfg(target_arch = "wasm32")]
fn default_score_path() -> PathBuf {
    PathBuf::from("highscores.txt")
}

/// Read all score entries from `path`. A missing or unreadable file is an
/// empty board; lines that don't parse are skipped, never fatal.
pub fn load_scores(path: &Path) -> Vec<ScoreEntry> {
    let text = match read_score_file(path) {
        Ok(text) => text,
        Err(err) => {
            info!("[Scores] No score file loaded ({}). Starting empty.", err);
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Split on the LAST comma so a name that itself contains a comma
        // (written unescaped) still parses. The format stays a documented
        // malformed-input risk either way.
        let Some((name, score)) = line.rsplit_once(',') else {
            warn!("[Scores] Skipping malformed line: {:?}", line);
            continue;
        };
        let Ok(score) = score.trim().parse::<u32>() else {
            warn!("[Scores] Skipping line with bad score: {:?}", line);
            continue;
        };
        entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
    }
    entries
}

/// The 1-based rank a candidate score WOULD receive if appended and the
/// list were stable-sorted descending. Ties place the candidate after all
/// existing equal scores (it is appended before the stable sort).
pub fn rank_for(entries: &[ScoreEntry], candidate: u32) -> usize {
    entries.iter().filter(|e| e.score >= candidate).count() + 1
}

/// Append `(name, score)`, re-sort descending, rewrite the whole file
/// (unbounded — only the top 5 are ever displayed), and return the new
/// rank of the exact pair, scanning from the top. `entries` is replaced
/// only if the write succeeds.
pub fn save_score(
    path: &Path,
    entries: &mut Vec<ScoreEntry>,
    name: &str,
    score: u32,
) -> Result<usize, String> {
    let mut updated = entries.clone();
    updated.push(ScoreEntry {
        name: name.to_string(),
        score,
    });
    // Stable sort: equal scores keep insertion/file order.
    updated.sort_by(|a, b| b.score.cmp(&a.score));

    let mut text = String::new();
    for entry in &updated {
        text.push_str(&entry.name);
        text.push(',');
        text.push_str(&entry.score.to_string());
        text.push('\n');
    }
    write_score_file(path, &text)?;

    let rank = updated
        .iter()
        .position(|e| e.name == name && e.score == score)
        .map(|i| i + 1)
        .unwrap_or(updated.len());

    *entries = updated;
    Ok(rank)
}

/// Trim and validate a candidate name: non-empty, at most 12 printable
/// characters. Returns the trimmed name.
pub fn validate_name(raw: &str) -> Result<String, CommandError> {
    let name = raw.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(CommandError::InvalidName);
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(CommandError::InvalidName);
    }
    Ok(name.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_score_file(path: &Path) -> Result<String, String> {
    if !path.exists() {
        return Err(format!("{} does not exist", path.display()));
    }
    fs::read_to_string(path).map_err(|e| format!("Read failed for {}: {}", path.display(), e))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_score_file(path: &Path, text: &str) -> Result<(), String> {
    // Write to a temp file first, then rename for atomicity.
    let tmp_path = path.with_extension("txt.tmp");
    fs::write(&tmp_path, text)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn read_score_file(_path: &Path) -> Result<String, String> {
    Err("no score persistence on wasm".to_string())
}

#[cfg(target_arch = "wasm32")]
fn write_score_file(_path: &Path, _text: &str) -> Result<(), String> {
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// SCOREBOARD RESOURCE
// ═══════════════════════════════════════════════════════════════════════

/// A won run's score awaiting (possible) name entry.
#[derive(Debug, Clone, Copy)]
pub struct PendingScore {
    pub score: u32,
    /// The rank this score would receive among the persisted entries.
    pub rank: usize,
}

/// The persisted scoreboard plus this run's entry state. Outlives any
/// single run; `clear_run` only resets the per-run fields.
#[derive(Resource, Debug)]
pub struct ScoreBoard {
    path: PathBuf,
    pub entries: Vec<ScoreEntry>,
    pub pending: Option<PendingScore>,
    /// Rank actually saved this run. Set once; blocks a second save.
    pub saved_rank: Option<usize>,
    /// Last save failure, surfaced as "score not saved" in the UI.
    pub save_error: Option<String>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::at_path(default_score_path())
    }
}

impl ScoreBoard {
    pub fn at_path(path: PathBuf) -> Self {
        let entries = load_scores(&path);
        info!(
            "[Scores] Loaded {} entries from {}",
            entries.len(),
            path.display()
        );
        Self {
            path,
            entries,
            pending: None,
            saved_rank: None,
            save_error: None,
        }
    }

    /// Record the final score of a won run and compute its would-be rank.
    pub fn begin_pending(&mut self, score: u32) {
        let rank = rank_for(&self.entries, score);
        info!("[Scores] Final score {} would rank #{}", score, rank);
        self.pending = Some(PendingScore { score, rank });
    }

    /// Name entry is open only for a won run whose rank makes the top 5
    /// and that has not been saved yet.
    pub fn can_enter_name(&self) -> bool {
        self.saved_rank.is_none()
            && self
                .pending
                .map(|p| p.rank <= SCOREBOARD_DISPLAY)
                .unwrap_or(false)
    }

    /// Validate, persist, and record this run's score under `raw` name.
    /// Callers must check `can_enter_name` first; a successful save sets
    /// `saved_rank` so a repeat submit is a no-op upstream.
    ///
    /// Returns `Ok(Some(rank))` on success and `Ok(None)` when the write
    /// failed — that case is non-fatal, surfaced through `save_error`, and
    /// leaves the in-memory entries untouched so the player may retry.
    pub fn submit(&mut self, raw: &str) -> Result<Option<usize>, CommandError> {
        let name = validate_name(raw)?;
        let Some(pending) = self.pending else {
            return Err(CommandError::InvalidName);
        };
        match save_score(&self.path, &mut self.entries, &name, pending.score) {
            Ok(rank) => {
                info!("[Scores] Saved {:?} with {} at rank #{}", name, pending.score, rank);
                self.saved_rank = Some(rank);
                self.save_error = None;
                Ok(Some(rank))
            }
            Err(err) => {
                warn!("[Scores] Score not saved: {}", err);
                self.save_error = Some(err);
                Ok(None)
            }
        }
    }

    /// Top entries for display.
    pub fn top(&self) -> &[ScoreEntry] {
        &self.entries[..self.entries.len().min(SCOREBOARD_DISPLAY)]
    }

    /// Drop this run's pending/saved state. Persisted entries survive.
    pub fn clear_run(&mut self) {
        self.pending = None;
        self.saved_rank = None;
        self.save_error = None;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct ScoresPlugin;

impl Plugin for ScoresPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>().add_systems(
            Update,
            (on_game_ended, handle_submit_name, on_reset),
        );
    }
}

/// When a run is won, compute the would-be rank so the end screen knows
/// whether to open name entry.
fn on_game_ended(
    mut events: EventReader<GameEndedEvent>,
    mut scoreboard: ResMut<ScoreBoard>,
) {
    for ev in events.read() {
        if ev.won {
            scoreboard.begin_pending(ev.final_score);
        }
    }
}

/// Apply a name submission. Ignored unless the run is won, rank-eligible,
/// and no score has been saved yet this run.
fn handle_submit_name(
    mut events: EventReader<SubmitNameCommand>,
    mut scoreboard: ResMut<ScoreBoard>,
) {
    for ev in events.read() {
        if !scoreboard.can_enter_name() {
            debug!("[Scores] Ignoring name submit: not eligible or already saved");
            continue;
        }
        if let Err(err) = scoreboard.submit(&ev.text) {
            debug!("[Scores] Name submit rejected: {:?}", err);
        }
    }
}

fn on_reset(mut events: EventReader<ResetCommand>, mut scoreboard: ResMut<ScoreBoard>) {
    if events.read().next().is_some() {
        scoreboard.clear_run();
    }
}
