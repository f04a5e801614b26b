use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::game::SessionScore;

/// confy app name; the whole ledger lives in this one config document.
const APP_NAME: &str = "fiddler";

/// How many past sessions the board remembers.
pub const MAX_RECORDS: usize = 3;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    /// Percentage of correct answers, 0..=100.
    pub score: f64,
    pub correct: u32,
    pub total: u32,
    /// ISO-8601, e.g. "2026-08-06T18:02:11Z".
    pub date: String,
}

impl ScoreRecord {
    pub fn from_session(score: SessionScore, now: DateTime<Utc>) -> Self {
        let percentage = if score.total > 0 {
            100.0 * f64::from(score.correct) / f64::from(score.total)
        } else {
            0.0
        };
        Self {
            score: percentage,
            correct: score.correct,
            total: score.total,
            date: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct HighScores {
    pub records: Vec<ScoreRecord>,
}

impl HighScores {
    /// Anything missing or unreadable on disk is just an empty board.
    pub fn load() -> Self {
        confy::load(APP_NAME, None).unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(err) = confy::store(APP_NAME, None, self) {
            log::warn!("could not save high scores: {err}");
        }
    }

    /// Add a session result, keeping the list sorted best-first by
    /// (score, total) and capped at [`MAX_RECORDS`]. Stable, so equal
    /// results stay in the order they were earned.
    pub fn insert(&mut self, record: ScoreRecord) {
        self.records.push(record);
        self.records.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(b.total.cmp(&a.total))
        });
        self.records.truncate(MAX_RECORDS);
    }
}
