use itertools::Itertools;

use crate::session::{KeystrokeKind, Session, TestMode};
use crate::token::{LetterState, WordToken};
use crate::util::{mean, round2, std_dev};

/// Character-level tally over the word sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharTally {
    pub correct: usize,
    pub incorrect: usize,
    pub extra: usize,
    /// Target positions never reached in committed words.
    pub missed: usize,
    /// Everything typed, extras included.
    pub total: usize,
}

impl CharTally {
    pub fn add_word(&mut self, word: &WordToken) {
        for state in &word.letters {
            match state {
                LetterState::Correct => self.correct += 1,
                LetterState::Wrong => self.incorrect += 1,
                LetterState::Extra => self.extra += 1,
                LetterState::Pending => {}
            }
        }
        self.total += word.typed_len();
    }
}

/// True performance metrics, computed once a session is done. Internal
/// and diagnostic only; the results screen renders `DisplayStats` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RealStats {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub duration_sec: f64,
    pub mode: TestMode,
    pub chars: CharTally,
}

/// Derive real statistics from a completed session. Degenerate inputs
/// (zero duration, nothing typed) yield zero rates and 100% accuracy
/// rather than division errors.
pub fn compute(session: &Session) -> RealStats {
    let duration_sec = match (session.started_at, session.ended_at) {
        (Some(start), Some(end)) => end.saturating_duration_since(start).as_secs_f64(),
        _ => 0.0,
    };

    let mut chars = *session.bank.retired();
    for (idx, word) in session.bank.words() {
        chars.add_word(word);
        if idx < session.cursor.word {
            chars.missed += word.target_len().saturating_sub(word.typed_len());
        }
    }

    let accuracy = if chars.total == 0 {
        100.0
    } else {
        chars.correct as f64 / chars.total as f64 * 100.0
    };

    let minutes = duration_sec / 60.0;
    let (wpm, raw_wpm) = if duration_sec > 0.0 {
        (
            (chars.correct as f64 / 5.0) / minutes,
            (chars.total as f64 / 5.0) / minutes,
        )
    } else {
        (0.0, 0.0)
    };

    let consistency = match session.started_at {
        Some(start) => {
            let per_second: Vec<f64> = session
                .keystrokes
                .iter()
                .filter(|k| k.kind == KeystrokeKind::Input)
                .map(|k| k.at.saturating_duration_since(start).as_secs())
                .counts()
                .into_iter()
                .sorted_by_key(|(second, _)| *second)
                .map(|(_, n)| n as f64)
                .collect();
            cadence_consistency(&per_second)
        }
        None => 100.0,
    };

    RealStats {
        wpm: round2(wpm),
        raw_wpm: round2(raw_wpm),
        accuracy: round2(accuracy),
        consistency: round2(consistency),
        duration_sec: round2(duration_sec),
        mode: session.mode(),
        chars,
    }
}

/// 100 when the per-second keystroke cadence is perfectly even, falling
/// toward 0 as the coefficient of variation grows. Under two seconds of
/// data there is nothing to measure.
fn cadence_consistency(per_second: &[f64]) -> f64 {
    if per_second.len() < 2 {
        return 100.0;
    }
    match (mean(per_second), std_dev(per_second)) {
        (Some(m), Some(sd)) if m > 0.0 => (1.0 - sd / m).clamp(0.0, 1.0) * 100.0,
        _ => 100.0,
    }
}
