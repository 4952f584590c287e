use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::bank::WordBank;
use crate::clock::{Countdown, Tick};
use crate::corpus::{self, Corpus, Quote};
use crate::stats::{self, RealStats};
use crate::time_series::GraphPoint;
use crate::token::Cursor;
use crate::vibe::{self, DisplayStats};

/// Words a zen session starts with; extension keeps it open-ended.
const ZEN_INITIAL_WORDS: usize = 100;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TestMode {
    Words,
    Time,
    Quote,
    Zen,
}

impl TestMode {
    /// Finite modes end on the last word; time and zen end only via the
    /// countdown or an explicit finish.
    pub fn is_finite(&self) -> bool {
        matches!(self, TestMode::Words | TestMode::Quote)
    }

    /// Modes whose word bank extends ahead of the cursor.
    pub fn extends(&self) -> bool {
        matches!(self, TestMode::Time | TestMode::Zen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Backspace,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeKind {
    Input,
    System,
}

/// Append-only log entry. Used for duration and cadence measurements,
/// never replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub at: Instant,
    pub key: Key,
    pub kind: KeystrokeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionParams {
    pub mode: TestMode,
    pub duration_secs: u64,
    pub number_of_words: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            mode: TestMode::Time,
            duration_secs: 30,
            number_of_words: 200,
        }
    }
}

/// The authoritative model of one typing test. All mutation flows through
/// the methods below, driven by the single event-loop thread; rendering
/// only ever holds a shared reference.
#[derive(Debug)]
pub struct Session {
    pub status: Status,
    pub params: SessionParams,
    pub bank: WordBank,
    pub cursor: Cursor,
    pub started_at: Option<Instant>,
    pub ended_at: Option<Instant>,
    pub keystrokes: Vec<Keystroke>,
    /// True metrics, computed once at completion. Diagnostic only.
    pub real: Option<RealStats>,
    /// What the results screen shows.
    pub display: Option<DisplayStats>,
    pub graph: Vec<GraphPoint>,
    pub countdown: Option<Countdown>,
    pub quote: Option<Quote>,
    composing: bool,
    corpus: Corpus,
}

impl Session {
    pub fn new(params: SessionParams, corpus: Corpus) -> Self {
        let (bank, countdown, quote) = Self::build(&params, &corpus);
        Self {
            status: Status::Idle,
            params,
            bank,
            cursor: Cursor::default(),
            started_at: None,
            ended_at: None,
            keystrokes: Vec::new(),
            real: None,
            display: None,
            graph: Vec::new(),
            countdown,
            quote,
            composing: false,
            corpus,
        }
    }

    fn build(
        params: &SessionParams,
        corpus: &Corpus,
    ) -> (WordBank, Option<Countdown>, Option<Quote>) {
        match params.mode {
            TestMode::Words => (
                WordBank::fixed(corpus.tokens(params.number_of_words)),
                None,
                None,
            ),
            TestMode::Time => (
                WordBank::budgeted(corpus, params.duration_secs),
                Some(Countdown::from_secs(params.duration_secs)),
                None,
            ),
            TestMode::Quote => {
                let quote = corpus::random_quote();
                let tokens = quote
                    .text
                    .split_whitespace()
                    .map(crate::token::WordToken::new)
                    .collect();
                (WordBank::fixed(tokens), None, Some(quote))
            }
            TestMode::Zen => (WordBank::open(corpus, ZEN_INITIAL_WORDS), None, None),
        }
    }

    pub fn mode(&self) -> TestMode {
        self.params.mode
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// Time left in a timed session, the full duration before the first
    /// keystroke, None in untimed modes.
    pub fn remaining(&self) -> Option<Duration> {
        self.countdown
            .as_ref()
            .map(|cd| cd.remaining(Instant::now()))
    }

    /// Explicit Idle -> Running transition; also pins the countdown
    /// deadline in time mode. Any other state is left alone.
    pub fn start_if_idle(&mut self) {
        if self.status != Status::Idle {
            return;
        }
        let now = Instant::now();
        self.status = Status::Running;
        self.started_at = Some(now);
        if let Some(cd) = &mut self.countdown {
            cd.start(now);
        }
    }

    /// Process one typed character. Starts an idle session, compares
    /// against the target word, records extras past the end, advances the
    /// letter cursor. Never advances the word cursor. No-op when done or
    /// while an IME composition is active.
    pub fn type_char(&mut self, ch: char) {
        if self.status == Status::Done || self.composing {
            return;
        }
        self.start_if_idle();

        if self.mode().extends() {
            self.bank.extend_if_needed(self.cursor.word, &self.corpus);
        }
        let letter = self.cursor.letter;
        let Some(word) = self.bank.word_mut(self.cursor.word) else {
            return;
        };
        word.type_char_at(letter, ch);
        self.cursor.letter += 1;
        self.keystrokes.push(Keystroke {
            at: Instant::now(),
            key: Key::Char(ch),
            kind: KeystrokeKind::Input,
        });
    }

    /// Commit the current word and move on. Words are never retried, and
    /// an untouched word may be skipped. In finite modes, committing the
    /// last word finalizes the test instead.
    pub fn commit_space(&mut self) {
        if self.status != Status::Running || self.composing {
            return;
        }
        self.keystrokes.push(Keystroke {
            at: Instant::now(),
            key: Key::Space,
            kind: KeystrokeKind::Input,
        });

        if self.mode().is_finite() && self.bank.is_last(self.cursor.word) {
            self.finish();
            return;
        }
        if self.mode().extends() {
            self.bank
                .extend_if_needed(self.cursor.word + 1, &self.corpus);
        }
        self.cursor = Cursor {
            word: self.cursor.word + 1,
            letter: 0,
        };
    }

    /// Undo one position. Inside a word this reverts the last typed
    /// character (removing a trailing extra outright). At a word boundary
    /// the cursor moves back to the end of the previous word's typed text
    /// without deleting anything. At the origin, nothing happens.
    pub fn backspace(&mut self) {
        if self.status != Status::Running || self.composing {
            return;
        }
        if self.cursor.letter > 0 {
            let freed = self.cursor.letter - 1;
            let Some(word) = self.bank.word_mut(self.cursor.word) else {
                return;
            };
            if word.erase_at(freed) {
                self.cursor.letter -= 1;
                self.keystrokes.push(Keystroke {
                    at: Instant::now(),
                    key: Key::Backspace,
                    kind: KeystrokeKind::Input,
                });
            }
        } else if self.cursor.word > self.bank.first_index() {
            let prev = self.cursor.word - 1;
            let letter = self.bank.word(prev).map(|w| w.typed_len()).unwrap_or(0);
            self.cursor = Cursor { word: prev, letter };
            self.keystrokes.push(Keystroke {
                at: Instant::now(),
                key: Key::Backspace,
                kind: KeystrokeKind::Input,
            });
        }
    }

    /// Finalize a running test: stop the clock, stamp the end, compute
    /// real stats, then fabricate the display stats and graph from them.
    /// A no-op in any other state, so a late timer callback is harmless.
    pub fn finish(&mut self) {
        if self.status != Status::Running {
            return;
        }
        let now = Instant::now();
        if let Some(cd) = &mut self.countdown {
            cd.stop();
        }
        self.status = Status::Done;
        self.ended_at = Some(now);
        self.keystrokes.push(Keystroke {
            at: now,
            key: Key::Stop,
            kind: KeystrokeKind::System,
        });

        let real = stats::compute(self);
        let display = vibe::to_display_stats(&real);
        self.graph = vibe::graph(&display);
        self.real = Some(real);
        self.display = Some(display);
    }

    /// Throw the current test away and rebuild for the same parameters:
    /// fresh words, cursor at origin, clock stopped and re-armed, stats
    /// gone, status idle.
    pub fn restart(&mut self) {
        if let Some(cd) = &mut self.countdown {
            cd.stop();
        }
        let (bank, countdown, quote) = Self::build(&self.params, &self.corpus);
        self.bank = bank;
        self.countdown = countdown;
        self.quote = quote;
        self.status = Status::Idle;
        self.cursor = Cursor::default();
        self.started_at = None;
        self.ended_at = None;
        self.keystrokes.clear();
        self.real = None;
        self.display = None;
        self.graph.clear();
        self.composing = false;
    }

    /// Restart under new parameters (mode or duration change).
    pub fn restart_with(&mut self, params: SessionParams) {
        self.params = params;
        self.restart();
    }

    /// Drive the countdown. A Finished edge ends the test; inert ticks
    /// (untimed modes, stopped clock, stray callbacks) do nothing.
    pub fn on_tick(&mut self) {
        let outcome = match &mut self.countdown {
            Some(cd) => cd.tick(Instant::now()),
            None => Tick::Inert,
        };
        if outcome == Tick::Finished {
            self.finish();
        }
    }

    /// IME composition gate: while active, character processing is
    /// suppressed entirely rather than partially applied.
    pub fn set_composing(&mut self, composing: bool) {
        self.composing = composing;
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }
}
